//! Paint surface.
//!
//! Widgets paint into a [`Surface`], an immediate-mode 2D context that
//! records [`RenderCommand`]s instead of rasterizing. The host replays the
//! command list onto whatever backend it owns (canvas, GPU, software).
//!
//! The surface keeps a translate/alpha/clip state stack. Coordinates passed
//! to drawing calls are local to the current translation; recorded commands
//! are in absolute canvas coordinates with the current alpha already folded
//! into every color.

use crate::assets::ImageHandle;
use crate::geometry::{Point, Rect};
use crate::style::{Color, FontSpec, GradientStop};

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Anchor at the left edge.
    #[default]
    Left,
    /// Anchor at the center.
    Center,
    /// Anchor at the right edge.
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    /// Anchor at the top of the em box.
    #[default]
    Top,
    /// Anchor at the middle of the em box.
    Middle,
    /// Anchor at the bottom of the em box.
    Bottom,
}

/// A recorded paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    FillRect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Rectangle outline.
    StrokeRect {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Vertical linear gradient filling a rectangle.
    Gradient {
        /// Bounds.
        bounds: Rect,
        /// Stops, top to bottom.
        stops: Vec<GradientStop>,
    },
    /// Filled polygon.
    FillPolygon {
        /// Vertices.
        points: Vec<Point>,
        /// Fill color.
        color: Color,
    },
    /// Open polyline.
    Polyline {
        /// Vertices.
        points: Vec<Point>,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
    },
    /// Single line of text.
    Text {
        /// Text content.
        text: String,
        /// Anchor X.
        x: f32,
        /// Anchor Y.
        y: f32,
        /// Font.
        font: FontSpec,
        /// Text color.
        color: Color,
        /// Horizontal anchor.
        align: TextAlign,
        /// Vertical anchor.
        baseline: TextBaseline,
    },
    /// Image blit with source cropping.
    Image {
        /// Image to draw.
        image: ImageHandle,
        /// Source rectangle in image pixels.
        src: Rect,
        /// Destination rectangle.
        dest: Rect,
        /// Opacity.
        alpha: f32,
    },
    /// Scissor rect (clip following commands).
    PushClip {
        /// Clip bounds, already intersected with the enclosing clip.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
}

/// Text measurement used for caret placement and wrapping.
pub trait TextMetrics {
    /// Returns the advance width of `text` in `font`.
    fn measure(&self, font: &FontSpec, text: &str) -> f32;
}

/// Fixed-ratio width estimate for hosts without real font metrics.
#[derive(Debug, Clone, Copy)]
pub struct EstimatedMetrics {
    /// Average glyph advance as a fraction of font size.
    pub advance: f32,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self { advance: 0.55 }
    }
}

impl TextMetrics for EstimatedMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, font: &FontSpec, text: &str) -> f32 {
        let advance = if font.bold { self.advance * 1.1 } else { self.advance };
        text.chars().count() as f32 * font.size * advance
    }
}

/// One entry of the save/restore stack.
#[derive(Debug, Clone, Copy)]
struct PaintState {
    origin: Point,
    alpha: f32,
    clip_depth: usize,
}

impl PaintState {
    const ROOT: Self = Self {
        origin: Point::ZERO,
        alpha: 1.0,
        clip_depth: 0,
    };
}

/// Command-recording paint context.
pub struct Surface {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
    /// Current state.
    state: PaintState,
    /// Saved states.
    saved: Vec<PaintState>,
    /// Clip stack in canvas coordinates.
    clip_stack: Vec<Rect>,
    /// Text measurement backend.
    metrics: Box<dyn TextMetrics>,
}

impl Surface {
    /// Creates a surface using [`EstimatedMetrics`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(Box::new(EstimatedMetrics::default()))
    }

    /// Creates a surface with host-provided text metrics.
    #[must_use]
    pub fn with_metrics(metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            state: PaintState::ROOT,
            saved: Vec::with_capacity(32),
            clip_stack: Vec::with_capacity(16),
            metrics,
        }
    }

    /// Begins a new frame, dropping any recorded commands and state.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.saved.clear();
        self.clip_stack.clear();
        self.state = PaintState::ROOT;
    }

    /// Pushes the current translate/alpha/clip state.
    pub fn save(&mut self) {
        self.saved.push(self.state);
    }

    /// Restores the last saved state, popping any clips pushed since.
    pub fn restore(&mut self) {
        let Some(state) = self.saved.pop() else {
            return;
        };
        while self.clip_stack.len() > state.clip_depth {
            self.pop_clip();
        }
        self.state = state;
    }

    /// Moves the origin by `(dx, dy)`.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.state.origin = self.state.origin.offset(dx, dy);
    }

    /// Multiplies the current alpha by `factor`.
    pub fn multiply_alpha(&mut self, factor: f32) {
        self.state.alpha *= factor.clamp(0.0, 1.0);
    }

    /// Current origin in canvas coordinates.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.state.origin
    }

    /// Current alpha.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.state.alpha
    }

    fn to_canvas(&self, rect: Rect) -> Rect {
        rect.translate(self.state.origin.x, self.state.origin.y)
    }

    fn tint(&self, color: Color) -> Color {
        color.fade(self.state.alpha)
    }

    /// Fills a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_round_rect(rect, color, 0.0);
    }

    /// Fills a rounded rectangle.
    pub fn fill_round_rect(&mut self, rect: Rect, color: Color, corner_radius: f32) {
        self.commands.push(RenderCommand::FillRect {
            bounds: self.to_canvas(rect),
            color: self.tint(color),
            corner_radius,
        });
    }

    /// Strokes a rectangle outline.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.stroke_round_rect(rect, color, width, 0.0);
    }

    /// Strokes a rounded rectangle outline.
    pub fn stroke_round_rect(&mut self, rect: Rect, color: Color, width: f32, corner_radius: f32) {
        self.commands.push(RenderCommand::StrokeRect {
            bounds: self.to_canvas(rect),
            color: self.tint(color),
            width,
            corner_radius,
        });
    }

    /// Fills a rectangle with a vertical gradient.
    pub fn fill_gradient(&mut self, rect: Rect, stops: &[GradientStop]) {
        let stops = stops
            .iter()
            .map(|stop| GradientStop::new(stop.offset, self.tint(stop.color)))
            .collect();
        self.commands.push(RenderCommand::Gradient {
            bounds: self.to_canvas(rect),
            stops,
        });
    }

    /// Fills a polygon.
    pub fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let origin = self.state.origin;
        self.commands.push(RenderCommand::FillPolygon {
            points: points.iter().map(|p| p.offset(origin.x, origin.y)).collect(),
            color: self.tint(color),
        });
    }

    /// Strokes an open polyline.
    pub fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f32) {
        let origin = self.state.origin;
        self.commands.push(RenderCommand::Polyline {
            points: points.iter().map(|p| p.offset(origin.x, origin.y)).collect(),
            color: self.tint(color),
            width,
        });
    }

    /// Draws one line of text anchored at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: Color,
        align: TextAlign,
        baseline: TextBaseline,
    ) {
        if text.is_empty() {
            return;
        }
        let origin = self.state.origin;
        self.commands.push(RenderCommand::Text {
            text: text.to_string(),
            x: origin.x + x,
            y: origin.y + y,
            font: font.clone(),
            color: self.tint(color),
            align,
            baseline,
        });
    }

    /// Blits `src` of `image` into `dest`.
    pub fn draw_image(&mut self, image: ImageHandle, src: Rect, dest: Rect) {
        self.commands.push(RenderCommand::Image {
            image,
            src,
            dest: self.to_canvas(dest),
            alpha: self.state.alpha,
        });
    }

    /// Pushes a clip rect, intersected with the current clip if any.
    pub fn push_clip(&mut self, rect: Rect) {
        let bounds = self.to_canvas(rect);
        let actual_clip = if let Some(current) = self.clip_stack.last() {
            current.intersection(&bounds).unwrap_or(Rect::new(bounds.x, bounds.y, 0.0, 0.0))
        } else {
            bounds
        };

        self.clip_stack.push(actual_clip);
        self.commands.push(RenderCommand::PushClip { bounds: actual_clip });
    }

    /// Pops the current clip rect.
    pub fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_some() {
            self.commands.push(RenderCommand::PopClip);
        }
    }

    /// Returns the current clip rect in canvas coordinates.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Measures `text` with the surface's metrics.
    #[must_use]
    pub fn measure_text(&self, font: &FontSpec, text: &str) -> f32 {
        self.metrics.measure(font, text)
    }

    /// Returns the text metrics backend.
    #[must_use]
    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Ends the frame and hands the recorded commands to the caller.
    pub fn finish(&mut self) -> Vec<RenderCommand> {
        while !self.clip_stack.is_empty() {
            self.pop_clip();
        }
        self.saved.clear();
        self.state = PaintState::ROOT;
        std::mem::take(&mut self.commands)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}
