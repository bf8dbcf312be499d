//! Horizontal integer slider.

use crate::assets::SoundCue;
use crate::geometry::{clamp01, Rect};
use crate::render::Surface;
use crate::scene::{Callback, EventCtx, Node, PointerEvent, Widget};
use crate::style::Theme;

/// Height of the track bar.
const TRACK_HEIGHT: f32 = 8.0;

/// Integer slider over `[min, max]`.
///
/// Pressing snaps the value to the pointer and starts a drag; moves re-snap
/// while dragging; release ends the drag. The handler fires on every snap.
pub struct Slider {
    min: i32,
    max: i32,
    value: i32,
    dragging: bool,
    /// Thumb width.
    pub thumb_width: f32,
    on_change: Option<Callback<i32>>,
}

impl Slider {
    /// Default node width.
    pub const WIDTH: f32 = 200.0;
    /// Default node height.
    pub const HEIGHT: f32 = 30.0;
    /// Default thumb width.
    pub const THUMB_WIDTH: f32 = 16.0;

    /// Creates a slider. `min > max` is a caller error.
    #[must_use]
    pub fn new(min: i32, max: i32, value: i32) -> Self {
        Self {
            min,
            max,
            value,
            dragging: false,
            thumb_width: Self::THUMB_WIDTH,
            on_change: None,
        }
    }

    /// Sets the value handler.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(&mut EventCtx<'_>, i32) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.value
    }

    /// Sets the value, clamped into range, without firing the handler.
    pub fn set_value(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max.max(self.min));
    }

    /// Range bounds.
    #[must_use]
    pub const fn range(&self) -> (i32, i32) {
        (self.min, self.max)
    }

    /// True while the thumb is being dragged.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Value position in `[0, 1]`.
    #[must_use]
    pub fn normalized(&self) -> f32 {
        if self.max == self.min {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = (self.value - self.min) as f32 / (self.max - self.min) as f32;
        clamp01(ratio)
    }

    /// Maps a node-local X to a value: `round(min + clamp01(x / width) * (max - min))`.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn value_at(&self, local_x: f32, width: f32) -> i32 {
        let ratio = if width > 0.0 { clamp01(local_x / width) } else { 0.0 };
        let span = (self.max - self.min) as f32;
        (self.min as f32 + ratio * span).round() as i32
    }

    fn snap(&mut self, node: &Node, local_x: f32, ctx: &mut EventCtx<'_>) {
        self.value = self.value_at(local_x, node.width);
        let value = self.value;
        if let Some(handler) = self.on_change.as_mut() {
            handler(ctx, value);
        }
    }
}

impl Widget for Slider {
    fn initial_node(&self) -> Node {
        Node::new(Self::WIDTH, Self::HEIGHT).with_interactive(true)
    }

    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let colors = &theme.colors;
        let track_y = node.height / 2.0 - TRACK_HEIGHT / 2.0;
        let thumb_x = self.normalized() * (node.width - self.thumb_width);

        surface.fill_rect(Rect::new(0.0, track_y, node.width, TRACK_HEIGHT), colors.track);
        surface.fill_rect(Rect::new(0.0, track_y, thumb_x + self.thumb_width / 2.0, TRACK_HEIGHT), colors.track_fill);

        let thumb = Rect::new(thumb_x, 4.0, self.thumb_width, node.height - 8.0);
        let fill = if self.dragging { colors.accent_hot } else { colors.accent };
        surface.fill_round_rect(thumb, fill, 4.0);
        surface.stroke_round_rect(thumb, colors.border, 2.0, 4.0);
    }

    fn on_pointer_down(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        self.dragging = true;
        self.snap(node, event.local.x, ctx);
    }

    fn on_pointer_move(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        if self.dragging {
            self.snap(node, event.local.x, ctx);
        }
    }

    fn on_pointer_up(&mut self, _node: &mut Node, _event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        if self.dragging {
            ctx.play(SoundCue::Click);
        }
        self.dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{NullAudio, RecordingAudio};

    #[test]
    fn test_press_snaps_to_pointer() {
        let mut slider = Slider::new(0, 9, 3);
        let mut node = slider.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        slider.on_pointer_down(&mut node, &PointerEvent::at(100.0, 15.0), &mut ctx);
        // 0 + 0.5 * 9 = 4.5, rounds away from zero
        assert_eq!(slider.value(), 5);
        assert!(slider.is_dragging());

        slider.on_pointer_move(&mut node, &PointerEvent::at(-40.0, 15.0), &mut ctx);
        assert_eq!(slider.value(), 0);

        slider.on_pointer_move(&mut node, &PointerEvent::at(900.0, 15.0), &mut ctx);
        assert_eq!(slider.value(), 9);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut slider = Slider::new(10, 20, 12);
        let mut node = slider.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        slider.on_pointer_move(&mut node, &PointerEvent::at(200.0, 15.0), &mut ctx);
        assert_eq!(slider.value(), 12);
    }

    #[test]
    fn test_release_ends_drag_with_click() {
        let mut slider = Slider::new(10, 20, 12);
        let mut node = slider.initial_node();
        let audio = RecordingAudio::new();
        let mut ctx = EventCtx::new(&audio);

        slider.on_pointer_up(&mut node, &PointerEvent::at(0.0, 0.0), &mut ctx);
        assert!(audio.cues().is_empty());

        slider.on_pointer_down(&mut node, &PointerEvent::at(50.0, 15.0), &mut ctx);
        slider.on_pointer_up(&mut node, &PointerEvent::at(50.0, 15.0), &mut ctx);

        assert_eq!(slider.value(), 13);
        assert!(!slider.is_dragging());
        assert_eq!(audio.cues(), vec![SoundCue::Click]);
    }

    #[test]
    fn test_set_value_clamps() {
        let mut slider = Slider::new(1, 5, 1);
        slider.set_value(99);
        assert_eq!(slider.value(), 5);
        assert_eq!(slider.normalized(), 1.0);
    }
}
