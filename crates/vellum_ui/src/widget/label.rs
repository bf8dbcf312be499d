//! Static text.

use std::borrow::Cow;

use crate::render::{Surface, TextAlign, TextBaseline};
use crate::scene::{Node, Widget};
use crate::style::{Color, FontKey, Theme};

/// Line spacing as a multiple of the font size when wrapping.
const LINE_SPACING: f32 = 1.25;

/// One line (or a wrapped block) of text anchored inside the node.
///
/// The anchor follows `align` and `baseline`: centered text is drawn at
/// `width / 2`, bottom-aligned text at `height`, and so on.
#[derive(Debug, Clone)]
pub struct Label {
    /// Text to draw.
    pub text: Cow<'static, str>,
    /// Font slot.
    pub font: FontKey,
    /// Text color; `None` uses the theme's text (or highlight) color.
    pub color: Option<Color>,
    /// Use the theme's highlight color instead of the text color.
    pub highlight: bool,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Vertical anchor.
    pub baseline: TextBaseline,
    /// Draw a drop shadow under the text.
    pub shadow: bool,
    /// Break words onto new lines at the node width.
    pub wrap: bool,
}

impl Label {
    /// Creates a body-font, top-left, shadowed label.
    #[must_use]
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            text: text.into(),
            font: FontKey::Body,
            color: None,
            highlight: false,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            shadow: true,
            wrap: false,
        }
    }

    /// Sets the font slot.
    #[must_use]
    pub fn with_font(mut self, font: FontKey) -> Self {
        self.font = font;
        self
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Draws in the theme's highlight color.
    #[must_use]
    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }

    /// Sets alignment and baseline.
    #[must_use]
    pub fn with_anchor(mut self, align: TextAlign, baseline: TextBaseline) -> Self {
        self.align = align;
        self.baseline = baseline;
        self
    }

    /// Enables word wrapping.
    #[must_use]
    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Replaces the text.
    pub fn set_text(&mut self, text: impl Into<Cow<'static, str>>) {
        self.text = text.into();
    }

    fn anchor(&self, node: &Node) -> (f32, f32) {
        let x = match self.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => node.width / 2.0,
            TextAlign::Right => node.width,
        };
        let y = match self.baseline {
            TextBaseline::Top => 0.0,
            TextBaseline::Middle => node.height / 2.0,
            TextBaseline::Bottom => node.height,
        };
        (x, y)
    }
}

/// Greedy word wrap: each line holds as many whole words as fit in `max_width`.
/// A single word wider than the limit gets a line of its own.
pub(crate) fn wrap_lines<'t>(text: &'t str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<Cow<'t, str>> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate = format!("{line} {word}");
            if measure(&candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(Cow::Owned(std::mem::take(&mut line)));
                line.push_str(word);
            }
        }
        lines.push(Cow::Owned(line));
    }
    lines
}

impl Widget for Label {
    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        if self.text.is_empty() {
            return;
        }
        let font = theme.font(self.font).clone();
        let color = self.color.unwrap_or(if self.highlight { theme.colors.highlight } else { theme.colors.text });
        let (x, y) = self.anchor(node);

        let lines = if self.wrap && node.width > 0.0 {
            wrap_lines(&self.text, node.width, |s| surface.measure_text(&font, s))
        } else {
            vec![Cow::Borrowed(self.text.as_ref())]
        };

        let step = font.size * LINE_SPACING;
        for (i, line) in lines.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let line_y = y + i as f32 * step;
            if self.shadow {
                let offset = theme.shadow_offset;
                surface.text(line, x + offset, line_y + offset, &font, theme.colors.text_shadow, self.align, self.baseline);
            }
            surface.text(line, x, line_y, &font, color, self.align, self.baseline);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderCommand;

    fn texts(commands: &[RenderCommand]) -> Vec<(String, f32, f32)> {
        commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_centered_anchor_with_shadow() {
        let label = Label::new("Title").with_anchor(TextAlign::Center, TextBaseline::Middle);
        let node = Node::new(600.0, 50.0);
        let mut surface = Surface::new();

        label.paint(&node, &mut surface, &Theme::CLASSIC);

        let drawn = texts(surface.commands());
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0], ("Title".to_string(), 302.0, 27.0));
        assert_eq!(drawn[1], ("Title".to_string(), 300.0, 25.0));
    }

    #[test]
    fn test_empty_text_draws_nothing() {
        let label = Label::new("");
        let mut surface = Surface::new();
        label.paint(&Node::new(10.0, 10.0), &mut surface, &Theme::CLASSIC);
        assert_eq!(surface.command_count(), 0);
    }

    #[test]
    fn test_wrap_lines_greedy() {
        let lines = wrap_lines("aa bb cc dd", 5.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);

        let lines = wrap_lines("enormousword x", 5.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["enormousword", "x"]);
    }

    #[test]
    fn test_wrapped_label_stacks_lines() {
        let mut label = Label::new("one two three").wrapped();
        label.shadow = false;
        // Body font is 18px at 0.55 advance: about 10px per glyph.
        let node = Node::new(80.0, 100.0);
        let mut surface = Surface::new();

        label.paint(&node, &mut surface, &Theme::CLASSIC);

        let drawn = texts(surface.commands());
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0].0, "one two");
        assert_eq!(drawn[1].0, "three");
        assert!(drawn[1].2 > drawn[0].2);
    }
}
