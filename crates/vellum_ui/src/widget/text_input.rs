//! Single-line text field.

use std::borrow::Cow;

use crate::animation::Blink;
use crate::geometry::Rect;
use crate::input::{Key, KeyInput};
use crate::render::{Surface, TextAlign, TextBaseline};
use crate::scene::{EventCtx, Node, PointerEvent, TextCallback, Widget};
use crate::style::{FontKey, Theme};

/// Horizontal inset of the text from the left edge.
const TEXT_INSET: f32 = 10.0;

/// Editable single-line text.
///
/// The caret is a character index, always within `[0, len]`. Edits happen
/// at the caret; input past `max_length` characters is dropped.
pub struct TextInput {
    text: String,
    /// Shown while the text is empty.
    pub placeholder: Cow<'static, str>,
    /// Maximum length in characters.
    pub max_length: usize,
    focused: bool,
    caret: usize,
    blink: Blink,
    on_change: Option<TextCallback>,
}

impl TextInput {
    /// Default node width.
    pub const WIDTH: f32 = 200.0;
    /// Default node height.
    pub const HEIGHT: f32 = 36.0;
    /// Default length cap.
    pub const MAX_LENGTH: usize = 50;

    /// Creates an empty field.
    #[must_use]
    pub fn new(placeholder: impl Into<Cow<'static, str>>) -> Self {
        Self {
            text: String::new(),
            placeholder: placeholder.into(),
            max_length: Self::MAX_LENGTH,
            focused: false,
            caret: 0,
            blink: Blink::new(),
            on_change: None,
        }
    }

    /// Sets the edit handler; it receives the whole new text.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(&mut EventCtx<'_>, &str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text (truncated to `max_length`) and clamps the caret.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(self.max_length).collect();
        self.caret = self.caret.min(self.len());
    }

    /// Caret position in characters.
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Returns true while the field has keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn changed(&mut self, ctx: &mut EventCtx<'_>) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(ctx, &self.text);
        }
    }

    fn edit(&mut self, key: &KeyInput, ctx: &mut EventCtx<'_>) {
        match key.key {
            Key::Backspace => {
                if self.caret > 0 {
                    let at = self.byte_index(self.caret - 1);
                    self.text.remove(at);
                    self.caret -= 1;
                    self.changed(ctx);
                }
            }
            Key::Delete => {
                if self.caret < self.len() {
                    let at = self.byte_index(self.caret);
                    self.text.remove(at);
                    self.changed(ctx);
                }
            }
            Key::Left => self.caret = self.caret.saturating_sub(1),
            Key::Right => self.caret = (self.caret + 1).min(self.len()),
            Key::Home => self.caret = 0,
            Key::End => self.caret = self.len(),
            Key::Enter | Key::Escape => {
                self.blur();
                ctx.release_focus();
            }
            _ => {
                let Some(c) = key.text.filter(|c| !c.is_control()) else {
                    return;
                };
                if self.len() < self.max_length {
                    let at = self.byte_index(self.caret);
                    self.text.insert(at, c);
                    self.caret += 1;
                    self.changed(ctx);
                }
            }
        }
    }
}

impl Widget for TextInput {
    fn initial_node(&self) -> Node {
        Node::new(Self::WIDTH, Self::HEIGHT).with_interactive(true)
    }

    fn update(&mut self, _node: &mut Node, dt: f32) {
        if self.focused {
            self.blink.update(dt);
        }
    }

    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let colors = &theme.colors;
        let bounds = node.local_bounds();
        let (fill, border) = if self.focused {
            (colors.field_focused, colors.accent)
        } else {
            (colors.field, colors.border)
        };
        surface.fill_round_rect(bounds, fill, 4.0);
        surface.stroke_round_rect(bounds, border, 2.0, 4.0);

        let font = theme.font(FontKey::Body);
        let (shown, color) = if self.text.is_empty() {
            (self.placeholder.as_ref(), colors.placeholder)
        } else {
            (self.text.as_str(), colors.text)
        };

        surface.save();
        surface.push_clip(Rect::new(8.0, 0.0, node.width - 16.0, node.height));
        surface.text(shown, TEXT_INSET, node.height / 2.0, font, color, TextAlign::Left, TextBaseline::Middle);
        surface.restore();

        if self.focused && self.blink.is_visible() {
            let before = &self.text[..self.byte_index(self.caret)];
            let x = TEXT_INSET + surface.measure_text(font, before);
            surface.fill_rect(Rect::new(x, 6.0, 2.0, node.height - 12.0), colors.accent);
        }
    }

    fn on_pointer_down(&mut self, _node: &mut Node, _event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        self.focus();
        self.caret = self.len();
        self.blink.reset();
        ctx.request_focus();
    }

    fn on_key_down(&mut self, _node: &mut Node, key: &KeyInput, ctx: &mut EventCtx<'_>) -> bool {
        if !self.focused {
            return false;
        }
        self.edit(key, ctx);
        self.blink.reset();
        true
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn blur(&mut self) {
        self.focused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullAudio;
    use crate::render::RenderCommand;
    use crate::scene::{Command, NodeId};

    fn focused_input() -> (TextInput, Node) {
        let mut input = TextInput::new("Team name");
        let node = input.initial_node();
        input.focus();
        (input, node)
    }

    fn type_str(input: &mut TextInput, node: &mut Node, text: &str, ctx: &mut EventCtx<'_>) {
        for c in text.chars() {
            input.on_key_down(node, &KeyInput::char(c), ctx);
        }
    }

    #[test]
    fn test_edits_at_caret() {
        let (mut input, mut node) = focused_input();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        type_str(&mut input, &mut node, "wrm", &mut ctx);
        input.on_key_down(&mut node, &KeyInput::key(Key::Left), &mut ctx);
        input.on_key_down(&mut node, &KeyInput::key(Key::Left), &mut ctx);
        type_str(&mut input, &mut node, "o", &mut ctx);
        assert_eq!(input.text(), "worm");
        assert_eq!(input.caret(), 2);

        input.on_key_down(&mut node, &KeyInput::key(Key::Delete), &mut ctx);
        assert_eq!(input.text(), "wom");

        input.on_key_down(&mut node, &KeyInput::key(Key::Home), &mut ctx);
        input.on_key_down(&mut node, &KeyInput::key(Key::Backspace), &mut ctx);
        assert_eq!(input.text(), "wom");
        assert_eq!(input.caret(), 0);

        input.on_key_down(&mut node, &KeyInput::key(Key::End), &mut ctx);
        input.on_key_down(&mut node, &KeyInput::key(Key::Right), &mut ctx);
        assert_eq!(input.caret(), 3);
    }

    #[test]
    fn test_multibyte_characters() {
        let (mut input, mut node) = focused_input();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        type_str(&mut input, &mut node, "héé", &mut ctx);
        input.on_key_down(&mut node, &KeyInput::key(Key::Left), &mut ctx);
        input.on_key_down(&mut node, &KeyInput::key(Key::Backspace), &mut ctx);

        assert_eq!(input.text(), "hé");
        assert_eq!(input.caret(), 1);
    }

    #[test]
    fn test_length_cap() {
        let (mut input, mut node) = focused_input();
        input.max_length = 3;
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        type_str(&mut input, &mut node, "abcdef", &mut ctx);
        assert_eq!(input.text(), "abc");
        assert_eq!(input.caret(), 3);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = TextInput::new("");
        let mut node = input.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        assert!(!input.on_key_down(&mut node, &KeyInput::char('a'), &mut ctx));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_press_focuses_and_enter_blurs() {
        let mut input = TextInput::new("");
        input.set_text("Boggy");
        let mut node = input.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);
        ctx.set_target(Some(NodeId(7)));

        input.on_pointer_down(&mut node, &PointerEvent::at(3.0, 3.0), &mut ctx);
        assert!(input.is_focused());
        assert_eq!(input.caret(), 5);

        assert!(input.on_key_down(&mut node, &KeyInput::key(Key::Enter), &mut ctx));
        assert!(!input.is_focused());

        let commands = ctx.take_commands();
        assert!(matches!(commands[0], Command::Focus(NodeId(7))));
        assert!(matches!(commands[1], Command::Blur(NodeId(7))));
    }

    #[test]
    fn test_caret_blinks_with_dt() {
        let (mut input, mut node) = focused_input();
        let caret_drawn = |input: &TextInput, node: &Node| {
            let mut surface = Surface::new();
            input.paint(node, &mut surface, &Theme::CLASSIC);
            surface
                .commands()
                .iter()
                .any(|c| matches!(c, RenderCommand::FillRect { bounds, .. } if bounds.width == 2.0))
        };

        assert!(caret_drawn(&input, &node));
        input.update(&mut node, 0.6);
        assert!(!caret_drawn(&input, &node));
        input.update(&mut node, 0.5);
        assert!(caret_drawn(&input, &node));
    }
}
