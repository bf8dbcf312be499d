//! Push button.

use std::borrow::Cow;

use crate::animation::Tween;
use crate::assets::SoundCue;
use crate::render::{Surface, TextAlign, TextBaseline};
use crate::scene::{ClickCallback, EventCtx, Node, PointerEvent, Widget};
use crate::style::{ButtonStyle, FontKey, Theme};

/// Visual state of a [`Button`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    /// Idle.
    #[default]
    Normal,
    /// Pointer is over the button.
    Hover,
    /// Pressed and not yet released.
    Active,
    /// Ignores all input.
    Disabled,
}

/// Rounded-rectangle button with a centered caption.
///
/// A click fires only when a press that started on the button is released
/// inside it; releasing outside cancels.
pub struct Button {
    /// Caption.
    pub text: Cow<'static, str>,
    state: ButtonState,
    /// Hover highlight, 0 = idle fill, 1 = hover fill.
    highlight: Tween,
    on_click: Option<ClickCallback>,
}

impl Button {
    /// Creates a button without a click handler.
    #[must_use]
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            text: text.into(),
            state: ButtonState::Normal,
            highlight: Tween::new(0.0),
            on_click: None,
        }
    }

    /// Sets the click handler.
    #[must_use]
    pub fn on_click(mut self, handler: impl FnMut(&mut EventCtx<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Enables or disables the button.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.state = if disabled { ButtonState::Disabled } else { ButtonState::Normal };
        self.highlight.snap(0.0);
    }

    /// Returns true if the button ignores input.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.state == ButtonState::Disabled
    }

    fn set_hover(&mut self, hovered: bool) {
        self.state = if hovered { ButtonState::Hover } else { ButtonState::Normal };
        self.highlight.set_target(if hovered { 1.0 } else { 0.0 });
    }
}

impl Widget for Button {
    fn initial_node(&self) -> Node {
        let style = ButtonStyle::CLASSIC;
        Node::new(style.width, style.height).with_interactive(true)
    }

    fn update(&mut self, _node: &mut Node, dt: f32) {
        self.highlight.update(dt);
    }

    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let style = &theme.button;
        let fill = match self.state {
            ButtonState::Disabled => style.background_disabled,
            ButtonState::Active => style.background_active,
            ButtonState::Normal | ButtonState::Hover => style.background.lerp(style.background_hover, self.highlight.value()),
        };
        let caption = match self.state {
            ButtonState::Disabled => theme.colors.disabled,
            ButtonState::Hover => style.text_hover,
            ButtonState::Normal | ButtonState::Active => style.text,
        };

        let bounds = node.local_bounds();
        surface.fill_round_rect(bounds, fill, style.corner_radius);
        surface.stroke_round_rect(bounds, style.border, style.border_width, style.corner_radius);

        let font = theme.font(FontKey::Button);
        let center = bounds.center();
        let offset = theme.shadow_offset;
        surface.text(&self.text, center.x + offset, center.y + offset, font, theme.colors.text_shadow, TextAlign::Center, TextBaseline::Middle);
        surface.text(&self.text, center.x, center.y, font, caption, TextAlign::Center, TextBaseline::Middle);
    }

    fn on_pointer_enter(&mut self, _node: &mut Node, _event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        if self.is_disabled() {
            return;
        }
        self.set_hover(true);
        ctx.play(SoundCue::Hover);
    }

    fn on_pointer_leave(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        if self.is_disabled() {
            return;
        }
        self.set_hover(false);
    }

    fn on_pointer_down(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        if self.is_disabled() {
            return;
        }
        self.state = ButtonState::Active;
    }

    fn on_pointer_up(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        if self.is_disabled() {
            return;
        }
        let inside = self.hit_test(node, event.local);
        if self.state == ButtonState::Active && inside {
            ctx.play(SoundCue::Click);
            if let Some(handler) = self.on_click.as_mut() {
                handler(ctx);
            }
        }
        self.set_hover(inside);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::RecordingAudio;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_button() -> (Button, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        let button = Button::new("Play").on_click(move |_| counter.set(counter.get() + 1));
        (button, clicks)
    }

    #[test]
    fn test_click_requires_release_inside() {
        let (mut button, clicks) = counting_button();
        let mut node = button.initial_node();
        let audio = RecordingAudio::new();
        let mut ctx = EventCtx::new(&audio);

        button.on_pointer_down(&mut node, &PointerEvent::at(10.0, 10.0), &mut ctx);
        assert_eq!(button.state(), ButtonState::Active);
        button.on_pointer_up(&mut node, &PointerEvent::at(10.0, 10.0), &mut ctx);
        assert_eq!(clicks.get(), 1);
        assert_eq!(button.state(), ButtonState::Hover);
        assert_eq!(audio.cues(), vec![SoundCue::Click]);

        button.on_pointer_down(&mut node, &PointerEvent::at(10.0, 10.0), &mut ctx);
        button.on_pointer_up(&mut node, &PointerEvent::at(400.0, 10.0), &mut ctx);
        assert_eq!(clicks.get(), 1);
        assert_eq!(button.state(), ButtonState::Normal);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let (mut button, clicks) = counting_button();
        let mut node = button.initial_node();
        let audio = RecordingAudio::new();
        let mut ctx = EventCtx::new(&audio);
        button.set_disabled(true);

        button.on_pointer_enter(&mut node, &PointerEvent::at(10.0, 10.0), &mut ctx);
        button.on_pointer_down(&mut node, &PointerEvent::at(10.0, 10.0), &mut ctx);
        button.on_pointer_up(&mut node, &PointerEvent::at(10.0, 10.0), &mut ctx);

        assert_eq!(clicks.get(), 0);
        assert!(audio.cues().is_empty());
        assert!(button.is_disabled());
    }

    #[test]
    fn test_hover_plays_cue_and_highlights() {
        let mut button = Button::new("Options");
        let mut node = button.initial_node();
        let audio = RecordingAudio::new();
        let mut ctx = EventCtx::new(&audio);

        button.on_pointer_enter(&mut node, &PointerEvent::at(1.0, 1.0), &mut ctx);
        button.update(&mut node, 1.0);

        assert_eq!(button.state(), ButtonState::Hover);
        assert_eq!(button.highlight.value(), 1.0);
        assert_eq!(audio.cues(), vec![SoundCue::Hover]);
        assert_eq!((node.width, node.height), (260.0, 50.0));
    }
}
