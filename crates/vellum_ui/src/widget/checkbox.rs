//! Toggle box with a caption.

use std::borrow::Cow;

use crate::assets::SoundCue;
use crate::geometry::{Point, Rect};
use crate::render::{Surface, TextAlign, TextBaseline};
use crate::scene::{Callback, EventCtx, Node, PointerEvent, Widget};
use crate::style::{FontKey, Theme};

/// Check box with its label drawn to the right.
pub struct Checkbox {
    /// Caption.
    pub label: Cow<'static, str>,
    checked: bool,
    hovered: bool,
    /// Side of the square box.
    pub box_size: f32,
    on_change: Option<Callback<bool>>,
}

impl Checkbox {
    /// Default node size.
    pub const WIDTH: f32 = 200.0;
    /// Default node height.
    pub const HEIGHT: f32 = 30.0;
    /// Default box side.
    pub const BOX_SIZE: f32 = 24.0;

    /// Creates a check box.
    #[must_use]
    pub fn new(label: impl Into<Cow<'static, str>>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
            hovered: false,
            box_size: Self::BOX_SIZE,
            on_change: None,
        }
    }

    /// Sets the toggle handler; it receives the new state.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(&mut EventCtx<'_>, bool) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Current state.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Sets the state without firing the handler.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Widget for Checkbox {
    fn initial_node(&self) -> Node {
        Node::new(Self::WIDTH, Self::HEIGHT).with_interactive(true)
    }

    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let colors = &theme.colors;
        let size = self.box_size;
        let top = (node.height - size) / 2.0;
        let frame = Rect::new(0.0, top, size, size);

        surface.fill_rect(frame, if self.hovered { colors.control_hover } else { colors.control });
        surface.stroke_rect(frame, colors.border, 2.0);

        if self.checked {
            let tick = [
                Point::new(4.0, top + size / 2.0),
                Point::new(size / 3.0, top + size - 4.0),
                Point::new(size - 4.0, top + 4.0),
            ];
            surface.stroke_polyline(&tick, colors.accent, 3.0);
        }

        surface.text(
            &self.label,
            size + 10.0,
            node.height / 2.0,
            theme.font(FontKey::Body),
            colors.text,
            TextAlign::Left,
            TextBaseline::Middle,
        );
    }

    fn on_pointer_enter(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        self.hovered = true;
    }

    fn on_pointer_leave(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        self.hovered = false;
    }

    fn on_pointer_up(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        if !self.hit_test(node, event.local) {
            return;
        }
        self.checked = !self.checked;
        ctx.play(SoundCue::Click);
        if let Some(handler) = self.on_change.as_mut() {
            handler(ctx, self.checked);
        }
    }
}
