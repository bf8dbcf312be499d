//! Drop-down selector, the canonical overlay widget.

use crate::assets::SoundCue;
use crate::geometry::{Point, Rect};
use crate::render::{Surface, TextAlign, TextBaseline};
use crate::scene::{EventCtx, Node, PointerEvent, SelectCallback, WheelEvent, Widget};
use crate::style::{FontKey, Theme};

/// Closed header with an option list that unfolds below it.
///
/// While open the widget is an overlay: the list paints after the whole page
/// and hit-tests ahead of anything it covers. The router closes it when a
/// press lands elsewhere.
pub struct Dropdown {
    options: Vec<String>,
    selected: usize,
    open: bool,
    hover: Option<usize>,
    /// First option shown when the list overflows `max_visible`.
    first_visible: usize,
    /// Rows shown at once.
    pub max_visible: usize,
    on_change: Option<SelectCallback>,
}

impl Dropdown {
    /// Default node width.
    pub const WIDTH: f32 = 200.0;
    /// Default header height.
    pub const HEIGHT: f32 = 36.0;
    /// Height of one list row.
    pub const ITEM_HEIGHT: f32 = 32.0;
    /// Default visible rows.
    pub const MAX_VISIBLE: usize = 6;

    /// Creates a closed dropdown. `selected` is clamped into range.
    #[must_use]
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>, selected: usize) -> Self {
        let mut dropdown = Self {
            options: Vec::new(),
            selected: 0,
            open: false,
            hover: None,
            first_visible: 0,
            max_visible: Self::MAX_VISIBLE,
            on_change: None,
        };
        dropdown.set_options(options);
        dropdown.select(selected);
        dropdown
    }

    /// Sets the selection handler.
    #[must_use]
    pub fn on_change(mut self, handler: impl FnMut(&mut EventCtx<'_>, usize, &str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    /// Replaces the options, keeping the selection if still in range.
    pub fn set_options<S: Into<String>>(&mut self, options: impl IntoIterator<Item = S>) {
        self.options = options.into_iter().map(Into::into).collect();
        self.select(self.selected);
        self.first_visible = 0;
        self.hover = None;
    }

    /// Options in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Selects an index (clamped) without firing the handler.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.options.len().saturating_sub(1));
    }

    /// Selected index.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Selected option, if any.
    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    /// Returns true while the list is unfolded.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Unfolds or folds the list.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        self.hover = None;
        if open {
            self.reveal_selected();
        }
    }

    fn visible_rows(&self) -> usize {
        self.options.len().min(self.max_visible)
    }

    #[allow(clippy::cast_precision_loss)]
    fn list_height(&self) -> f32 {
        self.visible_rows() as f32 * Self::ITEM_HEIGHT
    }

    fn reveal_selected(&mut self) {
        let rows = self.visible_rows().max(1);
        if self.selected < self.first_visible {
            self.first_visible = self.selected;
        } else if self.selected >= self.first_visible + rows {
            self.first_visible = self.selected + 1 - rows;
        }
    }

    /// Option index under a local point, if the list is open and the point is on a row.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn row_at(&self, node: &Node, local: Point) -> Option<usize> {
        if !self.open || local.y < node.height || local.x < 0.0 || local.x >= node.width {
            return None;
        }
        let row = ((local.y - node.height) / Self::ITEM_HEIGHT).floor() as usize;
        if row >= self.visible_rows() {
            return None;
        }
        let index = self.first_visible + row;
        (index < self.options.len()).then_some(index)
    }

    fn paint_arrow(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let ax = node.width - 20.0;
        let ay = node.height / 2.0;
        let points = if self.open {
            [Point::new(ax - 6.0, ay + 3.0), Point::new(ax + 6.0, ay + 3.0), Point::new(ax, ay - 5.0)]
        } else {
            [Point::new(ax - 6.0, ay - 3.0), Point::new(ax + 6.0, ay - 3.0), Point::new(ax, ay + 5.0)]
        };
        surface.fill_polygon(&points, theme.colors.accent);
    }
}

impl Widget for Dropdown {
    fn initial_node(&self) -> Node {
        Node::new(Self::WIDTH, Self::HEIGHT).with_interactive(true)
    }

    fn hit_test(&self, node: &Node, local: Point) -> bool {
        let height = if self.open { node.height + self.list_height() } else { node.height };
        Rect::new(0.0, 0.0, node.width, height).contains(local.x, local.y)
    }

    fn is_overlay(&self) -> bool {
        self.open
    }

    fn close_overlay(&mut self) {
        self.set_open(false);
    }

    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let colors = &theme.colors;
        let bounds = node.local_bounds();
        let fill = if self.open { colors.control_hover } else { colors.control };
        surface.fill_round_rect(bounds, fill, 4.0);
        surface.stroke_round_rect(bounds, colors.border, 2.0, 4.0);

        if let Some(option) = self.selected_option() {
            surface.text(option, 10.0, node.height / 2.0, theme.font(FontKey::Body), colors.text, TextAlign::Left, TextBaseline::Middle);
        }
        self.paint_arrow(node, surface, theme);
    }

    #[allow(clippy::cast_precision_loss)]
    fn paint_overlay(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let colors = &theme.colors;
        let list = Rect::new(0.0, node.height, node.width, self.list_height());
        surface.fill_rect(list, colors.popup);
        surface.stroke_rect(list, colors.border, 2.0);

        let font = theme.font(FontKey::Body);
        let end = (self.first_visible + self.visible_rows()).min(self.options.len());
        for (row, index) in (self.first_visible..end).enumerate() {
            let y = node.height + row as f32 * Self::ITEM_HEIGHT;
            if self.hover == Some(index) {
                surface.fill_rect(Rect::new(2.0, y + 2.0, node.width - 4.0, Self::ITEM_HEIGHT - 4.0), colors.row_selected);
            }
            let color = if index == self.selected { colors.accent } else { colors.text };
            surface.text(&self.options[index], 10.0, y + Self::ITEM_HEIGHT / 2.0, font, color, TextAlign::Left, TextBaseline::Middle);
        }
    }

    fn on_pointer_down(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        if event.local.y < node.height {
            self.set_open(!self.open);
            ctx.play(SoundCue::Click);
        }
    }

    fn on_pointer_up(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        let Some(index) = self.row_at(node, event.local) else {
            return;
        };
        self.selected = index;
        self.set_open(false);
        ctx.play(SoundCue::Click);
        if let Some(handler) = self.on_change.as_mut() {
            handler(ctx, index, &self.options[index]);
        }
    }

    fn on_pointer_move(&mut self, node: &mut Node, event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        if self.open {
            self.hover = self.row_at(node, event.local);
        }
    }

    fn on_pointer_leave(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        self.hover = None;
    }

    fn on_wheel(&mut self, _node: &mut Node, event: &WheelEvent, _ctx: &mut EventCtx<'_>) {
        let overflow = self.options.len().saturating_sub(self.max_visible);
        if !self.open || overflow == 0 || event.delta_y == 0.0 {
            return;
        }
        self.first_visible = if event.delta_y > 0.0 {
            (self.first_visible + 1).min(overflow)
        } else {
            self.first_visible.saturating_sub(1)
        };
        self.hover = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullAudio;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn weapons() -> Vec<&'static str> {
        vec!["Bazooka", "Grenade", "Shotgun", "Uzi", "Sheep", "Banana", "Airstrike", "Rope"]
    }

    #[test]
    fn test_header_press_toggles() {
        let mut dropdown = Dropdown::new(weapons(), 0);
        let mut node = dropdown.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        dropdown.on_pointer_down(&mut node, &PointerEvent::at(20.0, 10.0), &mut ctx);
        assert!(dropdown.is_open() && dropdown.is_overlay());
        dropdown.on_pointer_up(&mut node, &PointerEvent::at(20.0, 10.0), &mut ctx);
        assert!(dropdown.is_open());

        dropdown.on_pointer_down(&mut node, &PointerEvent::at(20.0, 10.0), &mut ctx);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_release_on_row_selects_and_closes() {
        let picked = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&picked);
        let mut dropdown =
            Dropdown::new(weapons(), 0).on_change(move |_, index, name| *sink.borrow_mut() = Some((index, name.to_string())));
        let mut node = dropdown.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);
        dropdown.set_open(true);

        // Third row: 36 + 2 * 32 + 5
        dropdown.on_pointer_up(&mut node, &PointerEvent::at(20.0, 105.0), &mut ctx);

        assert_eq!(dropdown.selected_index(), 2);
        assert_eq!(*picked.borrow(), Some((2, "Shotgun".to_string())));
        assert!(!dropdown.is_open());
    }

    #[test]
    fn test_hit_test_grows_when_open() {
        let mut dropdown = Dropdown::new(weapons(), 0);
        let node = dropdown.initial_node();
        let below = Point::new(10.0, 36.0 + 6.0 * 32.0 - 1.0);

        assert!(!dropdown.hit_test(&node, below));
        dropdown.set_open(true);
        assert!(dropdown.hit_test(&node, below));
        assert!(!dropdown.hit_test(&node, Point::new(10.0, 36.0 + 6.0 * 32.0)));

        dropdown.close_overlay();
        assert!(!dropdown.is_overlay());
    }

    #[test]
    fn test_wheel_scrolls_overflowing_list() {
        let mut dropdown = Dropdown::new(weapons(), 0);
        let mut node = dropdown.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);
        dropdown.set_open(true);

        for _ in 0..5 {
            dropdown.on_wheel(&mut node, &WheelEvent::at(10.0, 60.0, 100.0), &mut ctx);
        }
        assert_eq!(dropdown.first_visible, 2);

        dropdown.on_pointer_up(&mut node, &PointerEvent::at(20.0, 40.0), &mut ctx);
        assert_eq!(dropdown.selected_option(), Some("Shotgun"));
    }

    #[test]
    fn test_empty_options() {
        let dropdown = Dropdown::new(Vec::<String>::new(), 3);
        assert_eq!(dropdown.selected_index(), 0);
        assert!(dropdown.selected_option().is_none());
    }
}
