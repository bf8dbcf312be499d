//! Virtualized list of one-line rows.

use std::ops::Range;

use crate::assets::SoundCue;
use crate::geometry::{Point, Rect};
use crate::render::{Surface, TextAlign, TextBaseline};
use crate::scene::{EventCtx, Node, PointerEvent, SelectCallback, WheelEvent, Widget};
use crate::scrollbar::{
    clamp_scroll, is_point_in_track, scroll_from_pointer_y, scroll_metrics, ScrollMetrics, ScrollTrack,
};
use crate::style::{FontKey, ScrollbarStyle, Theme};

/// Vertical list with a scrollbar along its right edge.
///
/// Only rows intersecting `[scroll, scroll + height)` are painted or
/// hit-tested. Methods that depend on the viewport take the owning node,
/// fetched together with the widget through `Scene::get_mut`.
pub struct ScrollList {
    items: Vec<String>,
    selected: Option<usize>,
    hover: Option<usize>,
    scroll: f32,
    dragging_scrollbar: bool,
    /// Row height.
    pub item_height: f32,
    /// Scrollbar width.
    pub scrollbar_width: f32,
    /// Minimum thumb length.
    pub min_thumb: f32,
    on_select: Option<SelectCallback>,
}

impl ScrollList {
    /// Default node width.
    pub const WIDTH: f32 = 200.0;
    /// Default node height.
    pub const HEIGHT: f32 = 300.0;
    /// Default row height.
    pub const ITEM_HEIGHT: f32 = 36.0;

    /// Creates a list with nothing selected.
    #[must_use]
    pub fn new<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        let style = ScrollbarStyle::CLASSIC;
        Self {
            items: items.into_iter().map(Into::into).collect(),
            selected: None,
            hover: None,
            scroll: 0.0,
            dragging_scrollbar: false,
            item_height: Self::ITEM_HEIGHT,
            scrollbar_width: style.width,
            min_thumb: style.min_thumb,
            on_select: None,
        }
    }

    /// Sets the row height.
    #[must_use]
    pub fn with_item_height(mut self, item_height: f32) -> Self {
        self.item_height = item_height;
        self
    }

    /// Takes scrollbar metrics from a theme.
    #[must_use]
    pub fn with_scrollbar(mut self, style: &ScrollbarStyle) -> Self {
        self.scrollbar_width = style.width;
        self.min_thumb = style.min_thumb;
        self
    }

    /// Sets the selection handler.
    #[must_use]
    pub fn on_select(mut self, handler: impl FnMut(&mut EventCtx<'_>, usize, &str) + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Replaces the rows, resetting scroll and selection.
    pub fn set_items<S: Into<String>>(&mut self, items: impl IntoIterator<Item = S>) {
        self.items = items.into_iter().map(Into::into).collect();
        self.scroll = 0.0;
        self.selected = None;
        self.hover = None;
    }

    /// Rows in order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Selected row.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects a row (clamped) without firing the handler.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.and_then(|i| (!self.items.is_empty()).then(|| i.min(self.items.len() - 1)));
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> f32 {
        self.scroll
    }

    /// True while the scrollbar thumb is being dragged.
    #[must_use]
    pub const fn is_dragging_scrollbar(&self) -> bool {
        self.dragging_scrollbar
    }

    /// Total height of all rows.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn content_height(&self) -> f32 {
        self.items.len() as f32 * self.item_height
    }

    /// Sets the scroll offset, clamped to the valid range.
    pub fn scroll_to(&mut self, node: &Node, offset: f32) {
        self.scroll = clamp_scroll(offset, self.content_height(), node.height);
    }

    /// Scrolls by `delta` pixels.
    pub fn scroll_by(&mut self, node: &Node, delta: f32) {
        self.scroll_to(node, self.scroll + delta);
    }

    /// Scrolls the minimum amount that brings `index` fully into view.
    #[allow(clippy::cast_precision_loss)]
    pub fn ensure_visible(&mut self, node: &Node, index: usize) {
        let top = index.min(self.items.len().saturating_sub(1)) as f32 * self.item_height;
        if top < self.scroll {
            self.scroll_to(node, top);
        } else if top + self.item_height > self.scroll + node.height {
            self.scroll_to(node, top + self.item_height - node.height);
        }
    }

    /// Indices of rows intersecting the viewport.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_range(&self, node: &Node) -> Range<usize> {
        if self.item_height <= 0.0 {
            return 0..0;
        }
        let len = self.items.len();
        let start = ((self.scroll / self.item_height).floor().max(0.0) as usize).min(len);
        let end = (((self.scroll + node.height) / self.item_height).ceil().max(0.0) as usize).min(len);
        start..end.max(start)
    }

    fn track(&self, node: &Node) -> ScrollTrack {
        ScrollTrack::new(0.0, node.height).with_min_thumb(self.min_thumb)
    }

    fn metrics(&self, node: &Node) -> ScrollMetrics {
        scroll_metrics(self.scroll, self.content_height(), node.height, self.track(node))
    }

    fn in_scrollbar(&self, node: &Node, local: Point) -> bool {
        let track = Rect::new(node.width - self.scrollbar_width, 0.0, self.scrollbar_width, node.height);
        is_point_in_track(local.x, local.y, track)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn row_at(&self, local: Point) -> Option<usize> {
        let y = local.y + self.scroll;
        if y < 0.0 || self.item_height <= 0.0 {
            return None;
        }
        let index = (y / self.item_height).floor() as usize;
        (index < self.items.len()).then_some(index)
    }

    fn drag_to(&mut self, node: &Node, local_y: f32) {
        self.scroll = scroll_from_pointer_y(local_y, self.content_height(), node.height, self.track(node));
    }
}

impl Widget for ScrollList {
    fn initial_node(&self) -> Node {
        Node::new(Self::WIDTH, Self::HEIGHT).with_interactive(true)
    }

    #[allow(clippy::cast_precision_loss)]
    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let colors = &theme.colors;
        let bounds = node.local_bounds();
        surface.fill_round_rect(bounds, colors.panel, 4.0);
        surface.stroke_round_rect(bounds, colors.border, 2.0, 4.0);

        let row_width = node.width - self.scrollbar_width - 8.0;
        let font = theme.font(FontKey::Body);

        surface.save();
        surface.push_clip(Rect::new(2.0, 2.0, node.width - self.scrollbar_width - 4.0, node.height - 4.0));
        for index in self.visible_range(node) {
            let y = index as f32 * self.item_height - self.scroll;
            let row = Rect::new(4.0, y + 2.0, row_width, self.item_height - 4.0);
            if self.selected == Some(index) {
                surface.fill_rect(row, colors.row_selected);
            } else if self.hover == Some(index) {
                surface.fill_rect(row, colors.row_hover);
            }
            let color = if self.selected == Some(index) { colors.accent } else { colors.text };
            surface.text(&self.items[index], 10.0, y + self.item_height / 2.0, font, color, TextAlign::Left, TextBaseline::Middle);
        }
        surface.restore();

        let metrics = self.metrics(node);
        if metrics.enabled {
            let style = &theme.scrollbar;
            let x = node.width - self.scrollbar_width;
            surface.fill_rect(Rect::new(x, 0.0, self.scrollbar_width, node.height), style.track);
            let thumb = Rect::new(x + 2.0, metrics.thumb_start + 2.0, self.scrollbar_width - 4.0, metrics.thumb_size - 4.0);
            let fill = if self.dragging_scrollbar { style.thumb_active } else { style.thumb };
            surface.fill_round_rect(thumb, fill, 4.0);
        }
    }

    fn on_pointer_down(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        if self.in_scrollbar(node, event.local) {
            if self.metrics(node).enabled {
                self.dragging_scrollbar = true;
                self.drag_to(node, event.local.y);
            }
            return;
        }
        let Some(index) = self.row_at(event.local) else {
            return;
        };
        self.selected = Some(index);
        ctx.play(SoundCue::Click);
        if let Some(handler) = self.on_select.as_mut() {
            handler(ctx, index, &self.items[index]);
        }
    }

    fn on_pointer_move(&mut self, node: &mut Node, event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        if self.dragging_scrollbar {
            self.drag_to(node, event.local.y);
        } else if self.in_scrollbar(node, event.local) {
            self.hover = None;
        } else {
            self.hover = self.row_at(event.local);
        }
    }

    fn on_pointer_up(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        self.dragging_scrollbar = false;
    }

    fn on_pointer_leave(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        self.hover = None;
        self.dragging_scrollbar = false;
    }

    fn on_wheel(&mut self, node: &mut Node, event: &WheelEvent, _ctx: &mut EventCtx<'_>) {
        self.scroll_by(node, event.delta_y);
    }
}
