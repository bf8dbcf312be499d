//! Virtualized grid of square cells.

use std::ops::Range;

use crate::assets::{ImageHandle, SoundCue};
use crate::geometry::{Point, Rect};
use crate::render::Surface;
use crate::scene::{EventCtx, Node, PointerEvent, SelectCallback, WheelEvent, Widget};
use crate::scrollbar::{
    clamp_scroll, is_point_in_track, scroll_from_pointer_y, scroll_metrics, ScrollMetrics, ScrollTrack,
};
use crate::style::{ScrollbarStyle, Theme};

/// One grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem {
    /// Name passed to the selection handler.
    pub name: String,
    /// Picture drawn inside the cell, if loaded.
    pub image: Option<ImageHandle>,
}

impl GridItem {
    /// Creates a cell without a picture.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: None,
        }
    }

    /// Attaches a picture.
    #[must_use]
    pub fn with_image(mut self, image: ImageHandle) -> Self {
        self.image = Some(image);
        self
    }
}

/// Cells laid out left to right in `columns`, scrolled vertically.
///
/// Rows outside the viewport are neither painted nor hit-tested. The
/// scrollbar sits to the right of the last column.
pub struct ItemGrid {
    items: Vec<GridItem>,
    columns: usize,
    selected: Option<usize>,
    hover: Option<usize>,
    scroll: f32,
    dragging_scrollbar: bool,
    /// Side of a cell.
    pub cell_size: f32,
    /// Gap around cells.
    pub padding: f32,
    /// Scrollbar width.
    pub scrollbar_width: f32,
    /// Minimum thumb length.
    pub min_thumb: f32,
    on_select: Option<SelectCallback>,
}

impl ItemGrid {
    /// Default cell side.
    pub const CELL_SIZE: f32 = 64.0;
    /// Default gap.
    pub const PADDING: f32 = 4.0;
    /// Default node height.
    pub const HEIGHT: f32 = 200.0;
    /// Scrollbar width.
    pub const SCROLLBAR_WIDTH: f32 = 10.0;

    /// Creates a grid. At least one column is used.
    #[must_use]
    pub fn new(items: Vec<GridItem>, columns: usize) -> Self {
        Self {
            items,
            columns: columns.max(1),
            selected: None,
            hover: None,
            scroll: 0.0,
            dragging_scrollbar: false,
            cell_size: Self::CELL_SIZE,
            padding: Self::PADDING,
            scrollbar_width: Self::SCROLLBAR_WIDTH,
            min_thumb: ScrollbarStyle::CLASSIC.min_thumb,
            on_select: None,
        }
    }

    /// Sets the selection handler.
    #[must_use]
    pub fn on_select(mut self, handler: impl FnMut(&mut EventCtx<'_>, usize, &str) + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Replaces the cells, resetting scroll and selection.
    pub fn set_items(&mut self, items: Vec<GridItem>) {
        self.items = items;
        self.scroll = 0.0;
        self.selected = None;
        self.hover = None;
    }

    /// Cells in order.
    #[must_use]
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    /// Mutable cells, e.g. to attach pictures once loaded.
    pub fn items_mut(&mut self) -> &mut [GridItem] {
        &mut self.items
    }

    /// Column count.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Selected cell.
    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects a cell (clamped) without firing the handler.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.and_then(|i| (!self.items.is_empty()).then(|| i.min(self.items.len() - 1)));
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> f32 {
        self.scroll
    }

    fn stride(&self) -> f32 {
        self.cell_size + self.padding
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.items.len().div_ceil(self.columns)
    }

    /// Width that fits every column plus the scrollbar.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn natural_width(&self) -> f32 {
        self.columns as f32 * self.stride() + self.padding + self.scrollbar_width
    }

    /// Total height of all rows.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn content_height(&self) -> f32 {
        self.rows() as f32 * self.stride() + self.padding
    }

    /// Sets the scroll offset, clamped.
    pub fn scroll_to(&mut self, node: &Node, offset: f32) {
        self.scroll = clamp_scroll(offset, self.content_height(), node.height);
    }

    /// Scrolls by `delta` pixels.
    pub fn scroll_by(&mut self, node: &Node, delta: f32) {
        self.scroll_to(node, self.scroll + delta);
    }

    /// Rows intersecting the viewport.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_rows(&self, node: &Node) -> Range<usize> {
        let rows = self.rows();
        let stride = self.stride();
        if stride <= 0.0 {
            return 0..0;
        }
        let start = (((self.scroll - self.padding) / stride).floor().max(0.0) as usize).min(rows);
        let end = (((self.scroll + node.height) / stride).ceil().max(0.0) as usize).min(rows);
        start..end.max(start)
    }

    #[allow(clippy::cast_precision_loss)]
    fn cell_rect(&self, index: usize) -> Rect {
        let col = (index % self.columns) as f32;
        let row = (index / self.columns) as f32;
        Rect::new(
            self.padding + col * self.stride(),
            self.padding + row * self.stride() - self.scroll,
            self.cell_size,
            self.cell_size,
        )
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn cell_at(&self, node: &Node, local: Point) -> Option<usize> {
        if local.x < self.padding || local.x >= node.width - self.scrollbar_width || local.y < 0.0 {
            return None;
        }
        let col = ((local.x - self.padding) / self.stride()).floor() as usize;
        let row = ((local.y + self.scroll - self.padding) / self.stride()).floor();
        if col >= self.columns || row < 0.0 {
            return None;
        }
        let index = row as usize * self.columns + col;
        (index < self.items.len()).then_some(index)
    }

    fn track(&self, node: &Node) -> ScrollTrack {
        ScrollTrack::new(0.0, node.height).with_min_thumb(self.min_thumb)
    }

    fn in_scrollbar(&self, node: &Node, local: Point) -> bool {
        let track = Rect::new(node.width - self.scrollbar_width, 0.0, self.scrollbar_width, node.height);
        is_point_in_track(local.x, local.y, track)
    }

    fn metrics(&self, node: &Node) -> ScrollMetrics {
        scroll_metrics(self.scroll, self.content_height(), node.height, self.track(node))
    }

    fn drag_to(&mut self, node: &Node, local_y: f32) {
        self.scroll = scroll_from_pointer_y(local_y, self.content_height(), node.height, self.track(node));
    }
}

impl Widget for ItemGrid {
    fn initial_node(&self) -> Node {
        Node::new(self.natural_width(), Self::HEIGHT).with_interactive(true)
    }

    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let colors = &theme.colors;
        let bounds = node.local_bounds();
        surface.fill_round_rect(bounds, colors.panel, 4.0);
        surface.stroke_round_rect(bounds, colors.border, 2.0, 4.0);

        surface.save();
        surface.push_clip(Rect::new(0.0, 0.0, node.width - self.scrollbar_width, node.height));
        for row in self.visible_rows(node) {
            let first = row * self.columns;
            let last = (first + self.columns).min(self.items.len());
            for index in first..last {
                let cell = self.cell_rect(index);
                let fill = if self.selected == Some(index) {
                    colors.row_selected
                } else if self.hover == Some(index) {
                    colors.row_hover
                } else {
                    colors.cell
                };
                surface.fill_rect(cell, fill);
                if let Some(image) = self.items[index].image {
                    surface.draw_image(image, Rect::new(0.0, 0.0, image.width, image.height), cell.shrink(4.0));
                }
                if self.selected == Some(index) {
                    surface.stroke_rect(cell, colors.accent, 2.0);
                }
            }
        }
        surface.restore();

        let metrics = self.metrics(node);
        if metrics.enabled {
            let style = &theme.scrollbar;
            let x = node.width - self.scrollbar_width;
            surface.fill_rect(Rect::new(x, 0.0, self.scrollbar_width, node.height), style.track);
            let fill = if self.dragging_scrollbar { style.thumb_active } else { style.thumb };
            surface.fill_round_rect(Rect::new(x + 2.0, metrics.thumb_start, self.scrollbar_width - 4.0, metrics.thumb_size), fill, 3.0);
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
        let Some(index) = self.cell_at(node, event.local) else {
            return;
        };
        self.selected = Some(index);
        ctx.play(SoundCue::Click);
        if let Some(handler) = self.on_select.as_mut() {
            handler(ctx, index, &self.items[index].name);
        }
    }

    fn on_pointer_move(&mut self, node: &mut Node, event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        if self.dragging_scrollbar {
            self.drag_to(node, event.local.y);
        } else {
            self.hover = self.cell_at(node, event.local);
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
