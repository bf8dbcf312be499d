//! Scrollable icon picker with lazily loaded previews.

use std::collections::{HashMap, HashSet};
use std::ops::Range;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::assets::{ImageHandle, ImageProvider, SoundCue};
use crate::geometry::{Point, Rect};
use crate::render::{Surface, TextAlign, TextBaseline};
use crate::scene::{EventCtx, Node, PointerEvent, SelectCallback, WheelEvent, Widget};
use crate::scrollbar::{
    clamp_scroll, is_point_in_track, scroll_from_pointer_y, scroll_metrics, ScrollTrack, DEFAULT_MIN_THUMB,
};
use crate::style::{FontKey, Theme};

/// Height of the preview panel.
const PREVIEW_HEIGHT: f32 = 80.0;
/// Top of the list area.
const LIST_TOP: f32 = PREVIEW_HEIGHT + 8.0;
/// Width of the scrollbar strip along the right edge.
const SCROLLBAR_WIDTH: f32 = 10.0;
/// Side of the preview image.
const PREVIEW_SIZE: f32 = 64.0;
/// Wheel delta multiplier.
const WHEEL_FACTOR: f32 = 0.5;

/// Maps an item name to the provider key of its image.
pub type KeyFn = Box<dyn Fn(&str) -> String>;

/// Load bookkeeping shared with in-flight provider callbacks.
#[derive(Debug, Default)]
struct LoadState {
    /// Bumped whenever the item list changes.
    generation: u64,
    /// Items with a request in flight.
    pending: HashSet<String>,
    /// Resolved items; `None` marks a failed load.
    images: HashMap<String, Option<ImageHandle>>,
}

impl LoadState {
    fn image(&self, item: &str) -> Option<ImageHandle> {
        self.images.get(item).copied().flatten()
    }
}

/// List of named icons with a preview of the selection on top.
///
/// Images are requested from the [`ImageProvider`] only for rows near the
/// viewport, during `update` while the node is visible. A result that
/// arrives after the widget was dropped or its items were replaced is
/// discarded.
pub struct IconPicker {
    items: Vec<String>,
    key_for: KeyFn,
    provider: Arc<dyn ImageProvider>,
    loads: Arc<Mutex<LoadState>>,
    selected: usize,
    scroll: f32,
    dragging_scrollbar: bool,
    /// Icon side in the list.
    pub icon_size: f32,
    /// Square frame cropped from sprite sheets; `None` uses the image's short side.
    pub frame_size: Option<f32>,
    on_select: Option<SelectCallback>,
}

impl IconPicker {
    /// Default node width.
    pub const WIDTH: f32 = 300.0;
    /// Default node height.
    pub const HEIGHT: f32 = 400.0;
    /// Default icon side.
    pub const ICON_SIZE: f32 = 32.0;

    /// Creates a picker over `items`, resolving images through `provider`.
    #[must_use]
    pub fn new<S: Into<String>>(
        items: impl IntoIterator<Item = S>,
        provider: Arc<dyn ImageProvider>,
        key_for: impl Fn(&str) -> String + 'static,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            key_for: Box::new(key_for),
            provider,
            loads: Arc::new(Mutex::new(LoadState::default())),
            selected: 0,
            scroll: 0.0,
            dragging_scrollbar: false,
            icon_size: Self::ICON_SIZE,
            frame_size: None,
            on_select: None,
        }
    }

    /// Sets the icon side.
    #[must_use]
    pub fn with_icon_size(mut self, icon_size: f32) -> Self {
        self.icon_size = icon_size;
        self
    }

    /// Crops a fixed square frame from each image.
    #[must_use]
    pub fn with_frame_size(mut self, frame_size: f32) -> Self {
        self.frame_size = Some(frame_size);
        self
    }

    /// Sets the selection handler.
    #[must_use]
    pub fn on_select(mut self, handler: impl FnMut(&mut EventCtx<'_>, usize, &str) + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
        self
    }

    /// Items in order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Replaces the items. Loads still in flight for the old list are ignored.
    pub fn set_items<S: Into<String>>(&mut self, items: impl IntoIterator<Item = S>) {
        self.items = items.into_iter().map(Into::into).collect();
        self.selected = 0;
        self.scroll = 0.0;
        let mut loads = self.loads.lock();
        loads.generation += 1;
        loads.pending.clear();
        loads.images.clear();
    }

    /// Selected index.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Selected item name.
    #[must_use]
    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Selects the item called `name` and scrolls it into view. Returns false
    /// if there is no such item.
    pub fn set_selected(&mut self, node: &Node, name: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item == name) else {
            return false;
        };
        self.selected = index;
        self.ensure_visible(node, index);
        true
    }

    /// Current scroll offset.
    #[must_use]
    pub const fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Height of one row.
    #[must_use]
    pub fn row_height(&self) -> f32 {
        self.icon_size + 8.0
    }

    /// Loaded image for `item`, if any.
    #[must_use]
    pub fn image_for(&self, item: &str) -> Option<ImageHandle> {
        self.loads.lock().image(item)
    }

    /// Returns true if a load for `item` is in flight.
    #[must_use]
    pub fn is_loading(&self, item: &str) -> bool {
        self.loads.lock().pending.contains(item)
    }

    fn list_height(node: &Node) -> f32 {
        (node.height - LIST_TOP).max(0.0)
    }

    #[allow(clippy::cast_precision_loss)]
    fn content_height(&self) -> f32 {
        self.items.len() as f32 * self.row_height()
    }

    fn track(&self, node: &Node) -> ScrollTrack {
        ScrollTrack::new(LIST_TOP, Self::list_height(node)).with_min_thumb(DEFAULT_MIN_THUMB)
    }

    fn scroll_to(&mut self, node: &Node, offset: f32) {
        self.scroll = clamp_scroll(offset, self.content_height(), Self::list_height(node));
    }

    #[allow(clippy::cast_precision_loss)]
    fn ensure_visible(&mut self, node: &Node, index: usize) {
        let top = index as f32 * self.row_height();
        let view = Self::list_height(node);
        if top < self.scroll {
            self.scroll_to(node, top);
        } else if top + self.row_height() > self.scroll + view {
            self.scroll_to(node, top + self.row_height() - view);
        }
    }

    /// Rows intersecting the list viewport.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_range(&self, node: &Node) -> Range<usize> {
        let row = self.row_height();
        if row <= 0.0 {
            return 0..0;
        }
        let len = self.items.len();
        let start = ((self.scroll / row).floor().max(0.0) as usize).min(len);
        let end = (((self.scroll + Self::list_height(node)) / row).ceil().max(0.0) as usize).min(len);
        start..end.max(start)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn row_at(&self, local: Point) -> Option<usize> {
        if local.y < LIST_TOP {
            return None;
        }
        let index = ((local.y - LIST_TOP + self.scroll) / self.row_height()).floor() as usize;
        (index < self.items.len()).then_some(index)
    }

    fn in_scrollbar(node: &Node, local: Point) -> bool {
        let track = Rect::new(node.width - SCROLLBAR_WIDTH, LIST_TOP, SCROLLBAR_WIDTH, Self::list_height(node));
        is_point_in_track(local.x, local.y, track)
    }

    fn drag_to(&mut self, node: &Node, local_y: f32) {
        self.scroll = scroll_from_pointer_y(local_y, self.content_height(), Self::list_height(node), self.track(node));
    }

    /// Requests images for visible rows (plus one row of lookahead) and the selection.
    fn request_visible(&self, node: &Node) {
        let range = self.visible_range(node);
        let lookahead = (range.end + 1).min(self.items.len());
        let wanted = (range.start..lookahead).chain(std::iter::once(self.selected));

        let (generation, requests) = {
            let mut loads = self.loads.lock();
            let mut requests = Vec::new();
            for index in wanted {
                let Some(item) = self.items.get(index) else {
                    continue;
                };
                if loads.images.contains_key(item) || loads.pending.contains(item) {
                    continue;
                }
                loads.pending.insert(item.clone());
                requests.push(item.clone());
            }
            (loads.generation, requests)
        };

        // The provider may answer synchronously, so the lock must be free here.
        for item in requests {
            let key = (self.key_for)(&item);
            let slot = Arc::downgrade(&self.loads);
            self.provider.load(&key, Box::new(move |image| apply_load(&slot, generation, item, image)));
        }
    }

    fn frame_for(&self, image: ImageHandle) -> Rect {
        let side = self.frame_size.unwrap_or_else(|| image.width.min(image.height));
        Rect::new(0.0, 0.0, side, side)
    }
}

/// Stores a finished load unless the picker is gone or has moved on.
fn apply_load(slot: &Weak<Mutex<LoadState>>, generation: u64, item: String, image: Option<ImageHandle>) {
    let Some(loads) = slot.upgrade() else {
        tracing::trace!("icon load for {} finished after its picker was dropped", item);
        return;
    };
    let mut loads = loads.lock();
    if loads.generation != generation || !loads.pending.remove(&item) {
        tracing::trace!("discarding stale icon load for {}", item);
        return;
    }
    if image.is_none() {
        tracing::warn!("icon {} failed to load", item);
    }
    loads.images.insert(item, image);
}

impl Widget for IconPicker {
    fn initial_node(&self) -> Node {
        Node::new(Self::WIDTH, Self::HEIGHT).with_interactive(true)
    }

    fn update(&mut self, node: &mut Node, _dt: f32) {
        if node.is_shown() {
            self.request_visible(node);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        let colors = &theme.colors;
        let bounds = node.local_bounds();
        surface.fill_rect(bounds, colors.panel);
        surface.stroke_rect(bounds, colors.border, 2.0);

        let loads = self.loads.lock();

        surface.fill_rect(Rect::new(4.0, 4.0, node.width - 18.0, PREVIEW_HEIGHT), colors.control);
        if let Some(selected) = self.selected_item() {
            if let Some(image) = loads.image(selected) {
                surface.draw_image(image, self.frame_for(image), Rect::new(20.0, 12.0, PREVIEW_SIZE, PREVIEW_SIZE));
            }
            surface.text(
                selected,
                node.width / 2.0,
                PREVIEW_HEIGHT / 2.0,
                theme.font(FontKey::Body),
                colors.accent,
                TextAlign::Center,
                TextBaseline::Middle,
            );
        }

        let list_height = Self::list_height(node);
        let row_height = self.row_height();
        let font = theme.font(FontKey::Small);

        surface.save();
        surface.push_clip(Rect::new(0.0, LIST_TOP, node.width - SCROLLBAR_WIDTH, list_height));
        for index in self.visible_range(node) {
            let item = &self.items[index];
            let y = LIST_TOP + index as f32 * row_height - self.scroll;
            if index == self.selected {
                surface.fill_rect(Rect::new(4.0, y + 2.0, node.width - 18.0, row_height - 4.0), colors.row_hover);
            }
            if let Some(image) = loads.image(item) {
                surface.draw_image(image, self.frame_for(image), Rect::new(8.0, y + 4.0, self.icon_size, self.icon_size));
            }
            let color = if index == self.selected { colors.accent } else { colors.text };
            surface.text(item, self.icon_size + 16.0, y + row_height / 2.0, font, color, TextAlign::Left, TextBaseline::Middle);
        }
        surface.restore();

        let metrics = scroll_metrics(self.scroll, self.content_height(), list_height, self.track(node));
        if metrics.enabled {
            let thumb = Rect::new(node.width - 8.0, metrics.thumb_start, 6.0, metrics.thumb_size);
            let style = &theme.scrollbar;
            surface.fill_rect(thumb, if self.dragging_scrollbar { style.thumb_active } else { style.thumb });
        }
    }

    fn on_pointer_down(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {
        if Self::in_scrollbar(node, event.local) {
            if self.content_height() > Self::list_height(node) {
                self.dragging_scrollbar = true;
                self.drag_to(node, event.local.y);
            }
            return;
        }
        let Some(index) = self.row_at(event.local) else {
            return;
        };
        self.selected = index;
        ctx.play(SoundCue::Click);
        if let Some(handler) = self.on_select.as_mut() {
            handler(ctx, index, &self.items[index]);
        }
    }

    fn on_pointer_move(&mut self, node: &mut Node, event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        if self.dragging_scrollbar {
            self.drag_to(node, event.local.y);
        }
    }

    fn on_pointer_up(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        self.dragging_scrollbar = false;
    }

    fn on_pointer_leave(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
        self.dragging_scrollbar = false;
    }

    fn on_wheel(&mut self, node: &mut Node, event: &WheelEvent, _ctx: &mut EventCtx<'_>) {
        self.scroll_to(node, self.scroll + event.delta_y * WHEEL_FACTOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ImageCache, LoadCallback, NullAudio};

    /// Provider that answers only when told to.
    #[derive(Default)]
    struct DeferredProvider {
        waiting: Mutex<Vec<(String, LoadCallback)>>,
    }

    impl DeferredProvider {
        fn resolve_all(&self) {
            let waiting = std::mem::take(&mut *self.waiting.lock());
            for (key, done) in waiting {
                let id = key.len() as u64;
                done(Some(ImageHandle::new(id, 32.0, 32.0)));
            }
        }
    }

    impl ImageProvider for DeferredProvider {
        fn get(&self, _key: &str) -> Option<ImageHandle> {
            None
        }

        fn load(&self, key: &str, done: LoadCallback) {
            self.waiting.lock().push((key.to_string(), done));
        }
    }

    fn hats(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("hat{i}")).collect()
    }

    #[test]
    fn test_loads_only_visible_rows() {
        let cache = Arc::new(ImageCache::new());
        for name in hats(100) {
            cache.insert(format!("hats/{name}.png"), ImageHandle::new(1, 32.0, 32.0));
        }
        let mut picker = IconPicker::new(hats(100), cache, |name| format!("hats/{name}.png"));
        let mut node = picker.initial_node();

        picker.update(&mut node, 0.016);

        // 312px of list at 40px rows: rows 0..8 plus one lookahead row.
        assert!(picker.image_for("hat0").is_some());
        assert!(picker.image_for("hat8").is_some());
        assert!(picker.image_for("hat9").is_none());
        assert!(picker.image_for("hat50").is_none());
    }

    #[test]
    fn test_hidden_picker_does_not_load() {
        let provider = Arc::new(DeferredProvider::default());
        let mut picker = IconPicker::new(hats(5), provider.clone(), str::to_string);
        let mut node = picker.initial_node();
        node.visible = false;

        picker.update(&mut node, 0.016);
        assert!(provider.waiting.lock().is_empty());
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let provider = Arc::new(DeferredProvider::default());
        let mut picker = IconPicker::new(hats(3), provider.clone(), str::to_string);
        let mut node = picker.initial_node();

        picker.update(&mut node, 0.016);
        assert!(picker.is_loading("hat0"));
        picker.update(&mut node, 0.016);
        assert_eq!(provider.waiting.lock().len(), 3);

        picker.set_items(hats(2));
        provider.resolve_all();

        assert!(picker.image_for("hat0").is_none());
        assert!(!picker.is_loading("hat0"));
    }

    #[test]
    fn test_load_after_drop_is_ignored() {
        let provider = Arc::new(DeferredProvider::default());
        let mut picker = IconPicker::new(hats(3), provider.clone(), str::to_string);
        let mut node = picker.initial_node();
        picker.update(&mut node, 0.016);

        drop(picker);
        provider.resolve_all();
        assert!(provider.waiting.lock().is_empty());
    }

    #[test]
    fn test_set_selected_scrolls_into_view() {
        let provider = Arc::new(DeferredProvider::default());
        let mut picker = IconPicker::new(hats(100), provider, str::to_string);
        let node = picker.initial_node();

        assert!(picker.set_selected(&node, "hat40"));
        assert_eq!(picker.selected_index(), 40);
        assert_eq!(picker.scroll(), 41.0 * 40.0 - 312.0);
        assert!(picker.visible_range(&node).contains(&40));

        assert!(!picker.set_selected(&node, "missing"));
        assert_eq!(picker.selected_index(), 40);
    }

    #[test]
    fn test_press_selects_row_and_wheel_scrolls() {
        let provider = Arc::new(DeferredProvider::default());
        let mut picker = IconPicker::new(hats(100), provider, str::to_string);
        let mut node = picker.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        picker.on_pointer_down(&mut node, &PointerEvent::at(50.0, 40.0), &mut ctx);
        assert_eq!(picker.selected_index(), 0);

        picker.on_pointer_down(&mut node, &PointerEvent::at(50.0, 88.0 + 85.0), &mut ctx);
        assert_eq!(picker.selected_index(), 2);

        picker.on_wheel(&mut node, &WheelEvent::at(50.0, 200.0, 100.0), &mut ctx);
        assert_eq!(picker.scroll(), 50.0);
    }

    #[test]
    fn test_scrollbar_drag() {
        let provider = Arc::new(DeferredProvider::default());
        let mut picker = IconPicker::new(hats(100), provider, str::to_string);
        let mut node = picker.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        picker.on_pointer_down(&mut node, &PointerEvent::at(295.0, 399.0), &mut ctx);
        assert_eq!(picker.scroll(), 4000.0 - 312.0);

        picker.on_pointer_move(&mut node, &PointerEvent::at(295.0, 0.0), &mut ctx);
        assert_eq!(picker.scroll(), 0.0);
    }

    #[test]
    fn test_scrollbar_starts_below_preview() {
        let provider = Arc::new(DeferredProvider::default());
        let mut picker = IconPicker::new(hats(100), provider, str::to_string);
        let mut node = picker.initial_node();
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        // Right edge of the preview strip is not part of the track.
        picker.on_pointer_down(&mut node, &PointerEvent::at(295.0, 40.0), &mut ctx);
        picker.on_pointer_move(&mut node, &PointerEvent::at(295.0, 399.0), &mut ctx);
        assert_eq!(picker.scroll(), 0.0);
        assert_eq!(picker.selected_index(), 0);
    }
}
