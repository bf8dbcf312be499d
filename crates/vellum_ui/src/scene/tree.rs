//! Scene: the node arena, ownership links and the three traversals
//! (paint, update, hit-test).

use std::collections::HashMap;

use crate::geometry::{Point, Size};
use crate::input::{KeyInput, MouseButton};
use crate::render::Surface;
use crate::scene::event::{EventCtx, PointerEvent, WheelEvent};
use crate::scene::node::{Node, NodeId, Widget};
use crate::style::Theme;
use crate::widget::Container;

/// Which pointer handler a dispatch invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// `on_pointer_down`.
    Down,
    /// `on_pointer_up`.
    Up,
    /// `on_pointer_move`.
    Move,
    /// `on_pointer_enter`.
    Enter,
    /// `on_pointer_leave`.
    Leave,
}

/// A node and the widget driving it.
struct Slot {
    node: Node,
    widget: Box<dyn Widget>,
}

/// A tree of nodes rooted at a [`Container`].
///
/// Nodes live in an arena keyed by [`NodeId`]. A node is attached to at most
/// one parent; detached nodes stay in the arena until [`Scene::destroy`].
/// The tree must stay acyclic: making a node its own descendant is a caller
/// error (checked only in debug builds).
pub struct Scene {
    /// Nodes indexed by ID.
    slots: HashMap<NodeId, Slot>,
    /// Root container.
    root: NodeId,
    /// Node receiving keyboard input.
    focused: Option<NodeId>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl Scene {
    /// Creates a scene whose root container spans `width × height`.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        let root = NodeId::new(1);
        let mut slots = HashMap::with_capacity(64);
        slots.insert(
            root,
            Slot {
                node: Node::new(width, height),
                widget: Box::new(Container::new()),
            },
        );
        Self {
            slots,
            root,
            focused: None,
            next_id: 2,
        }
    }

    /// Root node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Logical size of the root container.
    #[must_use]
    pub fn size(&self) -> Size {
        self.node(self.root).map_or(Size::new(0.0, 0.0), Node::size)
    }

    /// Number of nodes in the arena, detached ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: the root is never removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Generates a new unique node ID.
    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Adds a detached node using the widget's initial geometry.
    pub fn insert<W: Widget>(&mut self, widget: W) -> NodeId {
        let node = widget.initial_node();
        self.insert_with(node, widget)
    }

    /// Adds a detached node with explicit geometry. Ownership links in
    /// `node` are ignored.
    pub fn insert_with<W: Widget>(&mut self, mut node: Node, widget: W) -> NodeId {
        node.parent = None;
        node.children.clear();
        let id = self.next_id();
        self.slots.insert(
            id,
            Slot {
                node,
                widget: Box::new(widget),
            },
        );
        id
    }

    /// Inserts `widget` and attaches it to `parent` at `(x, y)`.
    pub fn spawn<W: Widget>(&mut self, parent: NodeId, x: f32, y: f32, widget: W) -> NodeId {
        let id = self.insert(widget);
        if let Some(node) = self.node_mut(id) {
            node.set_position(x, y);
        }
        self.add_child(parent, id);
        id
    }

    /// Returns true if `id` is in the arena.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Gets a node by ID.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|slot| &slot.node)
    }

    /// Gets mutable access to a node.
    #[must_use]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(&id).map(|slot| &mut slot.node)
    }

    /// Returns the widget at `id` if it is a `W`.
    #[must_use]
    pub fn widget<W: Widget>(&self, id: NodeId) -> Option<&W> {
        let widget: &dyn Widget = &*self.slots.get(&id)?.widget;
        widget.as_any().downcast_ref::<W>()
    }

    /// Returns the widget at `id` mutably if it is a `W`.
    #[must_use]
    pub fn widget_mut<W: Widget>(&mut self, id: NodeId) -> Option<&mut W> {
        let widget: &mut dyn Widget = &mut *self.slots.get_mut(&id)?.widget;
        widget.as_any_mut().downcast_mut::<W>()
    }

    /// Returns the widget and its node together.
    #[must_use]
    pub fn get_mut<W: Widget>(&mut self, id: NodeId) -> Option<(&mut W, &mut Node)> {
        let slot = self.slots.get_mut(&id)?;
        let widget: &mut dyn Widget = &mut *slot.widget;
        let widget = widget.as_any_mut().downcast_mut::<W>()?;
        Some((widget, &mut slot.node))
    }

    /// Owning parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children of `id` in paint order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Appends `child` to `parent`, detaching it from its previous owner first.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            tracing::warn!("add_child ignored: {:?} -> {:?}", child, parent);
            return;
        }
        debug_assert!(
            !self.is_ancestor(child, parent),
            "adding {child:?} under {parent:?} would create a cycle"
        );

        if let Some(previous) = self.parent(child) {
            self.remove_child(previous, child);
        }
        if let Some(slot) = self.slots.get_mut(&parent) {
            slot.node.children.push(child);
        }
        if let Some(slot) = self.slots.get_mut(&child) {
            slot.node.parent = Some(parent);
        }
    }

    /// Detaches `child` from `parent`. No-op if it is not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(slot) = self.slots.get_mut(&parent) else {
            return;
        };
        let before = slot.node.children.len();
        slot.node.children.retain(|&c| c != child);
        if slot.node.children.len() == before {
            return;
        }
        if let Some(slot) = self.slots.get_mut(&child) {
            slot.node.parent = None;
        }
    }

    /// Detaches every child of `parent`.
    pub fn remove_all_children(&mut self, parent: NodeId) {
        let children = match self.slots.get_mut(&parent) {
            Some(slot) => std::mem::take(&mut slot.node.children),
            None => return,
        };
        for child in children {
            if let Some(slot) = self.slots.get_mut(&child) {
                slot.node.parent = None;
            }
        }
    }

    /// Detaches `id` and drops it with its whole subtree. The root is kept.
    pub fn destroy(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(slot) = self.slots.remove(&current) {
                stack.extend(slot.node.children);
            }
            if self.focused == Some(current) {
                self.focused = None;
            }
        }
    }

    /// Converts a point local to `id` into canvas coordinates.
    #[must_use]
    pub fn local_to_global(&self, id: NodeId, lx: f32, ly: f32) -> Point {
        let mut point = Point::new(lx, ly);
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            point = point.offset(node.x, node.y);
            current = node.parent;
        }
        point
    }

    /// Converts a canvas point into coordinates local to `id`.
    #[must_use]
    pub fn global_to_local(&self, id: NodeId, gx: f32, gy: f32) -> Point {
        let origin = self.local_to_global(id, 0.0, 0.0);
        Point::new(gx - origin.x, gy - origin.y)
    }

    /// Hit-tests a single node: visible and `Widget::hit_test` at the local point.
    #[must_use]
    pub fn hit_test(&self, id: NodeId, gx: f32, gy: f32) -> bool {
        let Some(slot) = self.slots.get(&id) else {
            return false;
        };
        slot.node.visible && slot.widget.hit_test(&slot.node, self.global_to_local(id, gx, gy))
    }

    /// Returns true if `id` and all its ancestors are visible.
    #[must_use]
    pub fn is_visible_in_tree(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.node(c)) {
            if !node.visible {
                return false;
            }
            current = node.parent;
        }
        current.is_none()
    }

    /// Front-to-back search for the interactive node under a canvas point.
    ///
    /// Children are visited in reverse order and before their parent, so a
    /// later or deeper node wins.
    #[must_use]
    pub fn find_interactive(&self, gx: f32, gy: f32) -> Option<NodeId> {
        self.find_interactive_in(self.root, Point::ZERO, Point::new(gx, gy))
    }

    fn find_interactive_in(&self, id: NodeId, parent_origin: Point, p: Point) -> Option<NodeId> {
        let slot = self.slots.get(&id)?;
        if !slot.node.visible {
            return None;
        }
        let origin = parent_origin.offset(slot.node.x, slot.node.y);

        for &child in slot.node.children.iter().rev() {
            if let Some(found) = self.find_interactive_in(child, origin, p) {
                return Some(found);
            }
        }

        let local = Point::new(p.x - origin.x, p.y - origin.y);
        (slot.node.interactive && slot.widget.hit_test(&slot.node, local)).then_some(id)
    }

    /// Finds the open, interactive overlay under a canvas point. When several overlap,
    /// the one painted last wins.
    #[must_use]
    pub fn find_overlay(&self, gx: f32, gy: f32) -> Option<NodeId> {
        let mut found = None;
        self.find_overlay_in(self.root, Point::ZERO, Point::new(gx, gy), &mut found);
        found
    }

    fn find_overlay_in(&self, id: NodeId, parent_origin: Point, p: Point, found: &mut Option<NodeId>) {
        let Some(slot) = self.slots.get(&id) else {
            return;
        };
        if !slot.node.visible {
            return;
        }
        let origin = parent_origin.offset(slot.node.x, slot.node.y);
        if slot.node.interactive && slot.widget.is_overlay() {
            let local = Point::new(p.x - origin.x, p.y - origin.y);
            if slot.widget.hit_test(&slot.node, local) {
                *found = Some(id);
            }
        }
        for &child in &slot.node.children {
            self.find_overlay_in(child, origin, p, found);
        }
    }

    /// Overlay-first target resolution used by the router.
    #[must_use]
    pub fn find_target(&self, gx: f32, gy: f32) -> Option<NodeId> {
        self.find_overlay(gx, gy).or_else(|| self.find_interactive(gx, gy))
    }

    /// IDs of every open overlay, in paint order.
    #[must_use]
    pub fn open_overlays(&self) -> Vec<NodeId> {
        self.iter_dfs()
            .filter(|id| self.slots.get(id).is_some_and(|slot| slot.widget.is_overlay()))
            .collect()
    }

    /// Closes every open overlay except `keep`.
    pub fn close_overlays_except(&mut self, keep: Option<NodeId>) {
        for slot_id in self.open_overlays() {
            if Some(slot_id) == keep {
                continue;
            }
            if let Some(slot) = self.slots.get_mut(&slot_id) {
                slot.widget.close_overlay();
            }
        }
    }

    /// Paints the tree, then the open overlays on top.
    pub fn paint(&self, surface: &mut Surface, theme: &Theme) {
        self.paint_node(self.root, surface, theme);
        self.paint_overlays(self.root, surface, theme);
    }

    fn paint_node(&self, id: NodeId, surface: &mut Surface, theme: &Theme) {
        let Some(slot) = self.slots.get(&id) else {
            return;
        };
        if !slot.node.visible {
            return;
        }
        surface.save();
        surface.translate(slot.node.x, slot.node.y);
        surface.multiply_alpha(slot.node.opacity);
        slot.widget.paint(&slot.node, surface, theme);
        for &child in &slot.node.children {
            self.paint_node(child, surface, theme);
        }
        surface.restore();
    }

    fn paint_overlays(&self, id: NodeId, surface: &mut Surface, theme: &Theme) {
        let Some(slot) = self.slots.get(&id) else {
            return;
        };
        if !slot.node.visible {
            return;
        }
        surface.save();
        surface.translate(slot.node.x, slot.node.y);
        surface.multiply_alpha(slot.node.opacity);
        if slot.widget.is_overlay() {
            slot.widget.paint_overlay(&slot.node, surface, theme);
        }
        for &child in &slot.node.children {
            self.paint_overlays(child, surface, theme);
        }
        surface.restore();
    }

    /// Advances every attached node, hidden ones included, parents first.
    ///
    /// Each node's [`Node::is_shown`] reflects its ancestors' visibility by
    /// the time its widget updates, so widgets can skip work while hidden.
    pub fn update(&mut self, dt: f32) {
        let mut stack = vec![(self.root, true)];
        while let Some((id, ancestors_visible)) = stack.pop() {
            let Some(slot) = self.slots.get_mut(&id) else {
                continue;
            };
            slot.node.ancestors_visible = ancestors_visible;
            slot.widget.update(&mut slot.node, dt);
            let shown = slot.node.is_shown();
            stack.extend(slot.node.children.iter().rev().map(|&child| (child, shown)));
        }
        if let Some(id) = self.focused {
            if !self.is_visible_in_tree(id) {
                self.set_focus(None);
            }
        }
    }

    /// Delivers a pointer event to `target`. Returns false if it no longer exists.
    pub fn dispatch_pointer(
        &mut self,
        target: NodeId,
        phase: PointerPhase,
        x: f32,
        y: f32,
        button: MouseButton,
        ctx: &mut EventCtx<'_>,
    ) -> bool {
        let local = self.global_to_local(target, x, y);
        let Some(slot) = self.slots.get_mut(&target) else {
            return false;
        };
        let event = PointerEvent { x, y, local, button };
        ctx.set_target(Some(target));
        let (widget, node) = (&mut slot.widget, &mut slot.node);
        match phase {
            PointerPhase::Down => widget.on_pointer_down(node, &event, ctx),
            PointerPhase::Up => widget.on_pointer_up(node, &event, ctx),
            PointerPhase::Move => widget.on_pointer_move(node, &event, ctx),
            PointerPhase::Enter => widget.on_pointer_enter(node, &event, ctx),
            PointerPhase::Leave => widget.on_pointer_leave(node, &event, ctx),
        }
        ctx.set_target(None);
        true
    }

    /// Delivers a wheel event to `target`.
    pub fn dispatch_wheel(
        &mut self,
        target: NodeId,
        x: f32,
        y: f32,
        delta_x: f32,
        delta_y: f32,
        ctx: &mut EventCtx<'_>,
    ) -> bool {
        let local = self.global_to_local(target, x, y);
        let Some(slot) = self.slots.get_mut(&target) else {
            return false;
        };
        let event = WheelEvent { x, y, local, delta_x, delta_y };
        ctx.set_target(Some(target));
        slot.widget.on_wheel(&mut slot.node, &event, ctx);
        ctx.set_target(None);
        true
    }

    /// Node holding keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Moves keyboard focus, blurring the previous holder.
    pub fn set_focus(&mut self, id: Option<NodeId>) {
        if self.focused == id {
            return;
        }
        if let Some(previous) = self.focused.take() {
            if let Some(slot) = self.slots.get_mut(&previous) {
                slot.widget.blur();
            }
        }
        if let Some(next) = id {
            if let Some(slot) = self.slots.get_mut(&next) {
                slot.widget.focus();
                self.focused = Some(next);
            }
        }
    }

    /// Clears focus if `id` holds it.
    pub fn release_focus(&mut self, id: NodeId) {
        if self.focused == Some(id) {
            self.set_focus(None);
        }
    }

    /// Sends a key press to the focused node. Returns true if consumed.
    pub fn route_key_down(&mut self, key: &KeyInput, ctx: &mut EventCtx<'_>) -> bool {
        self.route_key(key, ctx, true)
    }

    /// Sends a key release to the focused node. Returns true if consumed.
    pub fn route_key_up(&mut self, key: &KeyInput, ctx: &mut EventCtx<'_>) -> bool {
        self.route_key(key, ctx, false)
    }

    fn route_key(&mut self, key: &KeyInput, ctx: &mut EventCtx<'_>, down: bool) -> bool {
        let Some(id) = self.focused else {
            return false;
        };
        // A node hidden by itself or an ancestor cannot keep focus.
        if !self.is_visible_in_tree(id) {
            tracing::debug!("dropping focus of hidden node {:?}", id);
            self.set_focus(None);
            return false;
        }
        let Some(slot) = self.slots.get_mut(&id) else {
            self.focused = None;
            return false;
        };
        ctx.set_target(Some(id));
        let consumed = if down {
            slot.widget.on_key_down(&mut slot.node, key, ctx)
        } else {
            slot.widget.on_key_up(&mut slot.node, key, ctx)
        };
        ctx.set_target(None);
        consumed
    }

    /// Returns all attached node IDs in depth-first paint order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = NodeId> + '_ {
        SceneDfs {
            scene: self,
            stack: vec![self.root],
        }
    }
}

/// Depth-first iterator over the attached tree.
struct SceneDfs<'a> {
    scene: &'a Scene,
    stack: Vec<NodeId>,
}

impl Iterator for SceneDfs<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        self.stack.extend(self.scene.children(id).iter().rev().copied());

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::NullAudio;
    use crate::geometry::Rect;
    use crate::render::RenderCommand;
    use crate::style::Color;
    use crate::widget::Container;

    /// Interactive box that counts what it receives.
    #[derive(Default)]
    struct Recorder {
        downs: u32,
        keys: u32,
        blurred: u32,
        focused: u32,
        updates: u32,
    }

    impl Widget for Recorder {
        fn initial_node(&self) -> Node {
            Node::new(50.0, 50.0).with_interactive(true)
        }

        fn update(&mut self, _node: &mut Node, _dt: f32) {
            self.updates += 1;
        }

        fn on_pointer_down(&mut self, _node: &mut Node, _event: &PointerEvent, _ctx: &mut EventCtx<'_>) {
            self.downs += 1;
        }

        fn on_key_down(&mut self, _node: &mut Node, _key: &KeyInput, _ctx: &mut EventCtx<'_>) -> bool {
            self.keys += 1;
            true
        }

        fn focus(&mut self) {
            self.focused += 1;
        }

        fn blur(&mut self) {
            self.blurred += 1;
        }
    }

    #[test]
    fn test_add_child_reparents() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let a = scene.spawn(root, 0.0, 0.0, Container::new());
        let b = scene.spawn(root, 0.0, 0.0, Container::new());
        let leaf = scene.spawn(a, 0.0, 0.0, Recorder::default());

        scene.add_child(b, leaf);

        assert_eq!(scene.parent(leaf), Some(b));
        assert!(scene.children(a).is_empty());
        assert_eq!(scene.children(b), &[leaf]);
    }

    #[test]
    fn test_remove_child_is_idempotent() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let leaf = scene.spawn(root, 0.0, 0.0, Recorder::default());

        scene.remove_child(root, leaf);
        scene.remove_child(root, leaf);

        assert!(scene.parent(leaf).is_none());
        assert!(scene.children(root).is_empty());
        assert!(scene.contains(leaf));
    }

    #[test]
    fn test_remove_child_ignores_foreign_node() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let a = scene.spawn(root, 0.0, 0.0, Container::new());
        let leaf = scene.spawn(a, 0.0, 0.0, Recorder::default());

        scene.remove_child(root, leaf);

        assert_eq!(scene.parent(leaf), Some(a));
    }

    #[test]
    fn test_destroy_drops_subtree_and_focus() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let panel = scene.spawn(root, 0.0, 0.0, Container::new());
        let leaf = scene.spawn(panel, 0.0, 0.0, Recorder::default());
        scene.set_focus(Some(leaf));

        scene.destroy(panel);

        assert!(!scene.contains(panel));
        assert!(!scene.contains(leaf));
        assert!(scene.focused().is_none());
        assert!(scene.children(root).is_empty());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_remove_all_children_detaches() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let panel = scene.spawn(root, 0.0, 0.0, Container::new());
        let a = scene.spawn(panel, 0.0, 0.0, Recorder::default());
        let b = scene.spawn(panel, 60.0, 0.0, Recorder::default());

        scene.remove_all_children(panel);

        assert!(scene.children(panel).is_empty());
        for child in [a, b] {
            assert!(scene.contains(child));
            assert!(scene.parent(child).is_none());
        }
        assert_eq!(scene.iter_dfs().collect::<Vec<_>>(), vec![root, panel]);

        scene.add_child(root, b);
        assert_eq!(scene.parent(b), Some(root));
        assert_eq!(scene.children(root), &[panel, b]);

        // Unknown parents and empty parents are no-ops.
        scene.remove_all_children(panel);
        scene.destroy(a);
        scene.remove_all_children(a);
        assert_eq!(scene.parent(b), Some(root));
    }

    #[test]
    fn test_coordinate_round_trip() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let panel = scene.spawn(root, 100.0, 50.0, Container::new());
        let leaf = scene.spawn(panel, 10.0, 20.0, Recorder::default());

        assert_eq!(scene.local_to_global(leaf, 1.0, 2.0), Point::new(111.0, 72.0));
        assert_eq!(scene.global_to_local(leaf, 111.0, 72.0), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_hidden_subtree_is_not_hit() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let panel = scene.spawn(root, 0.0, 0.0, Container::new());
        let leaf = scene.spawn(panel, 0.0, 0.0, Recorder::default());

        assert_eq!(scene.find_interactive(10.0, 10.0), Some(leaf));

        scene.node_mut(panel).unwrap().visible = false;
        assert_eq!(scene.find_interactive(10.0, 10.0), None);
        assert!(!scene.is_visible_in_tree(leaf));
    }

    #[test]
    fn test_interactive_parent_loses_to_child() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let parent = scene.insert_with(Node::new(200.0, 200.0).with_interactive(true), Container::new());
        scene.add_child(root, parent);
        let child = scene.spawn(parent, 0.0, 0.0, Recorder::default());

        assert_eq!(scene.find_interactive(10.0, 10.0), Some(child));
        assert_eq!(scene.find_interactive(150.0, 150.0), Some(parent));
    }

    #[test]
    fn test_focus_blurs_previous() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let a = scene.spawn(root, 0.0, 0.0, Recorder::default());
        let b = scene.spawn(root, 60.0, 0.0, Recorder::default());

        scene.set_focus(Some(a));
        scene.set_focus(Some(a));
        scene.set_focus(Some(b));

        assert_eq!(scene.focused(), Some(b));
        assert_eq!(scene.widget::<Recorder>(a).unwrap().blurred, 1);
        assert_eq!(scene.widget::<Recorder>(a).unwrap().focused, 1);

        scene.release_focus(a);
        assert_eq!(scene.focused(), Some(b));
        scene.release_focus(b);
        assert_eq!(scene.focused(), None);
    }

    #[test]
    fn test_hidden_focus_receives_no_keys() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let panel = scene.spawn(root, 0.0, 0.0, Container::new());
        let leaf = scene.spawn(panel, 0.0, 0.0, Recorder::default());
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);
        scene.set_focus(Some(leaf));
        assert!(scene.route_key_down(&KeyInput::char('a'), &mut ctx));

        scene.node_mut(panel).unwrap().visible = false;

        assert!(!scene.route_key_down(&KeyInput::char('b'), &mut ctx));
        assert!(!scene.route_key_up(&KeyInput::char('b'), &mut ctx));
        assert!(scene.focused().is_none());
        let recorder = scene.widget::<Recorder>(leaf).unwrap();
        assert_eq!(recorder.keys, 1);
        assert_eq!(recorder.blurred, 1);
    }

    #[test]
    fn test_update_drops_focus_of_hidden_node() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let leaf = scene.spawn(root, 0.0, 0.0, Recorder::default());
        scene.set_focus(Some(leaf));

        scene.update(0.016);
        assert_eq!(scene.focused(), Some(leaf));

        scene.node_mut(leaf).unwrap().visible = false;
        scene.update(0.016);
        assert!(scene.focused().is_none());
        assert_eq!(scene.widget::<Recorder>(leaf).unwrap().blurred, 1);
    }

    #[test]
    fn test_dispatch_sets_local_coordinates() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let recorder = scene.spawn(root, 30.0, 40.0, Recorder::default());
        let audio = NullAudio;
        let mut ctx = EventCtx::new(&audio);

        assert!(scene.dispatch_pointer(recorder, PointerPhase::Down, 35.0, 45.0, MouseButton::Left, &mut ctx));
        assert_eq!(scene.widget::<Recorder>(recorder).unwrap().downs, 1);
        assert!(ctx.target().is_none());

        scene.destroy(recorder);
        assert!(!scene.dispatch_pointer(recorder, PointerPhase::Down, 0.0, 0.0, MouseButton::Left, &mut ctx));
    }

    #[test]
    fn test_dfs_order() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let a = scene.spawn(root, 0.0, 0.0, Container::new());
        let a1 = scene.spawn(a, 0.0, 0.0, Container::new());
        let b = scene.spawn(root, 0.0, 0.0, Container::new());

        let order: Vec<_> = scene.iter_dfs().collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }

    #[test]
    fn test_widget_downcast_mismatch() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let recorder = scene.spawn(root, 0.0, 0.0, Recorder::default());

        assert!(scene.widget::<Container>(recorder).is_none());
        assert!(scene.widget::<Recorder>(recorder).is_some());
        assert!(scene.get_mut::<Recorder>(recorder).is_some());
    }

    #[test]
    fn test_update_reaches_hidden_nodes() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let panel = scene.spawn(root, 0.0, 0.0, Container::new());
        let recorder = scene.spawn(panel, 0.0, 0.0, Recorder::default());
        scene.node_mut(panel).unwrap().visible = false;

        scene.update(0.016);
        scene.update(0.016);

        assert_eq!(scene.widget::<Recorder>(recorder).unwrap().updates, 2);
        assert!(!scene.node(recorder).unwrap().is_shown());
        assert!(!scene.node(panel).unwrap().is_shown());

        scene.node_mut(panel).unwrap().visible = true;
        scene.update(0.016);
        assert!(scene.node(recorder).unwrap().is_shown());
    }

    #[test]
    fn test_paint_translates_and_fades_children() {
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let outer = scene.insert_with(Node::new(100.0, 100.0).at(10.0, 20.0), Container::new().with_background(red));
        scene.add_child(root, outer);
        let mut inner_node = Node::new(10.0, 10.0).at(5.0, 5.0);
        inner_node.opacity = 0.5;
        let inner = scene.insert_with(inner_node, Container::new().with_background(red));
        scene.add_child(outer, inner);
        let hidden = scene.insert_with(Node::new(10.0, 10.0), Container::new().with_background(red));
        scene.add_child(root, hidden);
        scene.node_mut(hidden).unwrap().visible = false;

        let mut surface = Surface::new();
        scene.paint(&mut surface, &Theme::CLASSIC);

        let fills: Vec<(Rect, f32)> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::FillRect { bounds, color, .. } => Some((*bounds, color.a)),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![(Rect::new(10.0, 20.0, 100.0, 100.0), 1.0), (Rect::new(15.0, 25.0, 10.0, 10.0), 0.5)]
        );
    }
}
