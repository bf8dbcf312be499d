//! Node record and the widget trait.

use std::any::Any;

use crate::geometry::{Point, Rect, Size};
use crate::input::KeyInput;
use crate::render::Surface;
use crate::scene::event::{EventCtx, PointerEvent, WheelEvent};
use crate::style::Theme;

/// Unique identifier for a node within a [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Creates a new node ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Position, size and flags shared by every node.
///
/// `x`/`y` are relative to the parent. Ownership links are managed by the
/// scene and are read-only here.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Local X offset from the parent.
    pub x: f32,
    /// Local Y offset from the parent.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Hidden nodes skip paint, hit-testing and dispatch, subtree included.
    pub visible: bool,
    /// Opacity multiplier (0-1) applied to this subtree.
    pub opacity: f32,
    /// Only interactive nodes are hit-test candidates.
    pub interactive: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) ancestors_visible: bool,
}

impl Node {
    /// Creates a visible, opaque, non-interactive node of the given size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            visible: true,
            opacity: 1.0,
            interactive: false,
            parent: None,
            children: Vec::new(),
            ancestors_visible: true,
        }
    }

    /// Sets the local position.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets the interactive flag.
    #[must_use]
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Moves the node.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Resizes the node.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Size as a value.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounds in the parent's coordinate space.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Bounds in the node's own coordinate space.
    #[must_use]
    pub const fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Half-open box test in local coordinates.
    #[must_use]
    pub fn contains_local(&self, local: Point) -> bool {
        self.local_bounds().contains(local.x, local.y)
    }

    /// True if this node and, as of the last scene update, every ancestor
    /// are visible.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.visible && self.ancestors_visible
    }

    /// Owning parent, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in paint order (back to front).
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Downcasting support for stored widgets.
pub trait AsAny: Any {
    /// Upcasts to `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
    /// Upcasts to `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behavior attached to a node.
///
/// Every method has a default, so a widget only overrides what it needs.
/// Pointer handlers receive the owning [`Node`] so they can read their own
/// size; `event.local` is already relative to the node's origin.
#[allow(unused_variables)]
pub trait Widget: AsAny {
    /// Geometry and flags for a freshly inserted node.
    fn initial_node(&self) -> Node {
        Node::default()
    }

    /// Paints the widget in its local coordinate space.
    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {}

    /// Advances per-frame state.
    fn update(&mut self, node: &mut Node, dt: f32) {}

    /// Returns true if `local` hits this widget. Visibility is checked by the scene.
    fn hit_test(&self, node: &Node, local: Point) -> bool {
        node.contains_local(local)
    }

    /// True while the widget must paint and hit-test above sibling order.
    fn is_overlay(&self) -> bool {
        false
    }

    /// Closes the overlay part (e.g. collapses an open list).
    fn close_overlay(&mut self) {}

    /// Paints the overlay part after the whole tree.
    fn paint_overlay(&self, node: &Node, surface: &mut Surface, theme: &Theme) {}

    /// Pointer pressed on this widget.
    fn on_pointer_down(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {}

    /// Pointer released after a press that landed on this widget.
    fn on_pointer_up(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {}

    /// Pointer moved over this widget.
    fn on_pointer_move(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {}

    /// Pointer started hovering this widget.
    fn on_pointer_enter(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {}

    /// Pointer stopped hovering this widget.
    fn on_pointer_leave(&mut self, node: &mut Node, event: &PointerEvent, ctx: &mut EventCtx<'_>) {}

    /// Wheel scrolled over this widget.
    fn on_wheel(&mut self, node: &mut Node, event: &WheelEvent, ctx: &mut EventCtx<'_>) {}

    /// Key pressed while focused. Returns true if consumed.
    fn on_key_down(&mut self, node: &mut Node, key: &KeyInput, ctx: &mut EventCtx<'_>) -> bool {
        false
    }

    /// Key released while focused. Returns true if consumed.
    fn on_key_up(&mut self, node: &mut Node, key: &KeyInput, ctx: &mut EventCtx<'_>) -> bool {
        false
    }

    /// Gained keyboard focus.
    fn focus(&mut self) {}

    /// Lost keyboard focus.
    fn blur(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builders() {
        let node = Node::new(100.0, 40.0).at(5.0, 6.0).with_interactive(true);

        assert_eq!(node.bounds(), Rect::new(5.0, 6.0, 100.0, 40.0));
        assert_eq!(node.local_bounds(), Rect::new(0.0, 0.0, 100.0, 40.0));
        assert!(node.interactive && node.visible);
        assert_eq!(node.opacity, 1.0);
        assert!(node.parent().is_none());
    }

    #[test]
    fn test_contains_local_is_half_open() {
        let node = Node::new(10.0, 10.0).at(50.0, 50.0);

        assert!(node.contains_local(Point::new(0.0, 0.0)));
        assert!(!node.contains_local(Point::new(10.0, 5.0)));
        assert!(!node.contains_local(Point::new(-0.1, 5.0)));
    }
}
