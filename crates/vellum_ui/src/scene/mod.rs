//! Scene graph: nodes, the widget trait, and the tree that owns them.
//!
//! A [`Scene`] is an arena of [`Node`]s, each paired with a boxed
//! [`Widget`]. Parent/child links are node IDs, so re-parenting never moves
//! widget state and a widget never holds a reference into the tree.

mod event;
mod node;
mod tree;

pub use event::{Callback, ClickCallback, Command, EventCtx, PointerEvent, SelectCallback, TextCallback, WheelEvent};
pub use node::{AsAny, Node, NodeId, Widget};
pub use tree::{PointerPhase, Scene};
