//! Events delivered to widgets and the context they run in.
//!
//! Widget callbacks run synchronously inside dispatch. Anything that must
//! touch state the widget does not own (the page stack, keyboard focus) is
//! queued on the [`EventCtx`] and applied by the router right after the
//! handler returns.

use std::fmt;

use crate::assets::{AudioSink, SoundCue};
use crate::geometry::Point;
use crate::input::MouseButton;
use crate::page::Page;
use crate::scene::node::NodeId;

/// Pointer event targeted at one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Canvas X.
    pub x: f32,
    /// Canvas Y.
    pub y: f32,
    /// Position relative to the target's origin.
    pub local: Point,
    /// Button involved (`Left` for moves).
    pub button: MouseButton,
}

impl PointerEvent {
    /// Left-button event for a node sitting at the canvas origin.
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            local: Point::new(x, y),
            button: MouseButton::Left,
        }
    }
}

/// Wheel event targeted at one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Canvas X.
    pub x: f32,
    /// Canvas Y.
    pub y: f32,
    /// Position relative to the target's origin.
    pub local: Point,
    /// Horizontal delta.
    pub delta_x: f32,
    /// Vertical delta.
    pub delta_y: f32,
}

impl WheelEvent {
    /// Vertical wheel event for a node sitting at the canvas origin.
    #[must_use]
    pub const fn at(x: f32, y: f32, delta_y: f32) -> Self {
        Self {
            x,
            y,
            local: Point::new(x, y),
            delta_x: 0.0,
            delta_y,
        }
    }
}

/// Deferred request raised during dispatch.
pub enum Command {
    /// Push a page on top of the stack.
    PushPage(Box<dyn Page>),
    /// Pop the current page.
    PopPage,
    /// Pop, then push.
    ReplacePage(Box<dyn Page>),
    /// Give keyboard focus to a node of the current page.
    Focus(NodeId),
    /// Drop keyboard focus if `NodeId` holds it.
    Blur(NodeId),
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PushPage(page) => f.debug_tuple("PushPage").field(&page.name()).finish(),
            Self::PopPage => f.write_str("PopPage"),
            Self::ReplacePage(page) => f.debug_tuple("ReplacePage").field(&page.name()).finish(),
            Self::Focus(id) => f.debug_tuple("Focus").field(id).finish(),
            Self::Blur(id) => f.debug_tuple("Blur").field(id).finish(),
        }
    }
}

/// Handler context: audio access plus the deferred command queue.
pub struct EventCtx<'a> {
    audio: &'a dyn AudioSink,
    target: Option<NodeId>,
    commands: Vec<Command>,
}

impl<'a> EventCtx<'a> {
    /// Creates a context with an empty queue.
    #[must_use]
    pub fn new(audio: &'a dyn AudioSink) -> Self {
        Self {
            audio,
            target: None,
            commands: Vec::new(),
        }
    }

    /// Node currently handling the event, if any.
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub(crate) fn set_target(&mut self, target: Option<NodeId>) {
        self.target = target;
    }

    /// Plays a feedback sound.
    pub fn play(&self, cue: SoundCue) {
        self.audio.play(cue);
    }

    /// Requests keyboard focus for the current target.
    pub fn request_focus(&mut self) {
        if let Some(id) = self.target {
            self.commands.push(Command::Focus(id));
        }
    }

    /// Gives up keyboard focus held by the current target.
    pub fn release_focus(&mut self) {
        if let Some(id) = self.target {
            self.commands.push(Command::Blur(id));
        }
    }

    /// Queues a page push.
    pub fn push_page(&mut self, page: impl Page + 'static) {
        self.commands.push(Command::PushPage(Box::new(page)));
    }

    /// Queues a page pop.
    pub fn pop_page(&mut self) {
        self.commands.push(Command::PopPage);
    }

    /// Queues a page replacement.
    pub fn replace_page(&mut self, page: impl Page + 'static) {
        self.commands.push(Command::ReplacePage(Box::new(page)));
    }

    /// Queued commands, oldest first.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drains the queue.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

/// Callback with no payload (button clicks).
pub type ClickCallback = Box<dyn FnMut(&mut EventCtx<'_>)>;

/// Callback carrying a copyable value (toggle state, slider value).
pub type Callback<T> = Box<dyn FnMut(&mut EventCtx<'_>, T)>;

/// Callback carrying text (text field edits).
pub type TextCallback = Box<dyn FnMut(&mut EventCtx<'_>, &str)>;

/// Callback carrying a selected index and its label.
pub type SelectCallback = Box<dyn FnMut(&mut EventCtx<'_>, usize, &str)>;
