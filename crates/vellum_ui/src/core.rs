//! Event router and frame driver.
//!
//! [`Core`] owns the page stack and the pointer bookkeeping (hovered and
//! active node). The host feeds it normalized [`InputEvent`]s and calls
//! [`Core::frame`] (or [`Core::tick`]) once per display frame.
//!
//! ```text
//! HostEvent ─► InputNormalizer ─► Core::handle ─► current page's Scene
//!                                      │
//!                                      └─► queued Commands (focus, navigation)
//! ```

use std::time::Instant;

use crate::assets::{AudioSink, NullAudio};
use crate::config::UiConfig;
use crate::geometry::{Point, Size};
use crate::input::{InputEvent, KeyInput, MouseButton, Viewport};
use crate::page::Page;
use crate::render::Surface;
use crate::scene::{Command, EventCtx, NodeId, PointerPhase};
use crate::style::Theme;

/// Wall-clock frame timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    /// Creates a clock that has not ticked yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Seconds since the previous tick; zero on the first tick.
    ///
    /// Not clamped: a long gap (hidden tab, debugger) yields a long frame.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let dt = self
            .last
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last = Some(now);
        dt
    }

    /// Forgets the previous tick.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// The router: page stack, pointer tracking, dispatch and the frame loop.
///
/// Construct one per running application and drive it from a single thread.
pub struct Core {
    pages: Vec<Box<dyn Page>>,
    hovered: Option<NodeId>,
    active: Option<NodeId>,
    pointer: Point,
    theme: Theme,
    logical: Size,
    audio: Box<dyn AudioSink>,
    running: bool,
    clock: FrameClock,
}

impl Core {
    /// Creates a stopped router with an empty stack.
    #[must_use]
    pub fn new(config: UiConfig, audio: Box<dyn AudioSink>) -> Self {
        Self {
            pages: Vec::new(),
            hovered: None,
            active: None,
            pointer: Point::ZERO,
            theme: config.theme,
            logical: config.canvas.size(),
            audio,
            running: false,
            clock: FrameClock::new(),
        }
    }

    /// Theme passed to every paint.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Logical canvas size.
    #[must_use]
    pub fn logical_size(&self) -> Size {
        self.logical
    }

    /// Node under the pointer after the last move.
    #[must_use]
    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    /// Node that received the last press, until its release.
    #[must_use]
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Starts the frame loop.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.clock.reset();
        tracing::debug!(pages = self.pages.len(), "UI core started");
    }

    /// Pauses the frame loop. Input is still routed.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        tracing::debug!("UI core stopped");
    }

    /// Returns true between [`Core::start`] and [`Core::stop`].
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stops, exits the current page and drops the whole stack.
    pub fn shutdown(&mut self) {
        self.stop();
        if let Some(top) = self.pages.last_mut() {
            top.on_exit();
        }
        let dropped = self.pages.len();
        self.pages.clear();
        self.hovered = None;
        self.active = None;
        tracing::debug!(dropped, "UI core shut down");
    }

    // =========================================================================
    // Page stack
    // =========================================================================

    /// Pushes a page and makes it current.
    pub fn push_page(&mut self, page: impl Page + 'static) {
        self.push_boxed(Box::new(page));
    }

    /// Pushes an already boxed page.
    pub fn push_boxed(&mut self, mut page: Box<dyn Page>) {
        self.release_pointer();
        if let Some(current) = self.pages.last_mut() {
            current.on_exit();
        }
        tracing::debug!(page = page.name(), depth = self.pages.len() + 1, "Push page");
        page.on_enter();
        page.on_resize(self.logical);
        self.pages.push(page);
    }

    /// Pops the current page; the one below (if any) is entered again.
    pub fn pop_page(&mut self) -> Option<Box<dyn Page>> {
        if self.pages.is_empty() {
            return None;
        }
        self.release_pointer();
        let mut page = self.pages.pop()?;
        page.on_exit();
        tracing::debug!(page = page.name(), depth = self.pages.len(), "Pop page");
        if let Some(top) = self.pages.last_mut() {
            top.on_enter();
        }
        Some(page)
    }

    /// Pop followed by push: two full exit/enter cycles.
    pub fn replace_page(&mut self, page: impl Page + 'static) {
        self.replace_boxed(Box::new(page));
    }

    fn replace_boxed(&mut self, page: Box<dyn Page>) {
        tracing::debug!(page = page.name(), "Replace page");
        self.pop_page();
        self.push_boxed(page);
    }

    /// Top of the stack.
    #[must_use]
    pub fn current_page(&self) -> Option<&dyn Page> {
        self.pages.last().map(|page| &**page)
    }

    /// Top of the stack, mutably.
    pub fn current_page_mut(&mut self) -> Option<&mut (dyn Page + 'static)> {
        self.pages.last_mut().map(|page| &mut **page)
    }

    /// Stack depth.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Sends `leave` to the hovered node and forgets the pressed one before
    /// the current page changes.
    fn release_pointer(&mut self) {
        let active = self.active.take();
        let Some(hovered) = self.hovered.take() else {
            return;
        };
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let mut ctx = EventCtx::new(&*self.audio);
        let Point { x, y } = self.pointer;
        page.scene_mut()
            .dispatch_pointer(hovered, PointerPhase::Leave, x, y, MouseButton::Left, &mut ctx);
        let dropped = ctx.take_commands();
        if !dropped.is_empty() {
            tracing::trace!(?dropped, ?active, "Commands from leave during page change ignored");
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Routes one normalized input event to the current page.
    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
            InputEvent::PointerDown { x, y, button } => self.pointer_down(x, y, button),
            InputEvent::PointerUp { x, y, button } => self.pointer_up(x, y, button),
            InputEvent::Wheel { x, y, delta_x, delta_y } => self.wheel(x, y, delta_x, delta_y),
            InputEvent::KeyDown(key) => self.key_down(&key),
            InputEvent::KeyUp(key) => self.key_up(&key),
        }
    }

    /// Updates hover (leave old, enter new) and sends `move` to the node
    /// under the pointer.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pointer = Point::new(x, y);
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let scene = page.scene_mut();
        let target = scene.find_target(x, y);
        let mut ctx = EventCtx::new(&*self.audio);

        if target != self.hovered {
            tracing::trace!(from = ?self.hovered, to = ?target, "Hover changed");
            if let Some(old) = self.hovered {
                scene.dispatch_pointer(old, PointerPhase::Leave, x, y, MouseButton::Left, &mut ctx);
            }
            if let Some(new) = target {
                scene.dispatch_pointer(new, PointerPhase::Enter, x, y, MouseButton::Left, &mut ctx);
            }
            self.hovered = target;
        }
        if let Some(id) = target {
            scene.dispatch_pointer(id, PointerPhase::Move, x, y, MouseButton::Left, &mut ctx);
        }

        let commands = ctx.take_commands();
        self.apply(commands);
    }

    /// Closes every other overlay, records the target as active and sends
    /// it `down`.
    pub fn pointer_down(&mut self, x: f32, y: f32, button: MouseButton) {
        self.pointer = Point::new(x, y);
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let scene = page.scene_mut();
        let target = scene.find_target(x, y);
        scene.close_overlays_except(target);
        self.active = target;
        tracing::trace!(?target, ?button, x, y, "Pointer down");

        let mut ctx = EventCtx::new(&*self.audio);
        if let Some(id) = target {
            scene.dispatch_pointer(id, PointerPhase::Down, x, y, button, &mut ctx);
        }
        let commands = ctx.take_commands();
        self.apply(commands);
    }

    /// Sends `up` to the active node wherever the pointer is now.
    pub fn pointer_up(&mut self, x: f32, y: f32, button: MouseButton) {
        self.pointer = Point::new(x, y);
        let active = self.active.take();
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let Some(id) = active else {
            return;
        };
        tracing::trace!(target = ?id, ?button, x, y, "Pointer up");

        let mut ctx = EventCtx::new(&*self.audio);
        page.scene_mut()
            .dispatch_pointer(id, PointerPhase::Up, x, y, button, &mut ctx);
        let commands = ctx.take_commands();
        self.apply(commands);
    }

    /// Sends a wheel event to the node under the pointer.
    pub fn wheel(&mut self, x: f32, y: f32, delta_x: f32, delta_y: f32) {
        self.pointer = Point::new(x, y);
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let scene = page.scene_mut();
        let Some(target) = scene.find_target(x, y) else {
            return;
        };
        let mut ctx = EventCtx::new(&*self.audio);
        scene.dispatch_wheel(target, x, y, delta_x, delta_y, &mut ctx);
        let commands = ctx.take_commands();
        self.apply(commands);
    }

    /// Sends a key press to the current page.
    pub fn key_down(&mut self, key: &KeyInput) {
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let mut ctx = EventCtx::new(&*self.audio);
        page.on_key_down(key, &mut ctx);
        let commands = ctx.take_commands();
        self.apply(commands);
    }

    /// Sends a key release to the current page.
    pub fn key_up(&mut self, key: &KeyInput) {
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        let mut ctx = EventCtx::new(&*self.audio);
        page.on_key_up(key, &mut ctx);
        let commands = ctx.take_commands();
        self.apply(commands);
    }

    /// Applies queued commands: focus changes first (they target nodes of the
    /// page that raised them), then navigation in queue order.
    fn apply(&mut self, commands: Vec<Command>) {
        if commands.is_empty() {
            return;
        }
        let (focus, navigation): (Vec<_>, Vec<_>) = commands
            .into_iter()
            .partition(|command| matches!(command, Command::Focus(_) | Command::Blur(_)));

        if let Some(page) = self.pages.last_mut() {
            let scene = page.scene_mut();
            for command in focus {
                match command {
                    Command::Focus(id) => scene.set_focus(Some(id)),
                    Command::Blur(id) => scene.release_focus(id),
                    _ => {}
                }
            }
        }

        for command in navigation {
            match command {
                Command::PushPage(page) => self.push_boxed(page),
                Command::PopPage => {
                    self.pop_page();
                }
                Command::ReplacePage(page) => self.replace_boxed(page),
                Command::Focus(_) | Command::Blur(_) => {}
            }
        }
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Runs one frame: update the current page by `dt` seconds, then paint
    /// it into a cleared `surface`. Does nothing while stopped.
    pub fn frame(&mut self, dt: f32, surface: &mut Surface) {
        if !self.running {
            return;
        }
        surface.begin_frame();
        let Some(page) = self.pages.last_mut() else {
            return;
        };
        page.update(dt);
        page.paint(surface, &self.theme);
    }

    /// Like [`Core::frame`] with `dt` measured from the previous tick.
    /// Returns the `dt` used.
    pub fn tick(&mut self, now: Instant, surface: &mut Surface) -> f32 {
        let dt = self.clock.tick(now);
        self.frame(dt, surface);
        dt
    }

    /// Host area changed: returns the letterbox fit for the input
    /// normalizer and re-sends the logical size to the current page.
    pub fn resize(&mut self, host: Size) -> Viewport {
        let viewport = Viewport::fit(host, self.logical);
        tracing::debug!(
            host_width = host.width,
            host_height = host.height,
            scale = viewport.scale,
            "Host resized"
        );
        if let Some(page) = self.pages.last_mut() {
            page.on_resize(self.logical);
        }
        viewport
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new(UiConfig::default(), Box::new(NullAudio))
    }
}
