//! Pages: scene roots with a navigation lifecycle.

use std::borrow::Cow;

use crate::geometry::Size;
use crate::input::{Key, KeyInput};
use crate::render::{Surface, TextAlign, TextBaseline};
use crate::scene::{EventCtx, Node, NodeId, Scene, Widget};
use crate::style::{FontKey, Theme};
use crate::widget::{Button, Label};

/// A screen the router can push on its stack.
///
/// The router only talks to the current (top) page. Lifecycle hooks are
/// called by the stack in strict enter/exit alternation.
#[allow(unused_variables)]
pub trait Page {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// The page's tree.
    fn scene(&self) -> &Scene;

    /// The page's tree, mutably.
    fn scene_mut(&mut self) -> &mut Scene;

    /// Became the current page.
    fn on_enter(&mut self) {}

    /// Stopped being the current page.
    fn on_exit(&mut self) {}

    /// The logical canvas size, sent after every push and host resize.
    fn on_resize(&mut self, logical: Size) {}

    /// Advances the tree.
    fn update(&mut self, dt: f32) {
        self.scene_mut().update(dt);
    }

    /// Paints the tree.
    fn paint(&self, surface: &mut Surface, theme: &Theme) {
        self.scene().paint(surface, theme);
    }

    /// Key press; the default forwards to the focused node.
    fn on_key_down(&mut self, key: &KeyInput, ctx: &mut EventCtx<'_>) -> bool {
        self.scene_mut().route_key_down(key, ctx)
    }

    /// Key release; the default forwards to the focused node.
    fn on_key_up(&mut self, key: &KeyInput, ctx: &mut EventCtx<'_>) -> bool {
        self.scene_mut().route_key_up(key, ctx)
    }
}

/// Full-page vertical gradient taken from the theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct Backdrop;

impl Widget for Backdrop {
    fn paint(&self, node: &Node, surface: &mut Surface, theme: &Theme) {
        surface.fill_gradient(node.local_bounds(), &theme.backdrop);
    }
}

/// Page with the stock furniture: gradient backdrop, optional title and
/// back button, and Escape-to-go-back.
pub struct BasePage {
    name: Cow<'static, str>,
    scene: Scene,
}

impl BasePage {
    /// Title label width.
    pub const TITLE_WIDTH: f32 = 600.0;
    /// Title label height.
    pub const TITLE_HEIGHT: f32 = 50.0;
    /// Default title top.
    pub const TITLE_Y: f32 = 30.0;
    /// Back button position.
    pub const BACK_POSITION: (f32, f32) = (30.0, 700.0);

    /// Creates a page with a backdrop covering `size`.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, size: Size) -> Self {
        let mut scene = Scene::new(size.width, size.height);
        let root = scene.root();
        let backdrop = scene.insert_with(Node::new(size.width, size.height), Backdrop);
        scene.add_child(root, backdrop);
        Self { name: name.into(), scene }
    }

    /// Adds `widget` under the root at `(x, y)`.
    pub fn add<W: Widget>(&mut self, x: f32, y: f32, widget: W) -> NodeId {
        let root = self.scene.root();
        self.scene.spawn(root, x, y, widget)
    }

    /// Adds a centered title at `y`, horizontally centered on the page.
    pub fn add_title(&mut self, text: impl Into<Cow<'static, str>>, y: f32) -> NodeId {
        let label = Label::new(text)
            .with_font(FontKey::Title)
            .highlighted()
            .with_anchor(TextAlign::Center, TextBaseline::Top);
        let x = (self.scene.size().width - Self::TITLE_WIDTH) / 2.0;
        let id = self.add(x, y, label);
        if let Some(node) = self.scene.node_mut(id) {
            node.set_size(Self::TITLE_WIDTH, Self::TITLE_HEIGHT);
        }
        id
    }

    /// Adds a "Back" button in the bottom-left corner that pops this page.
    pub fn add_back_button(&mut self) -> NodeId {
        let (x, y) = Self::BACK_POSITION;
        self.add(x, y, Button::new("Back").on_click(|ctx| ctx.pop_page()))
    }
}

impl Page for BasePage {
    fn name(&self) -> &str {
        &self.name
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn on_key_down(&mut self, key: &KeyInput, ctx: &mut EventCtx<'_>) -> bool {
        if self.scene.route_key_down(key, ctx) {
            return true;
        }
        if key.key == Key::Escape {
            ctx.pop_page();
            return true;
        }
        false
    }
}
