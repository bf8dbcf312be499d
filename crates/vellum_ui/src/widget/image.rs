//! Image blit.

use crate::assets::ImageHandle;
use crate::geometry::Rect;
use crate::render::Surface;
use crate::scene::{Node, Widget};
use crate::style::Theme;

/// Draws an image (or a cropped part of it) stretched over the node.
///
/// Nothing is drawn until an image is set. A node with zero width or height
/// adopts the image's natural size on the next update.
#[derive(Debug, Clone, Default)]
pub struct Image {
    image: Option<ImageHandle>,
    /// Source crop; `None` uses the whole image.
    pub source: Option<Rect>,
}

impl Image {
    /// Creates an empty image widget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            image: None,
            source: None,
        }
    }

    /// Creates a widget already showing `image`.
    #[must_use]
    pub const fn with_image(image: ImageHandle) -> Self {
        Self {
            image: Some(image),
            source: None,
        }
    }

    /// Sets the source crop.
    #[must_use]
    pub const fn cropped(mut self, source: Rect) -> Self {
        self.source = Some(source);
        self
    }

    /// Current image.
    #[must_use]
    pub const fn image(&self) -> Option<ImageHandle> {
        self.image
    }

    /// Replaces the image and adopts its natural size if `node` has none.
    pub fn set_image(&mut self, node: &mut Node, image: Option<ImageHandle>) {
        self.image = image;
        self.adopt_size(node);
    }

    fn adopt_size(&self, node: &mut Node) {
        let Some(image) = self.image else {
            return;
        };
        if node.width <= 0.0 {
            node.width = image.width;
        }
        if node.height <= 0.0 {
            node.height = image.height;
        }
    }
}

impl Widget for Image {
    fn initial_node(&self) -> Node {
        let mut node = Node::default();
        self.adopt_size(&mut node);
        node
    }

    fn update(&mut self, node: &mut Node, _dt: f32) {
        self.adopt_size(node);
    }

    fn paint(&self, node: &Node, surface: &mut Surface, _theme: &Theme) {
        let Some(image) = self.image else {
            return;
        };
        let source = self.source.unwrap_or(Rect::new(0.0, 0.0, image.width, image.height));
        surface.draw_image(image, source, node.local_bounds());
    }
}
