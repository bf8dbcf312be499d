//! Plain grouping node.

use crate::render::Surface;
use crate::scene::{Node, Widget};
use crate::style::{Color, Theme};

/// Groups children without drawing anything itself, unless given a fill.
///
/// With clipping on, children are clipped to the container's bounds; the
/// clip ends when the scene restores the surface after the subtree.
#[derive(Debug, Clone, Default)]
pub struct Container {
    /// Optional background fill.
    pub background: Option<Color>,
    /// Clip children to the node bounds.
    pub clip: bool,
}

impl Container {
    /// Creates an empty, unclipped container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            background: None,
            clip: false,
        }
    }

    /// Sets a background fill.
    #[must_use]
    pub const fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Enables clipping.
    #[must_use]
    pub const fn clipped(mut self) -> Self {
        self.clip = true;
        self
    }
}

impl Widget for Container {
    fn paint(&self, node: &Node, surface: &mut Surface, _theme: &Theme) {
        if let Some(color) = self.background {
            surface.fill_rect(node.local_bounds(), color);
        }
        if self.clip {
            surface.push_clip(node.local_bounds());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::render::RenderCommand;
    use crate::scene::Scene;
    use crate::widget::Label;

    #[test]
    fn test_clip_wraps_children_only() {
        let mut scene = Scene::new(800.0, 600.0);
        let root = scene.root();
        let panel = scene.insert_with(Node::new(100.0, 50.0).at(10.0, 20.0), Container::new().clipped());
        scene.add_child(root, panel);
        scene.spawn(panel, 0.0, 0.0, Label::new("inside"));
        scene.spawn(root, 0.0, 0.0, Label::new("outside"));

        let mut surface = Surface::new();
        scene.paint(&mut surface, &Theme::CLASSIC);
        let commands = surface.finish();

        let push = commands
            .iter()
            .position(|c| matches!(c, RenderCommand::PushClip { bounds } if *bounds == Rect::new(10.0, 20.0, 100.0, 50.0)))
            .unwrap();
        let pop = commands.iter().position(|c| matches!(c, RenderCommand::PopClip)).unwrap();
        let inside = commands
            .iter()
            .position(|c| matches!(c, RenderCommand::Text { text, .. } if text == "inside"))
            .unwrap();
        let outside = commands
            .iter()
            .position(|c| matches!(c, RenderCommand::Text { text, .. } if text == "outside"))
            .unwrap();

        assert!(push < inside && inside < pop && pop < outside);
    }
}
