//! Recording surface
//!
//! [`CommandSurface`] draws nothing; it records each primitive together with
//! the transform in effect when it was issued. Tests use it to check draw
//! order and transform hygiene, and hosts with their own renderer can replay
//! the command list.

use super::surface::Surface;
use crate::assets::ImageHandle;
use crate::foundation::math::{Rect, Transform2D};

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Region erased
    Clear(Rect),

    /// Rectangle outline in local coordinates
    RectOutline {
        /// Local rectangle
        rect: Rect,
        /// Composed transform at the time of the call
        transform: Transform2D,
    },

    /// Image blit in local coordinates
    Image {
        /// Image drawn
        image: ImageHandle,
        /// Local destination rectangle
        dest: Rect,
        /// Composed transform at the time of the call
        transform: Transform2D,
    },
}

/// Surface that records draw commands instead of rasterizing them
pub struct CommandSurface {
    width: f32,
    height: f32,
    stack: Vec<Transform2D>,
    commands: Vec<DrawCommand>,
}

impl CommandSurface {
    /// Create an empty recording surface of the given size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Everything recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the list empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    fn current(&self) -> Transform2D {
        self.stack.last().copied().unwrap_or_default()
    }
}

impl Surface for CommandSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, region: Rect) {
        self.commands.push(DrawCommand::Clear(region));
    }

    fn draw_rect_outline(&mut self, rect: Rect) {
        let transform = self.current();
        self.commands.push(DrawCommand::RectOutline { rect, transform });
    }

    fn draw_image(&mut self, image: ImageHandle, dest: Rect) {
        let transform = self.current();
        self.commands.push(DrawCommand::Image { image, dest, transform });
    }

    fn push_transform(&mut self, transform: Transform2D) {
        let composed = self.current().combine(&transform);
        self.stack.push(composed);
    }

    fn pop_transform(&mut self) {
        if self.stack.pop().is_none() {
            log::warn!("pop_transform on an empty transform stack");
        }
    }

    fn transform_depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    #[test]
    fn test_transforms_compose() {
        let mut surface = CommandSurface::new(10.0, 10.0);
        surface.push_transform(Transform2D::from_translation(Vec2::new(1.0, 2.0)));
        surface.push_transform(Transform2D::from_translation(Vec2::new(3.0, 4.0)));
        surface.draw_rect_outline(Rect::new(0.0, 0.0, 1.0, 1.0));
        surface.pop_transform();
        surface.pop_transform();
        surface.draw_rect_outline(Rect::new(0.0, 0.0, 1.0, 1.0));

        let commands = surface.take_commands();
        assert_eq!(
            commands[0],
            DrawCommand::RectOutline {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                transform: Transform2D::from_translation(Vec2::new(4.0, 6.0)),
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::RectOutline {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                transform: Transform2D::identity(),
            }
        );
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_pop_on_empty_stack_is_ignored() {
        let mut surface = CommandSurface::new(10.0, 10.0);
        surface.pop_transform();
        assert_eq!(surface.transform_depth(), 0);
    }
}
