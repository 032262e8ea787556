//! How objects draw themselves

use super::surface::Surface;
use crate::assets::ImageHandle;
use crate::foundation::math::{Rect, Transform2D, Vec2};

/// Image drawn over an object's bounds, rotated about a pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteImage {
    /// Image to draw
    pub image: ImageHandle,
    /// Rotation in radians about `origin`
    pub rotation: f32,
    /// Pivot, relative to the object's top-left corner
    pub origin: Vec2,
}

impl SpriteImage {
    /// Unrotated sprite pivoting on its top-left corner
    pub fn new(image: ImageHandle) -> Self {
        Self {
            image,
            rotation: 0.0,
            origin: Vec2::zeros(),
        }
    }

    /// Set the rotation in radians
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the pivot relative to the top-left corner
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vec2::new(x, y);
        self
    }
}

/// Visual representation of an object
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Appearance {
    /// Pure data object, draws nothing
    Hidden,
    /// Stroked bounding box
    #[default]
    Outline,
    /// Image over the bounding box
    Sprite(SpriteImage),
}

impl Appearance {
    /// Draw onto `surface` for an object occupying `bounds`
    pub fn draw(&self, bounds: Rect, surface: &mut dyn Surface) {
        match self {
            Appearance::Hidden => {}
            Appearance::Outline => surface.draw_rect_outline(bounds),
            Appearance::Sprite(sprite) => {
                let pivot = Vec2::new(bounds.x + sprite.origin.x, bounds.y + sprite.origin.y);
                let mut scoped =
                    surface.with_transform(Transform2D::from_translation_rotation(pivot, sprite.rotation));
                scoped.draw_image(
                    sprite.image,
                    Rect::new(-sprite.origin.x, -sprite.origin.y, bounds.width, bounds.height),
                );
            }
        }
    }
}
