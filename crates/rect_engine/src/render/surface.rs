//! Drawable surface abstraction
//!
//! The engine draws through this trait only. Implementations own the pixels
//! (or characters, or recorded commands) and a stack of transforms that applies
//! to every primitive.

use crate::assets::ImageHandle;
use crate::foundation::math::{Rect, Transform2D};
use std::ops::{Deref, DerefMut};

/// Something the registry can clear and draw onto
pub trait Surface {
    /// Drawable extent as `(width, height)` in world units
    fn size(&self) -> (f32, f32);

    /// Erase a region. Ignores the transform stack.
    fn clear(&mut self, region: Rect);

    /// Stroke a rectangle outline under the current transform
    fn draw_rect_outline(&mut self, rect: Rect);

    /// Draw an image stretched over `dest` under the current transform
    fn draw_image(&mut self, image: ImageHandle, dest: Rect);

    /// Push a transform, composed with the one currently on top
    fn push_transform(&mut self, transform: Transform2D);

    /// Pop the top transform. Popping an empty stack is a no-op.
    fn pop_transform(&mut self);

    /// Number of transforms currently pushed
    fn transform_depth(&self) -> usize;

    /// Rectangle covering the whole surface
    fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        Rect::new(0.0, 0.0, width, height)
    }
}

impl<'s> dyn Surface + 's {
    /// Push `transform` until the returned guard is dropped
    pub fn with_transform(&mut self, transform: Transform2D) -> TransformGuard<'_> {
        TransformGuard::new(self, transform)
    }
}

/// Scoped transform: pushed on creation, popped on drop
///
/// Draw through the guard; the surface gets its previous transform back on
/// every exit path, including early returns and panics that unwind.
pub struct TransformGuard<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> TransformGuard<'a> {
    /// Push `transform` onto `surface` for the lifetime of the guard
    pub fn new(surface: &'a mut dyn Surface, transform: Transform2D) -> Self {
        surface.push_transform(transform);
        Self { surface }
    }
}

impl<'a> Deref for TransformGuard<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl<'a> DerefMut for TransformGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for TransformGuard<'_> {
    fn drop(&mut self) {
        self.surface.pop_transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::render::CommandSurface;

    #[test]
    fn test_guard_restores_depth() {
        let mut surface = CommandSurface::new(100.0, 100.0);
        {
            let mut outer = TransformGuard::new(&mut surface, Transform2D::from_translation(Vec2::new(1.0, 0.0)));
            assert_eq!(outer.transform_depth(), 1);
            {
                let inner = TransformGuard::new(&mut *outer, Transform2D::identity());
                assert_eq!(inner.transform_depth(), 2);
            }
            assert_eq!(outer.transform_depth(), 1);
        }
        assert_eq!(surface.transform_depth(), 0);
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn draw_until_flagged(surface: &mut dyn Surface, bail: bool) -> Option<()> {
            let mut scoped = TransformGuard::new(surface, Transform2D::from_translation(Vec2::new(3.0, 3.0)));
            if bail {
                return None;
            }
            scoped.draw_rect_outline(Rect::new(0.0, 0.0, 1.0, 1.0));
            Some(())
        }

        let mut surface = CommandSurface::new(10.0, 10.0);
        assert!(draw_until_flagged(&mut surface, true).is_none());
        assert_eq!(surface.transform_depth(), 0);
        assert!(draw_until_flagged(&mut surface, false).is_some());
        assert_eq!(surface.transform_depth(), 0);
    }

    #[test]
    fn test_with_transform_scopes_draws() {
        let mut surface = CommandSurface::new(10.0, 10.0);
        let translated = Transform2D::from_translation(Vec2::new(2.0, 0.0));
        {
            let target: &mut dyn Surface = &mut surface;
            let mut scoped = target.with_transform(translated);
            scoped.draw_rect_outline(Rect::new(0.0, 0.0, 1.0, 1.0));
        }
        assert_eq!(surface.transform_depth(), 0);
        assert_eq!(
            surface.commands(),
            &[crate::render::DrawCommand::RectOutline {
                rect: Rect::new(0.0, 0.0, 1.0, 1.0),
                transform: translated,
            }]
        );
    }
}
