//! Math utilities and types
//!
//! Provides the 2D math types used by objects, collision and rendering.

pub use nalgebra::{Matrix3, Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3x3 matrix type (2D homogeneous transforms)
pub type Mat3 = Matrix3<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Axis-aligned rectangle described by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle at a position with the given size vector
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Right edge (`x + width`)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`)
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Open-interval overlap on the x axis
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Open-interval overlap on the y axis
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }

    /// Standard AABB intersection. Touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// 2D transform: rotation about the origin followed by a translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// Translation applied after rotation
    pub translation: Vec2,

    /// Rotation in radians
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translation: Vec2::zeros(),
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a translation
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Create a transform with translation and rotation
    pub fn from_translation_rotation(translation: Vec2, rotation: f32) -> Self {
        Self { translation, rotation }
    }

    /// Convert to a homogeneous transformation matrix
    pub fn to_matrix(&self) -> Mat3 {
        Mat3::new_translation(&self.translation) * Rotation2::new(self.rotation).to_homogeneous()
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point2) -> Point2 {
        self.to_matrix().transform_point(&point)
    }

    /// Combine this transform with a child transform (`self` applied last)
    pub fn combine(&self, other: &Transform2D) -> Transform2D {
        let rotated = Rotation2::new(self.rotation) * other.translation;
        Transform2D {
            translation: self.translation + rotated,
            rotation: self.rotation + other.rotation,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_edges_and_center() {
        let rect = Rect::new(2.0, 4.0, 10.0, 6.0);
        assert_relative_eq!(rect.right(), 12.0);
        assert_relative_eq!(rect.bottom(), 10.0);
        assert_relative_eq!(rect.center().x, 7.0);
        assert_relative_eq!(rect.center().y, 7.0);
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_transform_rotates_then_translates() {
        let transform = Transform2D::from_translation_rotation(
            Vec2::new(5.0, 0.0),
            std::f32::consts::FRAC_PI_2,
        );
        let point = transform.transform_point(Point2::new(1.0, 0.0));
        assert_relative_eq!(point.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(point.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_combine_matches_matrix_product() {
        let parent = Transform2D::from_translation_rotation(Vec2::new(3.0, 1.0), 0.5);
        let child = Transform2D::from_translation_rotation(Vec2::new(-2.0, 4.0), 0.25);
        let combined = parent.combine(&child).to_matrix();
        let product = parent.to_matrix() * child.to_matrix();
        for (a, b) in combined.iter().zip(product.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-5);
        }
    }
}
