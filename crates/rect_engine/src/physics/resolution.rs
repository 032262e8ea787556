//! Axis-separated positional correction
//!
//! A mover that overlaps an obstacle is snapped flush against one of the
//! obstacle's faces. Which face is chosen depends on where the mover was
//! *before* this frame's motion: if its old vertical extent already overlapped
//! the obstacle, it must have come in sideways, and vice versa.
//!
//! Fast movers can tunnel, and a diagonal entry (neither old extent overlapping)
//! produces no correction at all. Both are accepted limits of this scheme.

use crate::foundation::math::{Rect, Vec2};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// How the two axis tests combine within one resolution call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Both axis corrections may apply in the same call
    #[default]
    Independent,
    /// The vertical correction only runs when the horizontal one did not
    Exclusive,
}

bitflags! {
    /// Axes a resolution call moved the mover along
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ResolvedAxes: u8 {
        /// `x` was snapped
        const X = 1 << 0;
        /// `y` was snapped
        const Y = 1 << 1;
    }
}

/// Motion state of a physics-capable collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    /// Velocity in units per second
    pub velocity: Vec2,

    old_position: Vec2,
}

impl PhysicsBody {
    /// Resting body whose snapshot starts at `position`
    pub fn new(position: Vec2) -> Self {
        Self {
            velocity: Vec2::zeros(),
            old_position: position,
        }
    }

    /// Position at the start of the most recent step
    pub fn old_position(&self) -> Vec2 {
        self.old_position
    }

    /// Snapshot `position`, then integrate velocity into it
    ///
    /// The snapshot always precedes integration, so after the call
    /// `old_position()` is the position the step started from.
    pub fn step(&mut self, position: &mut Vec2, delta_time: f32) {
        self.old_position = *position;
        *position += self.velocity * delta_time;
    }
}

/// Push a mover out of an obstacle
///
/// `position` is the mover's current (post-motion) top-left corner and is
/// updated in place. `old_position` is its pre-motion snapshot.
pub fn resolve(
    position: &mut Vec2,
    size: Vec2,
    old_position: Vec2,
    obstacle: &Rect,
    policy: ResolutionPolicy,
) -> ResolvedAxes {
    let old = Rect::from_position_size(old_position, size);
    let old_center = old.center();
    let obstacle_center = obstacle.center();
    let mut resolved = ResolvedAxes::empty();

    if old.overlaps_y(obstacle) {
        let diff = obstacle_center.x - old_center.x;
        position.x = if diff >= 0.0 {
            obstacle.x - size.x
        } else {
            obstacle.right()
        };
        resolved |= ResolvedAxes::X;
    }

    let exclusive_hit = policy == ResolutionPolicy::Exclusive && !resolved.is_empty();
    if !exclusive_hit && old.overlaps_x(obstacle) {
        let diff = obstacle_center.y - old_center.y;
        position.y = if diff >= 0.0 {
            obstacle.y - size.y
        } else {
            obstacle.bottom()
        };
        resolved |= ResolvedAxes::Y;
    }

    resolved
}
