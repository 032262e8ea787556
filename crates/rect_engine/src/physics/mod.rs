//! Physics module for collision filtering and response
//!
//! Provides tag-mask filtering, per-tick collision bookkeeping and the
//! positional correction used by physics objects. There is no broad phase:
//! the registry tests every ordered pair.

pub mod collision;
pub mod collision_layers;
pub mod resolution;

pub use collision::{CollisionPair, CollisionTracker};
pub use collision_layers::{should_collide, CollisionMask, MaskError, TagSet, DEFAULT_TAG};
pub use resolution::{resolve, PhysicsBody, ResolutionPolicy, ResolvedAxes};
