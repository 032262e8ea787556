//! Scene objects
//!
//! Identity ([`Entity`]), bounds and masks ([`Collider`]), the [`GameObject`]
//! capability the registry works with, and the stock object kinds.

pub mod bodies;
pub mod collider;
pub mod entity;
pub mod game_object;

pub use bodies::{PhysicsObject, StaticBody};
pub use collider::Collider;
pub use entity::{Entity, EntityId, IdGenerator};
pub use game_object::{Commands, GameObject};
