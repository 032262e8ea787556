//! Scene ownership and the tick loop
//!
//! The [`ObjectRegistry`] is the only owner of live objects. Callers add and
//! remove through it, drive it with a clock once per tick, and ask it to
//! render afterwards.
//!
//! ## Tick phases
//!
//! ```text
//! TimeAdvance -> UpdateAll -> CollisionScan -> DeferredRemoval
//! ```

mod object_registry;

#[cfg(test)]
mod tests;

pub use object_registry::{ObjectRegistry, RegistryError, TickStats};
