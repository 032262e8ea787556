//! The capability every registered object provides
//!
//! Objects are composed from [`Collider`] (identity, bounds, mask), an
//! optional [`PhysicsBody`] and an [`Appearance`](crate::render::Appearance),
//! then expose them through [`GameObject`]. The registry only ever talks to
//! this trait.

use super::collider::Collider;
use super::entity::EntityId;
use crate::physics::{PhysicsBody, ResolutionPolicy};
use crate::render::Surface;

/// Requests an object makes while the registry is iterating
///
/// Nothing here takes effect immediately; the registry applies removals and
/// then spawns once the collision scan is over.
#[derive(Default)]
pub struct Commands {
    removals: Vec<EntityId>,
    spawns: Vec<Box<dyn GameObject>>,
}

impl Commands {
    /// Create an empty command buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule removal of a live object
    pub fn remove(&mut self, id: EntityId) {
        if !self.removals.contains(&id) {
            self.removals.push(id);
        }
    }

    /// Schedule a new object to join at the end of the tick
    pub fn spawn<T: GameObject + 'static>(&mut self, object: T) {
        self.spawns.push(Box::new(object));
    }

    /// Ids scheduled for removal so far
    pub fn pending_removals(&self) -> &[EntityId] {
        &self.removals
    }

    /// Number of objects waiting to spawn
    pub fn pending_spawns(&self) -> usize {
        self.spawns.len()
    }

    /// Whether nothing has been requested
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.spawns.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<EntityId>, Vec<Box<dyn GameObject>>) {
        (self.removals, self.spawns)
    }
}

/// A collidable, renderable object owned by the registry
pub trait GameObject {
    /// Identity, bounds and mask
    fn collider(&self) -> &Collider;

    /// Mutable identity, bounds and mask
    fn collider_mut(&mut self) -> &mut Collider;

    /// Advance internal state by `delta_time` seconds
    fn update(&mut self, _delta_time: f32, _commands: &mut Commands) {}

    /// Called when this object's mask accepts `other` and the two overlap
    fn on_collision(&mut self, _other: &Collider, _commands: &mut Commands) {}

    /// Draw onto `surface`; must leave the transform stack as it found it
    fn render(&self, _surface: &mut dyn Surface) {}

    /// Motion state, for objects that have one
    fn body(&self) -> Option<&PhysicsBody> {
        None
    }

    /// Resolution policy, for objects that correct their position
    fn resolution_policy(&self) -> Option<ResolutionPolicy> {
        None
    }

    /// Take the registry's default policy unless one was chosen explicitly
    fn adopt_default_policy(&mut self, _policy: ResolutionPolicy) {}

    /// Registry id, once admitted
    fn id(&self) -> Option<EntityId> {
        self.collider().id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::StaticBody;
    use crate::physics::TagSet;

    #[test]
    fn test_commands_dedupe_removals() {
        let mut commands = Commands::new();
        assert!(commands.is_empty());
        commands.remove(EntityId::from_raw(1));
        commands.remove(EntityId::from_raw(1));
        commands.spawn(StaticBody::new(Collider::new(0.0, 0.0, 1.0, 1.0, &TagSet::default())));

        assert_eq!(commands.pending_removals(), &[EntityId::from_raw(1)]);
        assert_eq!(commands.pending_spawns(), 1);
        assert!(!commands.is_empty());
    }
}
