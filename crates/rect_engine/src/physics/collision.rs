//! Collision bookkeeping across frames
//!
//! The registry records every dispatched `(mover, other)` pair per tick. This
//! module keeps the current and previous tick's pairs so callers can ask which
//! contacts began or ended.

use crate::objects::EntityId;
use std::collections::HashSet;

/// Ordered collision pair: `mover`'s mask accepted `other` and `mover` was notified
///
/// Unlike a symmetric contact, `(a, b)` and `(b, a)` are distinct pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Object whose `on_collision` ran
    pub mover: EntityId,
    /// Object it collided with
    pub other: EntityId,
}

impl CollisionPair {
    /// Create a new collision pair
    pub fn new(mover: EntityId, other: EntityId) -> Self {
        Self { mover, other }
    }

    /// Whether either side is `id`
    pub fn involves(&self, id: EntityId) -> bool {
        self.mover == id || self.other == id
    }
}

/// Current and previous tick collision pairs
#[derive(Debug, Default)]
pub struct CollisionTracker {
    current_pairs: HashSet<CollisionPair>,
    previous_pairs: HashSet<CollisionPair>,
}

impl CollisionTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Rotate current pairs into previous and start a new tick
    pub fn begin_tick(&mut self) {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();
    }

    /// Record a dispatched pair for the current tick
    pub fn record(&mut self, pair: CollisionPair) {
        self.current_pairs.insert(pair);
    }

    /// Forget every pair involving `id` (used when an object leaves the scene)
    pub fn forget(&mut self, id: EntityId) {
        self.current_pairs.retain(|pair| !pair.involves(id));
        self.previous_pairs.retain(|pair| !pair.involves(id));
    }

    /// Get pairs that began colliding this tick
    pub fn collisions_entered(&self) -> Vec<CollisionPair> {
        self.current_pairs
            .difference(&self.previous_pairs)
            .copied()
            .collect()
    }

    /// Get pairs that stopped colliding this tick
    pub fn collisions_exited(&self) -> Vec<CollisionPair> {
        self.previous_pairs
            .difference(&self.current_pairs)
            .copied()
            .collect()
    }

    /// Get all pairs dispatched this tick
    pub fn current(&self) -> &HashSet<CollisionPair> {
        &self.current_pairs
    }

    /// Clear all collision data
    pub fn clear(&mut self) {
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u64, b: u64) -> CollisionPair {
        CollisionPair::new(EntityId::from_raw(a), EntityId::from_raw(b))
    }

    #[test]
    fn test_pairs_are_ordered() {
        assert_ne!(pair(1, 2), pair(2, 1));
        assert!(pair(1, 2).involves(EntityId::from_raw(2)));
    }

    #[test]
    fn test_entered_and_exited() {
        let mut tracker = CollisionTracker::new();
        tracker.begin_tick();
        tracker.record(pair(1, 2));

        assert_eq!(tracker.collisions_entered(), vec![pair(1, 2)]);
        assert!(tracker.collisions_exited().is_empty());

        tracker.begin_tick();
        tracker.record(pair(1, 2));
        assert!(tracker.collisions_entered().is_empty());

        tracker.begin_tick();
        assert_eq!(tracker.collisions_exited(), vec![pair(1, 2)]);
        assert!(tracker.current().is_empty());
    }

    #[test]
    fn test_forget_drops_pairs_for_removed_objects() {
        let mut tracker = CollisionTracker::new();
        tracker.begin_tick();
        tracker.record(pair(1, 2));
        tracker.record(pair(3, 4));
        tracker.forget(EntityId::from_raw(2));
        assert_eq!(tracker.current().len(), 1);
    }
}
