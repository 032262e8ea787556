//! # Object Registry
//!
//! Owns the live objects and runs one simulation tick at a time. Every tick
//! goes through the same phases, in order:
//!
//! 1. **Time advance**: sample the clock, derive `delta_time` in seconds
//! 2. **Update all**: `update(delta_time)` on every object, in registration order
//! 3. **Collision scan**: for every ordered pair `(i, j)`, `i != j`, call
//!    `i.on_collision(j)` when `i`'s mask accepts `j`'s tag and they overlap
//! 4. **Deferred removal**: drop objects queued for removal, then admit spawns
//!
//! Rendering is a separate pass: clear the surface, then draw every object in
//! registration order.
//!
//! The object list is private. Objects leave only through
//! [`ObjectRegistry::remove_object`] or [`Commands::remove`], and removal is
//! keyed by [`EntityId`], so queued removals stay valid however the list
//! shifts in the meantime.

use crate::foundation::time::{Clock, Timer};
use crate::objects::{Commands, EntityId, GameObject, IdGenerator};
use crate::physics::{CollisionPair, CollisionTracker, ResolutionPolicy, TagSet};
use crate::render::Surface;
use thiserror::Error;

/// Registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Object's tag isn't in the registry's tag set
    #[error("Object tag '{0}' is not a known tag")]
    UnknownTag(String),

    /// No live object has this id
    #[error("No live object with id {0}")]
    NotFound(EntityId),
}

/// What happened during the most recent tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickStats {
    /// Ticks run so far, including this one
    pub tick: u64,

    /// Seconds simulated this tick
    pub delta_time: f32,

    /// Live objects after the tick
    pub object_count: usize,

    /// `on_collision` calls dispatched
    pub collisions: usize,

    /// Objects removed in the deferred-removal phase
    pub removed: usize,

    /// Objects admitted from spawn requests
    pub spawned: usize,
}

struct Slot {
    id: EntityId,
    object: Box<dyn GameObject>,
}

impl Slot {
    fn object(&self) -> &dyn GameObject {
        self.object.as_ref()
    }
}

/// Owner of all live objects and the per-tick simulation loop
pub struct ObjectRegistry {
    tags: TagSet,
    ids: IdGenerator,
    default_policy: ResolutionPolicy,
    objects: Vec<Slot>,
    pending_removals: Vec<EntityId>,
    timer: Timer,
    collisions: CollisionTracker,
    stats: TickStats,
}

impl ObjectRegistry {
    /// Create an empty registry for the given tag set
    pub fn new(tags: TagSet) -> Self {
        Self::with_id_generator(tags, IdGenerator::new())
    }

    /// Create an empty registry drawing ids from `ids`
    pub fn with_id_generator(tags: TagSet, ids: IdGenerator) -> Self {
        Self {
            tags,
            ids,
            default_policy: ResolutionPolicy::default(),
            objects: Vec::new(),
            pending_removals: Vec::new(),
            timer: Timer::new(),
            collisions: CollisionTracker::new(),
            stats: TickStats::default(),
        }
    }

    /// Policy handed to admitted objects that did not choose one
    pub fn with_default_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    /// Known tags
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Policy handed to admitted objects that did not choose one
    pub fn default_policy(&self) -> ResolutionPolicy {
        self.default_policy
    }

    /// Register an object at the end of the update/render order
    pub fn add_object<T: GameObject + 'static>(&mut self, object: T) -> Result<EntityId, RegistryError> {
        self.admit(Box::new(object))
    }

    /// Register an already boxed object
    pub fn add_boxed(&mut self, object: Box<dyn GameObject>) -> Result<EntityId, RegistryError> {
        self.admit(object)
    }

    /// Queue a live object for removal at the end of the next tick
    ///
    /// Queuing the same object twice is harmless.
    pub fn remove_object(&mut self, id: EntityId) -> Result<(), RegistryError> {
        if !self.contains(id) {
            return Err(RegistryError::NotFound(id));
        }
        if !self.pending_removals.contains(&id) {
            self.pending_removals.push(id);
        }
        Ok(())
    }

    /// Whether `id` is waiting for the next deferred-removal phase
    pub fn is_pending_removal(&self, id: EntityId) -> bool {
        self.pending_removals.contains(&id)
    }

    /// Ids waiting for removal
    pub fn pending_removals(&self) -> &[EntityId] {
        &self.pending_removals
    }

    /// Take the first clock sample so the first tick measures from now
    pub fn start(&mut self, clock: &dyn Clock) {
        self.timer.start(clock);
    }

    /// Sample the clock and run one tick with the elapsed time
    pub fn update(&mut self, clock: &dyn Clock) -> &TickStats {
        let delta_time = self.timer.tick(clock);
        self.step(delta_time)
    }

    /// Run one tick with an explicit `delta_time` in seconds
    pub fn step(&mut self, delta_time: f32) -> &TickStats {
        let mut commands = Commands::new();

        for slot in &mut self.objects {
            slot.object.update(delta_time, &mut commands);
        }

        self.collisions.begin_tick();
        let collisions = self.scan_collisions(&mut commands);

        let (removals, spawns) = commands.into_parts();
        for id in removals {
            if !self.pending_removals.contains(&id) {
                self.pending_removals.push(id);
            }
        }
        let removed = self.flush_removals();

        let mut spawned = 0;
        for object in spawns {
            match self.admit(object) {
                Ok(_) => spawned += 1,
                Err(e) => log::warn!("Dropping spawned object: {}", e),
            }
        }

        self.stats = TickStats {
            tick: self.stats.tick + 1,
            delta_time,
            object_count: self.objects.len(),
            collisions,
            removed,
            spawned,
        };
        log::trace!("Tick stats: {:?}", self.stats);
        &self.stats
    }

    /// Clear the whole surface, then draw every object in registration order
    pub fn render(&self, surface: &mut dyn Surface) {
        let full = surface.bounds();
        surface.clear(full);

        for slot in &self.objects {
            let depth = surface.transform_depth();
            slot.object.render(surface);
            if surface.transform_depth() != depth {
                log::warn!(
                    "{} '{}' changed the transform depth from {} to {} while rendering",
                    slot.id,
                    slot.object.collider().entity.name(),
                    depth,
                    surface.transform_depth()
                );
                while surface.transform_depth() > depth {
                    surface.pop_transform();
                }
            }
        }
    }

    /// Look up a live object
    pub fn get(&self, id: EntityId) -> Option<&dyn GameObject> {
        self.objects
            .iter()
            .find(|slot| slot.id == id)
            .map(Slot::object)
    }

    /// Look up a live object mutably
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut dyn GameObject> {
        let slot = self.objects.iter_mut().find(|slot| slot.id == id)?;
        let object: &mut dyn GameObject = slot.object.as_mut();
        Some(object)
    }

    /// First live object with this name
    pub fn find_by_name(&self, name: &str) -> Option<&dyn GameObject> {
        self.objects
            .iter()
            .find(|slot| slot.object.collider().entity.name() == name)
            .map(Slot::object)
    }

    /// Live objects carrying `tag`, in registration order
    pub fn objects_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a dyn GameObject> + 'a {
        self.objects
            .iter()
            .filter(move |slot| slot.object.collider().entity.tag() == tag)
            .map(Slot::object)
    }

    /// Live objects in registration order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &dyn GameObject)> + '_ {
        self.objects.iter().map(|slot| (slot.id, slot.object()))
    }

    /// Live ids in registration order
    pub fn ids(&self) -> Vec<EntityId> {
        self.objects.iter().map(|slot| slot.id).collect()
    }

    /// Whether `id` is live
    pub fn contains(&self, id: EntityId) -> bool {
        self.objects.iter().any(|slot| slot.id == id)
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether there are no live objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Drop every object and all pending work
    pub fn clear(&mut self) {
        log::debug!("Clearing {} object(s)", self.objects.len());
        self.objects.clear();
        self.pending_removals.clear();
        self.collisions.clear();
    }

    /// Collision pairs from the current and previous tick
    pub fn collisions(&self) -> &CollisionTracker {
        &self.collisions
    }

    /// Statistics for the most recent tick
    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// Frame timer fed by [`ObjectRegistry::update`]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    fn admit(&mut self, mut object: Box<dyn GameObject>) -> Result<EntityId, RegistryError> {
        let tag = object.collider().entity.tag().to_string();
        if !self.tags.contains(&tag) {
            return Err(RegistryError::UnknownTag(tag));
        }

        object.adopt_default_policy(self.default_policy);
        let collider = object.collider_mut();
        let added = collider.mask_mut().complete_with(&self.tags);
        let id = self.ids.next_id();
        collider.entity.assign_identity(id);
        if added > 0 {
            log::debug!("Added {} missing mask entries for {}", added, id);
        }

        log::debug!("Registered {} '{}' with tag '{}'", id, collider.entity.name(), tag);
        self.objects.push(Slot { id, object });
        Ok(id)
    }

    fn scan_collisions(&mut self, commands: &mut Commands) -> usize {
        let count = self.objects.len();
        let mut dispatched = 0;

        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }
                let (mover, other) = pair_mut(&mut self.objects, i, j);
                let other_collider = other.object.collider();
                if !mover.object.collider().accepts(other_collider) {
                    continue;
                }
                if !mover.object.collider().check_collision(other_collider) {
                    continue;
                }
                mover.object.on_collision(other_collider, commands);
                self.collisions.record(CollisionPair::new(mover.id, other.id));
                dispatched += 1;
            }
        }

        dispatched
    }

    fn flush_removals(&mut self) -> usize {
        if self.pending_removals.is_empty() {
            return 0;
        }
        let pending = std::mem::take(&mut self.pending_removals);
        for id in &pending {
            if self.contains(*id) {
                log::debug!("Removing {}", id);
                self.collisions.forget(*id);
            } else {
                log::warn!("Skipping removal of {}: {}", id, RegistryError::NotFound(*id));
            }
        }

        let before = self.objects.len();
        self.objects.retain(|slot| !pending.contains(&slot.id));
        before - self.objects.len()
    }
}

/// Mutable `i`-th slot alongside a shared `j`-th slot, `i != j`
fn pair_mut(slots: &mut [Slot], i: usize, j: usize) -> (&mut Slot, &Slot) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = slots.split_at_mut(j);
        (&mut head[i], &tail[0])
    } else {
        let (head, tail) = slots.split_at_mut(i);
        (&mut tail[0], &head[j])
    }
}
