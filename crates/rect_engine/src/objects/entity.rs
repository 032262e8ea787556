//! Entity implementation

use crate::foundation::math::Vec2;
use crate::physics::DEFAULT_TAG;
use std::fmt;

/// Stable entity identifier, assigned when an object joins a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Wrap a raw id. Ids from different generators may collide.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }
    
    /// Get the raw id
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source owned by a registry
#[derive(Debug, Default)]
pub struct IdGenerator {
    next_id: u64,
}

impl IdGenerator {
    /// Create a generator starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next unused id
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// How many ids have been issued
    pub fn issued(&self) -> u64 {
        self.next_id
    }
}

/// Identity and position of a scene object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: Option<EntityId>,
    name: String,
    tag: String,
    /// Top-left corner of the bounding box
    pub position: Vec2,
}

impl Entity {
    /// Unnamed entity with the default tag
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            id: None,
            name: String::new(),
            tag: DEFAULT_TAG.to_string(),
            position: Vec2::new(x, y),
        }
    }

    /// Set an explicit name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the tag used for mask filtering
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Id assigned by the registry, `None` before admission
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Name; `object{n}` if none was given before admission
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Left edge
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Top edge
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Move the top-left corner
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Vec2::new(x, y);
    }

    /// Give the entity its registry identity, filling in the default name
    pub(crate) fn assign_identity(&mut self, id: EntityId) {
        self.id = Some(id);
        if self.name.is_empty() {
            self.name = format!("object{}", id.raw());
        }
    }
}
