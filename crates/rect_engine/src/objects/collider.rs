//! Axis-aligned rectangular collider

use super::entity::{Entity, EntityId};
use crate::foundation::math::{Rect, Vec2};
use crate::physics::{should_collide, CollisionMask, MaskError, TagSet};

/// An entity with a size and a tag mask
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    /// Identity and position
    pub entity: Entity,
    size: Vec2,
    mask: CollisionMask,
}

impl Collider {
    /// Create a collider with every mask entry disabled
    ///
    /// Negative sizes are taken by absolute value.
    pub fn new(x: f32, y: f32, width: f32, height: f32, tags: &TagSet) -> Self {
        Self::from_entity(Entity::new(x, y), width, height, tags)
    }

    /// Wrap an existing entity
    pub fn from_entity(entity: Entity, width: f32, height: f32, tags: &TagSet) -> Self {
        Self {
            entity,
            size: Vec2::new(width.abs(), height.abs()),
            mask: CollisionMask::new(tags),
        }
    }

    /// Set the name (builder style)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.entity = self.entity.with_name(name);
        self
    }

    /// Set the tag (builder style)
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.entity = self.entity.with_tag(tag);
        self
    }

    /// Enable collisions against `tags` (builder style); unknown tags are logged and skipped
    pub fn colliding_with(mut self, tags: &[&str]) -> Self {
        for tag in tags {
            if let Err(e) = self.mask.set(tag, true) {
                log::warn!("'{}' keeps its mask entry disabled: {}", self.entity.name(), e);
            }
        }
        self
    }

    /// Enable collisions against `tags`, failing on the first unknown tag
    ///
    /// On error no entry has been changed.
    pub fn try_colliding_with(mut self, tags: &[&str]) -> Result<Self, MaskError> {
        if let Some(unknown) = tags.iter().find(|tag| !self.mask.knows(tag)) {
            return Err(MaskError::UnknownTag((*unknown).to_string()));
        }
        for tag in tags {
            self.mask.set(tag, true)?;
        }
        Ok(self)
    }

    /// Registry id, if admitted
    pub fn id(&self) -> Option<EntityId> {
        self.entity.id()
    }

    /// Width
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Height
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Current bounding box
    pub fn bounds(&self) -> Rect {
        Rect::from_position_size(self.entity.position, self.size)
    }

    /// Collision mask
    pub fn mask(&self) -> &CollisionMask {
        &self.mask
    }

    /// Mutable collision mask
    pub fn mask_mut(&mut self) -> &mut CollisionMask {
        &mut self.mask
    }

    /// Set a single mask entry
    pub fn set_collision_tag(&mut self, tag: &str, enabled: bool) -> Result<(), MaskError> {
        self.mask.set(tag, enabled)
    }

    /// Set every mask entry
    pub fn set_all_collision_tags(&mut self, enabled: bool) {
        self.mask.set_all(enabled);
    }

    /// Whether this collider's mask accepts `other`'s tag
    pub fn accepts(&self, other: &Collider) -> bool {
        should_collide(&self.mask, other.entity.tag())
    }

    /// Symmetric AABB overlap test; never true against itself
    pub fn check_collision(&self, other: &Collider) -> bool {
        !self.is_same(other) && self.bounds().intersects(&other.bounds())
    }

    fn is_same(&self, other: &Collider) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        matches!((self.id(), other.id()), (Some(a), Some(b)) if a == b)
    }
}
