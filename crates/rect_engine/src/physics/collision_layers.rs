//! Tag-based collision filtering
//!
//! Every object carries a tag, and every collider carries a mask saying which
//! tags it treats as collision candidates. Masks always hold an explicit entry
//! for each known tag, so a tag nobody enabled is never a candidate by omission.

use std::collections::BTreeMap;
use thiserror::Error;

/// Tag given to objects that don't ask for one
pub const DEFAULT_TAG: &str = "default";

/// Errors raised while editing a collision mask
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaskError {
    /// The tag is not part of the known tag set
    #[error("Unknown collision tag: {0}")]
    UnknownTag(String),
}

/// The closed set of tags known to a scene
///
/// Order is insertion order with duplicates dropped. [`DEFAULT_TAG`] is
/// always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl Default for TagSet {
    fn default() -> Self {
        Self::new(std::iter::empty::<String>())
    }
}

impl TagSet {
    /// Build a tag set. [`DEFAULT_TAG`] is added first if missing.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self {
            tags: vec![DEFAULT_TAG.to_string()],
        };
        for tag in tags {
            set.insert(tag);
        }
        set
    }

    /// Add a tag. Returns `false` if it was already known.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Whether the tag is known
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Iterate over the known tags in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of known tags
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Always `false`; the default tag is always present
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Per-collider mapping from tag to "collides with objects of this tag"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMask {
    entries: BTreeMap<String, bool>,
}

impl CollisionMask {
    /// Mask with an explicit `false` entry for every known tag
    pub fn new(tags: &TagSet) -> Self {
        Self::uniform(tags, false)
    }

    /// Mask with every known tag set to `enabled`
    pub fn uniform(tags: &TagSet, enabled: bool) -> Self {
        Self {
            entries: tags.iter().map(|tag| (tag.to_string(), enabled)).collect(),
        }
    }

    /// Set one entry
    ///
    /// Unknown tags leave the mask untouched and are reported both through the
    /// log and the returned error, since they are almost always typos.
    pub fn set(&mut self, tag: &str, enabled: bool) -> Result<(), MaskError> {
        match self.entries.get_mut(tag) {
            Some(entry) => {
                *entry = enabled;
                Ok(())
            }
            None => {
                log::warn!("Ignoring unknown collision tag '{}'", tag);
                Err(MaskError::UnknownTag(tag.to_string()))
            }
        }
    }

    /// Set every entry to `enabled`
    pub fn set_all(&mut self, enabled: bool) {
        for entry in self.entries.values_mut() {
            *entry = enabled;
        }
    }

    /// Whether objects tagged `tag` are collision candidates
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.entries.get(tag).copied().unwrap_or(false)
    }

    /// Whether the mask has an entry for `tag`
    pub fn knows(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Add a `false` entry for every tag in `tags` the mask doesn't know yet
    ///
    /// Returns how many entries were added.
    pub fn complete_with(&mut self, tags: &TagSet) -> usize {
        let mut added = 0;
        for tag in tags.iter() {
            if !self.entries.contains_key(tag) {
                self.entries.insert(tag.to_string(), false);
                added += 1;
            }
        }
        added
    }

    /// Tags currently enabled, in sorted order
    pub fn enabled_tags(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(tag, _)| tag.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mask has no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-sided filter used by the collision scan
///
/// Only the mover's mask matters; the other side's mask is never consulted.
pub fn should_collide(mover_mask: &CollisionMask, other_tag: &str) -> bool {
    mover_mask.is_enabled(other_tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> TagSet {
        TagSet::new(["player", "enemy", "wall"])
    }

    #[test]
    fn test_default_tag_always_present() {
        let set = TagSet::new(["player", "player"]);
        assert!(set.contains(DEFAULT_TAG));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next(), Some(DEFAULT_TAG));
    }

    #[test]
    fn test_new_mask_has_explicit_false_entries() {
        let mask = CollisionMask::new(&tags());
        assert_eq!(mask.len(), 4);
        for tag in tags().iter() {
            assert!(mask.knows(tag));
            assert!(!mask.is_enabled(tag));
        }
    }

    #[test]
    fn test_single_tag_after_clearing_all() {
        let mut mask = CollisionMask::uniform(&tags(), true);
        mask.set_all(false);
        mask.set("enemy", true).unwrap();

        let enabled: Vec<_> = mask.enabled_tags().collect();
        assert_eq!(enabled, vec!["enemy"]);
        assert!(!mask.is_enabled("player"));
        assert!(!mask.is_enabled("wall"));
        assert!(!mask.is_enabled(DEFAULT_TAG));
    }

    #[test]
    fn test_unknown_tag_leaves_mask_unchanged() {
        let mut mask = CollisionMask::new(&tags());
        mask.set("enemy", true).unwrap();
        let before = mask.clone();

        let result = mask.set("enemmy", true);

        assert_eq!(result, Err(MaskError::UnknownTag("enemmy".to_string())));
        assert_eq!(mask, before);
        assert!(!mask.knows("enemmy"));
    }

    #[test]
    fn test_unknown_tags_never_collide() {
        let mask = CollisionMask::uniform(&tags(), true);
        assert!(!should_collide(&mask, "ghost"));
    }

    #[test]
    fn test_should_not_collide_one_way() {
        let mut player = CollisionMask::new(&tags());
        player.set("enemy", true).unwrap();
        let enemy = CollisionMask::new(&tags());

        assert!(should_collide(&player, "enemy"));
        assert!(!should_collide(&enemy, "player"));
    }

    #[test]
    fn test_complete_with_adds_missing_entries_as_false() {
        let mut mask = CollisionMask::uniform(&TagSet::new(["player"]), true);
        let added = mask.complete_with(&tags());
        assert_eq!(added, 2);
        assert!(mask.is_enabled("player"));
        assert!(mask.knows("wall"));
        assert!(!mask.is_enabled("wall"));
    }
}
