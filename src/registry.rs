//! The stream ↔ rendition relational join.
//!
//! Renditions are referenced by the stable integer id a [`MediaEntry`] gets
//! when it is registered with a playlist, never by object identity.

use std::collections::BTreeSet;

use crate::attribute::{GroupId, MediaType};
use crate::format::media::MediaEntry;

/// The role a stream attribute can reference a rendition group in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRole {
    Audio,
    Subtitles,
}

impl GroupRole {
    pub(crate) fn matches_type(&self, media_type: &MediaType) -> bool {
        match self {
            Self::Audio => *media_type == MediaType::Audio,
            Self::Subtitles => *media_type == MediaType::Subtitles,
        }
    }
}

/// A rendition is visible to a stream when its type matches the role and its
/// group id equals the stream's corresponding group-id attribute.
pub(crate) fn matches(role: GroupRole, group: Option<&GroupId>, media: &MediaEntry) -> bool {
    let Some(group) = group else {
        return false;
    };
    let (Some(media_type), Some(media_group)) = (media.media_type(), media.group_id()) else {
        return false;
    };

    role.matches_type(media_type) && media_group == group
}

/// An ordered set of rendition ids attached to one stream.
///
/// Membership is a set: re-attaching the same rendition never duplicates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenditionSet {
    ids: BTreeSet<usize>,
}

impl RenditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rendition id; returns whether it was newly added.
    pub fn insert(&mut self, id: usize) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: usize) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = RenditionSet::new();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 1);
        assert!(set.contains(3));
    }

    #[test]
    fn test_iteration_is_ordered() {
        let mut set = RenditionSet::new();
        set.insert(5);
        set.insert(1);
        set.insert(3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
    }
}
