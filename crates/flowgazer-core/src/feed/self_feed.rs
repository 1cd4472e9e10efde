use crate::constants::SELF_FEED_CAPACITY;
use crate::models::Event;
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SelfNote {
    id: String,
    created_at: u64,
}

impl SelfNote {
    // newest first, ties by ascending id (the feed's display order)
    fn sort_key(&self) -> (u64, Reverse<&str>) {
        (self.created_at, Reverse(self.id.as_str()))
    }
}

/// Bounded, newest-first cache of the local identity's own notes.
///
/// Only used to merge self-posts into public tabs at read time; it never
/// touches tab membership or cursors. Holds ids, the events stay in the store.
pub struct SelfFeedCache {
    notes: Vec<SelfNote>,
    capacity: usize,
}

impl SelfFeedCache {
    pub fn new() -> Self {
        Self::with_capacity(SELF_FEED_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            notes: Vec::new(),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Insert keeping time-descending order. Returns false for duplicates and
    /// for notes older than everything in a full cache.
    pub fn insert(&mut self, event: &Event) -> bool {
        if self.notes.iter().any(|n| n.id == event.id) {
            return false;
        }
        let note = SelfNote {
            id: event.id.clone(),
            created_at: event.created_at,
        };
        let position = self
            .notes
            .partition_point(|n| n.sort_key() > note.sort_key());
        if position >= self.capacity {
            return false;
        }
        self.notes.insert(position, note);
        self.notes.truncate(self.capacity);
        true
    }

    /// Ids of cached notes strictly newer than `threshold`; all of them when `None`.
    pub fn newer_than(&self, threshold: Option<u64>) -> impl Iterator<Item = &str> + '_ {
        self.notes
            .iter()
            .take_while(move |n| threshold.map_or(true, |t| n.created_at > t))
            .map(|n| n.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Cached `(id, created_at)` pairs, newest first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.notes.iter().map(|n| (n.id.as_str(), n.created_at))
    }
}

impl Default for SelfFeedCache {
    fn default() -> Self {
        Self::new()
    }
}
