use crate::models::Event;
use std::collections::{BTreeSet, HashMap};

/// Position of an event in the store's arena.
///
/// Keys grow with arrival, so ordered key sets iterate in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey(pub(crate) usize);

/// Sub-store for secondary indices. Derived data only; never pruned.
pub struct EventIndex {
    by_kind: HashMap<u16, BTreeSet<EventKey>>,
    by_author: HashMap<String, BTreeSet<EventKey>>,
    by_referenced_event: HashMap<String, BTreeSet<EventKey>>,
    by_referenced_pubkey: HashMap<String, BTreeSet<EventKey>>,
}

/// Index entries of one event, computed before anything is written.
pub(crate) struct IndexEntries {
    kind: u16,
    author: String,
    event_refs: Vec<String>,
    pubkey_refs: Vec<String>,
}

impl IndexEntries {
    pub(crate) fn of(event: &Event) -> Self {
        Self {
            kind: event.kind,
            author: event.pubkey.clone(),
            event_refs: event.referenced_event_ids().map(str::to_string).collect(),
            pubkey_refs: event.referenced_pubkeys().map(str::to_string).collect(),
        }
    }
}

impl EventIndex {
    pub fn new() -> Self {
        Self {
            by_kind: HashMap::new(),
            by_author: HashMap::new(),
            by_referenced_event: HashMap::new(),
            by_referenced_pubkey: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.by_kind.clear();
        self.by_author.clear();
        self.by_referenced_event.clear();
        self.by_referenced_pubkey.clear();
    }

    pub(crate) fn insert(&mut self, key: EventKey, entries: IndexEntries) {
        self.by_kind.entry(entries.kind).or_default().insert(key);
        self.by_author.entry(entries.author).or_default().insert(key);
        for id in entries.event_refs {
            self.by_referenced_event.entry(id).or_default().insert(key);
        }
        for pubkey in entries.pubkey_refs {
            self.by_referenced_pubkey.entry(pubkey).or_default().insert(key);
        }
    }

    // ===== Query Methods =====

    pub fn by_kind(&self, kind: u16) -> Option<&BTreeSet<EventKey>> {
        self.by_kind.get(&kind)
    }

    pub fn by_author(&self, pubkey: &str) -> Option<&BTreeSet<EventKey>> {
        self.by_author.get(pubkey)
    }

    pub fn referencing_event(&self, event_id: &str) -> Option<&BTreeSet<EventKey>> {
        self.by_referenced_event.get(event_id)
    }

    pub fn referencing_pubkey(&self, pubkey: &str) -> Option<&BTreeSet<EventKey>> {
        self.by_referenced_pubkey.get(pubkey)
    }

    pub fn kind_counts(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        self.by_kind.iter().map(|(kind, keys)| (*kind, keys.len()))
    }
}

impl Default for EventIndex {
    fn default() -> Self {
        Self::new()
    }
}
