use super::indices::{EventIndex, EventKey, IndexEntries};
use super::profile_store::ProfileStore;
use super::verify::SignatureVerifier;
use crate::models::{Event, Profile};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Repost and reaction totals for one target event. Only ever incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReactionCount {
    pub reposts: u32,
    pub reactions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub total_events: usize,
    pub profiles: usize,
    pub following: usize,
    pub kind_counts: BTreeMap<u16, usize>,
}

/// Canonical event storage - single source of truth for everything the feed shows.
///
/// Events live in an arena in arrival order; indices hold arena keys so payloads
/// are stored once. Accepted events are never evicted, only dropped wholesale by
/// `clear()`.
pub struct EventStore {
    verifier: Box<dyn SignatureVerifier>,

    events: Vec<Event>,
    keys_by_id: HashMap<String, EventKey>,
    index: EventIndex,
    profiles: ProfileStore,

    // Session context
    local_identity: Option<String>,
    following: HashSet<String>,

    // User-specific aggregates, only maintained while the identity is known
    liked_by_me: HashSet<String>,
    reaction_counts: HashMap<String, ReactionCount>,
}

impl EventStore {
    pub fn new(verifier: Box<dyn SignatureVerifier>) -> Self {
        Self {
            verifier,
            events: Vec::new(),
            keys_by_id: HashMap::new(),
            index: EventIndex::new(),
            profiles: ProfileStore::new(),
            local_identity: None,
            following: HashSet::new(),
            liked_by_me: HashSet::new(),
            reaction_counts: HashMap::new(),
        }
    }

    pub fn set_local_identity(&mut self, pubkey: Option<String>) {
        self.local_identity = pubkey;
    }

    pub fn local_identity(&self) -> Option<&str> {
        self.local_identity.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.local_identity.is_some()
    }

    pub fn is_local_identity(&self, pubkey: &str) -> bool {
        self.local_identity.as_deref() == Some(pubkey)
    }

    /// Reset all stored data. The local identity is session context and stays.
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_by_id.clear();
        self.index.clear();
        self.profiles.clear();
        self.following.clear();
        self.liked_by_me.clear();
        self.reaction_counts.clear();
        tracing::info!("Event store cleared");
    }

    // ===== Events =====

    /// Store an event after signature verification. Returns true only the first
    /// time a given id is accepted.
    pub fn add_event(&mut self, event: Event) -> bool {
        if self.keys_by_id.contains_key(&event.id) {
            return false;
        }
        if !self.verifier.verify(&event) {
            tracing::warn!(id = %event.id, kind = event.kind, "Rejected event with invalid signature");
            return false;
        }

        let entries = IndexEntries::of(&event);
        let key = EventKey(self.events.len());

        self.keys_by_id.insert(event.id.clone(), key);
        self.index.insert(key, entries);
        self.update_user_aggregates(&event);
        self.events.push(event);
        true
    }

    fn update_user_aggregates(&mut self, event: &Event) {
        let Some(me) = self.local_identity.as_deref() else {
            return;
        };
        if !(event.is_reaction() || event.is_repost()) {
            return;
        }
        let Some(target) = event.referenced_event_id() else {
            return;
        };

        if event.is_reaction() && event.pubkey == me {
            self.liked_by_me.insert(target.to_string());
        }

        let counts = self.reaction_counts.entry(target.to_string()).or_default();
        if event.is_repost() {
            counts.reposts += 1;
        } else {
            counts.reactions += 1;
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.keys_by_id.contains_key(id)
    }

    pub fn get_event(&self, id: &str) -> Option<&Event> {
        self.keys_by_id.get(id).map(|key| &self.events[key.0])
    }

    /// Events for the given ids, skipping unknown ones.
    pub fn get_events<'a, I>(&self, ids: I) -> Vec<&Event>
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().filter_map(|id| self.get_event(id)).collect()
    }

    /// Every stored event in arrival order.
    pub fn all_events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn resolve(&self, keys: Option<&BTreeSet<EventKey>>) -> Vec<&Event> {
        keys.map(|keys| keys.iter().map(|key| &self.events[key.0]).collect())
            .unwrap_or_default()
    }

    pub fn events_by_kind(&self, kind: u16) -> Vec<&Event> {
        self.resolve(self.index.by_kind(kind))
    }

    pub fn events_by_author(&self, pubkey: &str) -> Vec<&Event> {
        self.resolve(self.index.by_author(pubkey))
    }

    /// Events whose e-tags reference `event_id`.
    pub fn events_referencing_event(&self, event_id: &str) -> Vec<&Event> {
        self.resolve(self.index.referencing_event(event_id))
    }

    /// Events whose p-tags reference `pubkey`.
    pub fn events_referencing_pubkey(&self, pubkey: &str) -> Vec<&Event> {
        self.resolve(self.index.referencing_pubkey(pubkey))
    }

    pub fn reaction_count(&self, event_id: &str) -> ReactionCount {
        self.reaction_counts.get(event_id).copied().unwrap_or_default()
    }

    pub fn is_liked_by_me(&self, event_id: &str) -> bool {
        self.liked_by_me.contains(event_id)
    }

    // ===== Profiles =====

    /// Last-write-wins by `created_at`; returns whether the stored value changed.
    pub fn add_profile(&mut self, pubkey: &str, profile: Profile) -> bool {
        self.profiles.upsert(pubkey, profile)
    }

    pub fn profile(&self, pubkey: &str) -> Option<&Profile> {
        self.profiles.get(pubkey)
    }

    pub fn has_profile(&self, pubkey: &str) -> bool {
        self.profiles.contains(pubkey)
    }

    pub fn display_name(&self, pubkey: &str) -> String {
        self.profiles.display_name(pubkey)
    }

    // ===== Following =====

    /// Replace the following set wholesale.
    pub fn set_following_list<I, S>(&mut self, pubkeys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.following.clear();
        self.following.extend(pubkeys.into_iter().map(Into::into));
        tracing::info!(count = self.following.len(), "Following list replaced");
    }

    pub fn is_following(&self, pubkey: &str) -> bool {
        self.following.contains(pubkey)
    }

    pub fn following(&self) -> &HashSet<String> {
        &self.following
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_events: self.events.len(),
            profiles: self.profiles.len(),
            following: self.following.len(),
            kind_counts: self.index.kind_counts().collect(),
        }
    }
}
