use crate::constants::kinds;
use serde::{Deserialize, Serialize};

/// A signed Nostr event as it travels on the wire.
///
/// Field names follow NIP-01 so that `serde_json` round-trips relay payloads
/// byte-for-byte in structure. Events are immutable once accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub pubkey: String,
    pub created_at: u64,
    pub kind: u16,
    pub tags: Vec<Vec<String>>,
    pub content: String,
    pub sig: String,
}

impl Event {
    pub fn is_note(&self) -> bool {
        self.kind == kinds::TEXT_NOTE
    }

    pub fn is_repost(&self) -> bool {
        self.kind == kinds::REPOST
    }

    pub fn is_reaction(&self) -> bool {
        self.kind == kinds::REACTION
    }

    pub fn is_channel_message(&self) -> bool {
        self.kind == kinds::CHANNEL_MESSAGE
    }

    /// First value of the first tag named `tag_name`.
    pub fn first_tag_value(&self, tag_name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.first().map(String::as_str) == Some(tag_name))
            .and_then(|tag| tag.get(1))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// All non-empty first values of tags named `tag_name`, in tag order.
    pub fn tag_values<'a>(&'a self, tag_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.tags
            .iter()
            .filter(move |tag| tag.first().map(String::as_str) == Some(tag_name))
            .filter_map(|tag| tag.get(1))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn has_tag_value(&self, tag_name: &str, value: &str) -> bool {
        self.tag_values(tag_name).any(|v| v == value)
    }

    /// Target of a repost or reaction (first e-tag).
    pub fn referenced_event_id(&self) -> Option<&str> {
        self.first_tag_value("e")
    }

    /// Event ids referenced through e-tags.
    pub fn referenced_event_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.tag_values("e")
    }

    /// Pubkeys referenced through p-tags.
    pub fn referenced_pubkeys(&self) -> impl Iterator<Item = &str> + '_ {
        self.tag_values("p")
    }

    /// True when a p-tag names `pubkey` as a participant.
    pub fn mentions(&self, pubkey: &str) -> bool {
        self.has_tag_value("p", pubkey)
    }

    /// True when the event carries `["client", name]`.
    pub fn has_client_tag(&self, name: &str) -> bool {
        self.has_tag_value("client", name)
    }

    /// Content length in characters, the unit the note cap is expressed in.
    pub fn content_chars(&self) -> usize {
        self.content.chars().count()
    }
}

/// True for a 32-byte lowercase or uppercase hex string (ids and pubkeys).
pub fn is_hex32(value: &str) -> bool {
    value.len() == 64 && hex::decode(value).is_ok()
}
