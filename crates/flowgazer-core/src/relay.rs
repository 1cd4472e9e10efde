//! Boundary types shared with the network layer.

use crate::models::{Event, QueryFilter, Tab};
use serde_json::Value;
use std::fmt;

/// Subscriptions the runtime opens. The relay echoes the id back on every
/// event and end-of-stored-events marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscription {
    MainTimeline,
    FollowingList,
    MyLikes,
    /// First-time backlog of a personal tab
    History(Tab),
    LoadMore(Tab),
}

impl Subscription {
    pub fn id(&self) -> String {
        match self {
            Subscription::MainTimeline => "main".to_string(),
            Subscription::FollowingList => "following-list".to_string(),
            Subscription::MyLikes => "my-likes".to_string(),
            Subscription::History(tab) => format!("history-{}", tab.name()),
            Subscription::LoadMore(tab) => format!("load-more-{}", tab.name()),
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "main" => return Some(Subscription::MainTimeline),
            "following-list" => return Some(Subscription::FollowingList),
            "my-likes" => return Some(Subscription::MyLikes),
            _ => {}
        }
        if let Some(tab) = id.strip_prefix("history-") {
            return tab.parse().ok().map(Subscription::History);
        }
        id.strip_prefix("load-more-")
            .and_then(|tab| tab.parse().ok())
            .map(Subscription::LoadMore)
    }

    /// Events on these subscriptions only go to their own tab.
    pub fn history_tab(&self) -> Option<Tab> {
        match self {
            Subscription::History(tab) | Subscription::LoadMore(tab) => Some(*tab),
            _ => None,
        }
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayMessageError {
    #[error("Invalid relay message JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed relay message: {0}")]
    Malformed(&'static str),
    #[error("Unknown subscription id: {0}")]
    UnknownSubscription(String),
}

/// Inbound relay traffic the runtime reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayMessage {
    Event {
        subscription: Subscription,
        event: Event,
    },
    EndOfStoredEvents {
        subscription: Subscription,
    },
}

impl RelayMessage {
    /// Parse a NIP-01 relay frame such as `["EVENT", "main", {...}]`.
    ///
    /// Frames the runtime has no use for (`NOTICE`, `OK`, ...) yield `None`.
    pub fn from_json(frame: &str) -> Result<Option<Self>, RelayMessageError> {
        let parts: Vec<Value> = serde_json::from_str(frame)?;
        let Some(label) = parts.first().and_then(Value::as_str) else {
            return Err(RelayMessageError::Malformed("missing message type"));
        };
        if label != "EVENT" && label != "EOSE" {
            return Ok(None);
        }

        let id = parts
            .get(1)
            .and_then(Value::as_str)
            .ok_or(RelayMessageError::Malformed("missing subscription id"))?;
        let subscription = Subscription::from_id(id)
            .ok_or_else(|| RelayMessageError::UnknownSubscription(id.to_string()))?;

        if label == "EOSE" {
            return Ok(Some(RelayMessage::EndOfStoredEvents { subscription }));
        }
        let payload = parts
            .into_iter()
            .nth(2)
            .ok_or(RelayMessageError::Malformed("missing event payload"))?;
        let event: Event = serde_json::from_value(payload)?;
        Ok(Some(RelayMessage::Event {
            subscription,
            event,
        }))
    }
}

/// Opens and closes relay subscriptions.
pub trait Transport {
    fn subscribe(&mut self, subscription: Subscription, filters: Vec<QueryFilter>);
    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Fetches author metadata on demand; batching is up to the implementation.
pub trait ProfileRequester {
    fn request(&mut self, pubkey: &str);
    /// A backlog finished; send whatever is queued.
    fn flush(&mut self);
}
