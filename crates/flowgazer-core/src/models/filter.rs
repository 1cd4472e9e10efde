use nostr_sdk::{Filter, JsonUtil};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Failed to encode filter: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Relay filter rejected: {0}")]
    Invalid(String),
}

/// Relay query descriptor in NIP-01 filter form.
///
/// This is what the router hands to the transport; empty fields are omitted
/// from the JSON so the relay sees exactly the constraints that were set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<u16>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(rename = "#e", default, skip_serializing_if = "Option::is_none")]
    pub event_refs: Option<Vec<String>>,
    #[serde(rename = "#p", default, skip_serializing_if = "Option::is_none")]
    pub pubkey_refs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds<I: IntoIterator<Item = u16>>(mut self, kinds: I) -> Self {
        self.kinds = Some(kinds.into_iter().collect());
        self
    }

    pub fn authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = Some(authors.into_iter().map(Into::into).collect());
        self
    }

    pub fn event_refs<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event_refs = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn pubkey_refs<I, S>(mut self, pubkeys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pubkey_refs = Some(pubkeys.into_iter().map(Into::into).collect());
        self
    }

    pub fn since(mut self, since: u64) -> Self {
        self.since = Some(since);
        self
    }

    pub fn until(mut self, until: u64) -> Self {
        self.until = Some(until);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_json(&self) -> Result<String, FilterError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Convert into the nostr-sdk filter used by relay clients.
    pub fn to_nostr_filter(&self) -> Result<Filter, FilterError> {
        let json = self.to_json()?;
        Filter::from_json(json).map_err(|e| FilterError::Invalid(e.to_string()))
    }
}
