use super::Event;
use crate::constants::kinds;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Not a metadata event (kind {0})")]
    WrongKind(u16),

    #[error("Malformed metadata content: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Profile metadata (kind:0) for one author.
///
/// Replaced as a whole on update, never merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nip05: Option<String>,
    /// Timestamp of the metadata event this profile came from
    #[serde(default)]
    pub created_at: u64,
}

impl Profile {
    /// Parse the JSON content of a kind:0 event.
    pub fn from_metadata_event(event: &Event) -> Result<Self, ProfileError> {
        if event.kind != kinds::METADATA {
            return Err(ProfileError::WrongKind(event.kind));
        }
        let mut profile: Profile = serde_json::from_str(&event.content)?;
        profile.created_at = event.created_at;
        Ok(profile)
    }

    /// Non-empty `name`, the field the timeline labels authors with.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(content: &str, created_at: u64) -> Event {
        Event {
            id: "00".repeat(32),
            pubkey: "11".repeat(32),
            created_at,
            kind: kinds::METADATA,
            tags: Vec::new(),
            content: content.to_string(),
            sig: String::new(),
        }
    }

    #[test]
    fn test_parse_metadata() {
        let event = metadata(
            r#"{"name":"alice","displayName":"Alice","about":"hi","picture":"https://x/y.png","nip05":"a@x","lud16":"ignored"}"#,
            42,
        );
        let profile = Profile::from_metadata_event(&event).unwrap();
        assert_eq!(profile.label(), Some("alice"));
        assert_eq!(profile.display_name.as_deref(), Some("Alice"));
        assert_eq!(profile.nip05.as_deref(), Some("a@x"));
        assert_eq!(profile.created_at, 42);
    }

    #[test]
    fn test_snake_case_display_name() {
        let event = metadata(r#"{"display_name":"Bob"}"#, 1);
        let profile = Profile::from_metadata_event(&event).unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Bob"));
        assert_eq!(profile.label(), None);
    }

    #[test]
    fn test_malformed_content() {
        let event = metadata("not json", 1);
        assert!(matches!(
            Profile::from_metadata_event(&event),
            Err(ProfileError::Malformed(_))
        ));
    }

    #[test]
    fn test_wrong_kind() {
        let mut event = metadata("{}", 1);
        event.kind = kinds::TEXT_NOTE;
        assert!(matches!(
            Profile::from_metadata_event(&event),
            Err(ProfileError::WrongKind(1))
        ));
    }
}
