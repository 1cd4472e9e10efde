use crate::constants::SHORT_KEY_CHARS;
use crate::models::Profile;
use std::collections::HashMap;

/// Sub-store for author metadata. Last write wins by `created_at`.
pub struct ProfileStore {
    profiles: HashMap<String, Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.profiles.clear();
    }

    /// Returns true when the stored profile was replaced.
    pub fn upsert(&mut self, pubkey: &str, profile: Profile) -> bool {
        if let Some(existing) = self.profiles.get(pubkey) {
            if existing.created_at >= profile.created_at {
                return false;
            }
        }
        self.profiles.insert(pubkey.to_string(), profile);
        true
    }

    pub fn get(&self, pubkey: &str) -> Option<&Profile> {
        self.profiles.get(pubkey)
    }

    pub fn contains(&self, pubkey: &str) -> bool {
        self.profiles.contains_key(pubkey)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profile name, or the first characters of the key.
    pub fn display_name(&self, pubkey: &str) -> String {
        self.profiles
            .get(pubkey)
            .and_then(Profile::label)
            .map(str::to_string)
            .unwrap_or_else(|| pubkey.chars().take(SHORT_KEY_CHARS).collect())
    }
}

impl Default for ProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, created_at: u64) -> Profile {
        Profile {
            name: Some(name.to_string()),
            created_at,
            ..Default::default()
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = ProfileStore::new();
        assert!(store.upsert("k", profile("new", 10)));
        assert!(!store.upsert("k", profile("old", 5)));
        assert!(!store.upsert("k", profile("same", 10)));
        assert_eq!(store.get("k").map(|p| p.created_at), Some(10));
        assert_eq!(store.display_name("k"), "new");
    }

    #[test]
    fn test_display_name_falls_back_to_short_key() {
        let store = ProfileStore::new();
        assert_eq!(store.display_name("abcdef0123456789"), "abcdef01");
        assert_eq!(store.display_name("abc"), "abc");
    }
}
