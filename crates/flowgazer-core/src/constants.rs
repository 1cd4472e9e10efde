//! Application-wide constants
//!
//! Centralized location for magic strings and tuning values that are used
//! across the store, the router and the runtime.

/// Default relay the CLI reports when no config overrides it
pub const RELAY_URL: &str = "wss://r.kojira.io/";

/// Value of the `client` tag written by this client
pub const CLIENT_TAG: &str = "flowgazer";

/// Debounce delay for live repaints
pub const RENDER_DELAY_MS: u64 = 300;

/// Upper bound for a configured repaint delay
pub const MAX_RENDER_DELAY_MS: u64 = 60_000;

/// Notes longer than this (in characters) are hidden from public tabs
pub const MAX_NOTE_CHARS: usize = 190;

/// How many notes justify the visible window for reposts and channel messages
pub const CO_VISIBILITY_NOTE_COUNT: usize = 150;

/// Capacity of the self-authored note cache
pub const SELF_FEED_CAPACITY: usize = 200;

/// Fallback pagination anchor when only self-related events have arrived
pub const FALLBACK_LOOKBACK_SECS: u64 = 15 * 60;

/// Page size of a load-more request
pub const LOAD_MORE_LIMIT: usize = 50;

// Live subscription sizes
pub const MAIN_TIMELINE_LIMIT: usize = 150;
pub const NOTIFICATION_LIMIT: usize = 50;
pub const MY_POSTS_HISTORY_LIMIT: usize = 100;

/// Maximum number of own post ids referenced by the reactions subscription
pub const MAX_WATCHED_POST_IDS: usize = 100;

/// Number of key characters shown when a profile has no name
pub const SHORT_KEY_CHARS: usize = 8;

// Nostr event kinds the feed cares about
pub mod kinds {
    /// Metadata (profiles)
    pub const METADATA: u16 = 0;
    /// Text note
    pub const TEXT_NOTE: u16 = 1;
    /// Contact list (following)
    pub const CONTACT_LIST: u16 = 3;
    /// Repost of another event
    pub const REPOST: u16 = 6;
    /// Reaction ("like")
    pub const REACTION: u16 = 7;
    /// Public chat channel message
    pub const CHANNEL_MESSAGE: u16 = 42;
}
