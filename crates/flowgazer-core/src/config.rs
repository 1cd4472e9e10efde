use crate::constants::{MAX_RENDER_DELAY_MS, RENDER_DELAY_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which self-related events public tabs leave out.
///
/// Successive client versions disagreed here, so the policy is configurable;
/// the default is the strictest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelfExclusion {
    /// Only events authored by the local identity
    Author,
    /// Authored by, or p-tagging, the local identity
    AuthorAndMention,
    /// As above, plus reposts of the local identity's own events
    #[default]
    AuthorMentionAndRepostOfSelf,
}

/// Feed classification and rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedConfig {
    /// Include kind:42 channel messages in global/following
    pub show_channel_messages: bool,
    /// Let channel messages count for myposts/likes membership
    pub channel_messages_in_personal_tabs: bool,
    /// Likes also collects reposts and notes that p-tag the local identity
    pub likes_include_mentions: bool,
    pub self_exclusion: SelfExclusion,
    /// Repaint debounce in milliseconds, capped at `MAX_RENDER_DELAY_MS`
    pub render_delay_ms: u64,
    /// Repaint on live events; renders still happen on explicit requests
    pub auto_update: bool,
    /// Lower-case substrings that hide notes from public tabs
    pub forbidden_words: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            show_channel_messages: false,
            channel_messages_in_personal_tabs: false,
            likes_include_mentions: true,
            self_exclusion: SelfExclusion::default(),
            render_delay_ms: RENDER_DELAY_MS,
            auto_update: true,
            forbidden_words: Vec::new(),
        }
    }
}

impl FeedConfig {
    pub fn render_delay(&self) -> Duration {
        Duration::from_millis(self.render_delay_ms.min(MAX_RENDER_DELAY_MS))
    }
}
