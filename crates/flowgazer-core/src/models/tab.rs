use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of timeline views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Global,
    Following,
    MyPosts,
    Likes,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tab: {0}")]
pub struct UnknownTab(pub String);

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Global, Tab::Following, Tab::MyPosts, Tab::Likes];

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Global => "global",
            Tab::Following => "following",
            Tab::MyPosts => "myposts",
            Tab::Likes => "likes",
        }
    }

    /// Public tabs show other people's content and get the self-feed merge
    /// plus the content filters.
    pub fn is_public(&self) -> bool {
        matches!(self, Tab::Global | Tab::Following)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Tab::Global => 0,
            Tab::Following => 1,
            Tab::MyPosts => 2,
            Tab::Likes => 3,
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Tab::Global),
            "following" => Ok(Tab::Following),
            "myposts" => Ok(Tab::MyPosts),
            "likes" => Ok(Tab::Likes),
            other => Err(UnknownTab(other.to_string())),
        }
    }
}

/// Pagination window of a tab.
///
/// `since` is the newest included timestamp. `until` is the oldest
/// boundary-eligible included timestamp, or a lookback anchor while no
/// eligible event has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cursor {
    pub until: u64,
    pub since: u64,
    #[serde(skip)]
    pub until_is_fallback: bool,
}

impl Cursor {
    /// Fold one included event into the window.
    pub fn fold(cursor: &mut Option<Cursor>, created_at: u64, boundary_eligible: bool, fallback_anchor: u64) {
        match cursor {
            None => {
                *cursor = Some(if boundary_eligible {
                    Cursor {
                        until: created_at,
                        since: created_at,
                        until_is_fallback: false,
                    }
                } else {
                    Cursor {
                        until: fallback_anchor,
                        since: created_at,
                        until_is_fallback: true,
                    }
                });
            }
            Some(c) => {
                c.since = c.since.max(created_at);
                if boundary_eligible {
                    if c.until_is_fallback {
                        c.until = created_at;
                        c.until_is_fallback = false;
                    } else {
                        c.until = c.until.min(created_at);
                    }
                }
            }
        }
    }
}
