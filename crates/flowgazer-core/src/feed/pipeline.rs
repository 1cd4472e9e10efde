//! Render-time content filters.
//!
//! Stages run in a fixed order; the co-visibility trim depends on how many
//! notes survived the stages before it.

use crate::config::FeedConfig;
use crate::constants::{CLIENT_TAG, CO_VISIBILITY_NOTE_COUNT, MAX_NOTE_CHARS};
use crate::models::{Event, Tab};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// User-controlled view toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewOptions {
    /// Only notes posted from this client
    pub client_only: bool,
    /// Author allowlist for the global tab
    pub authors: Option<Vec<String>>,
}

/// Feed display order: newest first, ties by ascending id.
pub fn display_order(a: &Event, b: &Event) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

pub fn sort_for_display(events: &mut [&Event]) {
    events.sort_by(|a, b| display_order(a, b));
}

/// Run every filter stage for `tab` and return the events in display order.
pub fn apply<'a>(
    tab: Tab,
    mut events: Vec<&'a Event>,
    options: &ViewOptions,
    config: &FeedConfig,
) -> Vec<&'a Event> {
    if tab.is_public() {
        if !config.show_channel_messages {
            events.retain(|ev| !ev.is_channel_message());
        }

        let forbidden: Vec<String> = config
            .forbidden_words
            .iter()
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect();
        if !forbidden.is_empty() {
            events.retain(|ev| {
                if !ev.is_note() {
                    return true;
                }
                let content = ev.content.to_lowercase();
                !forbidden.iter().any(|word| content.contains(word.as_str()))
            });
        }

        events.retain(|ev| !ev.is_note() || ev.content_chars() <= MAX_NOTE_CHARS);
    }

    if options.client_only && tab != Tab::Likes {
        events.retain(|ev| ev.is_note() && ev.has_client_tag(CLIENT_TAG));
    }

    if tab == Tab::Global {
        if let Some(authors) = options.authors.as_ref().filter(|a| !a.is_empty()) {
            let allowed: HashSet<&str> = authors.iter().map(String::as_str).collect();
            events.retain(|ev| allowed.contains(ev.pubkey.as_str()));
        }
    }

    trim_to_note_window(&mut events);
    sort_for_display(&mut events);
    events
}

/// Drop reposts and channel messages older than the window the newest notes
/// span, so secondary content cannot stretch the visible timeline.
fn trim_to_note_window(events: &mut Vec<&Event>) {
    let mut note_times: Vec<u64> = events
        .iter()
        .filter(|ev| ev.is_note())
        .map(|ev| ev.created_at)
        .collect();
    if note_times.is_empty() {
        return;
    }
    note_times.sort_unstable_by(|a, b| b.cmp(a));
    let threshold = note_times[(CO_VISIBILITY_NOTE_COUNT - 1).min(note_times.len() - 1)];

    events.retain(|ev| {
        let secondary = ev.is_repost() || ev.is_channel_message();
        !secondary || ev.created_at >= threshold
    });
}
