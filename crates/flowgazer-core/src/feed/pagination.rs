//! Relay query construction for live, history and load-more subscriptions.

use super::membership::tab_kinds;
use super::pipeline::ViewOptions;
use crate::config::FeedConfig;
use crate::constants::{
    kinds, LOAD_MORE_LIMIT, MAIN_TIMELINE_LIMIT, MAX_WATCHED_POST_IDS, MY_POSTS_HISTORY_LIMIT,
    NOTIFICATION_LIMIT,
};
use crate::models::{QueryFilter, Tab};
use crate::store::EventStore;

/// Followed authors without the local identity, sorted for stable queries.
fn following_authors(store: &EventStore) -> Vec<String> {
    let mut authors: Vec<String> = store
        .following()
        .iter()
        .filter(|pk| !store.is_local_identity(pk))
        .cloned()
        .collect();
    authors.sort();
    authors
}

fn allowlisted_authors(options: &ViewOptions) -> Option<&Vec<String>> {
    options.authors.as_ref().filter(|authors| !authors.is_empty())
}

/// Query for the page older than `until` in `tab`.
///
/// Returns `None` when the tab cannot be paginated right now (nobody followed,
/// or no identity for the personal tabs) so the caller can abort quietly.
pub fn build_load_more_filter(
    store: &EventStore,
    config: &FeedConfig,
    options: &ViewOptions,
    tab: Tab,
    until: u64,
) -> Option<QueryFilter> {
    let base = QueryFilter::new()
        .kinds(tab_kinds(tab, config))
        .until(until.saturating_sub(1))
        .limit(LOAD_MORE_LIMIT);

    match tab {
        Tab::Global => Some(match allowlisted_authors(options) {
            Some(authors) => base.authors(authors.iter().cloned()),
            None => base,
        }),
        Tab::Following => {
            let authors = following_authors(store);
            if authors.is_empty() {
                tracing::warn!("Load more for following skipped: following list is empty");
                return None;
            }
            Some(base.authors(authors))
        }
        Tab::MyPosts => {
            let Some(me) = store.local_identity() else {
                tracing::warn!("Load more for myposts skipped: not logged in");
                return None;
            };
            Some(base.authors([me]))
        }
        Tab::Likes => {
            let Some(me) = store.local_identity() else {
                tracing::warn!("Load more for likes skipped: not logged in");
                return None;
            };
            Some(base.pubkey_refs([me]))
        }
    }
}

/// Filters of the long-lived main timeline subscription.
pub fn main_timeline_filters(
    store: &EventStore,
    config: &FeedConfig,
    options: &ViewOptions,
) -> Vec<QueryFilter> {
    let mut filters = Vec::new();
    let public_kinds = tab_kinds(Tab::Global, config);

    let global = QueryFilter::new()
        .kinds(public_kinds.clone())
        .limit(MAIN_TIMELINE_LIMIT);
    filters.push(match allowlisted_authors(options) {
        Some(authors) => global.authors(authors.iter().cloned()),
        None => global,
    });

    let followed = following_authors(store);
    if !followed.is_empty() {
        filters.push(
            QueryFilter::new()
                .kinds(public_kinds)
                .authors(followed)
                .limit(MAIN_TIMELINE_LIMIT),
        );
    }

    let Some(me) = store.local_identity() else {
        return filters;
    };

    filters.extend(notification_filters(me, config));

    let mut my_notes = store.events_by_author(me);
    my_notes.retain(|ev| ev.is_note());
    my_notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if !my_notes.is_empty() {
        filters.push(
            QueryFilter::new()
                .kinds([kinds::REPOST, kinds::REACTION])
                .event_refs(
                    my_notes
                        .iter()
                        .take(MAX_WATCHED_POST_IDS)
                        .map(|ev| ev.id.clone()),
                ),
        );
    }

    filters
}

/// Reactions, reposts and mentions addressed to `me`.
fn notification_filters(me: &str, config: &FeedConfig) -> Vec<QueryFilter> {
    let mut notification_kinds = vec![kinds::REACTION];
    if config.likes_include_mentions {
        notification_kinds.extend([kinds::REPOST, kinds::TEXT_NOTE]);
    }
    notification_kinds
        .into_iter()
        .map(|kind| {
            QueryFilter::new()
                .kinds([kind])
                .pubkey_refs([me])
                .limit(NOTIFICATION_LIMIT)
        })
        .collect()
}

/// Backlog fetched the first time a personal tab is opened.
pub fn history_filters(store: &EventStore, config: &FeedConfig, tab: Tab) -> Vec<QueryFilter> {
    let Some(me) = store.local_identity() else {
        return Vec::new();
    };
    match tab {
        Tab::Global | Tab::Following => Vec::new(),
        Tab::MyPosts => vec![QueryFilter::new()
            .kinds(tab_kinds(Tab::MyPosts, config))
            .authors([me])
            .limit(MY_POSTS_HISTORY_LIMIT)],
        Tab::Likes => notification_filters(me, config),
    }
}

/// The local identity's latest contact list.
pub fn contact_list_filter(me: &str) -> QueryFilter {
    QueryFilter::new()
        .kinds([kinds::CONTACT_LIST])
        .authors([me])
        .limit(1)
}

/// Reactions the local identity has sent, for liked-by-me markers.
pub fn my_reactions_filter(me: &str) -> QueryFilter {
    QueryFilter::new().kinds([kinds::REACTION]).authors([me])
}
