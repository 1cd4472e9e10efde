//! Tab membership predicates.
//!
//! Every function here is a pure function of the event, the feed config and
//! the store's session state (local identity, following set, repost targets),
//! so live classification and full rebuilds always agree.

use crate::config::{FeedConfig, SelfExclusion};
use crate::constants::kinds;
use crate::models::{Event, Tab};
use crate::store::EventStore;

/// Kinds a tab is allowed to contain.
pub fn tab_kinds(tab: Tab, config: &FeedConfig) -> Vec<u16> {
    let mut included = match tab {
        Tab::Global | Tab::Following => vec![kinds::TEXT_NOTE, kinds::REPOST],
        Tab::MyPosts => vec![kinds::TEXT_NOTE],
        Tab::Likes if config.likes_include_mentions => {
            vec![kinds::REACTION, kinds::REPOST, kinds::TEXT_NOTE]
        }
        Tab::Likes => vec![kinds::REACTION],
    };
    let channel_enabled = if tab.is_public() {
        config.show_channel_messages
    } else {
        config.channel_messages_in_personal_tabs
    };
    if channel_enabled {
        included.push(kinds::CHANNEL_MESSAGE);
    }
    included
}

/// True when `event` reposts something the local identity wrote.
fn reposts_own_content(event: &Event, store: &EventStore, me: &str) -> bool {
    event.is_repost()
        && event
            .referenced_event_id()
            .and_then(|target| store.get_event(target))
            .is_some_and(|original| original.pubkey == me)
}

fn excluded_as_self(event: &Event, store: &EventStore, policy: SelfExclusion) -> bool {
    let Some(me) = store.local_identity() else {
        return false;
    };
    if event.pubkey == me {
        return true;
    }
    match policy {
        SelfExclusion::Author => false,
        SelfExclusion::AuthorAndMention => event.mentions(me),
        SelfExclusion::AuthorMentionAndRepostOfSelf => {
            event.mentions(me) || reposts_own_content(event, store, me)
        }
    }
}

/// Whether `event` belongs in `tab`.
pub fn belongs_to(tab: Tab, event: &Event, store: &EventStore, config: &FeedConfig) -> bool {
    if !tab_kinds(tab, config).contains(&event.kind) {
        return false;
    }

    match tab {
        Tab::Global => !excluded_as_self(event, store, config.self_exclusion),
        Tab::Following => {
            store.is_following(&event.pubkey)
                && !excluded_as_self(event, store, config.self_exclusion)
        }
        Tab::MyPosts => store.is_local_identity(&event.pubkey),
        Tab::Likes => store
            .local_identity()
            .is_some_and(|me| event.mentions(me)),
    }
}

/// Whether an included event may move the tab's `until` cursor.
///
/// Public tabs only paginate on content unrelated to the local identity;
/// personal tabs paginate on everything they hold.
pub fn is_boundary_eligible(tab: Tab, event: &Event, store: &EventStore) -> bool {
    if !tab.is_public() {
        return true;
    }
    let Some(me) = store.local_identity() else {
        return true;
    };
    event.pubkey != me && !event.mentions(me) && !reposts_own_content(event, store, me)
}

/// All tabs `event` classifies into, in `Tab::ALL` order.
pub fn target_tabs(event: &Event, store: &EventStore, config: &FeedConfig) -> Vec<Tab> {
    Tab::ALL
        .into_iter()
        .filter(|tab| belongs_to(*tab, event, store, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AcceptAll;
    use crate::test_support::{channel_message, mention, note, reaction, repost, ME};

    fn store() -> EventStore {
        let mut store = EventStore::new(Box::new(AcceptAll));
        store.set_local_identity(Some(ME.to_string()));
        store.set_following_list(["alice"]);
        store
    }

    #[test]
    fn test_note_by_followed_author() {
        let store = store();
        let config = FeedConfig::default();
        let event = note("n1", "alice", 10, "hi");
        assert_eq!(target_tabs(&event, &store, &config), vec![Tab::Global, Tab::Following]);

        let stranger = note("n2", "bob", 10, "hi");
        assert_eq!(target_tabs(&stranger, &store, &config), vec![Tab::Global]);
    }

    #[test]
    fn test_own_note_only_in_myposts() {
        let store = store();
        let config = FeedConfig::default();
        let event = note("n1", ME, 10, "mine");
        assert_eq!(target_tabs(&event, &store, &config), vec![Tab::MyPosts]);
    }

    #[test]
    fn test_reaction_to_me_goes_to_likes() {
        let store = store();
        let config = FeedConfig::default();
        let event = reaction("r1", "bob", 10, "my-note", ME);
        assert_eq!(target_tabs(&event, &store, &config), vec![Tab::Likes]);

        let elsewhere = reaction("r2", "bob", 10, "other", "carol");
        assert!(target_tabs(&elsewhere, &store, &config).is_empty());
    }

    #[test]
    fn test_self_exclusion_policies() {
        let mut store = store();
        store.add_event(note("mine", ME, 5, "original"));
        let mention_by_friend = mention("m1", "alice", 10, ME);
        let repost_of_mine = repost("rp1", "alice", 11, "mine", "someone-else");

        let strict = FeedConfig::default();
        assert_eq!(target_tabs(&mention_by_friend, &store, &strict), vec![Tab::Likes]);
        assert_eq!(target_tabs(&repost_of_mine, &store, &strict), Vec::<Tab>::new());

        let mention_only = FeedConfig {
            self_exclusion: SelfExclusion::AuthorAndMention,
            ..FeedConfig::default()
        };
        assert_eq!(
            target_tabs(&repost_of_mine, &store, &mention_only),
            vec![Tab::Global, Tab::Following]
        );

        let author_only = FeedConfig {
            self_exclusion: SelfExclusion::Author,
            ..FeedConfig::default()
        };
        let repost_mentioning_me = repost("rp2", "alice", 12, "elsewhere", ME);
        assert_eq!(
            target_tabs(&repost_mentioning_me, &store, &author_only),
            vec![Tab::Global, Tab::Following, Tab::Likes]
        );
    }

    #[test]
    fn test_boundary_eligibility() {
        let mut store = store();
        store.add_event(note("mine", ME, 5, "original"));

        assert!(is_boundary_eligible(Tab::Global, &note("n", "bob", 1, "x"), &store));
        assert!(!is_boundary_eligible(Tab::Global, &mention("m", "bob", 1, ME), &store));
        assert!(!is_boundary_eligible(
            Tab::Following,
            &repost("r", "alice", 1, "mine", "nobody"),
            &store
        ));
        assert!(!is_boundary_eligible(Tab::Global, &note("n", ME, 1, "x"), &store));
        // personal tabs paginate on everything
        assert!(is_boundary_eligible(Tab::Likes, &mention("m", "bob", 1, ME), &store));
    }

    #[test]
    fn test_channel_messages_are_configurable() {
        let store = store();
        let hidden = FeedConfig::default();
        assert!(target_tabs(&channel_message("c1", "alice", 1), &store, &hidden).is_empty());
        assert!(target_tabs(&channel_message("c2", ME, 1), &store, &hidden).is_empty());

        let shown = FeedConfig {
            show_channel_messages: true,
            channel_messages_in_personal_tabs: true,
            ..FeedConfig::default()
        };
        assert_eq!(
            target_tabs(&channel_message("c1", "alice", 1), &store, &shown),
            vec![Tab::Global, Tab::Following]
        );
        assert_eq!(target_tabs(&channel_message("c2", ME, 1), &store, &shown), vec![Tab::MyPosts]);
    }

    #[test]
    fn test_likes_without_mentions() {
        let store = store();
        let config = FeedConfig {
            likes_include_mentions: false,
            ..FeedConfig::default()
        };
        assert!(!belongs_to(Tab::Likes, &mention("m1", "bob", 1, ME), &store, &config));
        assert!(belongs_to(Tab::Likes, &reaction("r1", "bob", 1, "x", ME), &store, &config));
    }

    #[test]
    fn test_unauthenticated() {
        let mut store = EventStore::new(Box::new(AcceptAll));
        store.set_following_list(["alice"]);
        let config = FeedConfig::default();
        assert_eq!(
            target_tabs(&mention("m1", "alice", 1, ME), &store, &config),
            vec![Tab::Global, Tab::Following]
        );
        assert!(!belongs_to(Tab::MyPosts, &note("n", ME, 1, "x"), &store, &config));
    }

    #[test]
    fn test_predicate_is_repeatable() {
        let store = store();
        let config = FeedConfig::default();
        let event = repost("rp1", "alice", 11, "unknown", "carol");
        let first = target_tabs(&event, &store, &config);
        for _ in 0..3 {
            assert_eq!(target_tabs(&event, &store, &config), first);
        }
    }
}
