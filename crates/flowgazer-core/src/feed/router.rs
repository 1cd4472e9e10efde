use super::membership::{belongs_to, is_boundary_eligible, target_tabs};
use super::pagination;
use super::pipeline::{self, ViewOptions};
use super::render::{RenderFrame, RenderScheduler, Renderer};
use super::self_feed::SelfFeedCache;
use crate::config::FeedConfig;
use crate::constants::FALLBACK_LOOKBACK_SECS;
use crate::models::{Cursor, Event, QueryFilter, Tab};
use crate::store::EventStore;
use std::collections::HashSet;
use std::time::Instant;

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Per-tab bookkeeping.
#[derive(Debug, Default)]
pub struct TabState {
    visible_ids: HashSet<String>,
    cursor: Option<Cursor>,
    /// Visible events whose author has no profile yet
    pending_profile_ids: HashSet<String>,
}

impl TabState {
    fn clear(&mut self) {
        self.visible_ids.clear();
        self.cursor = None;
        self.pending_profile_ids.clear();
    }

    pub fn visible_ids(&self) -> &HashSet<String> {
        &self.visible_ids
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }

    pub fn pending_profile_ids(&self) -> &HashSet<String> {
        &self.pending_profile_ids
    }
}

/// Routes accepted events into tabs and produces what each tab shows.
///
/// The router never owns events; it keeps ids and reads payloads from the
/// `EventStore` passed into each call.
pub struct FeedRouter {
    config: FeedConfig,
    options: ViewOptions,
    tabs: [TabState; 4],
    active: Tab,
    self_feed: SelfFeedCache,
    scheduler: RenderScheduler,
    renderer: Box<dyn Renderer>,
}

impl FeedRouter {
    pub fn new(config: FeedConfig, renderer: Box<dyn Renderer>) -> Self {
        let scheduler = RenderScheduler::new(config.render_delay());
        Self {
            config,
            options: ViewOptions::default(),
            tabs: Default::default(),
            active: Tab::Global,
            self_feed: SelfFeedCache::new(),
            scheduler,
            renderer,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    pub fn view_options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    pub fn tab(&self, tab: Tab) -> &TabState {
        &self.tabs[tab.index()]
    }

    pub fn cursor(&self, tab: Tab) -> Option<Cursor> {
        self.tab(tab).cursor
    }

    pub fn visible_ids(&self, tab: Tab) -> &HashSet<String> {
        &self.tab(tab).visible_ids
    }

    pub fn self_feed(&self) -> &SelfFeedCache {
        &self.self_feed
    }

    // ===== Configuration =====

    /// Replace the feed config. Membership may change, so every tab is rebuilt
    /// and the active one repainted.
    pub fn reconfigure(&mut self, store: &EventStore, config: FeedConfig) {
        self.scheduler.set_delay(config.render_delay());
        if !config.auto_update {
            self.scheduler.cancel();
        }
        self.config = config;
        self.repopulate_all(store);
        self.render_now(store);
    }

    /// Forbidden words only affect rendering, no rebuild needed.
    pub fn set_forbidden_words(&mut self, words: Vec<String>) {
        tracing::info!(count = words.len(), "Forbidden words updated");
        self.config.forbidden_words = words;
    }

    pub fn set_view_options(&mut self, store: &EventStore, options: ViewOptions) {
        self.options = options;
        self.render_now(store);
    }

    pub fn set_auto_update(&mut self, enabled: bool) {
        self.config.auto_update = enabled;
        if !enabled {
            self.scheduler.cancel();
        }
    }

    pub fn is_auto_update(&self) -> bool {
        self.config.auto_update
    }

    // ===== Event routing =====

    fn remember_self_note(&mut self, store: &EventStore, event: &Event) -> bool {
        event.is_note() && store.is_local_identity(&event.pubkey) && self.self_feed.insert(event)
    }

    /// Add `event` to `tab` if it belongs there. Returns true when newly visible.
    fn add_event_to_tab(&mut self, store: &EventStore, event: &Event, tab: Tab) -> bool {
        if !belongs_to(tab, event, store, &self.config) {
            return false;
        }
        let boundary_eligible = is_boundary_eligible(tab, event, store);
        let state = &mut self.tabs[tab.index()];
        if !state.visible_ids.insert(event.id.clone()) {
            return false;
        }
        Cursor::fold(
            &mut state.cursor,
            event.created_at,
            boundary_eligible,
            unix_now().saturating_sub(FALLBACK_LOOKBACK_SECS),
        );
        if !store.has_profile(&event.pubkey) {
            state.pending_profile_ids.insert(event.id.clone());
        }
        true
    }

    /// Live path: route an accepted event into every tab it belongs to.
    ///
    /// Schedules a repaint only when the active tab gained something, or an
    /// own note now shows above it. Returns the tabs the event was newly
    /// added to.
    pub fn on_event_received(&mut self, store: &EventStore, event: &Event) -> Vec<Tab> {
        let merged_self_note = self.remember_self_note(store, event);

        let added: Vec<Tab> = target_tabs(event, store, &self.config)
            .into_iter()
            .filter(|tab| self.add_event_to_tab(store, event, *tab))
            .collect();

        let surfaces_self_note = merged_self_note
            && self.active.is_public()
            && self
                .newest_classified(store, self.active)
                .map_or(true, |newest| event.created_at > newest);

        if added.contains(&self.active) || surfaces_self_note {
            self.schedule_render();
        }
        added
    }

    /// Newest `created_at` among the events classified into `tab`.
    fn newest_classified(&self, store: &EventStore, tab: Tab) -> Option<u64> {
        store
            .get_events(self.tab(tab).visible_ids.iter().map(String::as_str))
            .iter()
            .map(|ev| ev.created_at)
            .max()
    }

    /// History/load-more path: the event only goes to `tab`.
    pub fn add_history_event_to_tab(&mut self, store: &EventStore, event: &Event, tab: Tab) -> bool {
        self.remember_self_note(store, event);
        let added = self.add_event_to_tab(store, event, tab);
        if added && tab == self.active {
            self.schedule_render();
        }
        added
    }

    /// Rebuild `tab` from every stored event.
    pub fn repopulate(&mut self, store: &EventStore, tab: Tab) {
        self.tabs[tab.index()].clear();
        if tab.is_public() {
            if let Some(me) = store.local_identity() {
                for event in store.events_by_author(me) {
                    if event.is_note() {
                        self.self_feed.insert(event);
                    }
                }
            }
        }
        for event in store.all_events() {
            self.add_event_to_tab(store, event, tab);
        }
        tracing::debug!(
            tab = %tab,
            visible = self.tabs[tab.index()].visible_ids.len(),
            "Tab repopulated"
        );
    }

    pub fn repopulate_all(&mut self, store: &EventStore) {
        for tab in Tab::ALL {
            self.repopulate(store, tab);
        }
    }

    pub fn switch_tab(&mut self, store: &EventStore, tab: Tab) {
        tracing::info!(from = %self.active, to = %tab, "Switching tab");
        self.active = tab;
        self.repopulate(store, tab);
        self.render_now(store);
    }

    /// String entry point for UI layers. Unknown names are logged and ignored.
    pub fn switch_tab_named(&mut self, store: &EventStore, name: &str) -> bool {
        match name.parse::<Tab>() {
            Ok(tab) => {
                self.switch_tab(store, tab);
                true
            }
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }

    pub fn clear_tab(&mut self, tab: Tab) {
        self.tabs[tab.index()].clear();
        tracing::info!(tab = %tab, "Tab cleared");
    }

    /// Drop all tab state, the self-feed and any pending repaint.
    pub fn clear(&mut self) {
        for state in self.tabs.iter_mut() {
            state.clear();
        }
        self.self_feed.clear();
        self.scheduler.cancel();
    }

    /// A newer profile was accepted: events by `pubkey` in the active tab stop
    /// waiting, and the tab repaints with the new name.
    pub fn on_profile_fetched(&mut self, store: &EventStore, pubkey: &str) {
        let state = &mut self.tabs[self.active.index()];
        state
            .pending_profile_ids
            .retain(|id| store.get_event(id).is_some_and(|ev| ev.pubkey != pubkey));
        self.schedule_render();
    }

    // ===== Reading =====

    /// Filtered, display-ordered events of `tab` under the current view options.
    pub fn visible_events<'s>(&self, store: &'s EventStore, tab: Tab) -> Vec<&'s Event> {
        self.visible_events_with(store, tab, &self.options)
    }

    /// Same as `visible_events` with explicit view options.
    pub fn visible_events_with<'s>(
        &self,
        store: &'s EventStore,
        tab: Tab,
        options: &ViewOptions,
    ) -> Vec<&'s Event> {
        let mut events: Vec<&'s Event> =
            store.get_events(self.tab(tab).visible_ids.iter().map(String::as_str));

        if tab.is_public() {
            // Self-posts only join above the newest classified event, so they
            // never land below the pagination boundary.
            let newest_other = events.iter().map(|ev| ev.created_at).max();
            events.extend(store.get_events(self.self_feed.newer_than(newest_other)));
        }

        pipeline::apply(tab, events, options, &self.config)
    }

    /// Anchor for the next load-more request: the cursor's `until`, else now.
    pub fn oldest_timestamp(&self, tab: Tab) -> u64 {
        self.cursor(tab).map(|c| c.until).unwrap_or_else(unix_now)
    }

    pub fn build_load_more_filter(&self, store: &EventStore, tab: Tab, until: u64) -> Option<QueryFilter> {
        pagination::build_load_more_filter(store, &self.config, &self.options, tab, until)
    }

    pub fn main_timeline_filters(&self, store: &EventStore) -> Vec<QueryFilter> {
        pagination::main_timeline_filters(store, &self.config, &self.options)
    }

    pub fn history_filters(&self, store: &EventStore, tab: Tab) -> Vec<QueryFilter> {
        pagination::history_filters(store, &self.config, tab)
    }

    // ===== Rendering =====

    /// Debounced repaint. No-op while auto-update is off.
    pub fn schedule_render(&mut self) {
        self.schedule_render_at(Instant::now());
    }

    pub fn schedule_render_at(&mut self, now: Instant) {
        if !self.config.auto_update {
            return;
        }
        self.scheduler.arm(now);
    }

    pub fn render_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    pub fn is_render_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Fire the debounced repaint if its deadline has passed.
    pub fn poll_render(&mut self, store: &EventStore) -> bool {
        self.poll_render_at(store, Instant::now())
    }

    pub fn poll_render_at(&mut self, store: &EventStore, now: Instant) -> bool {
        if !self.scheduler.take_due(now) {
            return false;
        }
        self.render_now(store);
        true
    }

    /// Cancel any pending repaint and paint the active tab immediately.
    pub fn render_now(&mut self, store: &EventStore) {
        self.scheduler.cancel();
        let tab = self.active;
        let events = self.visible_events(store, tab);
        tracing::debug!(tab = %tab, count = events.len(), "Rendering timeline");
        self.renderer.refresh(RenderFrame { tab, events, store });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use crate::store::AcceptAll;
    use crate::test_support::{mention, note, reaction, repost, ME};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    type Frames = Rc<RefCell<Vec<(Tab, Vec<String>)>>>;

    struct RecordingRenderer(Frames);

    impl Renderer for RecordingRenderer {
        fn refresh(&mut self, frame: RenderFrame<'_>) {
            let ids = frame.events.iter().map(|ev| ev.id.clone()).collect();
            self.0.borrow_mut().push((frame.tab, ids));
        }
    }

    fn setup(config: FeedConfig) -> (EventStore, FeedRouter, Frames) {
        let mut store = EventStore::new(Box::new(AcceptAll));
        store.set_local_identity(Some(ME.to_string()));
        store.set_following_list(["alice"]);
        let frames = Frames::default();
        let router = FeedRouter::new(config, Box::new(RecordingRenderer(frames.clone())));
        (store, router, frames)
    }

    fn receive(store: &mut EventStore, router: &mut FeedRouter, event: Event) -> Vec<Tab> {
        let id = event.id.clone();
        if !store.add_event(event) {
            return Vec::new();
        }
        match store.get_event(&id) {
            Some(stored) => router.on_event_received(store, stored),
            None => Vec::new(),
        }
    }

    fn visible(router: &FeedRouter, store: &EventStore, tab: Tab) -> Vec<String> {
        router
            .visible_events(store, tab)
            .iter()
            .map(|ev| ev.id.clone())
            .collect()
    }

    fn sorted_ids(router: &FeedRouter, tab: Tab) -> Vec<String> {
        let mut ids: Vec<String> = router.visible_ids(tab).iter().cloned().collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("a1", "alice", 100, "hello"));
        receive(&mut store, &mut router, note("m1", ME, 105, "mine"));
        receive(&mut store, &mut router, reaction("r1", "bob", 110, "m1", ME));

        router.repopulate_all(&store);

        assert_eq!(sorted_ids(&router, Tab::Global), vec!["a1"]);
        assert_eq!(sorted_ids(&router, Tab::Following), vec!["a1"]);
        assert_eq!(sorted_ids(&router, Tab::MyPosts), vec!["m1"]);
        assert_eq!(sorted_ids(&router, Tab::Likes), vec!["r1"]);
        assert_eq!(router.cursor(Tab::Global).map(|c| c.until), Some(100));

        // the own note is newer than the top of the feed, so it is merged in
        assert_eq!(visible(&router, &store, Tab::Global), vec!["m1", "a1"]);
    }

    #[test]
    fn test_live_and_rebuild_agree() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        let events = vec![
            note("a1", "alice", 30, "x"),
            note("b1", "bob", 10, "y"),
            mention("m1", "bob", 20, ME),
            repost("rp1", "alice", 25, "b1", "bob"),
            reaction("r1", "carol", 15, "m0", ME),
            note("own", ME, 5, "mine"),
        ];
        for event in events {
            receive(&mut store, &mut router, event);
        }

        let live: Vec<(Vec<String>, Option<Cursor>)> = Tab::ALL
            .iter()
            .map(|tab| (sorted_ids(&router, *tab), router.cursor(*tab)))
            .collect();
        router.repopulate_all(&store);
        let rebuilt: Vec<(Vec<String>, Option<Cursor>)> = Tab::ALL
            .iter()
            .map(|tab| (sorted_ids(&router, *tab), router.cursor(*tab)))
            .collect();
        assert_eq!(live, rebuilt);
    }

    #[test]
    fn test_repopulate_twice_is_identical() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("a1", "alice", 30, "x"));
        receive(&mut store, &mut router, mention("m1", "bob", 20, ME));
        receive(&mut store, &mut router, repost("rp1", "bob", 25, "a1", "alice"));
        receive(&mut store, &mut router, reaction("r1", "carol", 15, "own", ME));
        receive(&mut store, &mut router, note("own", ME, 5, "mine"));

        let snapshot = |router: &FeedRouter| -> Vec<(Vec<String>, Option<Cursor>)> {
            Tab::ALL
                .iter()
                .map(|tab| (sorted_ids(router, *tab), router.cursor(*tab)))
                .collect()
        };
        router.repopulate_all(&store);
        let first = snapshot(&router);
        router.repopulate_all(&store);
        assert_eq!(snapshot(&router), first);
        assert_eq!(router.self_feed().len(), 1);
    }

    #[test]
    fn test_cursor_ignores_self_related_events() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("b1", "bob", 100, "x"));
        receive(&mut store, &mut router, note("b0", "bob", 60, "older"));
        receive(&mut store, &mut router, note("own", ME, 10, "mine"));

        let cursor = router.cursor(Tab::Global).unwrap();
        assert_eq!(cursor.until, 60);
        assert_eq!(cursor.since, 100);
        assert!(!cursor.until_is_fallback);
    }

    #[test]
    fn test_fallback_cursor_replaced_by_first_eligible_event() {
        let config = FeedConfig {
            self_exclusion: crate::config::SelfExclusion::Author,
            ..FeedConfig::default()
        };
        let (mut store, mut router, _) = setup(config);
        receive(&mut store, &mut router, mention("m1", "bob", 100, ME));

        let fallback = router.cursor(Tab::Global).unwrap();
        assert!(fallback.until_is_fallback);
        assert_eq!(fallback.since, 100);
        let anchor = unix_now() - FALLBACK_LOOKBACK_SECS;
        assert!(fallback.until.abs_diff(anchor) <= 5);

        receive(&mut store, &mut router, note("b1", "bob", 90, "x"));
        let cursor = router.cursor(Tab::Global).unwrap();
        assert_eq!(cursor.until, 90);
        assert!(!cursor.until_is_fallback);
    }

    #[test]
    fn test_self_merge_threshold() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("b1", "bob", 100, "x"));
        for (id, ts) in [("s95", 95), ("s101", 101), ("s110", 110)] {
            receive(&mut store, &mut router, note(id, ME, ts, "mine"));
        }
        assert_eq!(visible(&router, &store, Tab::Global), vec!["s110", "s101", "b1"]);
        // self-posts never touch membership or the cursor
        assert_eq!(sorted_ids(&router, Tab::Global), vec!["b1"]);
        assert_eq!(router.cursor(Tab::Global).map(|c| c.until), Some(100));
        // personal tabs show everything
        assert_eq!(visible(&router, &store, Tab::MyPosts), vec!["s110", "s101", "s95"]);
    }

    #[test]
    fn test_long_self_note_only_in_myposts() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        let long = "a".repeat(200);
        receive(&mut store, &mut router, note("long", ME, 10, &long));

        assert!(visible(&router, &store, Tab::Global).is_empty());
        assert_eq!(visible(&router, &store, Tab::MyPosts), vec!["long"]);
    }

    #[test]
    fn test_duplicate_event_is_noop() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        assert_eq!(
            receive(&mut store, &mut router, note("a1", "alice", 10, "x")),
            vec![Tab::Global, Tab::Following]
        );
        assert!(receive(&mut store, &mut router, note("a1", "alice", 10, "x")).is_empty());
        // routing the stored copy again changes nothing either
        let stored = store.get_event("a1").unwrap().clone();
        assert!(router.on_event_received(&store, &stored).is_empty());
        assert_eq!(router.visible_ids(Tab::Global).len(), 1);
    }

    #[test]
    fn test_render_scheduled_only_for_active_tab() {
        let (mut store, mut router, frames) = setup(FeedConfig::default());
        receive(&mut store, &mut router, reaction("r1", "bob", 10, "m0", ME));
        assert!(!router.is_render_pending());

        receive(&mut store, &mut router, note("b1", "bob", 10, "x"));
        assert!(router.is_render_pending());

        let deadline = router.render_deadline().unwrap();
        assert!(!router.poll_render_at(&store, deadline - Duration::from_millis(1)));
        assert!(router.poll_render_at(&store, deadline));
        assert_eq!(frames.borrow().as_slice(), &[(Tab::Global, vec!["b1".to_string()])]);
        assert!(!router.is_render_pending());
    }

    #[test]
    fn test_old_self_note_does_not_schedule_render() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("b1", "bob", 100, "x"));
        router.render_now(&store);

        // below the newest classified event: the merge never shows it
        receive(&mut store, &mut router, note("s50", ME, 50, "old"));
        assert!(!router.is_render_pending());

        receive(&mut store, &mut router, note("s150", ME, 150, "new"));
        assert!(router.is_render_pending());
    }

    #[test]
    fn test_self_note_in_empty_public_tab_schedules_render() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("s1", ME, 10, "first"));
        assert!(router.is_render_pending());
        assert_eq!(visible(&router, &store, Tab::Global), vec!["s1"]);
    }

    #[test]
    fn test_huge_render_delay_does_not_panic() {
        let config = FeedConfig {
            render_delay_ms: u64::MAX,
            ..FeedConfig::default()
        };
        let (mut store, mut router, _) = setup(config);
        receive(&mut store, &mut router, note("b1", "bob", 10, "x"));
        assert!(router.is_render_pending());
    }

    #[test]
    fn test_auto_update_off_suppresses_scheduling() {
        let (mut store, mut router, frames) = setup(FeedConfig::default());
        router.set_auto_update(false);
        receive(&mut store, &mut router, note("b1", "bob", 10, "x"));
        assert!(!router.is_render_pending());

        // explicit paints still happen
        router.render_now(&store);
        assert_eq!(frames.borrow().len(), 1);
    }

    #[test]
    fn test_switch_tab_rebuilds_and_paints() {
        let (mut store, mut router, frames) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("own", ME, 10, "mine"));
        router.clear_tab(Tab::MyPosts);
        assert!(router.visible_ids(Tab::MyPosts).is_empty());

        router.switch_tab(&store, Tab::MyPosts);
        assert_eq!(router.active_tab(), Tab::MyPosts);
        assert_eq!(frames.borrow().last().unwrap(), &(Tab::MyPosts, vec!["own".to_string()]));

        assert!(!router.switch_tab_named(&store, "home"));
        assert_eq!(router.active_tab(), Tab::MyPosts);
        assert!(router.switch_tab_named(&store, "likes"));
        assert_eq!(router.active_tab(), Tab::Likes);
    }

    #[test]
    fn test_reconfigure_changes_membership() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, mention("m1", "bob", 10, ME));
        assert!(router.visible_ids(Tab::Likes).contains("m1"));

        router.reconfigure(
            &store,
            FeedConfig {
                likes_include_mentions: false,
                ..FeedConfig::default()
            },
        );
        assert!(router.visible_ids(Tab::Likes).is_empty());
    }

    #[test]
    fn test_view_options_filter_at_read_time() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("a1", "alice", 10, "x"));
        receive(&mut store, &mut router, note("b1", "bob", 11, "y"));

        let only_alice = ViewOptions {
            client_only: false,
            authors: Some(vec!["alice".to_string()]),
        };
        router.set_view_options(&store, only_alice);
        assert_eq!(visible(&router, &store, Tab::Global), vec!["a1"]);
        assert_eq!(router.visible_ids(Tab::Global).len(), 2);

        router.set_forbidden_words(vec!["X".to_string()]);
        assert!(visible(&router, &store, Tab::Global).is_empty());
    }

    #[test]
    fn test_profile_fetch_resolves_pending() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("b1", "bob", 10, "x"));
        assert!(router.tab(Tab::Global).pending_profile_ids().contains("b1"));

        router.poll_render_at(&store, Instant::now() + Duration::from_secs(1));
        store.add_profile(
            "bob",
            Profile {
                name: Some("Bob".to_string()),
                created_at: 1,
                ..Profile::default()
            },
        );
        router.on_profile_fetched(&store, "bob");
        assert!(router.tab(Tab::Global).pending_profile_ids().is_empty());
        assert!(router.is_render_pending());
    }

    #[test]
    fn test_oldest_timestamp_and_clear() {
        let (mut store, mut router, _) = setup(FeedConfig::default());
        receive(&mut store, &mut router, note("b1", "bob", 42, "x"));
        receive(&mut store, &mut router, note("own", ME, 50, "mine"));
        assert_eq!(router.oldest_timestamp(Tab::Global), 42);

        router.clear();
        assert!(router.cursor(Tab::Global).is_none());
        assert!(router.self_feed().is_empty());
        assert!(!router.is_render_pending());
        assert!(router.oldest_timestamp(Tab::Global) > 42);
    }
}
