use std::collections::HashSet;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant as TokioInstant};

use crate::constants::kinds;
use crate::feed::pagination::{contact_list_filter, my_reactions_filter};
use crate::feed::{FeedRouter, ViewOptions};
use crate::models::{is_hex32, Event, Profile, Tab};
use crate::relay::{ProfileRequester, RelayMessage, Subscription, Transport};
use crate::store::EventStore;

/// Wires the store and router to the network collaborators.
///
/// Everything runs on one task: messages are handled to completion before the
/// next one is read, so no state is shared across threads.
pub struct FeedRuntime {
    store: EventStore,
    router: FeedRouter,
    transport: Box<dyn Transport>,
    profiles: Box<dyn ProfileRequester>,
    history_requested: HashSet<Tab>,
    loading_more: Option<Tab>,
    /// created_at of the contact list currently applied
    following_list_at: Option<u64>,
}

impl FeedRuntime {
    pub fn new(
        store: EventStore,
        router: FeedRouter,
        transport: Box<dyn Transport>,
        profiles: Box<dyn ProfileRequester>,
    ) -> Self {
        Self {
            store,
            router,
            transport,
            profiles,
            history_requested: HashSet::new(),
            loading_more: None,
            following_list_at: None,
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn router(&self) -> &FeedRouter {
        &self.router
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more.is_some()
    }

    // ===== Session =====

    pub fn connect(&mut self) {
        tracing::info!("Subscribing to main timeline");
        self.resubscribe_main();
    }

    /// Replace the main timeline subscription with one built from the
    /// current following list, identity and view options.
    pub fn resubscribe_main(&mut self) {
        let filters = self.router.main_timeline_filters(&self.store);
        self.transport.unsubscribe(Subscription::MainTimeline);
        self.transport.subscribe(Subscription::MainTimeline, filters);
    }

    pub fn login(&mut self, pubkey: impl Into<String>) {
        let pubkey = pubkey.into();
        if !is_hex32(&pubkey) {
            tracing::warn!(pubkey = %pubkey, "Local identity is not a hex pubkey");
        }
        let switching = self
            .store
            .local_identity()
            .is_some_and(|previous| previous != pubkey);
        if switching {
            tracing::info!("Switching identity, dropping session state");
            self.close_session_requests();
            self.store.set_following_list(Vec::<String>::new());
            self.router.clear();
        }
        tracing::info!(pubkey = %pubkey, "Logged in");
        self.store.set_local_identity(Some(pubkey.clone()));
        self.following_list_at = None;

        self.transport
            .subscribe(Subscription::FollowingList, vec![contact_list_filter(&pubkey)]);
        self.transport
            .subscribe(Subscription::MyLikes, vec![my_reactions_filter(&pubkey)]);
        self.resubscribe_main();

        self.router.repopulate_all(&self.store);
        self.router.render_now(&self.store);
    }

    /// Forget the identity and everything fetched under it.
    pub fn logout(&mut self) {
        tracing::info!("Logged out");
        self.transport.unsubscribe(Subscription::FollowingList);
        self.transport.unsubscribe(Subscription::MyLikes);
        self.close_session_requests();

        self.store.clear();
        self.store.set_local_identity(None);
        self.router.clear();
        self.following_list_at = None;

        self.resubscribe_main();
        self.router.switch_tab(&self.store, Tab::Global);
    }

    /// Close per-identity history and load-more requests so they are issued
    /// again for the next identity.
    fn close_session_requests(&mut self) {
        for tab in self.history_requested.drain() {
            self.transport.unsubscribe(Subscription::History(tab));
        }
        if let Some(tab) = self.loading_more.take() {
            self.transport.unsubscribe(Subscription::LoadMore(tab));
        }
    }

    // ===== Inbound =====

    pub fn handle_message(&mut self, message: RelayMessage) {
        match message {
            RelayMessage::Event {
                subscription,
                event,
            } => self.handle_event(subscription, event),
            RelayMessage::EndOfStoredEvents { subscription } => self.handle_end_of_stored(subscription),
        }
    }

    fn handle_event(&mut self, subscription: Subscription, event: Event) {
        let id = event.id.clone();
        if !self.store.add_event(event) {
            return;
        }
        let Some(stored) = self.store.get_event(&id) else {
            return;
        };

        match stored.kind {
            kinds::METADATA => {
                let pubkey = stored.pubkey.clone();
                match Profile::from_metadata_event(stored) {
                    Ok(profile) => self.apply_profile(&pubkey, profile),
                    Err(e) => tracing::warn!(pubkey = %pubkey, "Ignoring profile: {}", e),
                }
                return;
            }
            kinds::CONTACT_LIST if subscription == Subscription::FollowingList => {
                if self.store.is_local_identity(&stored.pubkey) {
                    let created_at = stored.created_at;
                    let follows: Vec<String> = stored.referenced_pubkeys().map(str::to_string).collect();
                    self.apply_following_list(created_at, follows);
                }
                return;
            }
            _ => {}
        }

        let author = stored.pubkey.clone();
        match subscription.history_tab() {
            Some(tab) => {
                self.router.add_history_event_to_tab(&self.store, stored, tab);
            }
            None => {
                self.router.on_event_received(&self.store, stored);
            }
        }
        if !self.store.has_profile(&author) {
            self.profiles.request(&author);
        }
    }

    fn apply_profile(&mut self, pubkey: &str, profile: Profile) {
        if self.store.add_profile(pubkey, profile) {
            self.router.on_profile_fetched(&self.store, pubkey);
        }
    }

    fn apply_following_list(&mut self, created_at: u64, follows: Vec<String>) {
        if self.following_list_at.is_some_and(|applied| applied >= created_at) {
            tracing::debug!(created_at, "Ignoring stale contact list");
            return;
        }
        self.following_list_at = Some(created_at);
        tracing::info!(count = follows.len(), "Following list updated");

        for pubkey in &follows {
            if !self.store.has_profile(pubkey) {
                self.profiles.request(pubkey);
            }
        }
        self.profiles.flush();
        self.store.set_following_list(follows);

        self.router.repopulate(&self.store, Tab::Following);
        if self.router.active_tab() == Tab::Following {
            self.router.render_now(&self.store);
        }
        self.resubscribe_main();
    }

    fn handle_end_of_stored(&mut self, subscription: Subscription) {
        tracing::debug!(subscription = %subscription, "End of stored events");
        self.profiles.flush();

        match subscription {
            Subscription::History(tab) => {
                self.transport.unsubscribe(subscription);
                if tab == self.router.active_tab() {
                    self.router.render_now(&self.store);
                }
            }
            Subscription::LoadMore(tab) => {
                self.transport.unsubscribe(subscription);
                if self.loading_more == Some(tab) {
                    self.loading_more = None;
                }
                if tab == self.router.active_tab() {
                    self.router.render_now(&self.store);
                }
            }
            _ => {}
        }
    }

    // ===== User actions =====

    /// Switch views; personal tabs fetch their backlog the first time.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.router.switch_tab(&self.store, tab);
        if tab.is_public() || !self.store.is_authenticated() {
            return;
        }
        if !self.history_requested.insert(tab) {
            return;
        }
        let filters = self.router.history_filters(&self.store, tab);
        if !filters.is_empty() {
            tracing::info!(tab = %tab, "Fetching tab history");
            self.transport.subscribe(Subscription::History(tab), filters);
        }
    }

    pub fn switch_tab_named(&mut self, name: &str) -> bool {
        match name.parse::<Tab>() {
            Ok(tab) => {
                self.switch_tab(tab);
                true
            }
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }

    /// Request the page before the active tab's oldest event. Returns false
    /// when a request is already in flight or the tab cannot paginate.
    pub fn load_more(&mut self) -> bool {
        if let Some(tab) = self.loading_more {
            tracing::debug!(tab = %tab, "Load more already in progress");
            return false;
        }
        let tab = self.router.active_tab();
        let until = self.router.oldest_timestamp(tab);
        let Some(filter) = self.router.build_load_more_filter(&self.store, tab, until) else {
            return false;
        };
        tracing::info!(tab = %tab, until, "Loading more");
        self.loading_more = Some(tab);
        self.transport.subscribe(Subscription::LoadMore(tab), vec![filter]);
        true
    }

    pub fn toggle_channel_messages(&mut self) -> bool {
        let mut config = self.router.config().clone();
        config.show_channel_messages = !config.show_channel_messages;
        let shown = config.show_channel_messages;
        self.router.reconfigure(&self.store, config);
        self.resubscribe_main();
        shown
    }

    pub fn toggle_client_only(&mut self) -> bool {
        let mut options = self.router.view_options().clone();
        options.client_only = !options.client_only;
        let enabled = options.client_only;
        self.router.set_view_options(&self.store, options);
        enabled
    }

    /// Restrict the global tab to `authors`; an empty list lifts the restriction.
    pub fn apply_author_filter(&mut self, authors: Vec<String>) {
        let options = ViewOptions {
            authors: (!authors.is_empty()).then_some(authors),
            ..self.router.view_options().clone()
        };
        self.router.set_view_options(&self.store, options);
        self.resubscribe_main();
    }

    pub fn set_auto_update(&mut self, enabled: bool) {
        self.router.set_auto_update(enabled);
        if enabled {
            self.router.render_now(&self.store);
        }
    }

    pub fn render_now(&mut self) {
        self.router.render_now(&self.store);
    }

    /// Drive the runtime until `inbound` closes, firing debounced repaints
    /// as their deadlines pass. A repaint still pending at shutdown is flushed.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<RelayMessage>) -> Self {
        loop {
            let deadline = self.router.render_deadline();
            let render_due = async {
                match deadline {
                    Some(at) => {
                        sleep_until(TokioInstant::from_std(at)).await;
                        at
                    }
                    None => std::future::pending().await,
                }
            };

            tokio::select! {
                message = inbound.recv() => match message {
                    Some(message) => self.handle_message(message),
                    None => break,
                },
                at = render_due => {
                    self.router.poll_render_at(&self.store, at);
                }
            }
        }

        if self.router.is_render_pending() {
            self.router.render_now(&self.store);
        }
        tracing::info!("Inbound stream closed");
        self
    }
}
