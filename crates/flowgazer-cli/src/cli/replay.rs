use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use flowgazer_core::{
    AcceptAll, EventStore, FeedRouter, FeedRuntime, NostrVerifier, ProfileRequester, QueryFilter,
    RelayMessage, SignatureVerifier, Subscription, Transport,
};
use nostr_sdk::JsonUtil;
use tokio::sync::mpsc;

use super::config::CliConfig;
use super::output::{SharedSnapshot, SnapshotRenderer};

const INBOUND_BUFFER: usize = 1024;

/// Transport for captured streams: nothing goes out, requests are only logged.
#[derive(Debug, Default)]
pub struct LoggingTransport {
    relay_url: String,
}

impl LoggingTransport {
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self {
            relay_url: relay_url.into(),
        }
    }
}

/// Render filters the way a relay would receive them.
pub fn filters_to_json(filters: &[QueryFilter]) -> Result<Vec<String>> {
    filters
        .iter()
        .map(|filter| {
            filter
                .to_nostr_filter()
                .map(|f| f.as_json())
                .context("Failed to convert filter")
        })
        .collect()
}

impl Transport for LoggingTransport {
    fn subscribe(&mut self, subscription: Subscription, filters: Vec<QueryFilter>) {
        match filters_to_json(&filters) {
            Ok(json) => tracing::info!(
                relay = %self.relay_url,
                subscription = %subscription,
                filters = %json.join(" "),
                "REQ"
            ),
            Err(e) => tracing::error!(subscription = %subscription, "{:#}", e),
        }
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        tracing::debug!(relay = %self.relay_url, subscription = %subscription, "CLOSE");
    }
}

/// Collects profile requests and logs each batch when flushed.
#[derive(Debug, Default)]
pub struct ProfileBatch {
    requested: HashSet<String>,
    pending: Vec<String>,
}

impl ProfileBatch {
    pub fn pending(&self) -> &[String] {
        &self.pending
    }
}

impl ProfileRequester for ProfileBatch {
    fn request(&mut self, pubkey: &str) {
        if self.requested.insert(pubkey.to_string()) {
            self.pending.push(pubkey.to_string());
        }
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        tracing::debug!(count = self.pending.len(), "Requesting profiles");
        self.pending.clear();
    }
}

/// Parse a capture: one relay frame per line, blank lines and `#` comments
/// skipped. Frames that fail to parse are logged and dropped.
pub fn parse_capture(content: &str) -> Vec<RelayMessage> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .filter_map(|(index, line)| match RelayMessage::from_json(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(line = index + 1, "Skipping frame: {}", e);
                None
            }
        })
        .collect()
}

pub fn read_capture(path: &Path) -> Result<Vec<RelayMessage>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture: {}", path.display()))?;
    Ok(parse_capture(&content))
}

/// Build a runtime from the CLI config, logged in when an identity is set.
pub fn build_runtime(config: &CliConfig) -> (FeedRuntime, SharedSnapshot) {
    let verifier: Box<dyn SignatureVerifier> = if config.verify_signatures {
        Box::new(NostrVerifier)
    } else {
        Box::new(AcceptAll)
    };
    let (renderer, snapshot) = SnapshotRenderer::new();
    let router = FeedRouter::new(config.feed.clone(), Box::new(renderer));
    let mut runtime = FeedRuntime::new(
        EventStore::new(verifier),
        router,
        Box::new(LoggingTransport::new(config.relay_url.clone())),
        Box::new(ProfileBatch::default()),
    );

    runtime.connect();
    if let Some(me) = &config.me {
        runtime.login(me.clone());
    }
    (runtime, snapshot)
}

/// Feed `messages` through the runtime's event loop and return it once the
/// stream is exhausted.
pub async fn replay(runtime: FeedRuntime, messages: Vec<RelayMessage>) -> FeedRuntime {
    let total = messages.len();
    let (tx, rx) = mpsc::channel(INBOUND_BUFFER);
    tokio::spawn(async move {
        for message in messages {
            if tx.send(message).await.is_err() {
                break;
            }
        }
    });

    let runtime = runtime.run(rx).await;
    tracing::info!(
        frames = total,
        stored = runtime.store().len(),
        "Replay finished"
    );
    runtime
}
