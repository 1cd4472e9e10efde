use std::cell::RefCell;
use std::rc::Rc;

use chrono::DateTime;
use flowgazer_core::constants::{kinds, SHORT_KEY_CHARS};
use flowgazer_core::{Event, EventStore, RenderFrame, Renderer, Tab};
use serde::Serialize;

/// One printed timeline row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineLine {
    pub id: String,
    pub author: String,
    pub kind: u16,
    pub created_at: u64,
    pub content: String,
    pub reposts: u32,
    pub reactions: u32,
    pub liked: bool,
}

impl TimelineLine {
    pub fn from_event(event: &Event, store: &EventStore) -> Self {
        let counts = store.reaction_count(&event.id);
        Self {
            id: event.id.clone(),
            author: store.display_name(&event.pubkey),
            kind: event.kind,
            created_at: event.created_at,
            content: event.content.clone(),
            reposts: counts.reposts,
            reactions: counts.reactions,
            liked: store.is_liked_by_me(&event.id),
        }
    }

    pub fn to_text(&self) -> String {
        let time = DateTime::from_timestamp(self.created_at as i64, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| self.created_at.to_string());
        let short_id: String = self.id.chars().take(SHORT_KEY_CHARS).collect();
        let body = match self.kind {
            kinds::REPOST => "[repost]".to_string(),
            kinds::REACTION => format!("[reaction {}]", self.content),
            kinds::CHANNEL_MESSAGE => format!("[channel] {}", self.content),
            _ => self.content.replace('\n', " "),
        };

        let mut line = format!("{} {} {}: {}", time, short_id, self.author, body);
        if self.reposts > 0 || self.reactions > 0 {
            line.push_str(&format!("  (rp {} / re {})", self.reposts, self.reactions));
        }
        if self.liked {
            line.push_str("  *");
        }
        line
    }
}

/// Latest painted frame, kept for printing after the stream ends.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub tab: Option<Tab>,
    pub paints: usize,
    pub lines: Vec<TimelineLine>,
}

pub type SharedSnapshot = Rc<RefCell<Snapshot>>;

/// Renderer that records frames instead of drawing them.
pub struct SnapshotRenderer {
    snapshot: SharedSnapshot,
}

impl SnapshotRenderer {
    pub fn new() -> (Self, SharedSnapshot) {
        let snapshot = SharedSnapshot::default();
        (
            Self {
                snapshot: snapshot.clone(),
            },
            snapshot,
        )
    }
}

impl Renderer for SnapshotRenderer {
    fn refresh(&mut self, frame: RenderFrame<'_>) {
        let lines = frame
            .events
            .iter()
            .map(|event| TimelineLine::from_event(event, frame.store))
            .collect();
        let mut snapshot = self.snapshot.borrow_mut();
        snapshot.tab = Some(frame.tab);
        snapshot.paints += 1;
        snapshot.lines = lines;
        tracing::debug!(tab = %frame.tab, rows = snapshot.lines.len(), "Frame painted");
    }
}
