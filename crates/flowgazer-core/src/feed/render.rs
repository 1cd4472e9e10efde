use crate::models::{Event, Tab};
use crate::store::EventStore;
use std::time::{Duration, Instant};

/// What a repaint receives: the active tab's filtered, ordered events plus
/// read access to the store for names, counters and liked state.
pub struct RenderFrame<'a> {
    pub tab: Tab,
    pub events: Vec<&'a Event>,
    pub store: &'a EventStore,
}

/// Paints a frame. Implemented by the UI layer.
pub trait Renderer {
    fn refresh(&mut self, frame: RenderFrame<'_>);
}

/// Renderer that draws nothing, for headless use.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn refresh(&mut self, _frame: RenderFrame<'_>) {}
}

/// Debounce timer for repaints.
///
/// Holds a single deadline: re-arming replaces it, so a burst of live events
/// collapses into one paint `delay` after the last of them.
#[derive(Debug)]
pub struct RenderScheduler {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RenderScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Cancel any pending deadline and arm a new one. A delay past the
    /// clock's range fires on the next poll.
    pub fn arm(&mut self, now: Instant) {
        let deadline = now.checked_add(self.delay).unwrap_or_else(|| {
            tracing::warn!(delay_ms = self.delay.as_millis() as u64, "Render delay out of range");
            now
        });
        self.deadline = Some(deadline);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
