// ============================================================================
// Display Sink Interface
// Defines the contract for receiving display updates from the engine
// ============================================================================

use chrono::{DateTime, Utc};
use std::sync::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display updates emitted by the calculator engine.
///
/// The engine writes, never reads: both channels are recomputed from state
/// on every operation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DisplayEvent {
    /// The expression line changed (e.g. `"12 + 3 ="`)
    ExpressionUpdated {
        text: String,
        timestamp: DateTime<Utc>,
    },

    /// The result line changed (the live buffer or a computed value)
    ResultUpdated {
        text: String,
        timestamp: DateTime<Utc>,
    },
}

impl DisplayEvent {
    /// The display text carried by the event.
    pub fn text(&self) -> &str {
        match self {
            DisplayEvent::ExpressionUpdated { text, .. } => text,
            DisplayEvent::ResultUpdated { text, .. } => text,
        }
    }
}

/// Sink trait for processing display updates.
/// Implementations can render to a screen, buffer for polling, log, etc.
pub trait DisplaySink: Send + Sync {
    /// Handle one display update
    fn on_event(&self, event: DisplayEvent);

    /// Batch handler (optional optimization)
    fn on_events(&self, events: Vec<DisplayEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op sink for testing
pub struct NoOpDisplaySink;

impl DisplaySink for NoOpDisplaySink {
    fn on_event(&self, _event: DisplayEvent) {
        // Do nothing
    }
}

/// Logging sink
pub struct LoggingDisplaySink;

impl DisplaySink for LoggingDisplaySink {
    fn on_event(&self, event: DisplayEvent) {
        tracing::debug!("Calculator display update: {:?}", event);
    }
}

/// Buffering sink for host shells that poll instead of push.
///
/// Events accumulate until drained with [`CollectingDisplaySink::take_events`].
#[derive(Default)]
pub struct CollectingDisplaySink {
    events: Mutex<Vec<DisplayEvent>>,
}

impl CollectingDisplaySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain and return everything received so far.
    pub fn take_events(&self) -> Vec<DisplayEvent> {
        std::mem::take(&mut *self.events.lock().expect("display sink poisoned"))
    }

    /// The text of the most recent expression update, if any.
    pub fn last_expression(&self) -> Option<String> {
        self.events
            .lock()
            .expect("display sink poisoned")
            .iter()
            .rev()
            .find_map(|e| match e {
                DisplayEvent::ExpressionUpdated { text, .. } => Some(text.clone()),
                _ => None,
            })
    }

    /// The text of the most recent result update, if any.
    pub fn last_result(&self) -> Option<String> {
        self.events
            .lock()
            .expect("display sink poisoned")
            .iter()
            .rev()
            .find_map(|e| match e {
                DisplayEvent::ResultUpdated { text, .. } => Some(text.clone()),
                _ => None,
            })
    }
}

impl DisplaySink for CollectingDisplaySink {
    fn on_event(&self, event: DisplayEvent) {
        self.events.lock().expect("display sink poisoned").push(event);
    }
}
