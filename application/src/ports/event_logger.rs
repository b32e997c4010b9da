//! Port for structured run-event logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the run as
//! machine-readable records (votes, fallbacks, round results) for post-hoc
//! inspection.

use serde_json::Value;

/// A structured run event.
pub struct RunEvent {
    /// Event type identifier (e.g. "vote_cast", "round_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording run events.
///
/// `log` is intentionally synchronous and non-fallible so observability
/// never disrupts the election itself; implementations swallow their own
/// failures.
pub trait EventLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log(&self, _event: RunEvent) {}
}
