//! Port for structured run recording.
//!
//! Defines the [`RunRecorder`] trait for recording analysis run events
//! (readiness verdicts, group assignments, classification summaries) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures run
//! outcomes in a machine-readable format (JSONL) for later comparison
//! across runs of the same discussion.

use serde_json::Value;

/// A structured run event for recording.
///
/// Each event has a type string, a UTC timestamp, and a JSON payload
/// containing event-specific fields.
pub struct RunEvent {
    /// Event type identifier (e.g., "readiness", "groups_assigned", "run_completed").
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

/// Port for recording run events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `record` method is synchronous and non-fallible; a failed write must
/// never abort an analysis run.
pub trait RunRecorder: Send + Sync {
    /// Record a run event.
    fn record(&self, event: RunEvent);
}

/// No-op implementation for tests and when recording is disabled.
pub struct NoRunRecorder;

impl RunRecorder for NoRunRecorder {
    fn record(&self, _event: RunEvent) {}
}
