//! Structured run recording.
//!
//! Provides [`JsonlRunRecorder`], a JSONL file writer that implements
//! the [`RunRecorder`](insight_application::RunRecorder) port.

mod jsonl_recorder;

pub use jsonl_recorder::JsonlRunRecorder;
