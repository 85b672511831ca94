//! Infrastructure layer for agora-insight
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod stores;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAnalysisConfig, FileConfig, FileOutputConfig,
    FileOutputFormat,
};
pub use logging::JsonlRunRecorder;
pub use stores::{InMemoryVoteStore, JsonFileVoteStore, SnapshotFile};
