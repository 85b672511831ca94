//! Application layer for agora-insight
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use ports::{
    progress::{AnalysisProgress, NoProgress},
    run_recorder::{NoRunRecorder, RunEvent, RunRecorder},
    vote_store::{VoteStore, VoteStoreError},
};
pub use use_cases::check_readiness::{CheckReadinessError, CheckReadinessUseCase};
pub use use_cases::run_analysis::{RunAnalysisError, RunAnalysisUseCase};
