//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod progress;
pub mod run_recorder;
pub mod vote_store;
