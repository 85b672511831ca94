//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod check_readiness;
pub mod run_analysis;
