//! Voting subdomain: raw vote records, the dense vote matrix, and the
//! readiness gate that decides whether analysis is worth running.

pub mod matrix;
pub mod readiness;
pub mod vote;

pub use matrix::VoteMatrix;
pub use readiness::{Readiness, ReadinessThresholds};
pub use vote::{Vote, VoteValue};
