//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: ParticipantId / StatementId / DiscussionId value objects
//! - [`error::GroupingError`]: typed failures from the group assigner

pub mod error;
pub mod ids;
