//! Vote store port
//!
//! Defines the interface for reading vote snapshots from persistence.

use async_trait::async_trait;
use insight_domain::{DiscussionId, Vote};
use thiserror::Error;

/// Errors that can occur while reading a vote snapshot
#[derive(Error, Debug)]
pub enum VoteStoreError {
    #[error("Discussion not found: {0}")]
    DiscussionNotFound(DiscussionId),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Snapshot is malformed: {0}")]
    MalformedSnapshot(String),
}

/// Read-only access to one discussion's votes and statement count
///
/// This port defines how the application layer reads vote data. The engine
/// never writes: results go back to the caller, not into the store.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// All recorded votes for a discussion, at most one per
    /// (participant, statement) pair.
    async fn load_votes(&self, discussion: DiscussionId) -> Result<Vec<Vote>, VoteStoreError>;

    /// Count of non-deleted statements in the discussion, voted on or not.
    async fn statement_count(&self, discussion: DiscussionId) -> Result<usize, VoteStoreError>;
}
