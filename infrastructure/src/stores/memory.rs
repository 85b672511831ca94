//! In-memory vote store for tests and embedded callers.

use async_trait::async_trait;
use insight_application::ports::vote_store::{VoteStore, VoteStoreError};
use insight_domain::{DiscussionId, Vote};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Snapshot {
    votes: Vec<Vote>,
    statement_count: usize,
}

/// Vote store holding snapshots for any number of discussions in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVoteStore {
    discussions: HashMap<i64, Snapshot>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a discussion snapshot, replacing any previous one.
    pub fn with_discussion(
        mut self,
        discussion: impl Into<DiscussionId>,
        votes: Vec<Vote>,
        statement_count: usize,
    ) -> Self {
        self.discussions.insert(
            discussion.into().value(),
            Snapshot {
                votes,
                statement_count,
            },
        );
        self
    }

    fn snapshot(&self, discussion: DiscussionId) -> Result<&Snapshot, VoteStoreError> {
        self.discussions
            .get(&discussion.value())
            .ok_or(VoteStoreError::DiscussionNotFound(discussion))
    }
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn load_votes(&self, discussion: DiscussionId) -> Result<Vec<Vote>, VoteStoreError> {
        Ok(self.snapshot(discussion)?.votes.clone())
    }

    async fn statement_count(&self, discussion: DiscussionId) -> Result<usize, VoteStoreError> {
        Ok(self.snapshot(discussion)?.statement_count)
    }
}
