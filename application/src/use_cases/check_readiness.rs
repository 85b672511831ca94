//! Check readiness use case
//!
//! Answers "can this discussion be analyzed yet?" without paying for the
//! full pipeline, so callers can show "N more votes needed" banners.

use crate::ports::vote_store::{VoteStore, VoteStoreError};
use insight_domain::{DiscussionId, Readiness, ReadinessThresholds};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while checking readiness
#[derive(Error, Debug)]
pub enum CheckReadinessError {
    #[error("Vote store error: {0}")]
    Store(#[from] VoteStoreError),
}

/// Use case for the standalone readiness query
pub struct CheckReadinessUseCase<S: VoteStore + 'static> {
    store: Arc<S>,
    thresholds: ReadinessThresholds,
}

impl<S: VoteStore + 'static> CheckReadinessUseCase<S> {
    pub fn new(store: Arc<S>, thresholds: ReadinessThresholds) -> Self {
        Self { store, thresholds }
    }

    pub async fn execute(&self, discussion: DiscussionId) -> Result<Readiness, CheckReadinessError> {
        let votes = self.store.load_votes(discussion).await?;
        let statement_count = self.store.statement_count(discussion).await?;
        let readiness = self.thresholds.check(&votes, statement_count);
        debug!(
            "Discussion {} readiness: {} ({})",
            discussion, readiness.ready, readiness.reason
        );
        Ok(readiness)
    }
}
