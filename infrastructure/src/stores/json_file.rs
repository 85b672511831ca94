//! Vote store adapter backed by a JSON snapshot file.
//!
//! The platform exports one discussion per file:
//!
//! ```json
//! {
//!   "discussion": 42,
//!   "statement_count": 9,
//!   "votes": [
//!     { "participant": 1, "statement": 10, "value": 1 },
//!     { "participant": 2, "statement": 10, "value": -1 }
//!   ]
//! }
//! ```
//!
//! `statement_count` covers non-deleted statements including ones nobody
//! voted on; when the export omits it, the count of distinct voted
//! statements is used instead.

use async_trait::async_trait;
use insight_application::ports::vote_store::{VoteStore, VoteStoreError};
use insight_domain::{DiscussionId, Vote};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One exported discussion snapshot, as serialized by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotFile {
    /// Discussion the snapshot belongs to; absent in older exports.
    #[serde(default)]
    pub discussion: Option<i64>,
    #[serde(default)]
    pub statement_count: Option<usize>,
    pub votes: Vec<Vote>,
}

impl SnapshotFile {
    fn effective_statement_count(&self) -> usize {
        self.statement_count.unwrap_or_else(|| {
            self.votes
                .iter()
                .map(|vote| vote.statement)
                .collect::<BTreeSet<_>>()
                .len()
        })
    }
}

/// Read-only vote store over a single snapshot file.
pub struct JsonFileVoteStore {
    path: PathBuf,
}

impl JsonFileVoteStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Discussion id embedded in the snapshot, when the export carries one.
    pub async fn embedded_discussion(&self) -> Result<Option<DiscussionId>, VoteStoreError> {
        Ok(self.parse().await?.discussion.map(DiscussionId::new))
    }

    async fn parse(&self) -> Result<SnapshotFile, VoteStoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| VoteStoreError::StorageError(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&raw).map_err(|e| VoteStoreError::MalformedSnapshot(e.to_string()))
    }

    /// Parse the snapshot and check it covers the requested discussion.
    async fn read_snapshot(&self, discussion: DiscussionId) -> Result<SnapshotFile, VoteStoreError> {
        let snapshot = self.parse().await?;
        if let Some(id) = snapshot.discussion
            && id != discussion.value()
        {
            return Err(VoteStoreError::DiscussionNotFound(discussion));
        }
        Ok(snapshot)
    }
}

#[async_trait]
impl VoteStore for JsonFileVoteStore {
    async fn load_votes(&self, discussion: DiscussionId) -> Result<Vec<Vote>, VoteStoreError> {
        Ok(self.read_snapshot(discussion).await?.votes)
    }

    async fn statement_count(&self, discussion: DiscussionId) -> Result<usize, VoteStoreError> {
        Ok(self
            .read_snapshot(discussion)
            .await?
            .effective_statement_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_domain::VoteValue;

    async fn store_with(content: &str) -> (tempfile::TempDir, JsonFileVoteStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        tokio::fs::write(&path, content).await.unwrap();
        (dir, JsonFileVoteStore::new(path))
    }

    #[tokio::test]
    async fn test_loads_votes_from_snapshot() {
        let (_dir, store) = store_with(
            r#"{
                "discussion": 42,
                "statement_count": 9,
                "votes": [
                    { "participant": 1, "statement": 10, "value": 1 },
                    { "participant": 2, "statement": 10, "value": -1 },
                    { "participant": 2, "statement": 20, "value": 0 }
                ]
            }"#,
        )
        .await;

        let votes = store.load_votes(DiscussionId::new(42)).await.unwrap();
        assert_eq!(votes.len(), 3);
        assert_eq!(votes[0], Vote::agree(1, 10));
        assert_eq!(votes[2].value, VoteValue::Pass);
        assert_eq!(store.statement_count(DiscussionId::new(42)).await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_statement_count_falls_back_to_voted_statements() {
        let (_dir, store) = store_with(
            r#"{
                "votes": [
                    { "participant": 1, "statement": 10, "value": 1 },
                    { "participant": 1, "statement": 20, "value": 1 },
                    { "participant": 2, "statement": 20, "value": -1 }
                ]
            }"#,
        )
        .await;

        assert_eq!(store.statement_count(DiscussionId::new(1)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_wrong_discussion_is_not_found() {
        let (_dir, store) = store_with(r#"{ "discussion": 42, "votes": [] }"#).await;
        let err = store.load_votes(DiscussionId::new(7)).await.unwrap_err();
        assert!(matches!(err, VoteStoreError::DiscussionNotFound(_)));
    }

    #[tokio::test]
    async fn test_embedded_discussion_id() {
        let (_dir, store) = store_with(r#"{ "discussion": 42, "votes": [] }"#).await;
        assert_eq!(
            store.embedded_discussion().await.unwrap(),
            Some(DiscussionId::new(42))
        );

        let (_dir, store) = store_with(r#"{ "votes": [] }"#).await;
        assert_eq!(store.embedded_discussion().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_snapshot() {
        let (_dir, store) = store_with("{ not json").await;
        let err = store.load_votes(DiscussionId::new(1)).await.unwrap_err();
        assert!(matches!(err, VoteStoreError::MalformedSnapshot(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_a_storage_error() {
        let store = JsonFileVoteStore::new("/nonexistent/snapshot.json");
        let err = store.load_votes(DiscussionId::new(1)).await.unwrap_err();
        assert!(matches!(err, VoteStoreError::StorageError(_)));
    }

    #[tokio::test]
    async fn test_invalid_vote_value_is_malformed() {
        let (_dir, store) = store_with(
            r#"{ "votes": [ { "participant": 1, "statement": 10, "value": 3 } ] }"#,
        )
        .await;
        let err = store.load_votes(DiscussionId::new(1)).await.unwrap_err();
        assert!(matches!(err, VoteStoreError::MalformedSnapshot(_)));
    }
}
