//! Run analysis use case
//!
//! Orchestrates the full clustering pipeline for one discussion: readiness
//! gate, matrix build, projection, grouping and classification. The
//! pipeline itself is synchronous and CPU-bound; it runs on a blocking
//! worker so store I/O and sibling runs stay responsive.

use crate::config::AnalysisConfig;
use crate::ports::progress::{AnalysisProgress, NoProgress};
use crate::ports::run_recorder::{NoRunRecorder, RunEvent, RunRecorder};
use crate::ports::vote_store::{VoteStore, VoteStoreError};
use insight_domain::{
    AnalysisOutcome, AnalysisPhase, AnalysisResult, DiscussionId, GroupAssigner, GroupingError,
    Pca, Readiness, StatementClassifier, Vote, VoteMatrix,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur during an analysis run
///
/// "Not ready" is not listed here: it is an expected outcome, returned as
/// [`AnalysisOutcome::NotReady`] rather than an error.
#[derive(Error, Debug)]
pub enum RunAnalysisError {
    #[error("Vote store error: {0}")]
    Store(#[from] VoteStoreError),

    #[error("Clustering failed: {0}")]
    Grouping(#[from] GroupingError),

    #[error("Analysis worker failed: {0}")]
    Worker(String),
}

/// Use case for running the consensus-clustering pipeline
///
/// One instance can serve many discussions; runs share no mutable state
/// and [`execute_many`](Self::execute_many) executes them in parallel.
pub struct RunAnalysisUseCase<S: VoteStore + 'static> {
    store: Arc<S>,
    config: AnalysisConfig,
    recorder: Arc<dyn RunRecorder>,
}

impl<S: VoteStore + 'static> RunAnalysisUseCase<S> {
    pub fn new(store: Arc<S>, config: AnalysisConfig) -> Self {
        Self {
            store,
            config,
            recorder: Arc::new(NoRunRecorder),
        }
    }

    /// Attach a run recorder that receives structured run events.
    pub fn with_recorder(mut self, recorder: Arc<dyn RunRecorder>) -> Self {
        self.recorder = recorder;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        discussion: DiscussionId,
    ) -> Result<AnalysisOutcome, RunAnalysisError> {
        self.execute_with_progress(discussion, Arc::new(NoProgress))
            .await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        discussion: DiscussionId,
        progress: Arc<dyn AnalysisProgress>,
    ) -> Result<AnalysisOutcome, RunAnalysisError> {
        Self::run_one(
            Arc::clone(&self.store),
            self.config.clone(),
            Arc::clone(&self.recorder),
            discussion,
            progress,
        )
        .await
    }

    /// Analyze several discussions concurrently.
    ///
    /// Each discussion gets its own pipeline run; results come back paired
    /// with their discussion id, in no particular order.
    pub async fn execute_many(
        &self,
        discussions: Vec<DiscussionId>,
    ) -> Vec<(DiscussionId, Result<AnalysisOutcome, RunAnalysisError>)> {
        let mut join_set = JoinSet::new();
        for discussion in discussions {
            let store = Arc::clone(&self.store);
            let config = self.config.clone();
            let recorder = Arc::clone(&self.recorder);
            join_set.spawn(async move {
                let outcome =
                    Self::run_one(store, config, recorder, discussion, Arc::new(NoProgress)).await;
                (discussion, outcome)
            });
        }

        let mut outcomes = Vec::new();
        while let Some(result) = join_set.join_next().await {
            match result {
                Ok(pair) => outcomes.push(pair),
                Err(e) => warn!("Analysis task join error: {}", e),
            }
        }
        outcomes
    }

    async fn run_one(
        store: Arc<S>,
        config: AnalysisConfig,
        recorder: Arc<dyn RunRecorder>,
        discussion: DiscussionId,
        progress: Arc<dyn AnalysisProgress>,
    ) -> Result<AnalysisOutcome, RunAnalysisError> {
        info!("Starting analysis for discussion {}", discussion);
        let votes = store.load_votes(discussion).await?;
        let statement_count = store.statement_count(discussion).await?;
        debug!(
            "Discussion {}: {} votes over {} statements",
            discussion,
            votes.len(),
            statement_count
        );

        let outcome = tokio::task::spawn_blocking(move || {
            run_pipeline(&config, &votes, statement_count, progress.as_ref())
        })
        .await
        .map_err(|e| RunAnalysisError::Worker(e.to_string()))??;

        match &outcome {
            AnalysisOutcome::Completed(result) => {
                info!(
                    "Discussion {}: {} groups (silhouette {:.3}), {} consensus / {} bridge / {} divisive",
                    discussion,
                    result.metadata.group_count,
                    result.metadata.silhouette_score,
                    result.consensus_statements.len(),
                    result.bridge_statements.len(),
                    result.divisive_statements.len()
                );
                recorder.record(RunEvent::new(
                    "run_completed",
                    json!({
                        "discussion": discussion.value(),
                        "group_count": result.metadata.group_count,
                        "silhouette": result.metadata.silhouette_score,
                        "method": result.metadata.method,
                        "consensus": result.consensus_statements.len(),
                        "bridge": result.bridge_statements.len(),
                        "divisive": result.divisive_statements.len(),
                    }),
                ));
            }
            AnalysisOutcome::NotReady(readiness) => {
                info!("Discussion {} not ready: {}", discussion, readiness.reason);
                recorder.record(RunEvent::new(
                    "not_ready",
                    json!({
                        "discussion": discussion.value(),
                        "reason": readiness.reason,
                    }),
                ));
            }
        }
        Ok(outcome)
    }
}

/// The synchronous pipeline, phase by phase.
///
/// Kept as a free function so tests can drive it without a runtime.
fn run_pipeline(
    config: &AnalysisConfig,
    votes: &[Vote],
    statement_count: usize,
    progress: &dyn AnalysisProgress,
) -> Result<AnalysisOutcome, GroupingError> {
    progress.on_phase_start(&AnalysisPhase::Readiness);
    let readiness = config.readiness.check(votes, statement_count);
    progress.on_phase_complete(&AnalysisPhase::Readiness);
    if !readiness.ready {
        return Ok(AnalysisOutcome::NotReady(readiness));
    }

    progress.on_phase_start(&AnalysisPhase::Matrix);
    let matrix = VoteMatrix::from_votes(votes);
    progress.on_phase_complete(&AnalysisPhase::Matrix);
    // With all thresholds at zero an empty snapshot can pass the gate;
    // treat it the same as "not ready", never as an error.
    if matrix.is_empty() {
        return Ok(AnalysisOutcome::NotReady(Readiness::not_ready(
            "no votes recorded",
        )));
    }

    progress.on_phase_start(&AnalysisPhase::Projection);
    let projection = Pca::new().project(matrix.rows());
    progress.on_phase_complete(&AnalysisPhase::Projection);
    debug!(
        "Projection explains {:.1}% + {:.1}% of variance",
        projection.variance_explained[0] * 100.0,
        projection.variance_explained[1] * 100.0
    );

    progress.on_phase_start(&AnalysisPhase::Grouping);
    let mut assigner = GroupAssigner::new(config.method);
    if let Some(group_count) = config.fixed_group_count {
        assigner = assigner.with_fixed_group_count(group_count);
    }
    let assignment = assigner.assign(&projection.coordinates)?;
    progress.on_phase_complete(&AnalysisPhase::Grouping);

    progress.on_phase_start(&AnalysisPhase::Classification);
    let classification =
        StatementClassifier::new(config.classification).classify(&matrix, &assignment);
    progress.on_phase_complete(&AnalysisPhase::Classification);

    let result = AnalysisResult::new(
        &matrix,
        &assignment,
        classification,
        &projection,
        statement_count,
    );
    Ok(AnalysisOutcome::Completed(Box::new(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use insight_domain::{ParticipantId, ReadinessThresholds};
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ==================== Test Fixtures ====================

    struct FixtureStore {
        discussions: HashMap<i64, (Vec<Vote>, usize)>,
    }

    impl FixtureStore {
        fn single(votes: Vec<Vote>, statements: usize) -> Self {
            Self {
                discussions: HashMap::from([(1, (votes, statements))]),
            }
        }
    }

    #[async_trait]
    impl VoteStore for FixtureStore {
        async fn load_votes(&self, discussion: DiscussionId) -> Result<Vec<Vote>, VoteStoreError> {
            self.discussions
                .get(&discussion.value())
                .map(|(votes, _)| votes.clone())
                .ok_or(VoteStoreError::DiscussionNotFound(discussion))
        }

        async fn statement_count(
            &self,
            discussion: DiscussionId,
        ) -> Result<usize, VoteStoreError> {
            self.discussions
                .get(&discussion.value())
                .map(|(_, count)| *count)
                .ok_or(VoteStoreError::DiscussionNotFound(discussion))
        }
    }

    struct PhaseLog(Mutex<Vec<String>>);

    impl AnalysisProgress for PhaseLog {
        fn on_phase_start(&self, phase: &AnalysisPhase) {
            self.0.lock().unwrap().push(format!("start:{phase}"));
        }

        fn on_phase_complete(&self, phase: &AnalysisPhase) {
            self.0.lock().unwrap().push(format!("done:{phase}"));
        }
    }

    /// Readiness floors low enough for seven-participant fixtures, which
    /// cap out at 49 votes.
    fn relaxed_config() -> AnalysisConfig {
        AnalysisConfig::default().with_readiness(ReadinessThresholds {
            min_total_votes: 40,
            ..ReadinessThresholds::default()
        })
    }

    /// Seven participants, seven statements. Participants 1-4 always vote
    /// together, 5-7 always vote the opposite way, and one majority member
    /// passes on each statement, leaving every tally at 3 agree / 3
    /// disagree / 1 unsure.
    fn polarized_discussion() -> Vec<Vote> {
        let statements = [10, 20, 30, 40, 50, 60, 70];
        let mut votes = Vec::new();
        for (index, &statement) in statements.iter().enumerate() {
            let passer = 1 + (index as i64 % 4);
            let majority_agrees = index % 2 == 0;
            for participant in 1..=4i64 {
                if participant == passer {
                    votes.push(Vote::pass(participant, statement));
                } else if majority_agrees {
                    votes.push(Vote::agree(participant, statement));
                } else {
                    votes.push(Vote::disagree(participant, statement));
                }
            }
            for participant in 5..=7i64 {
                if majority_agrees {
                    votes.push(Vote::disagree(participant, statement));
                } else {
                    votes.push(Vote::agree(participant, statement));
                }
            }
        }
        votes
    }

    /// Seven participants, unanimous agreement on five statements and a
    /// genuine split on the last two.
    fn common_ground_discussion() -> Vec<Vote> {
        let mut votes = Vec::new();
        for statement in [10, 20, 30, 40, 50] {
            for participant in 1..=7i64 {
                votes.push(Vote::agree(participant, statement));
            }
        }
        for participant in 1..=7i64 {
            if participant <= 4 {
                votes.push(Vote::agree(participant, 60));
            } else {
                votes.push(Vote::disagree(participant, 60));
            }
        }
        for participant in 1..=7i64 {
            if [1, 2, 5].contains(&participant) {
                votes.push(Vote::agree(participant, 70));
            } else {
                votes.push(Vote::disagree(participant, 70));
            }
        }
        votes
    }

    fn completed(outcome: AnalysisOutcome) -> AnalysisResult {
        outcome.into_result().expect("expected a completed analysis")
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_polarized_discussion_finds_two_opposed_groups() {
        let store = Arc::new(FixtureStore::single(polarized_discussion(), 7));
        let use_case = RunAnalysisUseCase::new(store, relaxed_config());
        let result = completed(use_case.execute(DiscussionId::new(1)).await.unwrap());

        assert_eq!(result.metadata.group_count, 2);
        let mut sizes = result.group_sizes();
        sizes.sort();
        assert_eq!(sizes, vec![3, 4]);

        // The majority bloc stays together, as does the minority.
        let group_of = |p: i64| result.cluster_assignments[&ParticipantId::new(p)];
        for participant in 2..=4 {
            assert_eq!(group_of(1), group_of(participant));
        }
        for participant in 6..=7 {
            assert_eq!(group_of(5), group_of(participant));
        }
        assert_ne!(group_of(1), group_of(5));

        // Every statement splits 3/3: all divisive, none consensus.
        assert_eq!(result.divisive_statements.len(), 7);
        assert!(result.consensus_statements.is_empty());
        for divisive in &result.divisive_statements {
            assert_eq!(divisive.agreement_rate, 0.5);
            assert_eq!(divisive.controversy, 1.0);
            assert_eq!(divisive.vote_count, 6);
        }
    }

    #[tokio::test]
    async fn test_unanimous_statements_reach_consensus_regardless_of_partition() {
        let store = Arc::new(FixtureStore::single(common_ground_discussion(), 7));
        let use_case = RunAnalysisUseCase::new(store, relaxed_config());
        let result = completed(use_case.execute(DiscussionId::new(1)).await.unwrap());

        let consensus_ids: Vec<i64> = result
            .consensus_statements
            .iter()
            .map(|record| record.statement_id.value())
            .collect();
        assert_eq!(consensus_ids, vec![10, 20, 30, 40, 50]);
        for record in &result.consensus_statements {
            assert_eq!(record.agreement_rate, 1.0);
        }
    }

    #[tokio::test]
    async fn test_sparse_discussion_is_not_ready() {
        let votes = vec![Vote::agree(1, 10), Vote::disagree(2, 10)];
        let store = Arc::new(FixtureStore::single(votes, 1));
        let use_case = RunAnalysisUseCase::new(store, AnalysisConfig::default());
        let outcome = use_case.execute(DiscussionId::new(1)).await.unwrap();

        match outcome {
            AnalysisOutcome::NotReady(readiness) => {
                assert!(readiness.reason.contains("participants"));
            }
            AnalysisOutcome::Completed(_) => panic!("sparse discussion must not complete"),
        }
    }

    #[tokio::test]
    async fn test_uniform_votes_fail_clustering() {
        // Everyone agrees with everything: the standardized matrix is all
        // zeros and no group structure exists.
        let mut votes = Vec::new();
        for statement in [10, 20, 30, 40, 50, 60, 70] {
            for participant in 1..=7i64 {
                votes.push(Vote::agree(participant, statement));
            }
        }
        let store = Arc::new(FixtureStore::single(votes, 7));
        let use_case = RunAnalysisUseCase::new(store, relaxed_config());
        let err = use_case.execute(DiscussionId::new(1)).await.unwrap_err();
        assert!(matches!(
            err,
            RunAnalysisError::Grouping(GroupingError::ClusteringFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_discussion_is_a_store_error() {
        let store = Arc::new(FixtureStore::single(polarized_discussion(), 7));
        let use_case = RunAnalysisUseCase::new(store, relaxed_config());
        let err = use_case.execute(DiscussionId::new(404)).await.unwrap_err();
        assert!(matches!(
            err,
            RunAnalysisError::Store(VoteStoreError::DiscussionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_repeat_runs_are_identical() {
        let store = Arc::new(FixtureStore::single(polarized_discussion(), 7));
        let config = relaxed_config().with_fixed_group_count(2);
        let use_case = RunAnalysisUseCase::new(store, config);

        let first = completed(use_case.execute(DiscussionId::new(1)).await.unwrap());
        let second = completed(use_case.execute(DiscussionId::new(1)).await.unwrap());

        assert_eq!(first.cluster_assignments, second.cluster_assignments);
        assert_eq!(first.pca_coordinates, second.pca_coordinates);
        assert_eq!(first.consensus_statements, second.consensus_statements);
        assert_eq!(first.bridge_statements, second.bridge_statements);
        assert_eq!(first.divisive_statements, second.divisive_statements);
        assert_eq!(
            first.metadata.silhouette_score,
            second.metadata.silhouette_score
        );
    }

    #[tokio::test]
    async fn test_progress_reports_every_phase() {
        let store = Arc::new(FixtureStore::single(polarized_discussion(), 7));
        let use_case = RunAnalysisUseCase::new(store, relaxed_config());
        let log = Arc::new(PhaseLog(Mutex::new(Vec::new())));

        use_case
            .execute_with_progress(DiscussionId::new(1), Arc::clone(&log) as Arc<dyn AnalysisProgress>)
            .await
            .unwrap();

        let events = log.0.lock().unwrap().clone();
        let expected: Vec<String> = AnalysisPhase::all()
            .iter()
            .flat_map(|phase| [format!("start:{phase}"), format!("done:{phase}")])
            .collect();
        assert_eq!(events, expected);
    }

    #[tokio::test]
    async fn test_progress_stops_after_failed_readiness() {
        let votes = vec![Vote::agree(1, 10)];
        let store = Arc::new(FixtureStore::single(votes, 1));
        let use_case = RunAnalysisUseCase::new(store, AnalysisConfig::default());
        let log = Arc::new(PhaseLog(Mutex::new(Vec::new())));

        use_case
            .execute_with_progress(DiscussionId::new(1), Arc::clone(&log) as Arc<dyn AnalysisProgress>)
            .await
            .unwrap();

        let events = log.0.lock().unwrap().clone();
        assert_eq!(events, vec!["start:readiness", "done:readiness"]);
    }

    #[tokio::test]
    async fn test_execute_many_spans_discussions() {
        let store = Arc::new(FixtureStore {
            discussions: HashMap::from([
                (1, (polarized_discussion(), 7)),
                (2, (vec![Vote::agree(1, 10)], 1)),
            ]),
        });
        let use_case = RunAnalysisUseCase::new(store, relaxed_config());
        let outcomes = use_case
            .execute_many(vec![DiscussionId::new(1), DiscussionId::new(2)])
            .await;

        assert_eq!(outcomes.len(), 2);
        for (discussion, outcome) in outcomes {
            match discussion.value() {
                1 => assert!(outcome.unwrap().is_ready()),
                2 => assert!(!outcome.unwrap().is_ready()),
                other => panic!("unexpected discussion {other}"),
            }
        }
    }

    #[tokio::test]
    async fn test_statement_count_reflects_unvoted_statements() {
        // Nine statements exist but only seven received votes.
        let store = Arc::new(FixtureStore::single(polarized_discussion(), 9));
        let use_case = RunAnalysisUseCase::new(store, relaxed_config());
        let result = completed(use_case.execute(DiscussionId::new(1)).await.unwrap());
        assert_eq!(result.metadata.statement_count, 9);
        assert_eq!(result.metadata.participant_count, 7);
    }

    #[test]
    fn test_pipeline_rejects_empty_snapshot_gracefully() {
        let config = AnalysisConfig::default().with_readiness(ReadinessThresholds {
            min_participants: 0,
            min_statements: 0,
            min_total_votes: 0,
            min_votes_per_statement: 0,
        });
        let outcome = run_pipeline(&config, &[], 0, &NoProgress).unwrap();
        match outcome {
            AnalysisOutcome::NotReady(readiness) => {
                assert_eq!(readiness.reason, "no votes recorded");
            }
            AnalysisOutcome::Completed(_) => panic!("empty snapshot must not complete"),
        }
    }
}
