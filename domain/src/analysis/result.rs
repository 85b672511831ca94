//! The aggregate result of one analysis run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classification::classifier::{
    BridgeStatement, ConsensusStatement, DivisiveStatement, StatementClassification,
};
use crate::core::ids::ParticipantId;
use crate::grouping::assigner::GroupAssignment;
use crate::projection::pca::Projection;
use crate::voting::matrix::VoteMatrix;
use crate::voting::readiness::Readiness;

/// Run metadata attached to every completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub group_count: usize,
    pub silhouette_score: f64,
    pub method: String,
    pub participant_count: usize,
    /// Non-deleted statements in the discussion, which can exceed the
    /// matrix width when some statements never received a vote.
    pub statement_count: usize,
    pub analyzed_at: DateTime<Utc>,
    pub variance_explained: [f64; 2],
}

/// Everything one run produces: the partition, the map coordinates, the
/// three statement lists and the metadata block.
///
/// Serializes to the wire shape consumed by the platform: participant keys
/// become strings, `analyzed_at` becomes an ISO-8601 timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub cluster_assignments: BTreeMap<ParticipantId, usize>,
    pub pca_coordinates: BTreeMap<ParticipantId, [f64; 2]>,
    pub consensus_statements: Vec<ConsensusStatement>,
    pub bridge_statements: Vec<BridgeStatement>,
    pub divisive_statements: Vec<DivisiveStatement>,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    /// Assemble a result from the pipeline stages.
    ///
    /// Rows of the matrix, labels of the assignment and coordinates of the
    /// projection are all indexed by participant position.
    pub fn new(
        matrix: &VoteMatrix,
        assignment: &GroupAssignment,
        classification: StatementClassification,
        projection: &Projection,
        statement_count: usize,
    ) -> Self {
        let cluster_assignments = matrix
            .participants()
            .iter()
            .copied()
            .zip(assignment.labels.iter().copied())
            .collect();
        let pca_coordinates = matrix
            .participants()
            .iter()
            .copied()
            .zip(projection.coordinates.iter().copied())
            .collect();
        Self {
            cluster_assignments,
            pca_coordinates,
            consensus_statements: classification.consensus,
            bridge_statements: classification.bridge,
            divisive_statements: classification.divisive,
            metadata: AnalysisMetadata {
                group_count: assignment.group_count,
                silhouette_score: assignment.silhouette,
                method: assignment.method.clone(),
                participant_count: matrix.participant_count(),
                statement_count,
                analyzed_at: Utc::now(),
                variance_explained: projection.variance_explained,
            },
        }
    }

    /// Number of participants in each group, indexed by group id.
    pub fn group_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.metadata.group_count];
        for &group in self.cluster_assignments.values() {
            sizes[group] += 1;
        }
        sizes
    }
}

/// What a pipeline run hands back: a full result, or the reason there is
/// none yet. "Not ready" is an expected answer, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Completed(Box<AnalysisResult>),
    NotReady(Readiness),
}

impl AnalysisOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::NotReady(_) => None,
        }
    }

    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            Self::Completed(result) => Some(*result),
            Self::NotReady(_) => None,
        }
    }
}
