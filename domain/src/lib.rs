//! Domain layer for agora-insight
//!
//! This crate contains the whole consensus-clustering pipeline as pure,
//! synchronous business logic. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Pipeline
//!
//! One analysis run walks five stages over a vote snapshot:
//!
//! - **Readiness**: are there enough participants, statements and votes?
//! - **Matrix**: dense participants-by-statements table of vote values
//! - **Projection**: column standardization plus 2-component PCA
//! - **Grouping**: opinion groups via clustering with automatic group count
//! - **Classification**: consensus, bridge and divisive statement lists

pub mod analysis;
pub mod classification;
pub mod core;
pub mod grouping;
pub mod projection;
pub mod stats;
pub mod voting;

// Re-export commonly used types
pub use analysis::{
    phase::AnalysisPhase,
    result::{AnalysisMetadata, AnalysisOutcome, AnalysisResult},
};
pub use classification::{
    classifier::{
        BridgeStatement, ClassificationThresholds, ConsensusStatement, DivisiveStatement,
        StatementClassification, StatementClassifier,
    },
    tally::StatementTally,
};
pub use crate::core::{
    error::GroupingError,
    ids::{DiscussionId, ParticipantId, StatementId},
};
pub use grouping::{
    assigner::{GroupAssignment, GroupAssigner, MAX_GROUPS, MIN_PARTICIPANTS},
    strategy::{ClusteringStrategy, GroupingMethod},
};
pub use projection::pca::{Pca, Projection};
pub use voting::{
    matrix::VoteMatrix,
    readiness::{Readiness, ReadinessThresholds},
    vote::{Vote, VoteValue},
};
