//! Consensus, bridge and divisive statement detection.

pub mod classifier;
pub mod tally;

pub use classifier::{
    BridgeStatement, ClassificationThresholds, ConsensusStatement, DivisiveStatement,
    StatementClassification, StatementClassifier, controversy_score,
};
pub use tally::{StatementTally, tally_statements};
