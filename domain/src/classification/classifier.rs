//! Statement classification: consensus, bridge and divisive passes.
//!
//! The three passes are independent: a statement may land in zero, one or
//! several lists. Every record keeps the numbers that justified it, so
//! callers can explain a classification without recomputing tallies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classification::tally::{StatementTally, tally_statements};
use crate::core::ids::StatementId;
use crate::grouping::assigner::GroupAssignment;
use crate::stats;
use crate::voting::matrix::VoteMatrix;

/// Numeric cutoffs for the three classification passes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    /// Overall agreement rate a consensus statement must reach.
    pub consensus_min_overall: f64,
    /// Agreement rate every voting group must reach for consensus.
    pub consensus_min_group: f64,
    /// Mean of per-group agreement rates a bridge statement must reach.
    pub bridge_min_mean: f64,
    /// Largest allowed variance of per-group agreement rates for a bridge.
    pub bridge_max_variance: f64,
    /// Substantive votes a statement needs before it can count as divisive.
    pub divisive_min_votes: usize,
    /// Controversy score at or above which a statement is divisive.
    pub divisive_min_score: f64,
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            consensus_min_overall: 0.70,
            consensus_min_group: 0.60,
            bridge_min_mean: 0.65,
            bridge_max_variance: 0.15,
            divisive_min_votes: 5,
            divisive_min_score: 0.70,
        }
    }
}

/// Broad agreement overall and within every group that voted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusStatement {
    pub statement_id: StatementId,
    pub agreement_rate: f64,
    /// Per-group agreement rates; groups without substantive votes are absent.
    pub group_rates: BTreeMap<usize, f64>,
}

/// High, evenly spread agreement across otherwise distinct groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeStatement {
    pub statement_id: StatementId,
    pub mean_agreement: f64,
    pub variance: f64,
    pub group_rates: BTreeMap<usize, f64>,
}

/// A near-even split with enough votes to call it a real fault line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DivisiveStatement {
    pub statement_id: StatementId,
    pub agreement_rate: f64,
    pub controversy: f64,
    pub vote_count: usize,
}

/// Output of one classification run, in ascending statement-id order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementClassification {
    pub consensus: Vec<ConsensusStatement>,
    pub bridge: Vec<BridgeStatement>,
    pub divisive: Vec<DivisiveStatement>,
}

/// Runs the three classification passes over a vote matrix.
#[derive(Debug, Clone, Default)]
pub struct StatementClassifier {
    thresholds: ClassificationThresholds,
}

impl StatementClassifier {
    pub fn new(thresholds: ClassificationThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(
        &self,
        matrix: &VoteMatrix,
        assignment: &GroupAssignment,
    ) -> StatementClassification {
        let tallies = tally_statements(matrix, &assignment.labels, assignment.group_count);
        let mut classification = StatementClassification::default();
        for tally in &tallies {
            if let Some(record) = self.consensus(tally) {
                classification.consensus.push(record);
            }
            if let Some(record) = self.bridge(tally) {
                classification.bridge.push(record);
            }
            if let Some(record) = self.divisive(tally) {
                classification.divisive.push(record);
            }
        }
        classification
    }

    fn consensus(&self, tally: &StatementTally) -> Option<ConsensusStatement> {
        let overall = tally.overall_rate()?;
        if overall < self.thresholds.consensus_min_overall {
            return None;
        }
        // A group that cast no substantive votes has nothing to object to
        // and does not block consensus.
        let group_rates = defined_group_rates(tally);
        let every_group_agrees = group_rates
            .values()
            .all(|&rate| rate >= self.thresholds.consensus_min_group);
        if !every_group_agrees {
            return None;
        }
        Some(ConsensusStatement {
            statement_id: tally.statement,
            agreement_rate: overall,
            group_rates,
        })
    }

    fn bridge(&self, tally: &StatementTally) -> Option<BridgeStatement> {
        let group_rates = defined_group_rates(tally);
        if group_rates.len() < 2 {
            return None;
        }
        let rates: Vec<f64> = group_rates.values().copied().collect();
        let mean = stats::mean(&rates);
        let variance = stats::variance(&rates);
        if mean < self.thresholds.bridge_min_mean
            || variance > self.thresholds.bridge_max_variance
        {
            return None;
        }
        Some(BridgeStatement {
            statement_id: tally.statement,
            mean_agreement: mean,
            variance,
            group_rates,
        })
    }

    fn divisive(&self, tally: &StatementTally) -> Option<DivisiveStatement> {
        if tally.substantive_votes() < self.thresholds.divisive_min_votes {
            return None;
        }
        let rate = tally.overall_rate()?;
        let controversy = controversy_score(rate);
        if controversy < self.thresholds.divisive_min_score {
            return None;
        }
        Some(DivisiveStatement {
            statement_id: tally.statement,
            agreement_rate: rate,
            controversy,
            vote_count: tally.substantive_votes(),
        })
    }
}

/// 1.0 at an exact 50/50 split, falling linearly to 0.0 at unanimity.
pub fn controversy_score(agreement_rate: f64) -> f64 {
    1.0 - (agreement_rate - 0.5).abs() * 2.0
}

fn defined_group_rates(tally: &StatementTally) -> BTreeMap<usize, f64> {
    (0..tally.group_count())
        .filter_map(|group| tally.group_rate(group).map(|rate| (group, rate)))
        .collect()
}
