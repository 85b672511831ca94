//! Readiness gate: is there enough data for a meaningful analysis?
//!
//! A discussion with three voters and a dozen votes will cluster into
//! nonsense. The gate checks its conditions in a fixed order and reports the
//! first one that fails, so consumers can show a single actionable message.

use crate::core::ids::{ParticipantId, StatementId};
use crate::voting::vote::Vote;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Minimum data requirements before analysis runs.
///
/// # Example
///
/// ```
/// use insight_domain::{ReadinessThresholds, Vote};
///
/// let thresholds = ReadinessThresholds::default();
/// let verdict = thresholds.check(&[Vote::agree(1, 1)], 1);
/// assert!(!verdict.ready);
/// assert!(verdict.reason.contains("participants"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessThresholds {
    /// Distinct participants that must have voted.
    pub min_participants: usize,
    /// Non-deleted statements the discussion must hold.
    pub min_statements: usize,
    /// Total votes across the whole discussion.
    pub min_total_votes: usize,
    /// Every statement with any votes needs at least this many.
    pub min_votes_per_statement: usize,
}

impl Default for ReadinessThresholds {
    fn default() -> Self {
        Self {
            min_participants: 7,
            min_statements: 7,
            min_total_votes: 50,
            min_votes_per_statement: 3,
        }
    }
}

/// Verdict of the readiness gate: a flag plus a human-readable reason.
///
/// Being not ready is an expected, frequent state: a value, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readiness {
    /// Whether the pipeline may run.
    pub ready: bool,
    /// Why (or why not), phrased for end users.
    pub reason: String,
}

impl Readiness {
    /// The discussion has enough data.
    pub fn ready() -> Self {
        Self {
            ready: true,
            reason: "ready for analysis".to_string(),
        }
    }

    /// The discussion is short on data; `reason` names the first gap.
    pub fn not_ready(reason: impl Into<String>) -> Self {
        Self {
            ready: false,
            reason: reason.into(),
        }
    }
}

impl ReadinessThresholds {
    /// Check one discussion snapshot against the thresholds.
    ///
    /// `statement_count` is the discussion's count of non-deleted statements,
    /// supplied by the caller, since a statement nobody voted on yet would not
    /// appear in the snapshot. Conditions are evaluated in order: participant
    /// count, statement count, total votes, per-statement minimum. Pure
    /// function; an empty snapshot simply reports the first gap.
    pub fn check(&self, votes: &[Vote], statement_count: usize) -> Readiness {
        let participants: BTreeSet<ParticipantId> = votes.iter().map(|v| v.participant).collect();
        if participants.len() < self.min_participants {
            return Readiness::not_ready(format!(
                "needs at least {} voting participants, have {}",
                self.min_participants,
                participants.len()
            ));
        }

        if statement_count < self.min_statements {
            return Readiness::not_ready(format!(
                "needs at least {} statements, have {}",
                self.min_statements, statement_count
            ));
        }

        if votes.len() < self.min_total_votes {
            let missing = self.min_total_votes - votes.len();
            return Readiness::not_ready(format!(
                "{} more votes needed ({} of {})",
                missing,
                votes.len(),
                self.min_total_votes
            ));
        }

        let mut per_statement: HashMap<StatementId, usize> = HashMap::new();
        for vote in votes {
            *per_statement.entry(vote.statement).or_insert(0) += 1;
        }
        let mut voted: Vec<(StatementId, usize)> = per_statement.into_iter().collect();
        voted.sort();
        for (statement, count) in voted {
            if count < self.min_votes_per_statement {
                return Readiness::not_ready(format!(
                    "statement {} has only {} votes (minimum {})",
                    statement, count, self.min_votes_per_statement
                ));
            }
        }

        Readiness::ready()
    }
}
