//! Dense vote matrix construction.
//!
//! The matrix is rebuilt from the snapshot on every run and never persisted.
//! Rows are participants, columns are statements, both ordered by ascending
//! id so a rerun over the same snapshot lays out identically.

use crate::core::ids::{ParticipantId, StatementId};
use crate::voting::vote::Vote;
use std::collections::{BTreeSet, HashMap};

/// Participants × statements vote matrix.
///
/// Cell values are 1.0 (agree), -1.0 (disagree) and 0.0 (pass or no vote).
/// An empty snapshot yields an empty matrix rather than an error, so the
/// orchestrator can treat "no data" uniformly with "not ready".
///
/// # Example
///
/// ```
/// use insight_domain::{Vote, VoteMatrix};
///
/// let votes = vec![Vote::agree(1, 10), Vote::disagree(2, 10), Vote::agree(1, 11)];
/// let matrix = VoteMatrix::from_votes(&votes);
///
/// assert_eq!(matrix.participant_count(), 2);
/// assert_eq!(matrix.statement_count(), 2);
/// assert_eq!(matrix.cell(0, 0), 1.0);   // participant 1 agreed with statement 10
/// assert_eq!(matrix.cell(1, 1), 0.0);   // participant 2 never voted on statement 11
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VoteMatrix {
    participants: Vec<ParticipantId>,
    statements: Vec<StatementId>,
    rows: Vec<Vec<f64>>,
}

impl VoteMatrix {
    /// Build the matrix from a snapshot of vote records.
    ///
    /// Row/column index sets equal exactly the distinct participant and
    /// statement ids present in the snapshot.
    pub fn from_votes(votes: &[Vote]) -> Self {
        let participant_set: BTreeSet<ParticipantId> =
            votes.iter().map(|v| v.participant).collect();
        let statement_set: BTreeSet<StatementId> = votes.iter().map(|v| v.statement).collect();

        let participants: Vec<ParticipantId> = participant_set.into_iter().collect();
        let statements: Vec<StatementId> = statement_set.into_iter().collect();

        let row_index: HashMap<ParticipantId, usize> = participants
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        let col_index: HashMap<StatementId, usize> = statements
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        let mut rows = vec![vec![0.0; statements.len()]; participants.len()];
        for vote in votes {
            let row = row_index[&vote.participant];
            let col = col_index[&vote.statement];
            rows[row][col] = vote.value.as_f64();
        }

        Self {
            participants,
            statements,
            rows,
        }
    }

    /// Whether the snapshot contained no votes at all.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Number of matrix rows (distinct voting participants).
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Number of matrix columns (distinct voted statements).
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// Row order: participant ids ascending.
    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    /// Column order: statement ids ascending.
    pub fn statements(&self) -> &[StatementId] {
        &self.statements
    }

    /// All rows, in participant order.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// A single cell by (row, column) position.
    pub fn cell(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::vote::VoteValue;

    #[test]
    fn test_empty_snapshot_gives_empty_matrix() {
        let matrix = VoteMatrix::from_votes(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.participant_count(), 0);
        assert_eq!(matrix.statement_count(), 0);
        assert!(matrix.rows().is_empty());
    }

    #[test]
    fn test_ids_ordered_ascending() {
        let votes = vec![
            Vote::agree(30, 2),
            Vote::agree(10, 9),
            Vote::agree(20, 5),
        ];
        let matrix = VoteMatrix::from_votes(&votes);

        let participants: Vec<i64> = matrix.participants().iter().map(|p| p.value()).collect();
        let statements: Vec<i64> = matrix.statements().iter().map(|s| s.value()).collect();
        assert_eq!(participants, vec![10, 20, 30]);
        assert_eq!(statements, vec![2, 5, 9]);
    }

    #[test]
    fn test_cells_default_to_neutral() {
        let votes = vec![Vote::agree(1, 1), Vote::disagree(2, 2)];
        let matrix = VoteMatrix::from_votes(&votes);

        // participant 1 never voted on statement 2, participant 2 never on 1
        assert_eq!(matrix.cell(0, 1), 0.0);
        assert_eq!(matrix.cell(1, 0), 0.0);
        assert_eq!(matrix.cell(0, 0), 1.0);
        assert_eq!(matrix.cell(1, 1), -1.0);
    }

    #[test]
    fn test_pass_votes_fill_cells_with_zero() {
        let votes = vec![Vote::new(1, 1, VoteValue::Pass)];
        let matrix = VoteMatrix::from_votes(&votes);

        // A pass vote creates the row and column even though the cell is 0.
        assert_eq!(matrix.participant_count(), 1);
        assert_eq!(matrix.statement_count(), 1);
        assert_eq!(matrix.cell(0, 0), 0.0);
    }

    #[test]
    fn test_layout_is_reproducible() {
        let votes = vec![
            Vote::agree(3, 7),
            Vote::disagree(1, 7),
            Vote::pass(2, 4),
            Vote::agree(1, 4),
        ];
        let a = VoteMatrix::from_votes(&votes);
        let b = VoteMatrix::from_votes(&votes);
        assert_eq!(a, b);
    }
}
