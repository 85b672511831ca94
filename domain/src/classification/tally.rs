//! Per-statement vote tallies, overall and split by opinion group.

use crate::core::ids::StatementId;
use crate::voting::matrix::VoteMatrix;

/// Agree/disagree counts for one statement.
///
/// Pass votes and missing cells are excluded everywhere; only substantive
/// votes (agree or disagree) enter agreement rates.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementTally {
    pub statement: StatementId,
    pub agrees: usize,
    pub disagrees: usize,
    group_agrees: Vec<usize>,
    group_disagrees: Vec<usize>,
}

impl StatementTally {
    /// Substantive votes cast on this statement across all participants.
    pub fn substantive_votes(&self) -> usize {
        self.agrees + self.disagrees
    }

    /// Share of substantive votes that agree, or `None` if there are none.
    pub fn overall_rate(&self) -> Option<f64> {
        rate(self.agrees, self.disagrees)
    }

    /// Agreement rate within one opinion group, or `None` if the group
    /// cast no substantive votes on this statement.
    pub fn group_rate(&self, group: usize) -> Option<f64> {
        rate(self.group_agrees[group], self.group_disagrees[group])
    }

    /// Number of opinion groups the tally was split over.
    pub fn group_count(&self) -> usize {
        self.group_agrees.len()
    }
}

fn rate(agrees: usize, disagrees: usize) -> Option<f64> {
    let total = agrees + disagrees;
    if total == 0 {
        return None;
    }
    Some(agrees as f64 / total as f64)
}

/// Tally every statement column of the matrix, splitting counts by the
/// participant group labels.
pub fn tally_statements(
    matrix: &VoteMatrix,
    labels: &[usize],
    group_count: usize,
) -> Vec<StatementTally> {
    let mut tallies = Vec::with_capacity(matrix.statement_count());
    for (column, &statement) in matrix.statements().iter().enumerate() {
        let mut tally = StatementTally {
            statement,
            agrees: 0,
            disagrees: 0,
            group_agrees: vec![0; group_count],
            group_disagrees: vec![0; group_count],
        };
        for (row, &group) in labels.iter().enumerate() {
            let value = matrix.cell(row, column);
            if value > 0.5 {
                tally.agrees += 1;
                tally.group_agrees[group] += 1;
            } else if value < -0.5 {
                tally.disagrees += 1;
                tally.group_disagrees[group] += 1;
            }
        }
        tallies.push(tally);
    }
    tallies
}
