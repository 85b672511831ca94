//! Opinion-group assignment over projected participant coordinates.
//!
//! Wraps a [`ClusteringStrategy`] with the policy layer: minimum cohort
//! size, the candidate group-count search, silhouette-based selection and
//! label normalization.

use serde::{Deserialize, Serialize};

use crate::core::error::GroupingError;
use crate::grouping::distance::distance_matrix;
use crate::grouping::silhouette::mean_silhouette;
use crate::grouping::strategy::{ClusteringStrategy, GroupingMethod};

/// Upper bound on how many opinion groups an analysis may produce.
pub const MAX_GROUPS: usize = 10;

/// Fewer participants than this cannot be meaningfully partitioned.
pub const MIN_PARTICIPANTS: usize = 4;

/// A finished partition of participants into opinion groups.
///
/// `labels[i]` is the group of the participant at row `i` of the vote
/// matrix. Labels are normalized to first-appearance order: the first
/// participant is always in group 0, the first participant not in group 0
/// is in group 1, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAssignment {
    pub labels: Vec<usize>,
    pub group_count: usize,
    pub silhouette: f64,
    pub method: String,
}

impl GroupAssignment {
    /// Number of participants in each group, indexed by label.
    pub fn group_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.group_count];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

/// Chooses an opinion-group partition for a set of projected coordinates.
#[derive(Debug, Clone)]
pub struct GroupAssigner {
    method: GroupingMethod,
    fixed_group_count: Option<usize>,
}

impl GroupAssigner {
    pub fn new(method: GroupingMethod) -> Self {
        Self {
            method,
            fixed_group_count: None,
        }
    }

    /// Pin the group count instead of searching for the best one.
    pub fn with_fixed_group_count(mut self, group_count: usize) -> Self {
        self.fixed_group_count = Some(group_count);
        self
    }

    /// Partition participants into opinion groups.
    ///
    /// Without a fixed group count, every candidate k in
    /// `2..=min(MAX_GROUPS, n / 2)` is clustered and scored, and the
    /// partition with the highest mean silhouette wins. Ties keep the
    /// smallest k.
    pub fn assign(&self, points: &[[f64; 2]]) -> Result<GroupAssignment, GroupingError> {
        let n = points.len();
        if n < MIN_PARTICIPANTS {
            return Err(GroupingError::TooFewParticipants(n));
        }
        if points
            .iter()
            .all(|p| p[0].abs() < f64::EPSILON && p[1].abs() < f64::EPSILON)
        {
            return Err(GroupingError::ClusteringFailed(
                "all projected coordinates collapse to the origin".to_string(),
            ));
        }

        let max_groups = MAX_GROUPS.min(n / 2);
        let strategy = self.method.strategy();
        let distances = distance_matrix(points);

        let (labels, silhouette) = match self.fixed_group_count {
            Some(requested) => {
                if requested < 2 || requested > max_groups {
                    return Err(GroupingError::InvalidGroupCount {
                        requested,
                        participants: n,
                    });
                }
                let labels = strategy.cluster(points, requested)?;
                let silhouette = mean_silhouette(&labels, &distances);
                (labels, silhouette)
            }
            None => self.search_group_count(strategy.as_ref(), points, &distances, max_groups)?,
        };

        let (labels, group_count) = normalize_labels(labels);
        Ok(GroupAssignment {
            labels,
            group_count,
            silhouette,
            method: strategy.name().to_string(),
        })
    }

    /// Try every candidate group count and keep the best-scoring partition.
    fn search_group_count(
        &self,
        strategy: &dyn ClusteringStrategy,
        points: &[[f64; 2]],
        distances: &[Vec<f64>],
        max_groups: usize,
    ) -> Result<(Vec<usize>, f64), GroupingError> {
        let mut best: Option<(Vec<usize>, f64)> = None;
        for candidate in 2..=max_groups {
            // A candidate the strategy cannot realize (e.g. k-means emptied
            // a group) is skipped, not fatal.
            let Ok(labels) = strategy.cluster(points, candidate) else {
                continue;
            };
            let score = mean_silhouette(&labels, distances);
            let improved = match &best {
                Some((_, best_score)) => score > *best_score,
                None => true,
            };
            if improved {
                best = Some((labels, score));
            }
        }
        best.ok_or_else(|| {
            GroupingError::ClusteringFailed(
                "no candidate group count produced a valid partition".to_string(),
            )
        })
    }
}

/// Remap labels so groups are numbered in order of first appearance.
fn normalize_labels(labels: Vec<usize>) -> (Vec<usize>, usize) {
    let mut mapping: Vec<Option<usize>> = Vec::new();
    let mut next = 0usize;
    let normalized = labels
        .into_iter()
        .map(|label| {
            if label >= mapping.len() {
                mapping.resize(label + 1, None);
            }
            *mapping[label].get_or_insert_with(|| {
                let assigned = next;
                next += 1;
                assigned
            })
        })
        .collect();
    (normalized, next)
}
