//! Agglomerative clustering with average linkage.
//!
//! The naive O(n^3) formulation: start from singletons, repeatedly merge the
//! pair of clusters with the smallest mean pairwise cosine distance until k
//! clusters remain. Participant counts here are hundreds at most, so the
//! simple algorithm beats a linkage-matrix implementation on clarity.

use crate::core::error::GroupingError;
use crate::grouping::distance::distance_matrix;
use crate::grouping::strategy::ClusteringStrategy;

/// Average-linkage hierarchical partitioning strategy.
#[derive(Debug, Clone, Default)]
pub struct AverageLinkageStrategy;

impl AverageLinkageStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl ClusteringStrategy for AverageLinkageStrategy {
    fn name(&self) -> &'static str {
        "hierarchical"
    }

    fn cluster(&self, points: &[[f64; 2]], k: usize) -> Result<Vec<usize>, GroupingError> {
        let n = points.len();
        if k == 0 || k > n {
            return Err(GroupingError::InvalidGroupCount {
                requested: k,
                participants: n,
            });
        }

        let distances = distance_matrix(points);
        let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();

        while clusters.len() > k {
            let (a, b) = closest_pair(&clusters, &distances);
            let merged = clusters.remove(b);
            clusters[a].extend(merged);
        }

        let mut labels = vec![0usize; n];
        for (group, members) in clusters.iter().enumerate() {
            for &point in members {
                labels[point] = group;
            }
        }
        Ok(labels)
    }
}

/// Pair of cluster indices (a < b) with the smallest average linkage.
///
/// Ties resolve to the first pair in scan order, keeping merges deterministic.
fn closest_pair(clusters: &[Vec<usize>], distances: &[Vec<f64>]) -> (usize, usize) {
    let mut best = (0, 1);
    let mut best_linkage = f64::INFINITY;
    for a in 0..clusters.len() {
        for b in (a + 1)..clusters.len() {
            let linkage = average_linkage(&clusters[a], &clusters[b], distances);
            if linkage < best_linkage {
                best_linkage = linkage;
                best = (a, b);
            }
        }
    }
    best
}

/// Mean pairwise distance between two clusters.
fn average_linkage(a: &[usize], b: &[usize], distances: &[Vec<f64>]) -> f64 {
    let mut total = 0.0;
    for &i in a {
        for &j in b {
            total += distances[i][j];
        }
    }
    total / (a.len() * b.len()) as f64
}
