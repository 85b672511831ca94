//! Lloyd's k-means over projected points with cosine distance.
//!
//! Seeding is the deterministic farthest-point rule: the first centroid is
//! the first point, each further centroid the point with the greatest
//! minimum distance to the centroids chosen so far. No RNG anywhere, so a
//! rerun reproduces the same partition.

use crate::core::error::GroupingError;
use crate::grouping::distance::cosine_distance;
use crate::grouping::strategy::ClusteringStrategy;

/// k-means partitioning strategy.
#[derive(Debug, Clone)]
pub struct KMeansStrategy {
    max_iterations: usize,
    convergence_threshold: f64,
}

impl KMeansStrategy {
    pub fn new() -> Self {
        Self {
            max_iterations: 100,
            convergence_threshold: 1e-6,
        }
    }
}

impl Default for KMeansStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusteringStrategy for KMeansStrategy {
    fn name(&self) -> &'static str {
        "kmeans"
    }

    fn cluster(&self, points: &[[f64; 2]], k: usize) -> Result<Vec<usize>, GroupingError> {
        let n = points.len();
        if k == 0 || k > n {
            return Err(GroupingError::InvalidGroupCount {
                requested: k,
                participants: n,
            });
        }

        let mut centroids = seed_centroids(points, k);
        let mut labels = vec![0usize; n];

        for _ in 0..self.max_iterations {
            for (i, point) in points.iter().enumerate() {
                labels[i] = nearest_centroid(point, &centroids);
            }

            let next = compute_centroids(points, &labels, k);
            let movement = centroids
                .iter()
                .zip(&next)
                .map(|(a, b)| (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2))
                .fold(0.0_f64, f64::max);
            centroids = next;

            if movement < self.convergence_threshold {
                break;
            }
        }

        // Labels must reflect the final centroids.
        for (i, point) in points.iter().enumerate() {
            labels[i] = nearest_centroid(point, &centroids);
        }

        let mut sizes = vec![0usize; k];
        for &label in &labels {
            sizes[label] += 1;
        }
        if sizes.contains(&0) {
            return Err(GroupingError::ClusteringFailed(format!(
                "k-means left an empty group for k={k}"
            )));
        }

        Ok(labels)
    }
}

/// Farthest-point seeding: deterministic spread-out initial centroids.
fn seed_centroids(points: &[[f64; 2]], k: usize) -> Vec<[f64; 2]> {
    let mut chosen = vec![0usize];

    while chosen.len() < k {
        let mut best_idx = None;
        let mut best_dist = -1.0;
        for (i, point) in points.iter().enumerate() {
            if chosen.contains(&i) {
                continue;
            }
            let min_dist = chosen
                .iter()
                .map(|&c| cosine_distance(point, &points[c]))
                .fold(f64::INFINITY, f64::min);
            if min_dist > best_dist {
                best_dist = min_dist;
                best_idx = Some(i);
            }
        }
        match best_idx {
            Some(i) => chosen.push(i),
            None => break, // k > distinct points; caller's empty-group check reports it
        }
    }

    chosen.iter().map(|&i| points[i]).collect()
}

fn nearest_centroid(point: &[f64; 2], centroids: &[[f64; 2]]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let d = cosine_distance(point, centroid);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Member mean per cluster; an empty cluster collapses to the origin, where
/// the zero-norm guard makes it equidistant from everything.
fn compute_centroids(points: &[[f64; 2]], labels: &[usize], k: usize) -> Vec<[f64; 2]> {
    let mut sums = vec![[0.0_f64; 2]; k];
    let mut counts = vec![0usize; k];
    for (point, &label) in points.iter().zip(labels) {
        sums[label][0] += point[0];
        sums[label][1] += point[1];
        counts[label] += 1;
    }
    sums.iter()
        .zip(&counts)
        .map(|(sum, &count)| {
            if count > 0 {
                [sum[0] / count as f64, sum[1] / count as f64]
            } else {
                [0.0, 0.0]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_blobs() -> Vec<[f64; 2]> {
        vec![
            [1.0, 0.1],
            [0.9, -0.1],
            [1.1, 0.0],
            [-1.0, 0.1],
            [-0.9, -0.1],
            [-1.1, 0.0],
        ]
    }

    #[test]
    fn test_two_blobs_two_groups() {
        let labels = KMeansStrategy::new().cluster(&two_blobs(), 2).unwrap();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[0], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[3], labels[5]);
        assert_ne!(labels[0], labels[3]);
    }

    #[test]
    fn test_deterministic() {
        let points = two_blobs();
        let a = KMeansStrategy::new().cluster(&points, 2).unwrap();
        let b = KMeansStrategy::new().cluster(&points, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_k_larger_than_points_is_invalid() {
        let points = [[1.0, 0.0], [0.0, 1.0]];
        let err = KMeansStrategy::new().cluster(&points, 3).unwrap_err();
        assert!(matches!(err, GroupingError::InvalidGroupCount { .. }));
    }

    #[test]
    fn test_identical_points_cannot_split() {
        let points = [[1.0, 1.0]; 5];
        let err = KMeansStrategy::new().cluster(&points, 2).unwrap_err();
        assert!(matches!(err, GroupingError::ClusteringFailed(_)));
    }

    #[test]
    fn test_labels_cover_all_groups() {
        let labels = KMeansStrategy::new().cluster(&two_blobs(), 3).unwrap();
        for k in 0..3 {
            assert!(labels.contains(&k), "group {k} is empty");
        }
        assert!(labels.iter().all(|&l| l < 3));
    }
}
