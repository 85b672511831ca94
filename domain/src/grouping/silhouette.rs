//! Silhouette scoring for candidate partitions.

/// Mean silhouette coefficient over all points, given labels and a
/// precomputed pairwise distance matrix.
///
/// A point in a singleton cluster scores 0.0 rather than the textbook 1.0:
/// rewarding singletons would steer the group-count search toward shattering
/// every participant into their own group.
pub fn mean_silhouette(labels: &[usize], distances: &[Vec<f64>]) -> f64 {
    let n = labels.len();
    if n == 0 {
        return 0.0;
    }
    let total: f64 = (0..n).map(|i| point_silhouette(i, labels, distances)).sum();
    total / n as f64
}

fn point_silhouette(point: usize, labels: &[usize], distances: &[Vec<f64>]) -> f64 {
    let own = labels[point];
    let own_size = labels.iter().filter(|&&label| label == own).count();
    if own_size <= 1 {
        return 0.0;
    }

    // a: mean distance to the rest of the point's own cluster.
    let mut intra = 0.0;
    for (other, &label) in labels.iter().enumerate() {
        if other != point && label == own {
            intra += distances[point][other];
        }
    }
    let a = intra / (own_size - 1) as f64;

    // b: smallest mean distance to any other cluster.
    let group_count = labels.iter().copied().max().map_or(0, |m| m + 1);
    let mut b = f64::INFINITY;
    for group in 0..group_count {
        if group == own {
            continue;
        }
        let mut total = 0.0;
        let mut count = 0usize;
        for (other, &label) in labels.iter().enumerate() {
            if label == group {
                total += distances[point][other];
                count += 1;
            }
        }
        if count > 0 {
            b = b.min(total / count as f64);
        }
    }
    if !b.is_finite() {
        return 0.0;
    }

    let denominator = a.max(b);
    if denominator < f64::EPSILON {
        return 0.0;
    }
    (b - a) / denominator
}
