//! Cosine distance over projected participant positions.

/// Norm floor guarding against division by zero for near-origin points.
const MIN_NORM: f64 = 1e-10;

/// Cosine similarity in [-1, 1].
///
/// A vector with (near-)zero norm is similar to nothing: the guard pins the
/// denominator, so the result is ~0 instead of NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    (dot / (norm_a.max(MIN_NORM) * norm_b.max(MIN_NORM))).clamp(-1.0, 1.0)
}

/// Cosine distance: 1 - similarity, in [0, 2].
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    1.0 - cosine_similarity(a, b)
}

/// Symmetric pairwise cosine-distance matrix over projected points.
pub fn distance_matrix(points: &[[f64; 2]]) -> Vec<Vec<f64>> {
    let n = points.len();
    let mut distances = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = cosine_distance(&points[i], &points[j]);
            distances[i][j] = d;
            distances[j][i] = d;
        }
    }
    distances
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_direction_is_distance_zero() {
        assert!(cosine_distance(&[1.0, 2.0], &[2.0, 4.0]).abs() < 1e-12);
    }

    #[test]
    fn test_opposite_direction_is_distance_two() {
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_is_distance_one() {
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 3.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_does_not_produce_nan() {
        let d = cosine_distance(&[0.0, 0.0], &[1.0, 1.0]);
        assert!(d.is_finite());
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_matrix_is_symmetric_with_zero_diagonal() {
        let points = [[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]];
        let distances = distance_matrix(&points);
        for i in 0..3 {
            assert_eq!(distances[i][i], 0.0);
            for j in 0..3 {
                assert_eq!(distances[i][j], distances[j][i]);
            }
        }
    }
}
