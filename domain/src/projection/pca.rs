//! Two-component principal-component projection.
//!
//! Hand-rolled over `Vec<f64>`: covariance of the standardized matrix, then
//! power iteration with deflation for the top two eigenpairs. Everything is
//! deterministic (the start vector is a coordinate axis, not a random draw),
//! so a rerun over the same snapshot produces bit-identical coordinates.
//! Component *sign* is still only defined up to a flip relative to other
//! implementations; callers must rely on relative structure alone.

use crate::projection::standardize::standardize_columns;

/// Result of projecting participants onto the top two principal components.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// One (x, y) pair per matrix row, in row order.
    pub coordinates: Vec<[f64; 2]>,
    /// Fraction of total variance captured by each component. Diagnostic only.
    pub variance_explained: [f64; 2],
}

impl Projection {
    /// A projection with no rows (empty snapshot).
    pub fn empty() -> Self {
        Self {
            coordinates: Vec::new(),
            variance_explained: [0.0, 0.0],
        }
    }
}

/// Principal-component reducer with fixed iteration limits.
#[derive(Debug, Clone)]
pub struct Pca {
    max_iterations: usize,
    tolerance: f64,
}

impl Default for Pca {
    fn default() -> Self {
        Self {
            max_iterations: 300,
            tolerance: 1e-10,
        }
    }
}

impl Pca {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standardize the matrix columns, then project each row onto the top
    /// two principal components.
    ///
    /// Degenerate inputs never panic: an empty matrix yields an empty
    /// projection, and a matrix whose columns are all constant (no variance
    /// anywhere) collapses every participant to the origin.
    pub fn project(&self, rows: &[Vec<f64>]) -> Projection {
        if rows.is_empty() {
            return Projection::empty();
        }
        let data = standardize_columns(rows);
        let dims = data[0].len();
        if dims == 0 {
            return Projection {
                coordinates: vec![[0.0, 0.0]; rows.len()],
                variance_explained: [0.0, 0.0],
            };
        }

        let cov = covariance(&data);
        let total_variance: f64 = (0..dims).map(|i| cov[i][i]).sum();
        if total_variance <= f64::EPSILON {
            return Projection {
                coordinates: vec![[0.0, 0.0]; rows.len()],
                variance_explained: [0.0, 0.0],
            };
        }

        let (first_value, first_axis) = self.dominant_eigenpair(&cov);
        let deflated = deflate(&cov, first_value, &first_axis);
        let (second_value, second_axis) = self.dominant_eigenpair(&deflated);

        let coordinates = data
            .iter()
            .map(|row| [dot(row, &first_axis), dot(row, &second_axis)])
            .collect();

        Projection {
            coordinates,
            variance_explained: [
                (first_value / total_variance).clamp(0.0, 1.0),
                (second_value / total_variance).clamp(0.0, 1.0),
            ],
        }
    }

    /// Largest eigenpair of a symmetric positive semi-definite matrix via
    /// power iteration.
    ///
    /// Starts along the coordinate axis with the greatest diagonal entry (the
    /// single direction already holding the most variance), which cannot be
    /// orthogonal to the dominant eigenvector unless that variance is zero.
    fn dominant_eigenpair(&self, matrix: &[Vec<f64>]) -> (f64, Vec<f64>) {
        let dims = matrix.len();
        let start = (0..dims)
            .max_by(|&a, &b| matrix[a][a].total_cmp(&matrix[b][b]))
            .unwrap_or(0);
        let mut vector = vec![0.0; dims];
        vector[start] = 1.0;

        for _ in 0..self.max_iterations {
            let product = mat_vec(matrix, &vector);
            let norm = l2_norm(&product);
            if norm <= f64::EPSILON {
                // The matrix annihilated the start direction: nothing left
                // to extract (rank exhausted after deflation).
                return (0.0, vec![0.0; dims]);
            }
            let next: Vec<f64> = product.iter().map(|x| x / norm).collect();
            let shift = vector
                .iter()
                .zip(&next)
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt();
            vector = next;
            if shift < self.tolerance {
                break;
            }
        }

        let value = rayleigh(matrix, &vector).max(0.0);
        (value, vector)
    }
}

/// Population covariance of already-centered data, rows × dims.
fn covariance(data: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = data.len();
    let dims = data[0].len();
    let mut cov = vec![vec![0.0; dims]; dims];
    for row in data {
        for i in 0..dims {
            for j in i..dims {
                cov[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..dims {
        for j in i..dims {
            cov[i][j] /= n as f64;
            cov[j][i] = cov[i][j];
        }
    }
    cov
}

/// Remove an extracted component: M - value * axis * axis^T.
fn deflate(matrix: &[Vec<f64>], value: f64, axis: &[f64]) -> Vec<Vec<f64>> {
    let dims = matrix.len();
    let mut out = vec![vec![0.0; dims]; dims];
    for i in 0..dims {
        for j in 0..dims {
            out[i][j] = matrix[i][j] - value * axis[i] * axis[j];
        }
    }
    out
}

fn mat_vec(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix.iter().map(|row| dot(row, vector)).collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn l2_norm(vector: &[f64]) -> f64 {
    dot(vector, vector).sqrt()
}

/// Rayleigh quotient v^T M v for a unit vector v.
fn rayleigh(matrix: &[Vec<f64>], vector: &[f64]) -> f64 {
    dot(&mat_vec(matrix, vector), vector)
}
