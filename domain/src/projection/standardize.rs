//! Column standardization of the vote matrix.

use crate::stats;

/// Standardize each column to zero mean and unit variance.
///
/// A zero-variance column (a statement everyone scored identically) would
/// divide by zero; its standardized value is 0.0 for every row instead, which
/// removes it from the projection without disturbing the others.
pub fn standardize_columns(rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if rows.is_empty() {
        return Vec::new();
    }
    let cols = rows[0].len();
    let mut out = vec![vec![0.0; cols]; rows.len()];

    let mut column = vec![0.0; rows.len()];
    for c in 0..cols {
        for (r, row) in rows.iter().enumerate() {
            column[r] = row[c];
        }
        let mean = stats::mean(&column);
        let std_dev = stats::variance(&column).sqrt();
        if std_dev <= f64::EPSILON {
            continue; // zero-variance column stays all zeros
        }
        for (r, row) in out.iter_mut().enumerate() {
            row[c] = (column[r] - mean) / std_dev;
        }
    }

    out
}
