//! Dimensionality reduction: column standardization plus a 2-component
//! principal-component projection of the vote matrix.

pub mod pca;
pub mod standardize;

pub use pca::{Pca, Projection};
pub use standardize::standardize_columns;
