//! Progress reporting during pipeline runs

pub mod reporter;

pub use reporter::{ProgressReporter, SimpleProgress};
