//! Opinion-group detection.
//!
//! - [`distance`]: cosine distance between projected participants
//! - [`strategy`]: the pluggable clustering strategies and method selector
//! - [`kmeans`] / [`hierarchical`]: the concrete strategies
//! - [`silhouette`]: partition quality scoring
//! - [`assigner`]: group-count search and label normalization

pub mod assigner;
pub mod distance;
pub mod hierarchical;
pub mod kmeans;
pub mod silhouette;
pub mod strategy;

pub use assigner::{GroupAssignment, GroupAssigner, MAX_GROUPS, MIN_PARTICIPANTS};
pub use hierarchical::AverageLinkageStrategy;
pub use kmeans::KMeansStrategy;
pub use strategy::{ClusteringStrategy, GroupingMethod};
