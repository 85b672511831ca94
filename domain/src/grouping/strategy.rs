//! Pluggable clustering strategy.
//!
//! The group assigner drives a search loop over candidate group counts; the
//! algorithm that actually partitions the points sits behind
//! [`ClusteringStrategy`] so the method name recorded in run metadata always
//! comes from the code that ran, never from a hard-coded label.

use crate::core::error::GroupingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clustering algorithm that can partition projected points.
pub trait ClusteringStrategy: Send + Sync {
    /// Method name recorded in analysis metadata.
    fn name(&self) -> &'static str;

    /// Partition `points` into exactly `k` non-empty groups.
    ///
    /// Returns one label in `0..k` per point, in point order. Implementations
    /// must be deterministic and must fail with a typed error rather than
    /// return a partition with empty groups.
    fn cluster(&self, points: &[[f64; 2]], k: usize) -> Result<Vec<usize>, GroupingError>;
}

/// Which clustering algorithm the group assigner uses.
///
/// # Example
///
/// ```
/// use insight_domain::GroupingMethod;
///
/// let method: GroupingMethod = "kmeans".parse().unwrap();
/// assert_eq!(method, GroupingMethod::KMeans);
/// assert_eq!(GroupingMethod::default().as_str(), "hierarchical");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMethod {
    /// Agglomerative clustering with average linkage.
    #[default]
    Hierarchical,
    /// Lloyd's k-means with deterministic seeding.
    KMeans,
}

impl GroupingMethod {
    /// Canonical method name, also used in metadata and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupingMethod::Hierarchical => "hierarchical",
            GroupingMethod::KMeans => "kmeans",
        }
    }

    /// Instantiate the strategy object for this method.
    pub fn strategy(self) -> Box<dyn ClusteringStrategy> {
        match self {
            GroupingMethod::Hierarchical => {
                Box::new(crate::grouping::hierarchical::AverageLinkageStrategy::new())
            }
            GroupingMethod::KMeans => Box::new(crate::grouping::kmeans::KMeansStrategy::new()),
        }
    }
}

impl fmt::Display for GroupingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GroupingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hierarchical" | "average" | "average-linkage" => Ok(GroupingMethod::Hierarchical),
            "kmeans" | "k-means" => Ok(GroupingMethod::KMeans),
            other => Err(format!(
                "unknown grouping method: '{other}' (expected 'hierarchical' or 'kmeans')"
            )),
        }
    }
}
