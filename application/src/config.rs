//! Application-level configuration.
//!
//! This module provides the configuration type that controls how one
//! analysis run behaves: readiness floors, classification cutoffs and the
//! clustering method.

use insight_domain::{ClassificationThresholds, GroupingMethod, ReadinessThresholds};

/// Analysis run configuration.
///
/// Carries every knob the pipeline reads. The defaults match the platform
/// production settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisConfig {
    /// Floors the snapshot must clear before analysis runs.
    pub readiness: ReadinessThresholds,
    /// Cutoffs for the consensus, bridge and divisive passes.
    pub classification: ClassificationThresholds,
    /// Clustering strategy used by the group assigner.
    pub method: GroupingMethod,
    /// Skip the automatic group-count search and use this count.
    pub fixed_group_count: Option<usize>,
}

impl AnalysisConfig {
    /// Configuration with a pinned group count.
    ///
    /// Skipping the automatic search makes run latency predictable.
    pub fn with_fixed_group_count(mut self, group_count: usize) -> Self {
        self.fixed_group_count = Some(group_count);
        self
    }

    /// Configuration with an explicit clustering method.
    pub fn with_method(mut self, method: GroupingMethod) -> Self {
        self.method = method;
        self
    }

    /// Configuration with custom readiness floors.
    pub fn with_readiness(mut self, readiness: ReadinessThresholds) -> Self {
        self.readiness = readiness;
        self
    }
}
