//! Named phases of one analysis run, for progress reporting.

use std::fmt;

/// The pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisPhase {
    /// Checking the snapshot against the readiness thresholds.
    Readiness,
    /// Building the dense participant-by-statement vote matrix.
    Matrix,
    /// Standardizing and projecting the matrix to two dimensions.
    Projection,
    /// Searching for and assigning opinion groups.
    Grouping,
    /// Classifying statements as consensus, bridge or divisive.
    Classification,
}

impl AnalysisPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readiness => "readiness",
            Self::Matrix => "matrix",
            Self::Projection => "projection",
            Self::Grouping => "grouping",
            Self::Classification => "classification",
        }
    }

    /// All phases in the order the pipeline runs them.
    pub fn all() -> [AnalysisPhase; 5] {
        [
            Self::Readiness,
            Self::Matrix,
            Self::Projection,
            Self::Grouping,
            Self::Classification,
        ]
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_as_str() {
        for phase in AnalysisPhase::all() {
            assert_eq!(phase.to_string(), phase.as_str());
        }
    }

    #[test]
    fn test_order_is_pipeline_order() {
        let phases = AnalysisPhase::all();
        assert_eq!(phases[0], AnalysisPhase::Readiness);
        assert_eq!(phases[4], AnalysisPhase::Classification);
    }
}
