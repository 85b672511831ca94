//! Pipeline phases and the assembled analysis result.

pub mod phase;
pub mod result;

pub use phase::AnalysisPhase;
pub use result::{AnalysisMetadata, AnalysisOutcome, AnalysisResult};
