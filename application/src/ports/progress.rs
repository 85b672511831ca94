//! Progress notification port
//!
//! Defines the interface for reporting progress during an analysis run.

use insight_domain::AnalysisPhase;

/// Callback for progress updates while the pipeline executes
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.). The pipeline runs
/// on a blocking worker, so notifiers must be cheap and non-blocking.
pub trait AnalysisProgress: Send + Sync {
    /// Called when a pipeline phase starts
    fn on_phase_start(&self, phase: &AnalysisPhase);

    /// Called when a pipeline phase completes
    fn on_phase_complete(&self, phase: &AnalysisPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl AnalysisProgress for NoProgress {
    fn on_phase_start(&self, _phase: &AnalysisPhase) {}
    fn on_phase_complete(&self, _phase: &AnalysisPhase) {}
}
