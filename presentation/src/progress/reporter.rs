//! Progress reporting for analysis runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use insight_application::AnalysisProgress;
use insight_domain::AnalysisPhase;

/// Reports pipeline progress with a single phase bar.
///
/// The pipeline runs its phases strictly in sequence, so one bar advancing
/// from 1/5 to 5/5 tells the whole story. An abandoned bar (the run stopped
/// at readiness or failed) is cleared on drop.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(AnalysisPhase::all().len() as u64);
        bar.set_style(Self::pipeline_style());
        bar.set_prefix("Analyzing");
        Self { bar }
    }

    fn pipeline_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &AnalysisPhase) -> &'static str {
        match phase {
            AnalysisPhase::Readiness => "Phase 1: Readiness",
            AnalysisPhase::Matrix => "Phase 2: Vote Matrix",
            AnalysisPhase::Projection => "Phase 3: Projection",
            AnalysisPhase::Grouping => "Phase 4: Grouping",
            AnalysisPhase::Classification => "Phase 5: Classification",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl AnalysisProgress for ProgressReporter {
    fn on_phase_start(&self, phase: &AnalysisPhase) {
        self.bar
            .set_message(Self::phase_display_name(phase).to_string());
        self.bar.tick();
    }

    fn on_phase_complete(&self, _phase: &AnalysisPhase) {
        self.bar.inc(1);
        if self.bar.position() >= AnalysisPhase::all().len() as u64 {
            self.bar
                .finish_with_message("Analysis complete!".green().to_string());
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AnalysisProgress for SimpleProgress {
    fn on_phase_start(&self, phase: &AnalysisPhase) {
        println!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold()
        );
    }

    fn on_phase_complete(&self, phase: &AnalysisPhase) {
        println!("   {} {} done", "v".green(), phase.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_advances_through_all_phases() {
        let reporter = ProgressReporter::new();
        for phase in AnalysisPhase::all() {
            reporter.on_phase_start(&phase);
            reporter.on_phase_complete(&phase);
        }
        assert!(reporter.bar.is_finished());
    }

    #[test]
    fn test_abandoned_reporter_clears_on_drop() {
        let reporter = ProgressReporter::new();
        reporter.on_phase_start(&AnalysisPhase::Readiness);
        reporter.on_phase_complete(&AnalysisPhase::Readiness);
        assert!(!reporter.bar.is_finished());
        drop(reporter);
    }

    #[test]
    fn test_every_phase_has_a_display_name() {
        for phase in AnalysisPhase::all() {
            let name = ProgressReporter::phase_display_name(&phase);
            assert!(name.starts_with("Phase"));
        }
    }
}
