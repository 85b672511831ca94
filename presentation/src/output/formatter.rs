//! Output formatter trait

use insight_domain::AnalysisResult;

/// Trait for formatting analysis results
pub trait OutputFormatter {
    /// Format the complete analysis result
    fn format(&self, result: &AnalysisResult) -> String;

    /// Format as JSON
    fn format_json(&self, result: &AnalysisResult) -> String;

    /// Format the headline numbers only (concise output)
    fn format_summary(&self, result: &AnalysisResult) -> String;
}
