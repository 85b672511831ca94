//! Console output formatter for analysis results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use insight_domain::{AnalysisResult, ParticipantId, Readiness};
use std::collections::BTreeMap;

/// Formats analysis results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete analysis result
    pub fn format(result: &AnalysisResult) -> String {
        let mut output = String::new();
        let meta = &result.metadata;

        // Header
        output.push_str(&Self::header("Discussion Analysis"));
        output.push('\n');

        // Run metadata
        output.push_str(&format!(
            "{} {}\n",
            "Analyzed:".cyan().bold(),
            meta.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!(
            "{} {} across {} statements\n",
            "Participants:".cyan().bold(),
            meta.participant_count,
            meta.statement_count
        ));
        output.push_str(&format!(
            "{} {} ({}, silhouette {:.2})\n",
            "Groups:".cyan().bold(),
            meta.group_count,
            meta.method,
            meta.silhouette_score
        ));
        output.push_str(&format!(
            "{} {:.1}% + {:.1}%\n",
            "Variance explained:".cyan().bold(),
            meta.variance_explained[0] * 100.0,
            meta.variance_explained[1] * 100.0
        ));

        // Group membership
        output.push_str(&Self::section_header("Opinion Groups"));
        for (group, members) in Self::members_by_group(result).iter().enumerate() {
            let ids = members
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── Group {} ({} members) ──", group + 1, members.len())
                    .yellow()
                    .bold(),
                Self::indent(&ids, "  ")
            ));
        }

        // Statements everyone agrees on
        output.push_str(&Self::section_header("Consensus Statements"));
        if result.consensus_statements.is_empty() {
            output.push_str("\n  (none)\n");
        }
        for statement in &result.consensus_statements {
            output.push_str(&format!(
                "\n  {}  {:.0}% agreement across every group\n  {}\n",
                format!("#{}", statement.statement_id).green().bold(),
                statement.agreement_rate * 100.0,
                Self::group_rate_list(&statement.group_rates).dimmed()
            ));
        }

        // Statements that connect otherwise opposed groups
        output.push_str(&Self::section_header("Bridge Statements"));
        if result.bridge_statements.is_empty() {
            output.push_str("\n  (none)\n");
        }
        for statement in &result.bridge_statements {
            output.push_str(&format!(
                "\n  {}  mean {:.0}% across groups, spread {:.3}\n  {}\n",
                format!("#{}", statement.statement_id).cyan().bold(),
                statement.mean_agreement * 100.0,
                statement.variance,
                Self::group_rate_list(&statement.group_rates).dimmed()
            ));
        }

        // Statements that split the room
        output.push_str(&Self::section_header("Divisive Statements"));
        if result.divisive_statements.is_empty() {
            output.push_str("\n  (none)\n");
        }
        for statement in &result.divisive_statements {
            output.push_str(&format!(
                "\n  {}  controversy {:.2} ({:.0}% agree, {} substantive votes)\n",
                format!("#{}", statement.statement_id).red().bold(),
                statement.controversy,
                statement.agreement_rate * 100.0,
                statement.vote_count
            ));
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the headline numbers only (concise output)
    pub fn format_summary(result: &AnalysisResult) -> String {
        let mut output = String::new();
        let meta = &result.metadata;

        output.push_str(&format!(
            "{}\n\n",
            "=== Discussion Analysis ===".cyan().bold()
        ));

        output.push_str(&format!(
            "{} participants formed {} opinion groups ({}, silhouette {:.2})\n",
            meta.participant_count, meta.group_count, meta.method, meta.silhouette_score
        ));

        let sizes = result
            .group_sizes()
            .iter()
            .map(|size| size.to_string())
            .collect::<Vec<_>>()
            .join(" / ");
        output.push_str(&format!("{} {}\n\n", "Group sizes:".dimmed(), sizes));

        output.push_str(&format!(
            "{} {} consensus, {} bridge, {} divisive\n",
            "Statements:".bold(),
            result.consensus_statements.len(),
            result.bridge_statements.len(),
            result.divisive_statements.len()
        ));

        let strongest_consensus = result
            .consensus_statements
            .iter()
            .max_by(|a, b| a.agreement_rate.total_cmp(&b.agreement_rate));
        if let Some(statement) = strongest_consensus {
            output.push_str(&format!(
                "  strongest consensus: #{} at {:.0}% agreement\n",
                statement.statement_id,
                statement.agreement_rate * 100.0
            ));
        }

        let most_divisive = result
            .divisive_statements
            .iter()
            .max_by(|a, b| a.controversy.total_cmp(&b.controversy));
        if let Some(statement) = most_divisive {
            output.push_str(&format!(
                "  most divisive: #{} at controversy {:.2}\n",
                statement.statement_id, statement.controversy
            ));
        }

        output
    }

    /// Format a readiness verdict
    pub fn format_readiness(readiness: &Readiness) -> String {
        if readiness.ready {
            format!(
                "{} discussion has enough data for analysis\n",
                "ready:".green().bold()
            )
        } else {
            format!("{} {}\n", "not ready:".yellow().bold(), readiness.reason)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Participants of each group, indexed by group id.
    fn members_by_group(result: &AnalysisResult) -> Vec<Vec<ParticipantId>> {
        let mut groups = vec![Vec::new(); result.metadata.group_count];
        for (&participant, &label) in &result.cluster_assignments {
            if let Some(members) = groups.get_mut(label) {
                members.push(participant);
            }
        }
        groups
    }

    fn group_rate_list(rates: &BTreeMap<usize, f64>) -> String {
        rates
            .iter()
            .map(|(group, rate)| format!("Group {}: {:.0}%", group + 1, rate * 100.0))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &AnalysisResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &AnalysisResult) -> String {
        Self::format_json(result)
    }

    fn format_summary(&self, result: &AnalysisResult) -> String {
        Self::format_summary(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_domain::{
        GroupAssigner, GroupingMethod, Pca, StatementClassifier, Vote, VoteMatrix,
    };

    // Two opposed blocs plus one statement everyone agrees on, so every
    // section of the report has something to show.
    fn sample_result() -> AnalysisResult {
        let mut votes = Vec::new();
        for statement in [10, 20, 30, 40] {
            for p in 1..=4 {
                votes.push(Vote::agree(p, statement));
            }
            for p in 5..=8 {
                votes.push(Vote::disagree(p, statement));
            }
        }
        for p in 1..=8 {
            votes.push(Vote::agree(p, 50));
        }

        let matrix = VoteMatrix::from_votes(&votes);
        let projection = Pca::new().project(matrix.rows());
        let assignment = GroupAssigner::new(GroupingMethod::Hierarchical)
            .assign(&projection.coordinates)
            .unwrap();
        let classification = StatementClassifier::default().classify(&matrix, &assignment);
        AnalysisResult::new(&matrix, &assignment, classification, &projection, 5)
    }

    #[test]
    fn test_full_format_shows_groups_and_all_sections() {
        let output = ConsoleFormatter::format(&sample_result());

        assert!(output.contains("Discussion Analysis"));
        assert!(output.contains("Group 1 (4 members)"));
        assert!(output.contains("Group 2 (4 members)"));
        assert!(output.contains("Consensus Statements"));
        assert!(output.contains("Bridge Statements"));
        assert!(output.contains("Divisive Statements"));
        assert!(output.contains("#50"));
        assert!(output.contains("100% agreement"));
        assert!(output.contains("controversy 1.00"));
    }

    #[test]
    fn test_summary_counts_classified_statements() {
        let output = ConsoleFormatter::format_summary(&sample_result());

        assert!(output.contains("8 participants formed 2 opinion groups"));
        assert!(output.contains("1 consensus, 1 bridge, 4 divisive"));
        assert!(output.contains("strongest consensus: #50"));
    }

    #[test]
    fn test_json_output_round_trips() {
        let output = ConsoleFormatter::format_json(&sample_result());
        let parsed: AnalysisResult = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed.metadata.group_count, 2);
        assert_eq!(parsed.consensus_statements.len(), 1);
    }

    #[test]
    fn test_readiness_verdicts() {
        let ready = ConsoleFormatter::format_readiness(&Readiness::ready());
        assert!(ready.contains("enough data"));

        let waiting =
            ConsoleFormatter::format_readiness(&Readiness::not_ready("only 3 participants"));
        assert!(waiting.contains("only 3 participants"));
    }

    #[test]
    fn test_formatter_trait_delegates() {
        let formatter: &dyn OutputFormatter = &ConsoleFormatter;
        let output = formatter.format_json(&sample_result());
        assert!(output.starts_with('{'));
    }

    #[test]
    fn test_indent_prefixes_every_line() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
