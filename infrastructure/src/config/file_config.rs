//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use insight_application::AnalysisConfig;
use insight_domain::{ClassificationThresholds, GroupingMethod, MAX_GROUPS, ReadinessThresholds};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("unknown grouping method: '{0}' (expected 'hierarchical' or 'kmeans')")]
    UnknownMethod(String),

    #[error("groups must be between 2 and {MAX_GROUPS}, got {0}")]
    InvalidGroupCount(usize),

    #[error("{field} must be between 0.0 and 1.0, got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("bridge_max_variance cannot be negative, got {0}")]
    NegativeVariance(f64),
}

/// Raw analysis configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnalysisConfig {
    /// Clustering method name ("hierarchical" or "kmeans")
    pub method: String,
    /// Fixed group count; omit to search automatically
    pub groups: Option<usize>,
}

impl Default for FileAnalysisConfig {
    fn default() -> Self {
        Self {
            method: GroupingMethod::default().as_str().to_string(),
            groups: None,
        }
    }
}

impl FileAnalysisConfig {
    /// Parse the method string into a [`GroupingMethod`]
    pub fn parse_method(&self) -> GroupingMethod {
        self.method.parse().unwrap_or_default()
    }
}

/// Output format written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    Full,
    Summary,
    Json,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Preferred output format; the CLI flag wins when both are given
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
    /// Append structured run events to this JSONL file
    pub record_file: Option<String>,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
            record_file: None,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Analysis settings
    pub analysis: FileAnalysisConfig,
    /// Readiness floors (domain defaults: 7 participants, 7 statements,
    /// 50 votes, 3 votes per statement)
    pub readiness: ReadinessThresholds,
    /// Classification cutoffs (domain defaults)
    pub classification: ClassificationThresholds,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.analysis.method.parse::<GroupingMethod>().is_err() {
            return Err(ConfigValidationError::UnknownMethod(
                self.analysis.method.clone(),
            ));
        }

        if let Some(groups) = self.analysis.groups
            && !(2..=MAX_GROUPS).contains(&groups)
        {
            return Err(ConfigValidationError::InvalidGroupCount(groups));
        }

        let rates = [
            ("consensus_min_overall", self.classification.consensus_min_overall),
            ("consensus_min_group", self.classification.consensus_min_group),
            ("bridge_min_mean", self.classification.bridge_min_mean),
            ("divisive_min_score", self.classification.divisive_min_score),
        ];
        for (field, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::RateOutOfRange { field, value });
            }
        }

        if self.classification.bridge_max_variance < 0.0 {
            return Err(ConfigValidationError::NegativeVariance(
                self.classification.bridge_max_variance,
            ));
        }

        Ok(())
    }

    /// Bridge the raw file values into the application-layer config
    pub fn to_analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            readiness: self.readiness.clone(),
            classification: self.classification,
            method: self.analysis.parse_method(),
            fixed_group_count: self.analysis.groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[analysis]
method = "kmeans"
groups = 3

[readiness]
min_participants = 10
min_total_votes = 80

[classification]
consensus_min_overall = 0.75

[output]
format = "json"
color = false
record_file = "runs.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.parse_method(), GroupingMethod::KMeans);
        assert_eq!(config.analysis.groups, Some(3));
        assert_eq!(config.readiness.min_participants, 10);
        assert_eq!(config.readiness.min_total_votes, 80);
        assert_eq!(config.classification.consensus_min_overall, 0.75);
        assert_eq!(config.output.format, Some(FileOutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(config.output.record_file.as_deref(), Some("runs.jsonl"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[analysis]
method = "kmeans"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.parse_method(), GroupingMethod::KMeans);
        // Defaults should apply
        assert_eq!(config.readiness.min_participants, 7);
        assert_eq!(config.readiness.min_votes_per_statement, 3);
        assert_eq!(config.classification.consensus_min_group, 0.60);
        assert!(config.output.color);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.analysis.method, "hierarchical");
        assert!(config.analysis.groups.is_none());
        assert_eq!(config.readiness.min_total_votes, 50);
        assert!(config.output.format.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_method() {
        let toml_str = r#"
[analysis]
method = "spectral"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_validate_group_count_bounds() {
        let toml_str = r#"
[analysis]
groups = 1
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidGroupCount(1))
        ));
    }

    #[test]
    fn test_validate_rate_out_of_range() {
        let toml_str = r#"
[classification]
consensus_min_overall = 1.5
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::RateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_to_analysis_config() {
        let toml_str = r#"
[analysis]
method = "kmeans"
groups = 4

[readiness]
min_participants = 12
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let analysis = config.to_analysis_config();
        assert_eq!(analysis.method, GroupingMethod::KMeans);
        assert_eq!(analysis.fixed_group_count, Some(4));
        assert_eq!(analysis.readiness.min_participants, 12);
        assert_eq!(analysis.readiness.min_statements, 7);
    }
}
