//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted report with per-group membership
    Full,
    /// Only the headline numbers and classified statements
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for agora-insight
#[derive(Parser, Debug)]
#[command(name = "agora-insight")]
#[command(author, version, about = "Opinion analysis - cluster voters and surface consensus")]
#[command(long_about = r#"
Agora Insight clusters the participants of a discussion by how they voted
and surfaces the statements that unite or divide the resulting groups.

The analysis has five phases:
1. Readiness: Check the discussion has enough data to analyze
2. Matrix: Build the participant-by-statement vote matrix
3. Projection: Reduce each participant to 2D opinion coordinates
4. Grouping: Cluster participants into opinion groups
5. Classification: Find consensus, bridge, and divisive statements

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./agora.toml        Project-level config
3. ~/.config/agora-insight/config.toml   Global config

Example:
  agora-insight votes.json
  agora-insight votes.json --discussion 42 --output json
  agora-insight votes.json --check
"#)]
pub struct Cli {
    /// Path to the discussion snapshot (JSON export)
    pub snapshot: Option<PathBuf>,

    /// Discussion id to analyze (defaults to the id embedded in the snapshot)
    #[arg(short, long, value_name = "ID")]
    pub discussion: Option<i64>,

    /// Check readiness and exit without running the analysis
    #[arg(long)]
    pub check: bool,

    /// Clustering method (kmeans or hierarchical)
    #[arg(short, long, value_name = "METHOD")]
    pub method: Option<String>,

    /// Pin the number of opinion groups instead of searching for the best count
    #[arg(short, long, value_name = "N")]
    pub groups: Option<usize>,

    /// Output format (defaults to full, or the configured format)
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Record pipeline events to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub record: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
