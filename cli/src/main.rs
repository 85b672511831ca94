//! CLI entrypoint for Agora Insight
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use insight_application::{AnalysisProgress, CheckReadinessUseCase, RunAnalysisUseCase};
use insight_domain::{AnalysisOutcome, DiscussionId};
use insight_infrastructure::{ConfigLoader, FileOutputFormat, JsonFileVoteStore, JsonlRunRecorder};
use insight_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting Agora Insight");

    // Load configuration files, then let CLI flags override them
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    file_config.validate()?;

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let mut analysis_config = file_config.to_analysis_config();
    if let Some(method) = &cli.method {
        analysis_config.method = match method.parse() {
            Ok(method) => method,
            Err(message) => bail!("{message}"),
        };
    }
    if let Some(groups) = cli.groups {
        analysis_config.fixed_group_count = Some(groups);
    }

    // === Dependency Injection ===
    // Create the infrastructure adapter (snapshot-backed vote store)
    let Some(snapshot) = cli.snapshot.clone() else {
        bail!("Snapshot path is required. Pass the discussion export as the first argument.");
    };
    let store = Arc::new(JsonFileVoteStore::new(&snapshot));

    // Explicit --discussion wins, otherwise use the id embedded in the export
    let discussion = match cli.discussion {
        Some(id) => DiscussionId::new(id),
        None => store
            .embedded_discussion()
            .await?
            .unwrap_or_else(|| DiscussionId::new(0)),
    };

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                Agora Insight - Opinion Analysis            |");
        println!("+============================================================+");
        println!();
        println!("Snapshot: {}", snapshot.display());
        println!("Discussion: {}", discussion);
        println!();
    }

    // Readiness check mode
    if cli.check {
        let use_case =
            CheckReadinessUseCase::new(Arc::clone(&store), analysis_config.readiness.clone());
        let readiness = use_case.execute(discussion).await?;
        print!("{}", ConsoleFormatter::format_readiness(&readiness));
        if !readiness.ready {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Create the use case with injected store and optional event recorder
    let record_path = cli
        .record
        .clone()
        .or_else(|| file_config.output.record_file.as_ref().map(PathBuf::from));

    let mut use_case = RunAnalysisUseCase::new(Arc::clone(&store), analysis_config);
    if let Some(path) = record_path
        && let Some(recorder) = JsonlRunRecorder::new(&path)
    {
        use_case = use_case.with_recorder(Arc::new(recorder));
    }

    // Execute with or without progress reporting
    let outcome = if cli.quiet {
        use_case.execute(discussion).await?
    } else {
        // Plain line-based progress when tracing output is interleaved
        let progress: Arc<dyn AnalysisProgress> = if cli.verbose > 0 {
            Arc::new(SimpleProgress)
        } else {
            Arc::new(ProgressReporter::new())
        };
        use_case.execute_with_progress(discussion, progress).await?
    };

    // Output results
    match outcome {
        AnalysisOutcome::Completed(result) => {
            let format = cli.output.unwrap_or(match file_config.output.format {
                Some(FileOutputFormat::Summary) => OutputFormat::Summary,
                Some(FileOutputFormat::Json) => OutputFormat::Json,
                Some(FileOutputFormat::Full) | None => OutputFormat::Full,
            });
            let output = match format {
                OutputFormat::Full => ConsoleFormatter::format(&result),
                OutputFormat::Summary => ConsoleFormatter::format_summary(&result),
                OutputFormat::Json => ConsoleFormatter::format_json(&result),
            };
            println!("{}", output);
        }
        AnalysisOutcome::NotReady(readiness) => {
            print!("{}", ConsoleFormatter::format_readiness(&readiness));
            std::process::exit(1);
        }
    }

    Ok(())
}
