mod commands;
mod logging;
mod progress;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, ReportFormat};
use copycat_core::report::{render_json, render_text};
use copycat_core::{AppConfig, DetectionEngine};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info, warn};

fn main() {
    dotenv().ok();

    let guard = logging::init_logger();

    let code = match run() {
        Ok(()) => 0,
        Err(err) => {
            error!("Error: {:#}", err);
            1
        }
    };

    // process::exit skips destructors, so flush the file writer first.
    drop(guard);
    process::exit(code);
}

fn run() -> anyhow::Result<()> {
    let config =
        copycat_core::config::load_configuration().context("Error loading configuration")?;

    let args = Cli::parse();

    match args.command {
        Some(Commands::Detect {
            root,
            threshold,
            format,
            precision,
        }) => {
            let mut config = config;
            if let Some(root) = root {
                config.root_path = root;
            }
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if let Some(precision) = precision {
                config.report_precision = precision;
            }
            run_detect(config, format)?;
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_detect(config: AppConfig, format: ReportFormat) -> anyhow::Result<()> {
    let root = Path::new(&config.root_path);
    if !root.exists() {
        fs::create_dir_all(root)
            .with_context(|| format!("creating submissions folder {}", root.display()))?;
        warn!(
            "Created submissions folder {}. Extract each submission into its own subfolder there and run again.",
            root.display()
        );
        return Ok(());
    }

    let precision = config.report_precision;
    let engine = DetectionEngine::new(config);
    let reporter = CliReporter::new();
    let result = engine.run(&reporter)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        ReportFormat::Text => render_text(&result.cases, precision, &mut out)?,
        ReportFormat::Json => render_json(&result.cases, &mut out)?,
    }
    out.flush()?;

    info!(
        "Load: {}, Compare: {}, Cluster: {}",
        format!("{:.2}s", result.load_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.compare_duration.as_secs_f64()).green(),
        format!("{:.2}s", result.cluster_duration.as_secs_f64()).green(),
    );
    info!(
        "{} submissions, {} files, {} unreadable",
        format!("{}", result.submissions).cyan(),
        format!("{}", result.total_files).cyan(),
        format!("{}", result.unreadable_files).yellow(),
    );
    info!(
        "{} similar pairs, {} cases of possible plagiarism",
        format!("{}", result.similar_pairs).red(),
        format!("{}", result.clusters).red(),
    );

    Ok(())
}
