// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Landscape report driver.
//!
//! Reads a JSON dataset (`{"architectures": [...], "fitness": {"<column>": [...]}}`),
//! runs every landscape analysis for one fitness column and prints the report
//! as pretty JSON.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use serde_json::json;
use tracing::info;

use fla::config::{load_config, load_config_or_default, validate_config};
use fla::landscape::{Dataset, LandscapeAnalyzer};
use fla::observability::{debug_flags_help, init_console_logging, init_logging, parse_debug_flags};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: landscape_report --dataset <json> [options]\n\n\
         Options:\n\
         --fitness <column>    fitness column to analyze\n\
         --config <toml>       configuration file\n\
         --output <json>       write the report here\n\
         --neutral-networks    include per-network statistics\n\
         --seed N | --trials N | --walk-length N | --max-peaks N\n\n\
         Defaults:\n\
         - fitness: the dataset's only column\n\
         - config: fla_configuration.toml if found, otherwise built-in defaults\n\
         - output: stdout\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

struct Args {
    dataset: PathBuf,
    fitness: Option<String>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    neutral_networks: bool,
    overrides: HashMap<String, String>,
}

fn parse_args() -> Args {
    let mut dataset = None;
    let mut fitness = None;
    let mut config = None;
    let mut output = None;
    let mut neutral_networks = false;
    let mut overrides = HashMap::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dataset" => dataset = Some(PathBuf::from(args.next().unwrap_or_else(|| usage_and_exit()))),
            "--fitness" => fitness = Some(args.next().unwrap_or_else(|| usage_and_exit())),
            "--config" => config = Some(PathBuf::from(args.next().unwrap_or_else(|| usage_and_exit()))),
            "--output" => output = Some(PathBuf::from(args.next().unwrap_or_else(|| usage_and_exit()))),
            "--neutral-networks" => neutral_networks = true,
            "--seed" | "--trials" | "--walk-length" | "--max-peaks" => {
                let key = arg.trim_start_matches("--").replace('-', "_");
                let value = args.next().unwrap_or_else(|| usage_and_exit());
                overrides.insert(key, value);
            }
            "-h" | "--help" => usage_and_exit(),
            // consumed by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    let dataset = dataset.unwrap_or_else(|| {
        eprintln!("Missing required argument: --dataset");
        usage_and_exit()
    });

    Args {
        dataset,
        fitness,
        config,
        output,
        neutral_networks,
        overrides,
    }
}

fn select_column(dataset: &Dataset, requested: Option<String>) -> Result<String> {
    if let Some(column) = requested {
        return Ok(column);
    }
    let columns: Vec<&str> = dataset.columns().collect();
    match columns.as_slice() {
        [only] => Ok(only.to_string()),
        [] => bail!("Dataset has no fitness columns"),
        many => bail!("Dataset has several fitness columns, pick one with --fitness: {}", many.join(", ")),
    }
}

#[cfg(feature = "parallel")]
fn configure_threads(threads: usize) -> Result<()> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to size the worker pool")?;
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn configure_threads(_threads: usize) -> Result<()> {
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(Some(path.as_path()), Some(&args.overrides))?,
        None => load_config_or_default(Some(&args.overrides))?,
    };
    validate_config(&config)?;

    let debug_flags = parse_debug_flags();
    let logging = fla::logging_config(&config);
    let _guard = if logging.directory.is_some() {
        init_logging(&debug_flags, &logging)?
    } else {
        init_console_logging(&debug_flags, &logging)?
    };

    configure_threads(config.runtime.threads)?;

    let raw = fs::read_to_string(&args.dataset)
        .with_context(|| format!("Failed to read dataset {}", args.dataset.display()))?;
    let dataset: Dataset = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse dataset {}", args.dataset.display()))?;
    let column = select_column(&dataset, args.fitness)?;
    let fitness = dataset.fitness(&column)?;

    info!(
        "Analyzing {} architectures on '{}' ({} trials x {} steps, seed {})",
        dataset.len(),
        column,
        config.sampling.trials,
        config.sampling.walk_length,
        config.sampling.seed
    );

    let index = fla::build_index(&dataset, &config)?;
    let analyzer = LandscapeAnalyzer::new(&index, fitness)?;
    let summary = analyzer.run_analysis(&fla::analysis_options(&config))?;

    let mut report = json!({
        "dataset": args.dataset.display().to_string(),
        "fitness_column": column,
        "summary": summary,
    });
    if args.neutral_networks {
        let networks = analyzer.neutral_networks_analysis()?;
        report["neutral_networks"] = serde_json::to_value(networks)?;
    }

    let rendered = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn main() {
    let args = parse_args();
    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
