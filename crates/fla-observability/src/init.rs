// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console-only logging, or console plus per-run JSON log files with
//! retention by age and by run count.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use std::path::{Path, PathBuf};
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};
use crate::{crate_target, LOGGING_CRATES};

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Keeps the non-blocking file writers alive; logs are flushed on drop
pub struct LoggingGuard {
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving log files, if file logging is on
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(false)
        .with_line_number(false);
    match format {
        LogFormat::Text => layer.with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
    }
}

/// Install a stderr subscriber
pub fn init_console_logging(
    debug_flags: &CrateDebugFlags,
    config: &LoggingConfig,
) -> Result<LoggingGuard> {
    let filter = EnvFilter::try_new(debug_flags.to_filter_string(&config.level))
        .context("Invalid log filter")?;

    Registry::default()
        .with(console_layer(config.format, filter))
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(LoggingGuard {
        _file_guards: Vec::new(),
        log_dir: None,
    })
}

/// Install a subscriber with console output and file output
///
/// Creates a timestamped folder structure:
/// ```text
/// <directory>/
///   └── run_20250101_120000/
///       ├── fla-landscape.log
///       ├── landscape-report.log
///       ├── ...
///       └── fla.log (combined)
/// ```
///
/// `directory` defaults to `./logs`.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    let base_log_dir = config
        .directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("./logs"));
    let run_folder = create_run_folder(&base_log_dir)?;
    cleanup_old_logs(&base_log_dir, config.retention_days, config.retention_runs)?;

    let filter_string = debug_flags.to_filter_string(&config.level);
    let env_filter = EnvFilter::try_new(&filter_string).context("Invalid log filter")?;

    let mut layers = vec![console_layer(config.format, env_filter)];
    let mut file_guards = Vec::new();

    // One file per logging crate, each at debug for its own target
    for crate_name in LOGGING_CRATES {
        let file_appender = rolling::daily(&run_folder, format!("{}.log", crate_name));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        file_guards.push(guard);

        let crate_filter = EnvFilter::try_new(format!("{}=debug,off", crate_target(crate_name)))
            .context("Invalid crate log filter")?;
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(crate_filter)
                .boxed(),
        );
    }

    let combined_appender = rolling::daily(&run_folder, "fla.log");
    let (combined_non_blocking, combined_guard) = tracing_appender::non_blocking(combined_appender);
    file_guards.push(combined_guard);
    layers.push(
        tracing_subscriber::fmt::layer()
            .with_writer(combined_non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(EnvFilter::try_new(&filter_string).context("Invalid log filter")?)
            .boxed(),
    );

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(LoggingGuard {
        _file_guards: file_guards,
        log_dir: Some(run_folder),
    })
}

/// Create `<base>/run_YYYYMMDD_HHMMSS`
pub(crate) fn create_run_folder(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = Utc::now().format(RUN_TIMESTAMP);
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

/// Remove run folders older than `retention_days`, then keep only the newest
/// `retention_runs`. Folders whose names don't parse as runs are left alone.
pub fn cleanup_old_logs(
    base_log_dir: &Path,
    retention_days: u64,
    retention_runs: usize,
) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let cutoff = Utc::now().naive_utc() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let started = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_prefix(RUN_PREFIX))
            .and_then(|stamp| NaiveDateTime::parse_from_str(stamp, RUN_TIMESTAMP).ok());
        if let Some(started) = started {
            runs.push((path, started));
        }
    }

    // newest first
    runs.sort_by(|a, b| b.1.cmp(&a.1));

    for (position, (path, started)) in runs.iter().enumerate() {
        if *started < cutoff || position >= retention_runs {
            if let Err(e) = std::fs::remove_dir_all(path) {
                eprintln!(
                    "Warning: Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    Ok(())
}
