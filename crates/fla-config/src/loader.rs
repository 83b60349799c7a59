// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, FlaConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "fla_configuration.toml";

/// Find the configuration file
///
/// Search order:
/// 1. `FLA_CONFIG_PATH` environment variable
/// 2. Current working directory: `./fla_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("FLA_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by FLA_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|path| path.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet FLA_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from a TOML file, then apply overrides
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found or contains invalid TOML
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FlaConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: FlaConfig = toml::from_str(&content)?;

    apply_overrides(&mut config, cli_args);
    Ok(config)
}

/// Like [`load_config`] with no explicit path, but falls back to built-in
/// defaults when no file is found. Overrides still apply.
pub fn load_config_or_default(
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FlaConfig> {
    match find_config_file() {
        Ok(path) => load_config(Some(&path), cli_args),
        Err(ConfigError::FileNotFound(_)) => {
            let mut config = FlaConfig::default();
            apply_overrides(&mut config, cli_args);
            Ok(config)
        }
        Err(err) => Err(err),
    }
}

fn apply_overrides(config: &mut FlaConfig, cli_args: Option<&HashMap<String, String>>) {
    apply_environment_overrides(config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(config, cli);
    }
}

fn parse_list<T: std::str::FromStr>(value: &str) -> Option<Vec<T>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().ok())
        .collect()
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `FLA_TRIALS` -> `sampling.trials`
/// - `FLA_WALK_LENGTH` -> `sampling.walk_length`
/// - `FLA_SEED` -> `sampling.seed`
/// - `FLA_MAX_PEAKS` -> `basins.max_peaks`
/// - `FLA_THREADS` -> `runtime.threads`
/// - `FLA_LOG_LEVEL` -> `logging.level`
/// - `FLA_ALPHABET` -> `landscape.alphabet` (comma separated)
///
/// Unparseable numeric values are ignored.
pub fn apply_environment_overrides(config: &mut FlaConfig) {
    if let Ok(value) = env::var("FLA_TRIALS") {
        if let Ok(trials) = value.parse::<usize>() {
            config.sampling.trials = trials;
        }
    }
    if let Ok(value) = env::var("FLA_WALK_LENGTH") {
        if let Ok(walk_length) = value.parse::<usize>() {
            config.sampling.walk_length = walk_length;
        }
    }
    if let Ok(value) = env::var("FLA_SEED") {
        if let Ok(seed) = value.parse::<u64>() {
            config.sampling.seed = seed;
        }
    }
    if let Ok(value) = env::var("FLA_MAX_PEAKS") {
        if let Ok(max_peaks) = value.parse::<usize>() {
            config.basins.max_peaks = max_peaks;
        }
    }
    if let Ok(value) = env::var("FLA_THREADS") {
        if let Ok(threads) = value.parse::<usize>() {
            config.runtime.threads = threads;
        }
    }
    if let Ok(value) = env::var("FLA_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("FLA_ALPHABET") {
        if let Some(names) = parse_list::<String>(&value) {
            config.landscape.alphabet = names;
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - CLI arguments keyed by field, e.g. `{"trials": "50", "seed": "7"}`
pub fn apply_cli_overrides(config: &mut FlaConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("trials") {
        if let Ok(trials) = value.parse::<usize>() {
            config.sampling.trials = trials;
        }
    }
    if let Some(value) = cli_args.get("walk_length") {
        if let Ok(walk_length) = value.parse::<usize>() {
            config.sampling.walk_length = walk_length;
        }
    }
    if let Some(value) = cli_args.get("seed") {
        if let Ok(seed) = value.parse::<u64>() {
            config.sampling.seed = seed;
        }
    }
    if let Some(value) = cli_args.get("lags") {
        if let Some(lags) = parse_list::<usize>(value) {
            config.sampling.lags = lags;
        }
    }
    if let Some(value) = cli_args.get("max_peaks") {
        if let Ok(max_peaks) = value.parse::<usize>() {
            config.basins.max_peaks = max_peaks;
        }
    }
    if let Some(value) = cli_args.get("threads") {
        if let Ok(threads) = value.parse::<usize>() {
            config.runtime.threads = threads;
        }
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_json") {
        config.logging.json = value.to_lowercase() == "true" || value == "1";
    }
    if let Some(value) = cli_args.get("log_dir") {
        config.logging.directory = Some(PathBuf::from(value));
    }
}
