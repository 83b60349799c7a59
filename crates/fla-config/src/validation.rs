// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! All violations are collected and reported together in a single
//! `ConfigError::ValidationError`.

use crate::{ConfigError, ConfigResult, FlaConfig};
use std::collections::BTreeSet;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    OutOfRange { field: String, reason: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { field, reason } => {
                write!(f, "{} is out of range: {}", field, reason)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every violation
pub fn validate_config(config: &FlaConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_landscape(config, &mut errors);
    validate_sampling(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_landscape(config: &FlaConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.landscape.nodes < 2 {
        errors.push(ConfigValidationError::OutOfRange {
            field: "landscape.nodes".to_string(),
            reason: format!("a cell needs at least 2 nodes, got {}", config.landscape.nodes),
        });
    }

    match config.landscape.alphabet() {
        Err(err) => errors.push(ConfigValidationError::InvalidValue {
            field: "landscape.alphabet".to_string(),
            reason: err.to_string(),
        }),
        Ok(alphabet) if alphabet.len() < 2 => {
            errors.push(ConfigValidationError::InvalidValue {
                field: "landscape.alphabet".to_string(),
                reason: "at least 2 distinct operations are needed to form neighbors"
                    .to_string(),
            })
        }
        Ok(_) => {}
    }
}

fn validate_sampling(config: &FlaConfig, errors: &mut Vec<ConfigValidationError>) {
    let sampling = &config.sampling;
    if sampling.trials == 0 {
        errors.push(ConfigValidationError::OutOfRange {
            field: "sampling.trials".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if sampling.walk_length < 2 {
        errors.push(ConfigValidationError::OutOfRange {
            field: "sampling.walk_length".to_string(),
            reason: format!("must be at least 2, got {}", sampling.walk_length),
        });
    }
    let too_long: BTreeSet<usize> = sampling
        .lags
        .iter()
        .copied()
        .filter(|&lag| lag >= sampling.walk_length)
        .collect();
    if !too_long.is_empty() {
        errors.push(ConfigValidationError::OutOfRange {
            field: "sampling.lags".to_string(),
            reason: format!(
                "lags {:?} must be smaller than walk_length {}",
                too_long, sampling.walk_length
            ),
        });
    }
}

fn validate_logging(config: &FlaConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!(
                "'{}' is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
    // the run folder being written counts as the newest run
    if config.logging.retention_runs == 0 {
        errors.push(ConfigValidationError::OutOfRange {
            field: "logging.retention_runs".to_string(),
            reason: "must keep at least 1 run".to_string(),
        });
    }
    if config.logging.retention_days == 0 {
        errors.push(ConfigValidationError::OutOfRange {
            field: "logging.retention_days".to_string(),
            reason: "must be at least 1 day".to_string(),
        });
    }
}
