// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Each struct maps to a section of `fla_configuration.toml`. Every field has a
//! default, so a partial (or empty) file is valid.

use fla_genotype::{Alphabet, CellTopology, GenotypeResult, Operation};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlaConfig {
    pub landscape: LandscapeConfig,
    pub sampling: SamplingConfig,
    pub basins: BasinsConfig,
    pub runtime: RuntimeConfig,
    pub logging: LoggingConfig,
}

/// Search space shape
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LandscapeConfig {
    /// Nodes per cell; edges = nodes * (nodes - 1) / 2
    pub nodes: usize,
    /// Operation names allowed when generating neighbors
    pub alphabet: Vec<String>,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            nodes: CellTopology::NATS_BENCH.nodes(),
            alphabet: Operation::ALL.iter().map(|op| op.as_str().to_string()).collect(),
        }
    }
}

impl LandscapeConfig {
    pub fn topology(&self) -> GenotypeResult<CellTopology> {
        CellTopology::new(self.nodes)
    }

    pub fn alphabet(&self) -> GenotypeResult<Alphabet> {
        Alphabet::from_names(&self.alphabet)
    }
}

/// Random-walk sampling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub trials: usize,
    pub walk_length: usize,
    pub seed: u64,
    /// Lags reported in the autocorrelation table
    pub lags: Vec<usize>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            trials: 200,
            walk_length: 100,
            seed: 0,
            lags: vec![1, 2, 4, 8, 16],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BasinsConfig {
    /// Fittest local maxima used for basins (0 = all)
    pub max_peaks: usize,
}

impl BasinsConfig {
    pub fn peak_cap(&self) -> Option<usize> {
        (self.max_peaks > 0).then_some(self.max_peaks)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Worker threads (0 = one per core)
    pub threads: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error
    pub level: String,
    /// JSON console output instead of text
    pub json: bool,
    /// Root of per-run log folders; file logging is off when unset
    pub directory: Option<PathBuf>,
    pub retention_days: u64,
    pub retention_runs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            directory: None,
            retention_days: 7,
            retention_runs: 10,
        }
    }
}
