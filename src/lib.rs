// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # FLA - Fitness Landscape Analysis
//!
//! Structural analysis of cell-based neural architecture search spaces: each
//! architecture is a sequence of categorical edge operations, two
//! architectures are neighbors when they differ in exactly one edge, and a
//! caller-supplied fitness vector (e.g. test accuracy) turns that graph into a
//! landscape.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fla::prelude::*;
//!
//! let archs = vec![
//!     "|none~0|+|none~0|none~1|+|none~0|none~1|none~2|".to_string(),
//!     "|skip_connect~0|+|none~0|none~1|+|none~0|none~1|none~2|".to_string(),
//! ];
//! let fitness = vec![71.2, 74.9];
//!
//! let index = LandscapeIndex::from_architectures(archs)?;
//! let analyzer = LandscapeAnalyzer::new(&index, &fitness)?;
//!
//! let maxima = analyzer.local_maxima()?;
//! let weak = analyzer.weak_basins_of_maxima(None)?;
//! let strong = analyzer.strong_basins(&weak);
//! # Ok::<(), LandscapeError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: fla-config, fla-observability              │
//! │  (TOML + env + CLI config, tracing subscribers)         │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Genotype: fla-genotype                                 │
//! │  (Operation, Alphabet, CellTopology, edit distance)     │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Algorithms: fla-landscape                              │
//! │  (LandscapeIndex, LandscapeAnalyzer, stats)             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Feature Flags
//!
//! - **`parallel`** (default): rayon-parallel passes in `fla-landscape`
//!
//! ## License
//!
//! Apache-2.0

pub use fla_config as config;
pub use fla_genotype as genotype;
pub use fla_landscape as landscape;
pub use fla_observability as observability;

use fla_config::FlaConfig;
use fla_landscape::{AnalysisOptions, Dataset, LandscapeIndex, LandscapeResult, WalkSampling};
use fla_observability::{LogFormat, LoggingConfig};

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use fla_genotype::{
        decode, edit_distance, encode, one_edge_variants, Alphabet, CellTopology, Genotype,
        GenotypeError, Operation,
    };
    pub use fla_landscape::{
        AnalysisOptions, ArchId, BasinMap, Dataset, LandscapeAnalyzer, LandscapeError,
        LandscapeIndex, LandscapeResult, LandscapeSummary, VisitTracker, WalkSampling,
    };
}

/// Analysis options described by a loaded configuration
pub fn analysis_options(config: &FlaConfig) -> AnalysisOptions {
    AnalysisOptions {
        sampling: WalkSampling {
            trials: config.sampling.trials,
            walk_length: config.sampling.walk_length,
            seed: config.sampling.seed,
        },
        max_peaks: config.basins.peak_cap(),
        lags: config.sampling.lags.clone(),
    }
}

/// Logger settings described by a loaded configuration
pub fn logging_config(config: &FlaConfig) -> LoggingConfig {
    LoggingConfig {
        level: config.logging.level.clone(),
        format: if config.logging.json {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        directory: config.logging.directory.clone(),
        retention_days: config.logging.retention_days,
        retention_runs: config.logging.retention_runs,
    }
}

/// Index a dataset with the configured topology and alphabet
pub fn build_index(dataset: &Dataset, config: &FlaConfig) -> LandscapeResult<LandscapeIndex> {
    dataset.validate()?;
    LandscapeIndex::build(
        dataset.architectures.iter().cloned(),
        config.landscape.topology()?,
        config.landscape.alphabet()?,
    )
}
