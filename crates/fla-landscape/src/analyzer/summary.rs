// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! One-shot landscape report.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use super::walks::{correlation_length_from, AutocorrelationEstimate, WalkSampling};
use super::{FitnessDistanceCorrelation, LandscapeAnalyzer};
use crate::stats;
use crate::types::{ArchId, LandscapeResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub sampling: WalkSampling,
    /// Cap on peaks used for basins, fittest first; `None` = all local maxima
    pub max_peaks: Option<usize>,
    /// Lags reported in the autocorrelation table
    pub lags: Vec<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sampling: WalkSampling::default(),
            max_peaks: None,
            lags: vec![1, 2, 4, 8, 16],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandscapeSummary {
    pub architectures: usize,
    pub optimum: ArchId,
    pub optimum_fitness: f64,
    pub fdc: FitnessDistanceCorrelation,
    pub local_maxima: usize,
    pub modality: f64,
    pub neutral_networks: usize,
    pub largest_neutral_network: usize,
    pub sampling: WalkSampling,
    pub autocorrelation: Vec<AutocorrelationEstimate>,
    pub correlation_length: Option<f64>,
    /// Peaks whose basins were computed
    pub basin_peaks: Vec<ArchId>,
    pub mean_weak_basin_size: Option<f64>,
    /// Peaks left with a non-empty strong basin
    pub strong_basins: usize,
    pub mean_strong_basin_size: Option<f64>,
}

impl LandscapeAnalyzer<'_> {
    /// Run every analysis once and collect the scalar results
    pub fn run_analysis(&self, options: &AnalysisOptions) -> LandscapeResult<LandscapeSummary> {
        let span = debug_span!("run_analysis", architectures = self.index.len());
        let _guard = span.enter();

        self.index.warm_neighbor_cache()?;

        let fdc = self.rank_correlations()?;
        let maxima = self.local_maxima()?;
        let networks = self.neutral_networks()?;

        let autocorrelation = self.autocorrelation_table(&options.lags, &options.sampling)?;
        // the table's walks are the ones a lag-1 estimate would draw from the same seed
        let correlation_length = match autocorrelation.iter().find(|estimate| estimate.lag == 1) {
            Some(lag_one) => lag_one.mean.and_then(correlation_length_from),
            None => self.correlation_length(&options.sampling)?,
        };

        let basin_peaks = self.rank_peaks(&maxima, options.max_peaks);
        let weak = self.weak_basins(&basin_peaks)?;
        let strong = self.strong_basins(&weak);

        let weak_sizes: Vec<f64> = weak.values().map(|basin| basin.len() as f64).collect();
        let strong_sizes: Vec<f64> = strong.values().map(|basin| basin.len() as f64).collect();

        let summary = LandscapeSummary {
            architectures: self.index.len(),
            optimum: fdc.optimum,
            optimum_fitness: self.fitness_of(fdc.optimum),
            local_maxima: maxima.len(),
            modality: maxima.len() as f64 / self.index.len() as f64,
            neutral_networks: networks.len(),
            largest_neutral_network: networks.iter().map(|net| net.len()).max().unwrap_or(0),
            sampling: options.sampling,
            autocorrelation,
            correlation_length,
            basin_peaks,
            mean_weak_basin_size: stats::mean(&weak_sizes),
            strong_basins: strong.values().filter(|basin| !basin.is_empty()).count(),
            mean_strong_basin_size: stats::mean(&strong_sizes),
            fdc,
        };

        debug!(
            "Analysis complete: {} maxima, {} neutral networks, {} strong basins",
            summary.local_maxima, summary.neutral_networks, summary.strong_basins
        );
        Ok(summary)
    }
}
