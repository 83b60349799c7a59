// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Random walks and fitness autocorrelation.

A walk moves to a uniformly random realized neighbor at every step and may
revisit ids. The lag-`L` autocorrelation of one walk is the Pearson correlation
of its fitness series `[0, len-L)` against `[L, len)`; the estimate averages it
over independent walks from uniformly random starts.

Every seeded entry point draws from `StdRng::seed_from_u64(seed)` and echoes
the seed in its result, so a reported estimate can be reproduced.
*/

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LandscapeAnalyzer;
use crate::stats;
use crate::types::{ArchId, LandscapeError, LandscapeResult};

/// Sampling parameters for walk-based estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkSampling {
    pub trials: usize,
    pub walk_length: usize,
    pub seed: u64,
}

impl Default for WalkSampling {
    fn default() -> Self {
        Self {
            trials: 200,
            walk_length: 100,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocorrelationEstimate {
    pub lag: usize,
    pub trials: usize,
    pub walk_length: usize,
    /// Walks whose lagged correlation was defined
    pub valid_trials: usize,
    /// Mean over valid walks; `None` if no walk was valid
    pub mean: Option<f64>,
    /// Seed of the generator, if the estimate was seeded here
    pub seed: Option<u64>,
}

/// Pearson correlation of `series` against itself shifted by `lag`.
///
/// Lag 0 is exactly `1.0` for any non-empty series. `None` when the shifted
/// halves are too short or either has zero variance.
pub fn lagged_autocorrelation(series: &[f64], lag: usize) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    if lag == 0 {
        return Some(1.0);
    }
    if lag >= series.len() {
        return None;
    }
    stats::pearson(&series[..series.len() - lag], &series[lag..])
}

/// `-1 / ln r` for `r` in (0, 1), otherwise undefined
pub fn correlation_length_from(autocorrelation: f64) -> Option<f64> {
    if autocorrelation > 0.0 && autocorrelation < 1.0 {
        Some(-1.0 / autocorrelation.ln())
    } else {
        None
    }
}

fn check_sampling(trials: usize, walk_length: usize, lag: usize) -> LandscapeResult<()> {
    if trials == 0 {
        return Err(LandscapeError::InvalidParameter(
            "trials must be at least 1".to_string(),
        ));
    }
    if lag >= walk_length {
        return Err(LandscapeError::InvalidParameter(format!(
            "lag {} must be smaller than walk length {}",
            lag, walk_length
        )));
    }
    Ok(())
}

fn estimate(
    series: &[Vec<f64>],
    lag: usize,
    walk_length: usize,
    seed: Option<u64>,
) -> AutocorrelationEstimate {
    let values: Vec<f64> = series
        .iter()
        .filter_map(|walk| lagged_autocorrelation(walk, lag))
        .collect();
    AutocorrelationEstimate {
        lag,
        trials: series.len(),
        walk_length,
        valid_trials: values.len(),
        mean: stats::mean(&values),
        seed,
    }
}

impl LandscapeAnalyzer<'_> {
    /// Walk of at most `length` ids starting at `start`.
    ///
    /// Stops early at an id with no realized neighbors, returning the prefix
    /// walked so far. A length of 0 yields an empty walk.
    pub fn random_walk<R: Rng>(
        &self,
        start: ArchId,
        length: usize,
        rng: &mut R,
    ) -> LandscapeResult<Vec<ArchId>> {
        self.index.check_id(start)?;
        let mut walk = Vec::with_capacity(length);
        if length == 0 {
            return Ok(walk);
        }

        walk.push(start);
        let mut current = start;
        while walk.len() < length {
            match self.index.neighbors_of(current)?.choose(rng) {
                Some(&next) => {
                    walk.push(next);
                    current = next;
                }
                None => break,
            }
        }
        Ok(walk)
    }

    pub fn walk_fitness(&self, walk: &[ArchId]) -> LandscapeResult<Vec<f64>> {
        walk.iter()
            .map(|&id| {
                self.index.check_id(id)?;
                Ok(self.fitness_of(id))
            })
            .collect()
    }

    fn sample_walk_series<R: Rng>(
        &self,
        trials: usize,
        walk_length: usize,
        rng: &mut R,
    ) -> LandscapeResult<Vec<Vec<f64>>> {
        let mut series = Vec::with_capacity(trials);
        for _ in 0..trials {
            let start = rng.gen_range(0..self.index.len());
            let walk = self.random_walk(start, walk_length, rng)?;
            series.push(self.walk_fitness(&walk)?);
        }
        Ok(series)
    }

    /// Lag autocorrelation over `trials` walks drawn from `rng`
    pub fn autocorrelation_with_rng<R: Rng>(
        &self,
        lag: usize,
        trials: usize,
        walk_length: usize,
        rng: &mut R,
    ) -> LandscapeResult<AutocorrelationEstimate> {
        check_sampling(trials, walk_length, lag)?;
        let series = self.sample_walk_series(trials, walk_length, rng)?;
        Ok(estimate(&series, lag, walk_length, None))
    }

    pub fn autocorrelation(
        &self,
        lag: usize,
        sampling: &WalkSampling,
    ) -> LandscapeResult<AutocorrelationEstimate> {
        let mut rng = StdRng::seed_from_u64(sampling.seed);
        let mut result =
            self.autocorrelation_with_rng(lag, sampling.trials, sampling.walk_length, &mut rng)?;
        result.seed = Some(sampling.seed);
        debug!(
            "Autocorrelation lag {}: {:?} ({} of {} walks valid, seed {})",
            lag, result.mean, result.valid_trials, result.trials, sampling.seed
        );
        Ok(result)
    }

    /// One estimate per lag, all computed from the same set of walks
    pub fn autocorrelation_table(
        &self,
        lags: &[usize],
        sampling: &WalkSampling,
    ) -> LandscapeResult<Vec<AutocorrelationEstimate>> {
        for &lag in lags {
            check_sampling(sampling.trials, sampling.walk_length, lag)?;
        }
        let mut rng = StdRng::seed_from_u64(sampling.seed);
        let series = self.sample_walk_series(sampling.trials, sampling.walk_length, &mut rng)?;
        Ok(lags
            .iter()
            .map(|&lag| estimate(&series, lag, sampling.walk_length, Some(sampling.seed)))
            .collect())
    }

    /// `-1 / ln(autocorrelation at lag 1)`
    pub fn correlation_length(&self, sampling: &WalkSampling) -> LandscapeResult<Option<f64>> {
        Ok(self
            .autocorrelation(1, sampling)?
            .mean
            .and_then(correlation_length_from))
    }
}
