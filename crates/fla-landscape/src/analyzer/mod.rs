// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Landscape Analyzer - graph algorithms over the implicit neighbor graph.

The analyzer borrows an immutable [`LandscapeIndex`] and a fitness vector
aligned with it. Every method is a pure function of those plus its explicit
arguments; the random-walk methods additionally consume a caller-supplied RNG
stream. Independent analyses may run concurrently over the same analyzer.

## Submodules

- `correlation` - fitness-distance and rank correlations
- `maxima` - local maxima and modality
- `neutral` - neutral networks, percolation index, per-network statistics
- `basins` - weak and strong basins of attraction
- `walks` - random walks, autocorrelation, correlation length
- `summary` - one-shot report over all of the above
*/

pub mod basins;
pub mod correlation;
pub mod maxima;
pub mod neutral;
pub mod summary;
pub mod walks;

use crate::distance::DistanceEngine;
use crate::index::LandscapeIndex;
use crate::types::{ArchId, LandscapeError, LandscapeResult};

pub use correlation::FitnessDistanceCorrelation;
pub use neutral::NeutralNetworkStats;
pub use summary::{AnalysisOptions, LandscapeSummary};
pub use walks::{
    correlation_length_from, lagged_autocorrelation, AutocorrelationEstimate, WalkSampling,
};

pub struct LandscapeAnalyzer<'a> {
    index: &'a LandscapeIndex,
    fitness: &'a [f64],
}

impl<'a> LandscapeAnalyzer<'a> {
    /// # Errors
    ///
    /// - `EmptyDataset` if the index holds no architectures
    /// - `FitnessLengthMismatch` if `fitness` is not aligned 1:1 with the index
    /// - `NonFiniteFitness` on NaN or infinite values, which would break the
    ///   equality and ordering predicates every traversal relies on
    pub fn new(index: &'a LandscapeIndex, fitness: &'a [f64]) -> LandscapeResult<Self> {
        if index.is_empty() {
            return Err(LandscapeError::EmptyDataset);
        }
        if fitness.len() != index.len() {
            return Err(LandscapeError::FitnessLengthMismatch {
                expected: index.len(),
                actual: fitness.len(),
            });
        }
        if let Some((id, &value)) = fitness.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(LandscapeError::NonFiniteFitness { id, value });
        }
        Ok(Self { index, fitness })
    }

    pub fn index(&self) -> &'a LandscapeIndex {
        self.index
    }

    pub fn fitness(&self) -> &'a [f64] {
        self.fitness
    }

    pub fn distance_engine(&self) -> DistanceEngine<'a> {
        DistanceEngine::new(self.index)
    }

    /// First id attaining the maximum fitness
    pub fn global_optimum(&self) -> ArchId {
        let mut best = 0;
        for (id, &value) in self.fitness.iter().enumerate().skip(1) {
            if value > self.fitness[best] {
                best = id;
            }
        }
        best
    }

    #[inline]
    fn fitness_of(&self, id: ArchId) -> f64 {
        self.fitness[id]
    }
}
