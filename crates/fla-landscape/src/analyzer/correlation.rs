// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fitness-distance correlation against the global optimum.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LandscapeAnalyzer;
use crate::stats;
use crate::types::{ArchId, LandscapeResult};

/// Correlations between fitness and edit distance to the optimum.
///
/// `None` means the correlation is undefined (a constant series).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessDistanceCorrelation {
    pub optimum: ArchId,
    pub pearson: Option<f64>,
    pub spearman: Option<f64>,
    pub kendall: Option<f64>,
}

impl LandscapeAnalyzer<'_> {
    /// Distance of every id to the global optimum, as floats for correlation
    fn distances_to_optimum(&self) -> LandscapeResult<(ArchId, Vec<f64>)> {
        let optimum = self.global_optimum();
        let distances = self
            .distance_engine()
            .distances_to(optimum)?
            .into_iter()
            .map(|d| d as f64)
            .collect();
        Ok((optimum, distances))
    }

    /// Pearson FDC
    pub fn fdc(&self) -> LandscapeResult<Option<f64>> {
        let (_, distances) = self.distances_to_optimum()?;
        Ok(stats::pearson(self.fitness, &distances))
    }

    /// Pearson, Spearman and Kendall tau-b FDC in one pass over distances
    pub fn rank_correlations(&self) -> LandscapeResult<FitnessDistanceCorrelation> {
        let (optimum, distances) = self.distances_to_optimum()?;
        let result = FitnessDistanceCorrelation {
            optimum,
            pearson: stats::pearson(self.fitness, &distances),
            spearman: stats::spearman(self.fitness, &distances),
            kendall: stats::kendall_tau_b(self.fitness, &distances),
        };
        debug!(
            "FDC against optimum {}: pearson={:?} spearman={:?} kendall={:?}",
            optimum, result.pearson, result.spearman, result.kendall
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::cube_index;
    use super::*;

    #[test]
    fn test_fitness_falls_with_distance() {
        let index = cube_index();
        // fitness = 3 - popcount(i): optimum at 0 and perfectly anti-correlated
        let fitness: Vec<f64> = (0..8u32).map(|i| 3.0 - i.count_ones() as f64).collect();
        let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();

        let fdc = analyzer.rank_correlations().unwrap();
        assert_eq!(fdc.optimum, 0);
        assert!((fdc.pearson.unwrap() + 1.0).abs() < 1e-12);
        assert!((fdc.spearman.unwrap() + 1.0).abs() < 1e-12);
        assert!((fdc.kendall.unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(analyzer.fdc().unwrap(), fdc.pearson);
    }

    #[test]
    fn test_flat_landscape_undefined() {
        let index = cube_index();
        let fitness = [5.0; 8];
        let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();
        assert_eq!(analyzer.fdc().unwrap(), None);
    }
}
