// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Local maxima detection.

use std::collections::BTreeSet;
use tracing::{debug, trace};

use super::LandscapeAnalyzer;
use crate::types::{ArchId, LandscapeResult};
use crate::visit::VisitTracker;

impl LandscapeAnalyzer<'_> {
    /// Ids with no realized neighbor of strictly greater fitness.
    ///
    /// Plateau members count as maxima: ties never disqualify. With the
    /// `parallel` feature every id is checked independently against the warm
    /// neighbor cache; the sequential pass prunes any neighbor strictly below
    /// the current id, since it cannot be a maximum itself.
    pub fn local_maxima(&self) -> LandscapeResult<BTreeSet<ArchId>> {
        self.index.warm_neighbor_cache()?;

        #[cfg(feature = "parallel")]
        let maxima: BTreeSet<ArchId> = {
            use rayon::prelude::*;
            let flags = (0..self.index.len())
                .into_par_iter()
                .map(|id| self.is_local_maximum(id))
                .collect::<LandscapeResult<Vec<bool>>>()?;
            flags
                .into_iter()
                .enumerate()
                .filter_map(|(id, is_maximum)| is_maximum.then_some(id))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let maxima = self.local_maxima_pruned()?;

        debug!(
            "Found {} local maxima among {} architectures",
            maxima.len(),
            self.index.len()
        );
        Ok(maxima)
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn is_local_maximum(&self, id: ArchId) -> LandscapeResult<bool> {
        let fitness = self.fitness_of(id);
        Ok(self
            .index
            .neighbors_of(id)?
            .iter()
            .all(|&neighbor| self.fitness_of(neighbor) <= fitness))
    }

    /// Single sequential sweep sharing one visit tracker
    #[cfg_attr(feature = "parallel", allow(dead_code))]
    fn local_maxima_pruned(&self) -> LandscapeResult<BTreeSet<ArchId>> {
        let mut visited = VisitTracker::new();
        let mut maxima = BTreeSet::new();
        let mut pruned = 0usize;

        for id in 0..self.index.len() {
            if !visited.mark(id) {
                continue;
            }
            let fitness = self.fitness_of(id);
            let mut is_maximum = true;
            for &neighbor in self.index.neighbors_of(id)? {
                let other = self.fitness_of(neighbor);
                if other > fitness {
                    is_maximum = false;
                } else if other < fitness && visited.mark(neighbor) {
                    pruned += 1;
                }
            }
            if is_maximum {
                maxima.insert(id);
            }
        }

        trace!("Maxima sweep pruned {} architectures", pruned);
        Ok(maxima)
    }

    /// |local maxima| / N
    pub fn modality(&self) -> LandscapeResult<f64> {
        Ok(self.local_maxima()?.len() as f64 / self.index.len() as f64)
    }
}
