// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Basins of attraction.

A weak basin is everything reachable from a peak by steps that never increase
fitness moving outward (neighbor fitness `<=` current). The peak itself is a
member. Each weak basin is an independent BFS, so basins for several peaks are
computed in parallel.

A strong basin keeps only the ids of a weak basin that no other peak's weak
basin contains. Overlapping basins can leave a peak with an empty strong basin;
that is a valid result.
*/

use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use tracing::debug;

use super::LandscapeAnalyzer;
use crate::types::{ArchId, LandscapeResult};
use crate::visit::VisitTracker;

/// Basin membership per peak id
pub type BasinMap = BTreeMap<ArchId, BTreeSet<ArchId>>;

impl LandscapeAnalyzer<'_> {
    pub fn weak_basin(&self, peak: ArchId) -> LandscapeResult<BTreeSet<ArchId>> {
        self.index.check_id(peak)?;

        let mut visited = VisitTracker::new();
        visited.mark(peak);
        let mut frontier = VecDeque::from([peak]);

        while let Some(current) = frontier.pop_front() {
            let level = self.fitness_of(current);
            for &neighbor in self.index.neighbors_of(current)? {
                if self.fitness_of(neighbor) <= level && visited.mark(neighbor) {
                    frontier.push_back(neighbor);
                }
            }
        }

        Ok(visited.iter().collect())
    }

    /// Local maxima ordered by fitness (descending), then id, capped at `k`
    pub fn top_peaks(&self, k: Option<usize>) -> LandscapeResult<Vec<ArchId>> {
        let maxima = self.local_maxima()?;
        Ok(self.rank_peaks(&maxima, k))
    }

    pub(crate) fn rank_peaks(&self, maxima: &BTreeSet<ArchId>, k: Option<usize>) -> Vec<ArchId> {
        let mut peaks: Vec<ArchId> = maxima.iter().copied().collect();
        peaks.sort_by(|&a, &b| {
            self.fitness_of(b)
                .total_cmp(&self.fitness_of(a))
                .then(a.cmp(&b))
        });
        if let Some(k) = k {
            peaks.truncate(k);
        }
        peaks
    }

    pub fn weak_basins(&self, peaks: &[ArchId]) -> LandscapeResult<BasinMap> {
        self.index.warm_neighbor_cache()?;

        #[cfg(feature = "parallel")]
        let basins = {
            use rayon::prelude::*;
            peaks
                .par_iter()
                .map(|&peak| self.weak_basin(peak).map(|basin| (peak, basin)))
                .collect::<LandscapeResult<Vec<_>>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let basins = peaks
            .iter()
            .map(|&peak| self.weak_basin(peak).map(|basin| (peak, basin)))
            .collect::<LandscapeResult<Vec<_>>>()?;

        debug!("Computed weak basins for {} peaks", basins.len());
        Ok(basins.into_iter().collect())
    }

    /// Weak basins of the local maxima, optionally only the `max_peaks` fittest
    pub fn weak_basins_of_maxima(&self, max_peaks: Option<usize>) -> LandscapeResult<BasinMap> {
        let peaks = self.top_peaks(max_peaks)?;
        self.weak_basins(&peaks)
    }

    /// Strong basins from a map of weak basins.
    ///
    /// An id stays in its peak's strong basin iff exactly one weak basin in
    /// `weak` contains it.
    pub fn strong_basins(&self, weak: &BasinMap) -> BasinMap {
        let mut membership: AHashMap<ArchId, usize> = AHashMap::new();
        for basin in weak.values() {
            for &id in basin {
                *membership.entry(id).or_insert(0) += 1;
            }
        }

        let strong: BasinMap = weak
            .iter()
            .map(|(&peak, basin)| {
                let exclusive = basin
                    .iter()
                    .copied()
                    .filter(|id| membership.get(id) == Some(&1))
                    .collect();
                (peak, exclusive)
            })
            .collect();

        debug!(
            "Strong basins: {} of {} peaks keep exclusive members",
            strong.values().filter(|basin| !basin.is_empty()).count(),
            strong.len()
        );
        strong
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::cube_index;
    use super::*;

    const TWO_PEAKS: [f64; 8] = [5.0, 1.0, 1.0, 2.0, 1.0, 2.0, 2.0, 6.0];

    #[test]
    fn test_weak_basin_includes_peak() {
        let index = cube_index();
        let analyzer = LandscapeAnalyzer::new(&index, &TWO_PEAKS).unwrap();
        assert_eq!(analyzer.weak_basin(0).unwrap(), BTreeSet::from([0, 1, 2, 4]));
        assert_eq!(
            analyzer.weak_basin(7).unwrap(),
            BTreeSet::from([1, 2, 3, 4, 5, 6, 7])
        );
    }

    #[test]
    fn test_weak_basin_crosses_plateau() {
        let index = cube_index();
        let fitness = [1.0; 8];
        let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();
        assert_eq!(analyzer.weak_basin(3).unwrap().len(), 8);
    }

    #[test]
    fn test_top_peaks_order_and_cap() {
        let index = cube_index();
        let analyzer = LandscapeAnalyzer::new(&index, &TWO_PEAKS).unwrap();
        assert_eq!(analyzer.top_peaks(None).unwrap(), vec![7, 0]);
        assert_eq!(analyzer.top_peaks(Some(1)).unwrap(), vec![7]);
        assert_eq!(analyzer.weak_basins_of_maxima(Some(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_strong_basins_remove_shared_ids() {
        let index = cube_index();
        let analyzer = LandscapeAnalyzer::new(&index, &TWO_PEAKS).unwrap();
        let weak = analyzer.weak_basins(&[0, 7]).unwrap();
        let strong = analyzer.strong_basins(&weak);
        assert_eq!(strong[&0], BTreeSet::from([0]));
        assert_eq!(strong[&7], BTreeSet::from([3, 5, 6, 7]));
    }

    #[test]
    fn test_identical_weak_basins_leave_empty_strong_basins() {
        let weak = BasinMap::from([
            (1, BTreeSet::from([1, 2, 3])),
            (2, BTreeSet::from([1, 2, 3])),
            (9, BTreeSet::from([3, 9])),
        ]);
        let index = cube_index();
        let fitness = [0.0; 8];
        let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();
        let strong = analyzer.strong_basins(&weak);
        assert!(strong[&1].is_empty());
        assert!(strong[&2].is_empty());
        assert_eq!(strong[&9], BTreeSet::from([9]));
    }

    #[test]
    fn test_unknown_peak() {
        let index = cube_index();
        let analyzer = LandscapeAnalyzer::new(&index, &TWO_PEAKS).unwrap();
        assert!(analyzer.weak_basins(&[0, 8]).is_err());
    }
}
