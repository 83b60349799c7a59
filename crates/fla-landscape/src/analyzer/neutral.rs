// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Neutral networks: connected components of the equal-fitness subgraph.

Discovery threads one [`VisitTracker`] through every component search so no id
is explored twice, giving O(N × degree) overall. Components of size 1 are not
networks and are dropped by [`LandscapeAnalyzer::neutral_networks`].
*/

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, trace};

use super::LandscapeAnalyzer;
use crate::types::{ArchId, LandscapeResult};
use crate::visit::VisitTracker;

/// Summary record for one neutral network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralNetworkStats {
    pub members: BTreeSet<ArchId>,
    pub size: usize,
    /// Fitness shared by every member
    pub fitness: f64,
    pub percolation_index: usize,
    /// Largest pairwise edit distance among members (0 below two members)
    pub max_edit_distance: usize,
    /// Mean pairwise edit distance among members (0 below two members)
    pub mean_edit_distance: f64,
}

impl LandscapeAnalyzer<'_> {
    /// Equal-fitness component containing `seed`, marking every member in
    /// `visited`. Returns an empty set if `seed` was already visited.
    pub fn neutral_network_from(
        &self,
        seed: ArchId,
        visited: &mut VisitTracker,
    ) -> LandscapeResult<BTreeSet<ArchId>> {
        self.index.check_id(seed)?;
        let mut component = BTreeSet::new();
        if !visited.mark(seed) {
            return Ok(component);
        }

        let level = self.fitness_of(seed);
        let mut frontier = VecDeque::from([seed]);
        component.insert(seed);

        while let Some(current) = frontier.pop_front() {
            for &neighbor in self.index.neighbors_of(current)? {
                if self.fitness_of(neighbor) == level && visited.mark(neighbor) {
                    component.insert(neighbor);
                    frontier.push_back(neighbor);
                }
            }
        }

        trace!("Neutral component from {}: {} members", seed, component.len());
        Ok(component)
    }

    /// Every neutral network of size > 1, ordered by smallest member
    pub fn neutral_networks(&self) -> LandscapeResult<Vec<BTreeSet<ArchId>>> {
        self.index.warm_neighbor_cache()?;

        let mut visited = VisitTracker::new();
        let mut networks = Vec::new();
        for id in 0..self.index.len() {
            if visited.is_visited(id) {
                continue;
            }
            let component = self.neutral_network_from(id, &mut visited)?;
            if component.len() > 1 {
                networks.push(component);
            }
        }

        debug!("Found {} neutral networks", networks.len());
        Ok(networks)
    }

    /// Distinct fitness values among realized neighbors outside the network
    pub fn percolation_index(&self, network: &BTreeSet<ArchId>) -> LandscapeResult<usize> {
        let mut levels = BTreeSet::new();
        for &member in network {
            for &neighbor in self.index.neighbors_of(member)? {
                if !network.contains(&neighbor) {
                    // +0.0 folds -0.0 into 0.0 so both count as one level
                    levels.insert((self.fitness_of(neighbor) + 0.0).to_bits());
                }
            }
        }
        Ok(levels.len())
    }

    pub fn neutral_network_stats(
        &self,
        network: &BTreeSet<ArchId>,
    ) -> LandscapeResult<NeutralNetworkStats> {
        let members: Vec<ArchId> = network.iter().copied().collect();
        for &id in &members {
            self.index.check_id(id)?;
        }

        let engine = self.distance_engine();
        let mut max_edit_distance = 0;
        let mut total = 0usize;
        let mut pairs = 0usize;
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                let distance = engine.edit_distance(a, b)?;
                max_edit_distance = max_edit_distance.max(distance);
                total += distance;
                pairs += 1;
            }
        }
        let mean_edit_distance = if pairs == 0 {
            0.0
        } else {
            total as f64 / pairs as f64
        };

        Ok(NeutralNetworkStats {
            size: members.len(),
            fitness: members.first().map_or(0.0, |&id| self.fitness_of(id)),
            percolation_index: self.percolation_index(network)?,
            max_edit_distance,
            mean_edit_distance,
            members: network.clone(),
        })
    }

    /// Discover every neutral network and report its statistics
    pub fn neutral_networks_analysis(&self) -> LandscapeResult<Vec<NeutralNetworkStats>> {
        self.neutral_networks()?
            .iter()
            .map(|network| self.neutral_network_stats(network))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::cube_index;
    use super::*;

    const FITNESS: [f64; 8] = [1.0, 1.0, 0.0, 0.5, 2.0, 2.0, 2.0, 3.0];

    #[test]
    fn test_components_ordered_by_smallest_member() {
        let index = cube_index();
        let analyzer = LandscapeAnalyzer::new(&index, &FITNESS).unwrap();
        assert_eq!(
            analyzer.neutral_networks().unwrap(),
            vec![BTreeSet::from([0, 1]), BTreeSet::from([4, 5, 6])]
        );
    }

    #[test]
    fn test_visited_seed_yields_empty_component() {
        let index = cube_index();
        let analyzer = LandscapeAnalyzer::new(&index, &FITNESS).unwrap();
        let mut visited = VisitTracker::new();

        let first = analyzer.neutral_network_from(5, &mut visited).unwrap();
        assert_eq!(first, BTreeSet::from([4, 5, 6]));
        assert!(analyzer.neutral_network_from(4, &mut visited).unwrap().is_empty());
        assert_eq!(visited.len(), 3);
    }

    #[test]
    fn test_percolation_excludes_members() {
        let index = cube_index();
        let analyzer = LandscapeAnalyzer::new(&index, &FITNESS).unwrap();
        assert_eq!(analyzer.percolation_index(&BTreeSet::from([0, 1])).unwrap(), 3);
        assert_eq!(analyzer.percolation_index(&BTreeSet::from([4, 5, 6])).unwrap(), 3);
    }

    #[test]
    fn test_network_stats() {
        let index = cube_index();
        let analyzer = LandscapeAnalyzer::new(&index, &FITNESS).unwrap();
        let stats = analyzer.neutral_networks_analysis().unwrap();
        assert_eq!(stats.len(), 2);

        let plateau = &stats[1];
        assert_eq!(plateau.size, 3);
        assert_eq!(plateau.fitness, 2.0);
        assert_eq!(plateau.max_edit_distance, 2);
        assert!((plateau.mean_edit_distance - 4.0 / 3.0).abs() < 1e-12);

        let single = analyzer.neutral_network_stats(&BTreeSet::from([3])).unwrap();
        assert_eq!(single.max_edit_distance, 0);
        assert_eq!(single.mean_edit_distance, 0.0);
    }
}
