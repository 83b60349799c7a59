// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Landscape Graph Property Tests

Random sub-landscapes of the 3-node cell (3 edges, full alphabet, 125
architectures): a random subset of the space is kept and given fitness drawn
from a handful of levels, so plateaus and missing neighbors are common.
Checks the structural invariants every analysis must hold regardless of input.
*/

use std::collections::BTreeSet;

use fla::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn full_three_node_space() -> Vec<String> {
    let topology = CellTopology::new(3).unwrap();
    (0..125usize)
        .map(|i| {
            let edges = vec![
                Operation::ALL[i / 25],
                Operation::ALL[(i / 5) % 5],
                Operation::ALL[i % 5],
            ];
            topology.encode(&edges).unwrap()
        })
        .collect()
}

/// (architectures, fitness) for the kept subset, at least one member
fn sub_landscape() -> impl Strategy<Value = (Vec<String>, Vec<f64>)> {
    (
        prop::collection::vec(any::<bool>(), 125),
        prop::collection::vec(0u8..5, 125),
    )
        .prop_filter_map("empty landscape", |(keep, levels)| {
            let space = full_three_node_space();
            let mut archs = Vec::new();
            let mut fitness = Vec::new();
            for i in 0..125 {
                if keep[i] {
                    archs.push(space[i].clone());
                    fitness.push(levels[i] as f64 * 0.5);
                }
            }
            (!archs.is_empty()).then_some((archs, fitness))
        })
}

fn three_node_index(archs: &[String]) -> LandscapeIndex {
    LandscapeIndex::build(
        archs.iter().cloned(),
        CellTopology::new(3).unwrap(),
        Alphabet::full(),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn neighbors_are_symmetric_and_one_edge_apart((archs, _fitness) in sub_landscape()) {
        let index = three_node_index(&archs);
        for id in 0..index.len() {
            for &n in index.neighbors_of(id).unwrap() {
                prop_assert_eq!(
                    edit_distance(index.architecture(id).unwrap(), index.architecture(n).unwrap()).unwrap(),
                    1
                );
                prop_assert!(index.neighbors_of(n).unwrap().contains(&id));
            }
        }
    }

    #[test]
    fn local_maxima_have_no_fitter_neighbor((archs, fitness) in sub_landscape()) {
        let index = three_node_index(&archs);
        let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();
        let maxima = analyzer.local_maxima().unwrap();
        for id in 0..index.len() {
            let fitter = index.neighbors_of(id).unwrap().iter().any(|&n| fitness[n] > fitness[id]);
            prop_assert_eq!(maxima.contains(&id), !fitter);
        }
    }

    #[test]
    fn neutral_networks_are_disjoint_equal_fitness_components((archs, fitness) in sub_landscape()) {
        let index = three_node_index(&archs);
        let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();
        let networks = analyzer.neutral_networks().unwrap();

        let mut seen = BTreeSet::new();
        for network in &networks {
            prop_assert!(network.len() > 1);
            let level = fitness[*network.iter().next().unwrap()];
            for &member in network {
                prop_assert_eq!(fitness[member], level);
                prop_assert!(seen.insert(member), "id {} in two networks", member);
                // maximal: no equal-fitness neighbor left outside
                for &n in index.neighbors_of(member).unwrap() {
                    if fitness[n] == level {
                        prop_assert!(network.contains(&n));
                    }
                }
            }
        }
    }

    #[test]
    fn weak_basins_follow_non_increasing_paths((archs, fitness) in sub_landscape()) {
        let index = three_node_index(&archs);
        let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();
        let weak = analyzer.weak_basins_of_maxima(None).unwrap();

        for (&peak, basin) in &weak {
            prop_assert!(basin.contains(&peak));
            for &id in basin {
                prop_assert!(fitness[id] <= fitness[peak]);
                if id != peak {
                    // reached from some basin member that is at least as fit
                    let parent = index
                        .neighbors_of(id)
                        .unwrap()
                        .iter()
                        .any(|&n| basin.contains(&n) && fitness[n] >= fitness[id]);
                    prop_assert!(parent);
                }
            }
        }

        let strong = analyzer.strong_basins(&weak);
        for (peak, basin) in &strong {
            prop_assert!(basin.is_subset(&weak[peak]));
            for (other, other_basin) in &strong {
                if peak != other {
                    prop_assert!(basin.is_disjoint(other_basin));
                }
            }
        }
    }

    #[test]
    fn walks_step_along_realized_edges((archs, fitness) in sub_landscape(), seed in any::<u64>()) {
        let index = three_node_index(&archs);
        let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let start = (seed as usize) % index.len();

        prop_assert_eq!(analyzer.random_walk(start, 1, &mut rng).unwrap(), vec![start]);

        let walk = analyzer.random_walk(start, 25, &mut rng).unwrap();
        prop_assert!(!walk.is_empty() && walk.len() <= 25);
        if !index.neighbors_of(start).unwrap().is_empty() {
            prop_assert_eq!(walk.len(), 25);
        }
        for step in walk.windows(2) {
            prop_assert!(index.neighbors_of(step[0]).unwrap().contains(&step[1]));
        }

        let series = analyzer.walk_fitness(&walk).unwrap();
        prop_assert_eq!(fla::landscape::lagged_autocorrelation(&series, 0), Some(1.0));
    }
}
