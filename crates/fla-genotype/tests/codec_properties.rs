// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Property tests for the genotype layer:
- `encode(decode(s)) == s` for every well-formed string
- edit distance is a metric on equal-length genotypes
- every one-edge variant sits at distance exactly 1
*/

use fla_genotype::{
    decode, edit_distance, one_edge_variants, Alphabet, CellTopology, Genotype, Operation,
};
use proptest::prelude::*;

fn operation() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

/// Random genotype for a random cell of 2..=6 nodes
fn genotype() -> impl Strategy<Value = (CellTopology, Genotype)> {
    (2usize..=6).prop_flat_map(|nodes| {
        let topology = CellTopology::new(nodes).unwrap();
        prop::collection::vec(operation(), topology.edge_count())
            .prop_map(move |edges| (topology, Genotype::new(edges)))
    })
}

fn benchmark_genotype() -> impl Strategy<Value = Genotype> {
    prop::collection::vec(operation(), 6).prop_map(Genotype::new)
}

proptest! {
    #[test]
    fn string_form_is_lossless((topology, genotype) in genotype()) {
        let arch = topology.encode(genotype.edges()).unwrap();
        let decoded = topology.decode(&arch).unwrap();
        prop_assert_eq!(&decoded, &genotype);
        prop_assert_eq!(topology.encode(decoded.edges()).unwrap(), arch);
    }

    #[test]
    fn edit_distance_is_a_metric(
        a in benchmark_genotype(),
        b in benchmark_genotype(),
        c in benchmark_genotype(),
    ) {
        let topology = CellTopology::NATS_BENCH;
        let (sa, sb, sc) = (
            topology.encode(a.edges()).unwrap(),
            topology.encode(b.edges()).unwrap(),
            topology.encode(c.edges()).unwrap(),
        );
        let ab = edit_distance(&sa, &sb).unwrap();
        prop_assert_eq!(ab, edit_distance(&sb, &sa).unwrap());
        prop_assert_eq!(ab == 0, a == b);
        let ac = edit_distance(&sa, &sc).unwrap();
        let bc = edit_distance(&sb, &sc).unwrap();
        prop_assert!(ac <= ab + bc);
    }

    #[test]
    fn variants_are_one_edge_away(genotype in benchmark_genotype()) {
        let alphabet = Alphabet::full();
        let variants = one_edge_variants(&genotype, &alphabet);
        prop_assert_eq!(variants.len(), genotype.len() * (alphabet.len() - 1));
        for variant in &variants {
            prop_assert_eq!(variant.hamming(&genotype).unwrap(), 1);
            // symmetric: the base is a variant of each of its variants
            prop_assert!(one_edge_variants(variant, &alphabet).contains(&genotype));
        }
    }
}

#[test]
fn decode_accepts_benchmark_example() {
    let arch = "|avg_pool_3x3~0|+|nor_conv_1x1~0|skip_connect~1|+|nor_conv_1x1~0|skip_connect~1|skip_connect~2|";
    let genotype = decode(arch).unwrap();
    assert_eq!(genotype.len(), 6);
    assert_eq!(genotype.edges()[0], Operation::AvgPool3x3);
}
