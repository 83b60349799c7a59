// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Full-pass landscape analyses over the complete 5^6 cell space
//!
//! Neighbor-cache warm-up is measured separately from the passes that
//! consume a warm cache.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fla_genotype::{CellTopology, Operation};
use fla_landscape::{LandscapeAnalyzer, LandscapeIndex, WalkSampling};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Every 6-edge genotype over the five operations, in lexicographic order
fn full_space() -> Vec<String> {
    let topology = CellTopology::NATS_BENCH;
    let edges = topology.edge_count();
    let total = Operation::ALL.len().pow(edges as u32);
    (0..total)
        .map(|mut i| {
            let mut ops = vec![Operation::None; edges];
            for slot in ops.iter_mut().rev() {
                *slot = Operation::ALL[i % Operation::ALL.len()];
                i /= Operation::ALL.len();
            }
            topology
                .encode(&ops)
                .expect("full space is built from valid edge sequences")
        })
        .collect()
}

/// Accuracy-like values with ties, so neutral networks exist
fn synthetic_fitness(len: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(2025);
    (0..len)
        .map(|_| (rng.gen_range(8000..9400) as f64) / 100.0)
        .collect()
}

fn bench_neighbor_cache(c: &mut Criterion) {
    let archs = full_space();
    c.bench_function("warm_neighbor_cache_15625", |b| {
        b.iter(|| {
            let index = LandscapeIndex::from_architectures(archs.iter().cloned()).unwrap();
            index.warm_neighbor_cache().unwrap();
            black_box(index.len())
        })
    });
}

fn bench_full_passes(c: &mut Criterion) {
    let index = LandscapeIndex::from_architectures(full_space()).unwrap();
    index.warm_neighbor_cache().unwrap();
    let fitness = synthetic_fitness(index.len());
    let analyzer = LandscapeAnalyzer::new(&index, &fitness).unwrap();

    let mut group = c.benchmark_group("full_pass");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("rank_correlations", |b| {
        b.iter(|| black_box(analyzer.rank_correlations().unwrap()))
    });
    group.bench_function("local_maxima", |b| {
        b.iter(|| black_box(analyzer.local_maxima().unwrap()))
    });
    group.bench_function("neutral_networks", |b| {
        b.iter(|| black_box(analyzer.neutral_networks().unwrap()))
    });
    group.bench_function("weak_basins_top_10", |b| {
        b.iter(|| black_box(analyzer.weak_basins_of_maxima(Some(10)).unwrap()))
    });
    group.bench_function("autocorrelation_lag_1", |b| {
        let sampling = WalkSampling::default();
        b.iter(|| black_box(analyzer.autocorrelation(1, &sampling).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_neighbor_cache, bench_full_passes);
criterion_main!(benches);
