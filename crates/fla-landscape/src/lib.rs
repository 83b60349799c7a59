// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# FLA Landscape

The **landscape graph and analysis engine**:

- Landscape index: stable ids, O(1) string→id lookup, memoized implicit
  neighbor resolution
- Distance engine over ids
- Correlation statistics (Pearson, Spearman, Kendall tau-b)
- Landscape analyzer: FDC, local maxima, neutral networks, percolation index,
  weak/strong basins, random walks, autocorrelation, correlation length

## Architecture

```text
Dataset ──► LandscapeIndex ──► LandscapeAnalyzer(&index, &fitness)
               │    ▲                │
               │    └── neighbors_of ┤ BFS / walks, VisitTracker per pass
               └──► DistanceEngine ──┘ FDC, neutral-network stats
```

Every analysis reads the same immutable index and fitness vector. With the
`parallel` feature (default) the per-id and per-peak passes run on rayon.

The crate emits `tracing` events at `debug`/`trace` level only; it never
installs a subscriber.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod analyzer;
pub mod dataset;
pub mod distance;
pub mod index;
pub mod stats;
pub mod types;
pub mod visit;

pub use analyzer::basins::BasinMap;
pub use analyzer::{
    correlation_length_from, lagged_autocorrelation, AnalysisOptions, AutocorrelationEstimate,
    FitnessDistanceCorrelation, LandscapeAnalyzer, LandscapeSummary, NeutralNetworkStats,
    WalkSampling,
};
pub use dataset::Dataset;
pub use distance::DistanceEngine;
pub use index::LandscapeIndex;
pub use types::{ArchId, LandscapeError, LandscapeResult};
pub use visit::VisitTracker;
