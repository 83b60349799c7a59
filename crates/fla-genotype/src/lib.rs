// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# FLA Genotype

Handles all **genotype** operations for fitness landscape analysis:

- Cell operations and the operation alphabet
- Canonical architecture string codec (`|op~0|+|op~0|op~1|+...`)
- One-edge neighbor generation
- Hamming edit distance between architectures

## Architecture

This crate knows nothing about datasets or fitness. It converts between the
canonical string form and the flat edge sequence, and enumerates the syntactic
neighborhood of a single architecture. Resolving neighbors against a dataset
and every graph algorithm over the landscape live in `fla-landscape`.

```text
fla-genotype (Genotype)          fla-landscape (Landscape)
───────────────────────          ─────────────────────────
│ Operation / Alphabet │   →     │ LandscapeIndex        │
│ CellTopology codec   │         │ DistanceEngine        │
│ OneEdgeVariants      │         │ LandscapeAnalyzer     │
│ edit_distance        │         │ stats                 │
└──────────────────────┘         └───────────────────────┘
```

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod codec;
pub mod distance;
pub mod neighbors;
pub mod operation;
pub mod types;

pub use codec::{decode, encode, CellTopology, Genotype};
pub use distance::edit_distance;
pub use neighbors::{one_edge_variants, OneEdgeVariants};
pub use operation::{Alphabet, Operation};
pub use types::{GenotypeError, GenotypeResult};
