// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Distance Engine - edit distance between architectures addressed by id.

Genotypes are decoded once at index build, so distances here never re-parse
strings. `distances_to` is data-parallel over ids with no shared mutable state.
*/

use tracing::trace;

use crate::index::LandscapeIndex;
use crate::types::{ArchId, LandscapeResult};

#[derive(Clone, Copy)]
pub struct DistanceEngine<'a> {
    index: &'a LandscapeIndex,
}

impl<'a> DistanceEngine<'a> {
    pub fn new(index: &'a LandscapeIndex) -> Self {
        Self { index }
    }

    /// Edit distance between two dataset members
    pub fn edit_distance(&self, a: ArchId, b: ArchId) -> LandscapeResult<usize> {
        let left = self.index.genotype(a)?;
        let right = self.index.genotype(b)?;
        Ok(left.hamming(right)?)
    }

    /// Distance from `reference` to every id, in id order
    pub fn distances_to(&self, reference: ArchId) -> LandscapeResult<Vec<usize>> {
        let origin = self.index.genotype(reference)?;
        let genotypes = self.index.genotypes();

        #[cfg(feature = "parallel")]
        let distances = {
            use rayon::prelude::*;
            genotypes
                .par_iter()
                .map(|genotype| origin.hamming(genotype))
                .collect::<Result<Vec<_>, _>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let distances = genotypes
            .iter()
            .map(|genotype| origin.hamming(genotype))
            .collect::<Result<Vec<_>, _>>()?;

        trace!("Computed {} distances to id {}", distances.len(), reference);
        Ok(distances)
    }
}
