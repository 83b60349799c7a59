// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Landscape Index - stable integer ids over the dataset and O(1) neighbor
resolution.

The neighbor graph is implicit: it is never materialized up front. For an id,
the one-edge variants of its genotype are encoded and looked up in the
string→id map; variants the dataset does not contain are dropped, since the
dataset need not cover the full combinatorial space.

Resolved neighbor lists are memoized per id in a `OnceCell`, which is safe to
populate from several threads (each cell is initialized at most once).
*/

use ahash::AHashMap;
use fla_genotype::{Alphabet, CellTopology, Genotype, OneEdgeVariants};
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::types::{ArchId, LandscapeError, LandscapeResult};

pub struct LandscapeIndex {
    topology: CellTopology,
    alphabet: Alphabet,
    /// id -> canonical string
    architectures: Vec<String>,
    /// id -> decoded edge sequence
    genotypes: Vec<Genotype>,
    /// canonical string -> id
    lookup: AHashMap<String, ArchId>,
    /// id -> realized neighbor ids (ascending), filled lazily
    neighbor_cache: Vec<OnceCell<Vec<ArchId>>>,
}

impl LandscapeIndex {
    /// Build the index from architectures in dataset order (id = position)
    ///
    /// # Errors
    ///
    /// - `Genotype(Format)` if any string is malformed for `topology`
    /// - `DuplicateArchitecture` if a string appears twice
    /// - `TooManyArchitectures` if ids would not fit in `u32`
    pub fn build<I, S>(
        architectures: I,
        topology: CellTopology,
        alphabet: Alphabet,
    ) -> LandscapeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let architectures: Vec<String> = architectures.into_iter().map(Into::into).collect();
        if architectures.len() > u32::MAX as usize {
            return Err(LandscapeError::TooManyArchitectures(architectures.len()));
        }

        let mut lookup = AHashMap::with_capacity(architectures.len());
        let mut genotypes = Vec::with_capacity(architectures.len());
        for (id, arch) in architectures.iter().enumerate() {
            genotypes.push(topology.decode(arch)?);
            if let Some(first) = lookup.insert(arch.clone(), id) {
                return Err(LandscapeError::DuplicateArchitecture {
                    arch: arch.clone(),
                    first,
                    second: id,
                });
            }
        }

        let neighbor_cache = (0..architectures.len()).map(|_| OnceCell::new()).collect();

        debug!(
            "Built landscape index: {} architectures, {}-node cell, alphabet of {}",
            architectures.len(),
            topology.nodes(),
            alphabet.len()
        );

        Ok(Self {
            topology,
            alphabet,
            architectures,
            genotypes,
            lookup,
            neighbor_cache,
        })
    }

    /// Build with the benchmark cell and the full operation alphabet
    pub fn from_architectures<I, S>(architectures: I) -> LandscapeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(architectures, CellTopology::default(), Alphabet::full())
    }

    pub fn len(&self) -> usize {
        self.architectures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.architectures.is_empty()
    }

    pub fn topology(&self) -> CellTopology {
        self.topology
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn architectures(&self) -> &[String] {
        &self.architectures
    }

    pub fn genotypes(&self) -> &[Genotype] {
        &self.genotypes
    }

    /// # Errors
    ///
    /// Returns `UnknownArchitectureId` if `id` is outside `[0, len)`
    pub fn check_id(&self, id: ArchId) -> LandscapeResult<()> {
        if id < self.architectures.len() {
            Ok(())
        } else {
            Err(LandscapeError::UnknownArchitectureId {
                id,
                len: self.architectures.len(),
            })
        }
    }

    pub fn architecture(&self, id: ArchId) -> LandscapeResult<&str> {
        self.check_id(id)?;
        Ok(&self.architectures[id])
    }

    pub fn genotype(&self, id: ArchId) -> LandscapeResult<&Genotype> {
        self.check_id(id)?;
        Ok(&self.genotypes[id])
    }

    /// Reverse lookup string -> id
    pub fn id_of(&self, arch: &str) -> LandscapeResult<ArchId> {
        self.lookup
            .get(arch)
            .copied()
            .ok_or_else(|| LandscapeError::UnknownArchitecture(arch.to_string()))
    }

    pub fn contains(&self, arch: &str) -> bool {
        self.lookup.contains_key(arch)
    }

    /// Realized neighbors of `id`, ascending. Empty if none of its one-edge
    /// variants are in the dataset.
    pub fn neighbors_of(&self, id: ArchId) -> LandscapeResult<&[ArchId]> {
        self.check_id(id)?;
        let neighbors = self.neighbor_cache[id].get_or_try_init(|| self.resolve_neighbors(id))?;
        Ok(neighbors)
    }

    /// Resolve every neighbor list ahead of a full-pass analysis
    pub fn warm_neighbor_cache(&self) -> LandscapeResult<()> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            (0..self.len())
                .into_par_iter()
                .try_for_each(|id| self.neighbors_of(id).map(|_| ()))?;
        }

        #[cfg(not(feature = "parallel"))]
        {
            for id in 0..self.len() {
                self.neighbors_of(id)?;
            }
        }

        debug!("Neighbor cache warmed for {} architectures", self.len());
        Ok(())
    }

    fn resolve_neighbors(&self, id: ArchId) -> LandscapeResult<Vec<ArchId>> {
        let mut neighbors = Vec::new();
        for variant in OneEdgeVariants::new(&self.genotypes[id], &self.alphabet) {
            let arch = self.topology.encode(variant.edges())?;
            if let Some(&neighbor) = self.lookup.get(arch.as_str()) {
                neighbors.push(neighbor);
            }
        }
        neighbors.sort_unstable();
        Ok(neighbors)
    }
}
