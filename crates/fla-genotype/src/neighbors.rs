// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
One-edge neighbor generation.

Two genotypes are neighbors iff their edge sequences differ in exactly one
position. For a genotype of `E` edges and an alphabet `A` that contains every
current edge value, there are exactly `E × (|A| − 1)` neighbors, all distinct.

Variants are emitted in canonical order: edge position ascending, then
alphabet order. Callers that need tie-breaking can rely on this order.
*/

use crate::codec::Genotype;
use crate::operation::{Alphabet, Operation};
use std::collections::BTreeSet;

/// Iterator over every genotype one edge away from a base genotype
pub struct OneEdgeVariants<'a> {
    base: &'a Genotype,
    alphabet: &'a [Operation],
    position: usize,
    symbol: usize,
}

impl<'a> OneEdgeVariants<'a> {
    pub fn new(base: &'a Genotype, alphabet: &'a Alphabet) -> Self {
        Self {
            base,
            alphabet: alphabet.as_slice(),
            position: 0,
            symbol: 0,
        }
    }
}

impl Iterator for OneEdgeVariants<'_> {
    type Item = Genotype;

    fn next(&mut self) -> Option<Genotype> {
        let edges = self.base.edges();
        while self.position < edges.len() {
            while self.symbol < self.alphabet.len() {
                let op = self.alphabet[self.symbol];
                self.symbol += 1;
                if op != edges[self.position] {
                    return self.base.with_edge(self.position, op);
                }
            }
            self.position += 1;
            self.symbol = 0;
        }
        None
    }
}

/// All one-edge variants of `genotype` over `alphabet`, as an ordered set
pub fn one_edge_variants(genotype: &Genotype, alphabet: &Alphabet) -> BTreeSet<Genotype> {
    OneEdgeVariants::new(genotype, alphabet).collect()
}
