// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Visitation tracker backed by a Roaring bitmap.

Traversals that must not revisit ids across calls (neutral-network discovery,
the local-maxima pass) take the tracker as an explicit `&mut` argument instead
of sharing hidden state, so independent runs never interfere.
*/

use roaring::RoaringBitmap;

use crate::types::ArchId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisitTracker {
    visited: RoaringBitmap,
}

impl VisitTracker {
    pub fn new() -> Self {
        Self {
            visited: RoaringBitmap::new(),
        }
    }

    /// Mark `id` as visited. Returns `true` if it was not visited before.
    ///
    /// Ids are bounded by the index, which rejects datasets beyond `u32`.
    pub fn mark(&mut self, id: ArchId) -> bool {
        self.visited.insert(id as u32)
    }

    pub fn is_visited(&self, id: ArchId) -> bool {
        self.visited.contains(id as u32)
    }

    pub fn len(&self) -> usize {
        self.visited.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    pub fn clear(&mut self) {
        self.visited.clear();
    }

    /// Visited ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = ArchId> + '_ {
        self.visited.iter().map(|id| id as ArchId)
    }
}
