//! Open set: a [`VertexSet`] plus a min-heap over frontier keys.
//!
//! `BinaryHeap` is a max-heap, so entries are wrapped in `Reverse` to pop the
//! lowest `(f_cost, to_end, from_start, seq)` first. When a cheaper vertex
//! replaces an id, the old heap entry is left in place and skipped at pop
//! time (its index no longer matches the set).

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

use crate::node::{FrontierKey, VertexIdx, VertexV1};
use crate::policy::InsertLimitsV1;
use crate::vertex_set::{InsertSummaryV1, VertexSet};

/// Best-first open set.
#[derive(Debug)]
pub struct OpenFrontier<Id> {
    set: VertexSet<Id>,
    heap: BinaryHeap<Reverse<FrontierKey>>,
    high_water: u64,
}

impl<Id: Clone + Eq + Hash> OpenFrontier<Id> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            set: VertexSet::new(),
            heap: BinaryHeap::new(),
            high_water: 0,
        }
    }

    /// Insert a batch through [`VertexSet::insert_all`] and index every stored
    /// vertex in the heap.
    pub fn insert_all<N>(
        &mut self,
        arena: &mut Vec<VertexV1<N, Id>>,
        candidates: impl IntoIterator<Item = VertexV1<N, Id>>,
        limits: InsertLimitsV1,
    ) -> InsertSummaryV1 {
        let summary = self.set.insert_all(arena, candidates, limits);
        for &idx in &summary.stored {
            self.heap.push(Reverse(FrontierKey::of(idx, &arena[idx.0])));
        }
        let size = self.set.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        summary
    }

    /// Remove and return the cheapest live vertex.
    pub fn pop_cheapest<N>(&mut self, arena: &[VertexV1<N, Id>]) -> Option<VertexIdx> {
        while let Some(Reverse(key)) = self.heap.pop() {
            let id = &arena[key.seq.0].id;
            if self.set.get(id) == Some(key.seq) {
                self.set.remove(id);
                return Some(key.seq);
            }
        }
        None
    }

    /// Return a vertex taken by [`OpenFrontier::pop_cheapest`] to the open
    /// set under its original arena index.
    pub fn restore<N>(&mut self, arena: &[VertexV1<N, Id>], idx: VertexIdx) {
        let vertex = &arena[idx.0];
        self.set.put(arena, vertex.id.clone(), idx);
        self.heap.push(Reverse(FrontierKey::of(idx, vertex)));
    }

    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.set.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.set.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// High-water mark of open set size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// The underlying id → vertex mapping.
    #[must_use]
    pub fn vertices(&self) -> &VertexSet<Id> {
        &self.set
    }
}

impl<Id: Clone + Eq + Hash> Default for OpenFrontier<Id> {
    fn default() -> Self {
        Self::new()
    }
}
