//! NodeId → best-known vertex mapping with bounded insertion.
//!
//! Vertices live in a session-owned arena (`Vec<VertexV1>`); a set only
//! holds arena indices. A replaced vertex stays in the arena, so
//! predecessor links held by other vertices remain valid.

use std::collections::HashMap;
use std::hash::Hash;

use crate::node::{VertexIdx, VertexV1};
use crate::policy::InsertLimitsV1;
use crate::termination::TerminationReasonV1;

/// What happened to one `insert_all` batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertSummaryV1 {
    /// Arena indices now referenced by the set (new ids and replacements).
    pub stored: Vec<VertexIdx>,
    /// New ids added.
    pub admitted: u64,
    /// Existing ids whose vertex was replaced by a cheaper one.
    pub replaced: u64,
    /// Candidates dropped because an existing entry was at least as cheap.
    pub kept_existing: u64,
    pub rejected_by_depth: u64,
    pub rejected_by_distance: u64,
    /// The last limit that rejected a candidate in this batch.
    pub limit_hit: Option<TerminationReasonV1>,
}

/// At most one vertex per id: always the lowest `from_start` seen.
#[derive(Debug, Clone)]
pub struct VertexSet<Id> {
    index: HashMap<Id, VertexIdx>,
}

impl<Id: Clone + Eq + Hash> VertexSet<Id> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
        }
    }

    /// Insert a batch of candidate vertices.
    ///
    /// Each candidate is first checked against `limits`: exceeding a positive
    /// distance or depth cap rejects it and records the limit in the summary,
    /// and the rest of the batch is still processed. A surviving candidate
    /// replaces an existing entry for the same id only when strictly cheaper.
    pub fn insert_all<N>(
        &mut self,
        arena: &mut Vec<VertexV1<N, Id>>,
        candidates: impl IntoIterator<Item = VertexV1<N, Id>>,
        limits: InsertLimitsV1,
    ) -> InsertSummaryV1 {
        let mut summary = InsertSummaryV1::default();
        for candidate in candidates {
            if let Some(max) = limits.max_distance {
                if candidate.from_start > max {
                    summary.rejected_by_distance += 1;
                    summary.limit_hit = Some(TerminationReasonV1::MaxDistance(max));
                    continue;
                }
            }
            if let Some(max) = limits.max_depth {
                if candidate.depth > max {
                    summary.rejected_by_depth += 1;
                    summary.limit_hit = Some(TerminationReasonV1::MaxDepth(max));
                    continue;
                }
            }

            let existing = self.index.get(&candidate.id).copied();
            if let Some(existing) = existing {
                if arena[existing.0].from_start <= candidate.from_start {
                    summary.kept_existing += 1;
                    continue;
                }
                summary.replaced += 1;
            } else {
                summary.admitted += 1;
            }
            let id = candidate.id.clone();
            let idx = push(arena, candidate);
            self.index.insert(id, idx);
            summary.stored.push(idx);
        }
        summary
    }

    /// Record an arena vertex under `id`, keeping the cheaper entry on conflict.
    pub fn put<N>(&mut self, arena: &[VertexV1<N, Id>], id: Id, idx: VertexIdx) {
        let keep_existing = self
            .index
            .get(&id)
            .is_some_and(|existing| arena[existing.0].from_start <= arena[idx.0].from_start);
        if !keep_existing {
            self.index.insert(id, idx);
        }
    }

    /// Remove `id`, returning its arena index.
    pub fn remove(&mut self, id: &Id) -> Option<VertexIdx> {
        self.index.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &Id) -> Option<VertexIdx> {
        self.index.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &Id) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate `(id, arena index)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, VertexIdx)> {
        self.index.iter().map(|(id, idx)| (id, *idx))
    }
}

impl<Id: Clone + Eq + Hash> Default for VertexSet<Id> {
    fn default() -> Self {
        Self::new()
    }
}

fn push<N, Id>(arena: &mut Vec<VertexV1<N, Id>>, vertex: VertexV1<N, Id>) -> VertexIdx {
    arena.push(vertex);
    VertexIdx(arena.len() - 1)
}
