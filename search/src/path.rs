//! Path reconstruction from predecessor links.

use crate::node::{VertexIdx, VertexV1};

/// Walk predecessor links from `terminal` back to a seed.
///
/// Returns arena indices seed-first. Predecessor links always point at
/// vertices created earlier, so the walk terminates.
#[must_use]
pub fn reconstruct_chain<N, Id>(arena: &[VertexV1<N, Id>], terminal: VertexIdx) -> Vec<VertexIdx> {
    let mut chain = Vec::new();
    let mut current = Some(terminal);
    while let Some(idx) = current {
        chain.push(idx);
        current = arena[idx.0].predecessor;
    }
    chain.reverse();
    chain
}

/// Ordered node sequence from a seed to `terminal`, or empty for `None`.
#[must_use]
pub fn reconstruct_path<N: Clone, Id>(
    arena: &[VertexV1<N, Id>],
    terminal: Option<VertexIdx>,
) -> Vec<N> {
    terminal.map_or_else(Vec::new, |t| {
        reconstruct_chain(arena, t)
            .into_iter()
            .map(|idx| arena[idx.0].node.clone())
            .collect()
    })
}
