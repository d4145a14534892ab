//! Vertex records and the frontier ordering key.

use crate::contract::GraphProviderV1;
use crate::error::{CostSourceV1, SearchError};
use crate::policy::SeedCostV1;

/// Index of a vertex in the session arena.
///
/// Arena indices are assigned in creation order and never reused, so they
/// double as a deterministic tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIdx(pub usize);

/// A search record wrapping one provider node.
///
/// Invariant: for a vertex with a predecessor `p`,
/// `from_start == p.from_start + edge_cost` and `depth == p.depth + 1`.
/// Seed vertices have `depth == 0`, `edge_cost == 0` and no predecessor.
#[derive(Debug, Clone)]
pub struct VertexV1<N, Id> {
    pub id: Id,
    pub node: N,
    /// Accumulated cost from the search origin (g).
    pub from_start: f64,
    /// Heuristic cost to the goal point (h).
    pub to_end: f64,
    /// Cost of the edge from the predecessor.
    pub edge_cost: f64,
    /// Expansion steps from a seed.
    pub depth: u32,
    pub predecessor: Option<VertexIdx>,
}

impl<N, Id> VertexV1<N, Id> {
    /// `from_start + to_end` (the A* priority).
    #[must_use]
    pub fn f_cost(&self) -> f64 {
        self.from_start + self.to_end
    }

    #[must_use]
    pub fn is_seed(&self) -> bool {
        self.predecessor.is_none()
    }

    /// Whether `self` is a better best-effort endpoint than `other`: strictly
    /// closer to the goal, or equally close and cheaper to reach.
    #[must_use]
    pub fn closer_than(&self, other: &Self) -> bool {
        self.to_end
            .total_cmp(&other.to_end)
            .then(self.from_start.total_cmp(&other.from_start))
            .is_lt()
    }
}

/// Vertex alias for a given provider.
pub type ProviderVertex<P> =
    VertexV1<<P as GraphProviderV1>::Node, <P as GraphProviderV1>::NodeId>;

/// Builds validated vertices for one session.
///
/// Every provider value passes through [`checked`] before it lands in a
/// vertex, so negative or non-finite costs never reach the frontier.
pub struct VertexFactory<'a, P: GraphProviderV1> {
    pub provider: &'a P,
    pub start: &'a P::Point,
    pub goal: &'a P::Point,
    pub seed_cost: SeedCostV1,
}

impl<P: GraphProviderV1> VertexFactory<'_, P> {
    /// Build a seed vertex near the start point.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the provider heuristic is negative or
    /// non-finite.
    pub fn seed(&self, node: P::Node) -> Result<ProviderVertex<P>, SearchError> {
        let id = self.provider.node_id(&node);
        let to_end = checked(
            CostSourceV1::Heuristic,
            &id,
            self.provider.heuristic(&node, self.goal),
        )?;
        let from_start = match self.seed_cost {
            SeedCostV1::Zero => 0.0,
            SeedCostV1::HeuristicToStart => checked(
                CostSourceV1::Heuristic,
                &id,
                self.provider.heuristic(&node, self.start),
            )?,
        };
        Ok(VertexV1 {
            id,
            node,
            from_start,
            to_end,
            edge_cost: 0.0,
            depth: 0,
            predecessor: None,
        })
    }

    /// Build a target-set vertex. Only its id is consulted.
    ///
    /// # Errors
    ///
    /// Same as [`VertexFactory::seed`].
    pub fn target(&self, node: P::Node) -> Result<ProviderVertex<P>, SearchError> {
        let id = self.provider.node_id(&node);
        let to_end = checked(
            CostSourceV1::Heuristic,
            &id,
            self.provider.heuristic(&node, self.goal),
        )?;
        Ok(VertexV1 {
            id,
            node,
            from_start: 0.0,
            to_end,
            edge_cost: 0.0,
            depth: 0,
            predecessor: None,
        })
    }

    /// Build the vertex reached from `pred` (stored at `pred_idx`) over one edge.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the edge cost or heuristic is negative or
    /// non-finite.
    pub fn successor(
        &self,
        node: P::Node,
        pred_idx: VertexIdx,
        pred: &ProviderVertex<P>,
    ) -> Result<ProviderVertex<P>, SearchError> {
        let id = self.provider.node_id(&node);
        let edge_cost = checked(
            CostSourceV1::EdgeCost,
            &id,
            self.provider.edge_cost(&pred.node, &node),
        )?;
        let to_end = checked(
            CostSourceV1::Heuristic,
            &id,
            self.provider.heuristic(&node, self.goal),
        )?;
        Ok(VertexV1 {
            id,
            node,
            from_start: pred.from_start + edge_cost,
            to_end,
            edge_cost,
            depth: pred.depth + 1,
            predecessor: Some(pred_idx),
        })
    }
}

/// Reject negative and non-finite provider values.
fn checked<Id: std::fmt::Debug>(
    source: CostSourceV1,
    id: &Id,
    value: f64,
) -> Result<f64, SearchError> {
    if !value.is_finite() {
        return Err(SearchError::NonFiniteCost {
            source,
            node_id: format!("{id:?}"),
            value,
        });
    }
    if value < 0.0 {
        let node_id = format!("{id:?}");
        return Err(match source {
            CostSourceV1::EdgeCost => SearchError::NegativeEdgeCost {
                node_id,
                cost: value,
            },
            CostSourceV1::Heuristic => SearchError::NegativeHeuristic { node_id, value },
        });
    }
    // `total_cmp` orders -0.0 below 0.0; adding zero folds it into 0.0.
    Ok(value + 0.0)
}

/// The frontier ordering key: `(f_cost, to_end, from_start, seq)`.
///
/// Lower `f_cost` first, then lower `to_end`, then lower `from_start`, then
/// older arena index. All cost fields are finite (enforced at construction),
/// so `total_cmp` agrees with numeric order.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub to_end: f64,
    pub from_start: f64,
    pub seq: VertexIdx,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.to_end.total_cmp(&other.to_end))
            .then(self.from_start.total_cmp(&other.from_start))
            .then(self.seq.cmp(&other.seq))
    }
}

impl FrontierKey {
    #[must_use]
    pub fn of<N, Id>(idx: VertexIdx, vertex: &VertexV1<N, Id>) -> Self {
        Self {
            f_cost: vertex.f_cost(),
            to_end: vertex.to_end,
            from_start: vertex.from_start,
            seq: idx,
        }
    }
}
