//! Graph provider contract trait.

use std::hash::Hash;

/// Trait for graphs that support route search.
///
/// The engine never inspects a node's structure. Everything it knows about
/// the graph flows through these five operations.
///
/// # Contract
///
/// - Calls must be deterministic and side-effect free for the lifetime of a
///   session: same inputs → same outputs.
/// - `node_id` must be stable within a session and unique per node.
/// - `edge_cost` and `heuristic` must return finite, non-negative values.
///   The session rejects anything else with a [`crate::error::SearchError`].
/// - `heuristic` must be consistent (less is better) for the returned path
///   to be optimal.
/// - `successors` may return already-expanded nodes; the session filters
///   them against its closed set. No ordering is required of any result.
pub trait GraphProviderV1 {
    /// Opaque node value owned by the provider.
    type Node: Clone;
    /// Unique key for a node within one session.
    type NodeId: Clone + Eq + Hash + std::fmt::Debug;
    /// A location in the provider's space (lat/lng, grid coordinate, ...).
    type Point;

    /// Unique identifier of `node`.
    fn node_id(&self, node: &Self::Node) -> Self::NodeId;

    /// Nodes close to `point`. Seeds both the frontier and the target set.
    fn nodes_near(&self, point: &Self::Point) -> Vec<Self::Node>;

    /// Nodes reachable from `node` by one edge.
    fn successors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Cost of the edge `from → node`.
    fn edge_cost(&self, from: &Self::Node, node: &Self::Node) -> f64;

    /// Estimated remaining cost from `node` to `point`.
    fn heuristic(&self, node: &Self::Node, point: &Self::Point) -> f64;
}
