//! Typed search errors.
//!
//! `SearchError` covers configuration faults only: an invalid policy caught
//! before the first step, or a provider value that would break A* ordering.
//! Ordinary outcomes (goal unreachable, budget spent, no seeds) are not
//! errors; they are reported via [`crate::termination::TerminationReasonV1`]
//! together with a best-effort path.

/// Which provider operation produced a rejected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostSourceV1 {
    /// `GraphProviderV1::edge_cost`.
    EdgeCost,
    /// `GraphProviderV1::heuristic`.
    Heuristic,
}

impl std::fmt::Display for CostSourceV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EdgeCost => write!(f, "edge_cost"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Typed failure for search configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The policy failed pre-flight validation.
    InvalidPolicy { detail: String },
    /// The provider returned a negative edge cost.
    NegativeEdgeCost { node_id: String, cost: f64 },
    /// The provider returned a negative heuristic.
    NegativeHeuristic { node_id: String, value: f64 },
    /// The provider returned NaN or an infinity.
    NonFiniteCost {
        source: CostSourceV1,
        node_id: String,
        value: f64,
    },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::NegativeEdgeCost { node_id, cost } => {
                write!(f, "negative edge cost {cost} into node {node_id}")
            }
            Self::NegativeHeuristic { node_id, value } => {
                write!(f, "negative heuristic {value} at node {node_id}")
            }
            Self::NonFiniteCost {
                source,
                node_id,
                value,
            } => write!(f, "non-finite {source} {value} at node {node_id}"),
        }
    }
}

impl std::error::Error for SearchError {}
