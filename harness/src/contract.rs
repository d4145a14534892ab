//! Route world contract: a graph provider the runner can report on.
//!
//! Worlds provide graph data only. Hashing, report assembly, and policy
//! handling are runner concerns.

use waypoint_search::contract::GraphProviderV1;

/// A [`GraphProviderV1`] with the metadata a route report needs.
pub trait RouteWorldV1: GraphProviderV1 {
    /// Unique world identifier (e.g. `"grid"`).
    fn world_id(&self) -> &str;

    /// Stable human-readable label for a node id, used in reports.
    fn node_label(&self, id: &Self::NodeId) -> String;

    /// Stable JSON description of the world's graph. Must contain integers
    /// and strings only so it canonicalizes; its digest binds a report to
    /// the graph it was computed on.
    fn describe(&self) -> serde_json::Value;
}

/// Typed failure for building a world from a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldConfigError {
    /// A required field is missing or has the wrong type.
    MissingField { field: String },
    /// A field is present but its value is out of range.
    InvalidValue { field: String, detail: String },
    /// A road references an intersection name that was never declared.
    UnknownIntersection { name: String },
    /// Two intersections share a name.
    DuplicateIntersection { name: String },
    /// A road is shorter than the straight line between its endpoints, which
    /// would make the distance heuristic inadmissible.
    InconsistentRoad { from: String, to: String },
}

impl std::fmt::Display for WorldConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing or mistyped field: {field}"),
            Self::InvalidValue { field, detail } => write!(f, "invalid {field}: {detail}"),
            Self::UnknownIntersection { name } => write!(f, "unknown intersection: {name}"),
            Self::DuplicateIntersection { name } => {
                write!(f, "duplicate intersection: {name}")
            }
            Self::InconsistentRoad { from, to } => {
                write!(f, "road {from} -> {to} is shorter than the straight line")
            }
        }
    }
}

impl std::error::Error for WorldConfigError {}
