//! Waypoint Search: step-wise A* over a provider-defined graph.
//!
//! The engine knows nothing about how a graph is represented. A
//! [`GraphProviderV1`] supplies node identity, seeds near a point,
//! successors, edge costs, and heuristics; the engine owns frontier and
//! closed-set management, cost accounting, termination, and path
//! reconstruction.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_search  ←  waypoint_harness
//! (session, sets)     (worlds, runner, reports)
//! ```
//!
//! # Key types
//!
//! - [`SearchSession`]: one search: `step()`, `run()`, `path()`
//! - [`SearchPolicyV1`]: depth, step, and distance budgets
//! - [`VertexSet`]: NodeId → cheapest vertex, with bounded insertion
//! - [`TerminationReasonV1`]: why a search stopped
//! - [`GraphProviderV1`]: trait for graphs that support search
//!
//! Search failure (unreachable goal, spent budget, no seeds) is a normal
//! outcome: it is reported through the termination reason together with a
//! best-effort path. Only configuration faults are errors.

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod node;
pub mod path;
pub mod policy;
pub mod search;
pub mod termination;
pub mod vertex_set;

pub use contract::GraphProviderV1;
pub use error::SearchError;
pub use policy::{SearchPolicyV1, SeedCostV1};
pub use search::SearchSession;
pub use termination::{SessionStateV1, TerminationReasonV1};
pub use vertex_set::VertexSet;
