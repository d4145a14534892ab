//! Route runner: one search session, one auditable report.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → describe world → hash world + policy
//!   → SearchSession::new() → run() → collect path, stats, expansions
//!   → RouteReportV1
//! ```
//!
//! The report is a pure function of the world description, the policy, and
//! the two points. Its canonical bytes carry no timestamps or host data, so
//! two runs of the same request produce the same digest.

use waypoint_search::graph::{ExpansionEventV1, SearchStatsV1, StepOutcomeV1};
use waypoint_search::policy::SearchPolicyV1;
use waypoint_search::{SearchError, SearchSession};

use crate::canon::{canonical_json_bytes, fmt_cost, CanonError};
use crate::config::{policy_digest, policy_to_json};
use crate::contract::RouteWorldV1;
use crate::hash::{canonical_hash, ContentHash, DOMAIN_ROUTE_REPORT, DOMAIN_WORLD};

/// Schema tag written into every report.
pub const ROUTE_REPORT_SCHEMA: &str = "waypoint.route_report.v1";

/// Error during a route run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// The policy or a provider cost was rejected by the search session.
    Search(SearchError),
    /// A report surface failed canonicalization.
    Canon(CanonError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::Canon(e) => write!(f, "report canonicalization failed: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
        }
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// Result of one route request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReportV1 {
    pub world_id: String,
    /// Hash of the world's canonical description.
    pub world_digest: ContentHash,
    /// The resolved policy, as rendered by [`policy_to_json`].
    pub policy: serde_json::Value,
    pub policy_digest: ContentHash,
    /// Session state name (`found_goal`, `exhausted`, ...).
    pub state: String,
    /// Termination label; empty if the session never recorded a reason.
    pub termination: String,
    /// Node labels from start to endpoint. Ends at the goal when
    /// `state == "found_goal"`, otherwise at the draft vertex.
    pub path: Vec<String>,
    /// Accumulated cost of the path endpoint, rendered by [`fmt_cost`].
    pub path_cost: Option<String>,
    pub stats: SearchStatsV1,
    /// Rendered expansion events; empty unless the policy records them.
    pub expansions: Vec<serde_json::Value>,
}

impl RouteReportV1 {
    /// `true` when the path ends in the target set.
    #[must_use]
    pub fn found(&self) -> bool {
        self.state == "found_goal"
    }

    /// JSON rendering of the report. Numbers are integers only.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "schema": ROUTE_REPORT_SCHEMA,
            "world_id": self.world_id,
            "world_digest": self.world_digest.as_str(),
            "policy": self.policy,
            "policy_digest": self.policy_digest.as_str(),
            "state": self.state,
            "termination": self.termination,
            "path": self.path,
            "path_cost": self.path_cost,
            "stats": stats_to_json(&self.stats),
            "expansions": self.expansions,
        })
    }

    /// Canonical JSON bytes of [`RouteReportV1::to_json`].
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json())
    }

    /// Content hash of the canonical report bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(DOMAIN_ROUTE_REPORT, &self.canonical_bytes()?))
    }
}

/// Run one search from `start` to `goal` over `world` and report on it.
///
/// An unreachable goal, a spent budget, or an empty seed set is reported in
/// the result, not returned as an error.
///
/// # Errors
///
/// Returns [`RunError::Search`] for an invalid policy or a provider cost
/// fault, and [`RunError::Canon`] if the world description is not
/// canonicalizable.
pub fn run_route<W: RouteWorldV1>(
    world: &W,
    start: W::Point,
    goal: W::Point,
    policy: &SearchPolicyV1,
) -> Result<RouteReportV1, RunError> {
    policy.validate()?;
    let world_digest = canonical_hash(DOMAIN_WORLD, &canonical_json_bytes(&world.describe())?);
    let policy_digest = policy_digest(policy)?;

    let mut session = SearchSession::new(world, start, goal, policy)?;
    session.run()?;

    let path = session
        .path_ids()
        .iter()
        .map(|id| world.node_label(id))
        .collect::<Vec<_>>();
    let expansions = session
        .expansions()
        .iter()
        .map(|event| event_to_json(world, event))
        .collect();
    let report = RouteReportV1 {
        world_id: world.world_id().to_string(),
        world_digest,
        policy: policy_to_json(policy),
        policy_digest,
        state: session.state().as_str().to_string(),
        termination: session.termination_label(),
        path,
        path_cost: session.path_cost().map(fmt_cost),
        stats: session.stats(),
        expansions,
    };

    tracing::info!(
        world = %report.world_id,
        state = %report.state,
        termination = %report.termination,
        steps = report.stats.steps,
        path_len = report.path.len(),
        "route run complete"
    );
    Ok(report)
}

fn stats_to_json(stats: &SearchStatsV1) -> serde_json::Value {
    serde_json::json!({
        "steps": stats.steps,
        "expansions": stats.expansions,
        "seeds": stats.seeds,
        "targets": stats.targets,
        "successors_generated": stats.successors_generated,
        "closed_filtered": stats.closed_filtered,
        "admitted": stats.admitted,
        "replaced": stats.replaced,
        "kept_existing": stats.kept_existing,
        "rejected_by_depth": stats.rejected_by_depth,
        "rejected_by_distance": stats.rejected_by_distance,
        "open_high_water": stats.open_high_water,
    })
}

fn event_to_json<W: RouteWorldV1>(
    world: &W,
    event: &ExpansionEventV1<W::NodeId>,
) -> serde_json::Value {
    let outcome = match event.outcome {
        StepOutcomeV1::GoalReached => "goal_reached",
        StepOutcomeV1::Expanded => "expanded",
    };
    serde_json::json!({
        "step": event.step,
        "node": world.node_label(&event.node_id),
        "from_start": fmt_cost(event.from_start),
        "to_end": fmt_cost(event.to_end),
        "f_cost": fmt_cost(event.f_cost),
        "depth": event.depth,
        "outcome": outcome,
        "successors": event.successors,
        "closed_filtered": event.closed_filtered,
        "stored": event.stored,
        "rejected_by_depth": event.rejected_by_depth,
        "rejected_by_distance": event.rejected_by_distance,
        "draft_updated": event.draft_updated,
    })
}
