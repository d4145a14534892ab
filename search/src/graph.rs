//! Expansion audit log and aggregate counters.
//!
//! The ordered list of `ExpansionEventV1` entries is the decision surface of
//! a session: one event per popped vertex, recorded when the policy enables
//! `record_expansions`. `SearchStatsV1` is always maintained.

/// What a step did with the vertex it popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcomeV1 {
    /// The vertex was in the target set.
    GoalReached,
    /// The vertex was expanded and moved to closed.
    Expanded,
}

/// One frontier pop.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionEventV1<Id> {
    /// Zero-based step index within the session.
    pub step: u64,
    pub node_id: Id,
    pub from_start: f64,
    pub to_end: f64,
    pub f_cost: f64,
    pub depth: u32,
    pub outcome: StepOutcomeV1,
    /// Successors returned by the provider.
    pub successors: u64,
    /// Successors dropped because they were already closed.
    pub closed_filtered: u64,
    /// Successors that entered open as a new id or a cheaper replacement.
    pub stored: u64,
    pub rejected_by_depth: u64,
    pub rejected_by_distance: u64,
    /// Whether this vertex became the new draft endpoint.
    pub draft_updated: bool,
}

/// Aggregate counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatsV1 {
    /// `step()` calls that did work (including terminal ones).
    pub steps: u64,
    /// Vertices expanded and moved to closed.
    pub expansions: u64,
    pub seeds: u64,
    pub targets: u64,
    pub successors_generated: u64,
    pub closed_filtered: u64,
    pub admitted: u64,
    pub replaced: u64,
    pub kept_existing: u64,
    pub rejected_by_depth: u64,
    pub rejected_by_distance: u64,
    pub open_high_water: u64,
}
