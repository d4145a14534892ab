//! Search session: the step loop, draft tracking, and termination.

use crate::contract::GraphProviderV1;
use crate::error::SearchError;
use crate::frontier::OpenFrontier;
use crate::graph::{ExpansionEventV1, SearchStatsV1, StepOutcomeV1};
use crate::node::{ProviderVertex, VertexFactory, VertexIdx};
use crate::path::{reconstruct_chain, reconstruct_path};
use crate::policy::{InsertLimitsV1, SearchPolicyV1};
use crate::termination::{SessionStateV1, TerminationReasonV1};
use crate::vertex_set::{InsertSummaryV1, VertexSet};

/// One A* search between two points over a borrowed provider.
///
/// All vertices live in a session-owned arena; the open, closed and target
/// sets hold arena indices. Dropping the session discards everything.
///
/// A `step()` that returns a cost error leaves the session as it was before
/// the call, so retrying reports the same error.
pub struct SearchSession<'p, P: GraphProviderV1> {
    provider: &'p P,
    start: P::Point,
    goal: P::Point,
    policy: SearchPolicyV1,
    arena: Vec<ProviderVertex<P>>,
    open: OpenFrontier<P::NodeId>,
    closed: VertexSet<P::NodeId>,
    target: VertexSet<P::NodeId>,
    found: Option<VertexIdx>,
    draft: Option<VertexIdx>,
    termination_reason: Option<TerminationReasonV1>,
    state: SessionStateV1,
    stats: SearchStatsV1,
    expansions: Vec<ExpansionEventV1<P::NodeId>>,
}

impl<'p, P: GraphProviderV1> SearchSession<'p, P> {
    /// Seed the open set near `start` and the target set near `goal`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if the policy fails validation,
    /// or a cost error if the provider heuristic is negative or non-finite
    /// for a seed or target node.
    pub fn new(
        provider: &'p P,
        start: P::Point,
        goal: P::Point,
        policy: &SearchPolicyV1,
    ) -> Result<Self, SearchError> {
        policy.validate()?;

        let factory = VertexFactory {
            provider,
            start: &start,
            goal: &goal,
            seed_cost: policy.seed_cost,
        };
        let seeds = provider
            .nodes_near(&start)
            .into_iter()
            .map(|n| factory.seed(n))
            .collect::<Result<Vec<_>, _>>()?;
        let targets = provider
            .nodes_near(&goal)
            .into_iter()
            .map(|n| factory.target(n))
            .collect::<Result<Vec<_>, _>>()?;

        let mut arena = Vec::with_capacity(seeds.len() + targets.len());
        let mut open = OpenFrontier::new();
        let seeded = open.insert_all(&mut arena, seeds, InsertLimitsV1::unbounded());
        let mut target = VertexSet::new();
        let targeted = target.insert_all(&mut arena, targets, InsertLimitsV1::unbounded());

        let stats = SearchStatsV1 {
            seeds: seeded.admitted,
            targets: targeted.admitted,
            ..SearchStatsV1::default()
        };
        tracing::debug!(
            seeds = seeded.admitted,
            targets = targeted.admitted,
            "search session seeded"
        );

        Ok(Self {
            provider,
            start,
            goal,
            policy: policy.clone(),
            arena,
            open,
            closed: VertexSet::new(),
            target,
            found: None,
            draft: None,
            termination_reason: None,
            state: SessionStateV1::Running,
            stats,
            expansions: Vec::new(),
        })
    }

    /// Drive the search to a terminal state or the step budget, then return
    /// the best-known path.
    ///
    /// Calls `step()` at most `max_steps + 1` times. On budget expiry the
    /// reason becomes `max_steps:<n>` unless a limit reason was already
    /// recorded.
    ///
    /// # Errors
    ///
    /// Propagates the first cost error raised by [`SearchSession::step`].
    pub fn run(&mut self) -> Result<Vec<P::Node>, SearchError> {
        let mut iteration: u64 = 0;
        loop {
            if self.step()? {
                break;
            }
            if iteration >= self.policy.max_steps {
                if !self
                    .termination_reason
                    .as_ref()
                    .is_some_and(TerminationReasonV1::is_limit)
                {
                    self.termination_reason =
                        Some(TerminationReasonV1::MaxSteps(self.policy.max_steps));
                }
                self.state = SessionStateV1::BudgetExhausted;
                tracing::debug!(
                    max_steps = self.policy.max_steps,
                    reason = %self.termination_label(),
                    "search step budget spent"
                );
                break;
            }
            iteration += 1;
        }
        Ok(self.path())
    }

    /// Advance the search by one frontier pop.
    ///
    /// Returns `Ok(true)` once a terminal state is reached. After
    /// `FoundGoal` or `Exhausted` further calls do nothing and return
    /// `Ok(true)`; after a budget cutoff they resume the search.
    ///
    /// # Errors
    ///
    /// Returns a cost error if the provider yields a negative or non-finite
    /// edge cost or heuristic for a successor.
    pub fn step(&mut self) -> Result<bool, SearchError> {
        if self.state.is_final() {
            return Ok(true);
        }
        let step_index = self.stats.steps;
        self.stats.steps += 1;

        if self.open.is_empty() {
            let reason = if self.closed.is_empty() {
                TerminationReasonV1::NoStartNodes
            } else {
                TerminationReasonV1::GraphExhausted
            };
            return Ok(self.finish(SessionStateV1::Exhausted, reason));
        }

        let Some(idx) = self.open.pop_cheapest(&self.arena) else {
            return Ok(self.finish(
                SessionStateV1::Exhausted,
                TerminationReasonV1::GraphExhausted,
            ));
        };
        let vertex_id = self.arena[idx.0].id.clone();

        if self.target.contains(&vertex_id) {
            self.found = Some(idx);
            self.draft = Some(idx);
            self.record(step_index, idx, StepOutcomeV1::GoalReached, &Expansion::default(), true);
            return Ok(self.finish(SessionStateV1::FoundGoal, TerminationReasonV1::Found));
        }

        let (candidates, mut expansion) = match self.candidates(idx) {
            Ok(built) => built,
            Err(err) => {
                self.open.restore(&self.arena, idx);
                self.stats.steps = step_index;
                tracing::debug!(step = step_index, error = %err, "successor rejected");
                return Err(err);
            }
        };

        // Resuming after a budget cutoff; limit reasons persist.
        if matches!(self.termination_reason, Some(TerminationReasonV1::MaxSteps(_))) {
            self.termination_reason = None;
        }
        self.state = SessionStateV1::Running;

        let draft_updated = match self.draft {
            None => true,
            Some(d) => self.arena[idx.0].closer_than(&self.arena[d.0]),
        };
        if draft_updated {
            self.draft = Some(idx);
        }
        self.closed.put(&self.arena, vertex_id, idx);

        expansion.summary = self
            .open
            .insert_all(&mut self.arena, candidates, self.policy.limits());
        if let Some(limit) = &expansion.summary.limit_hit {
            self.termination_reason = Some(limit.clone());
        }
        self.absorb(&expansion);
        self.record(step_index, idx, StepOutcomeV1::Expanded, &expansion, draft_updated);

        tracing::trace!(
            step = step_index,
            f_cost = self.arena[idx.0].f_cost(),
            depth = self.arena[idx.0].depth,
            stored = expansion.summary.stored.len(),
            open = self.open.len(),
            "expanded vertex"
        );
        Ok(false)
    }

    /// The best-known path: to the found vertex if any, else to the draft.
    ///
    /// Callable at any time. Empty only if no vertex was ever popped.
    #[must_use]
    pub fn path(&self) -> Vec<P::Node> {
        reconstruct_path(&self.arena, self.terminal())
    }

    /// Node ids along [`SearchSession::path`].
    #[must_use]
    pub fn path_ids(&self) -> Vec<P::NodeId> {
        self.terminal().map_or_else(Vec::new, |t| {
            reconstruct_chain(&self.arena, t)
                .into_iter()
                .map(|idx| self.arena[idx.0].id.clone())
                .collect()
        })
    }

    /// Accumulated cost of the path's endpoint, `None` when there is no path.
    #[must_use]
    pub fn path_cost(&self) -> Option<f64> {
        self.terminal().map(|t| self.arena[t.0].from_start)
    }

    /// Why the search stopped, or the last insertion limit that fired.
    #[must_use]
    pub fn termination_reason(&self) -> Option<&TerminationReasonV1> {
        self.termination_reason.as_ref()
    }

    /// [`SearchSession::termination_reason`] as a string; empty when nothing
    /// has been recorded yet.
    #[must_use]
    pub fn termination_label(&self) -> String {
        self.termination_reason
            .as_ref()
            .map_or_else(String::new, ToString::to_string)
    }

    #[must_use]
    pub fn state(&self) -> SessionStateV1 {
        self.state
    }

    #[must_use]
    pub fn stats(&self) -> SearchStatsV1 {
        SearchStatsV1 {
            open_high_water: self.open.high_water(),
            ..self.stats
        }
    }

    /// Recorded expansion events (empty unless `record_expansions` is set).
    #[must_use]
    pub fn expansions(&self) -> &[ExpansionEventV1<P::NodeId>] {
        &self.expansions
    }

    #[must_use]
    pub fn found(&self) -> Option<&ProviderVertex<P>> {
        self.found.map(|i| &self.arena[i.0])
    }

    #[must_use]
    pub fn draft(&self) -> Option<&ProviderVertex<P>> {
        self.draft.map(|i| &self.arena[i.0])
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicyV1 {
        &self.policy
    }

    #[must_use]
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    #[must_use]
    pub fn target_len(&self) -> usize {
        self.target.len()
    }

    /// The open vertex for `id`, if present.
    #[must_use]
    pub fn open_vertex(&self, id: &P::NodeId) -> Option<&ProviderVertex<P>> {
        self.open.vertices().get(id).map(|i| &self.arena[i.0])
    }

    /// Every vertex currently in the open set, in unspecified order.
    pub fn open_vertices(&self) -> impl Iterator<Item = &ProviderVertex<P>> {
        self.open.vertices().iter().map(|(_, i)| &self.arena[i.0])
    }

    fn terminal(&self) -> Option<VertexIdx> {
        self.found.or(self.draft)
    }

    /// Validated successor vertices of the popped vertex at `idx`.
    ///
    /// Reads only; the popped vertex is not yet closed, so its own id is
    /// filtered alongside the closed set.
    fn candidates(
        &self,
        idx: VertexIdx,
    ) -> Result<(Vec<ProviderVertex<P>>, Expansion), SearchError> {
        let pred = &self.arena[idx.0];
        let successors = self.provider.successors(&pred.node);
        let factory = VertexFactory {
            provider: self.provider,
            start: &self.start,
            goal: &self.goal,
            seed_cost: self.policy.seed_cost,
        };
        let mut expansion = Expansion {
            successors: successors.len() as u64,
            ..Expansion::default()
        };
        let mut candidates = Vec::with_capacity(successors.len());
        for node in successors {
            let id = self.provider.node_id(&node);
            if id == pred.id || self.closed.contains(&id) {
                expansion.closed_filtered += 1;
                continue;
            }
            candidates.push(factory.successor(node, idx, pred)?);
        }
        Ok((candidates, expansion))
    }

    fn finish(&mut self, state: SessionStateV1, reason: TerminationReasonV1) -> bool {
        tracing::debug!(
            state = state.as_str(),
            reason = %reason,
            steps = self.stats.steps,
            expansions = self.stats.expansions,
            "search terminated"
        );
        self.state = state;
        self.termination_reason = Some(reason);
        true
    }

    fn absorb(&mut self, expansion: &Expansion) {
        let s = &expansion.summary;
        self.stats.expansions += 1;
        self.stats.successors_generated += expansion.successors;
        self.stats.closed_filtered += expansion.closed_filtered;
        self.stats.admitted += s.admitted;
        self.stats.replaced += s.replaced;
        self.stats.kept_existing += s.kept_existing;
        self.stats.rejected_by_depth += s.rejected_by_depth;
        self.stats.rejected_by_distance += s.rejected_by_distance;
    }

    fn record(
        &mut self,
        step: u64,
        idx: VertexIdx,
        outcome: StepOutcomeV1,
        expansion: &Expansion,
        draft_updated: bool,
    ) {
        if !self.policy.record_expansions {
            return;
        }
        let v = &self.arena[idx.0];
        self.expansions.push(ExpansionEventV1 {
            step,
            node_id: v.id.clone(),
            from_start: v.from_start,
            to_end: v.to_end,
            f_cost: v.f_cost(),
            depth: v.depth,
            outcome,
            successors: expansion.successors,
            closed_filtered: expansion.closed_filtered,
            stored: expansion.summary.stored.len() as u64,
            rejected_by_depth: expansion.summary.rejected_by_depth,
            rejected_by_distance: expansion.summary.rejected_by_distance,
            draft_updated,
        });
    }
}

/// Per-step expansion tallies.
#[derive(Debug, Default)]
struct Expansion {
    successors: u64,
    closed_filtered: u64,
    summary: InsertSummaryV1,
}
