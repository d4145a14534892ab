//! Session lifecycle and termination reasons.

/// Lifecycle of a search session.
///
/// `Running` moves to exactly one terminal state. `BudgetExhausted` is only
/// entered by `run()`; a caller may resume stepping from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStateV1 {
    Running,
    FoundGoal,
    Exhausted,
    BudgetExhausted,
}

impl SessionStateV1 {
    /// `true` for `FoundGoal` and `Exhausted`, where further steps do nothing.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::FoundGoal | Self::Exhausted)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::FoundGoal => "found_goal",
            Self::Exhausted => "exhausted",
            Self::BudgetExhausted => "budget_exhausted",
        }
    }
}

/// Why a search stopped, or which insertion limit last fired.
///
/// `Display` renders the diagnostic strings callers match on:
/// `no start nodes`, `graph exhausted`, `found`, `max_steps:<n>`,
/// `max_distance:<n>`, `max_depth:<n>`.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminationReasonV1 {
    /// Neither open nor closed held a vertex: the start had no seeds.
    NoStartNodes,
    /// The open set drained without reaching the target set.
    GraphExhausted,
    /// A popped vertex belonged to the target set.
    Found,
    /// `run()` spent its step budget.
    MaxSteps(u64),
    /// A candidate was rejected for exceeding the distance cap.
    MaxDistance(f64),
    /// A candidate was rejected for exceeding the depth cap.
    MaxDepth(u32),
}

impl TerminationReasonV1 {
    /// `true` for the two insertion-limit variants.
    #[must_use]
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::MaxDistance(_) | Self::MaxDepth(_))
    }
}

impl std::fmt::Display for TerminationReasonV1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStartNodes => write!(f, "no start nodes"),
            Self::GraphExhausted => write!(f, "graph exhausted"),
            Self::Found => write!(f, "found"),
            Self::MaxSteps(n) => write!(f, "max_steps:{n}"),
            Self::MaxDistance(d) => write!(f, "max_distance:{d}"),
            Self::MaxDepth(n) => write!(f, "max_depth:{n}"),
        }
    }
}
