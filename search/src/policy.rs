//! Search policy types.

use crate::error::SearchError;

/// Default depth cap (expansion steps from a seed).
pub const DEFAULT_MAX_DEPTH: u32 = 15;

/// Default step budget for [`crate::search::SearchSession::run`].
pub const DEFAULT_MAX_STEPS: u64 = 150;

/// Search budget and limit configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicyV1 {
    /// Depth cutoff for admitted vertices. `0` disables the cap.
    pub max_depth: u32,
    /// Iteration budget for `run()`. `run()` calls `step()` at most
    /// `max_steps + 1` times.
    pub max_steps: u64,
    /// Accumulated-cost cutoff for admitted vertices. `None` disables the cap.
    pub max_distance: Option<f64>,
    /// How seed vertices initialize their accumulated cost.
    pub seed_cost: SeedCostV1,
    /// Record one [`crate::graph::ExpansionEventV1`] per step.
    pub record_expansions: bool,
}

impl SearchPolicyV1 {
    /// Validate limit values before a session is built.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_distance` is negative,
    /// NaN, or infinite.
    pub fn validate(&self) -> Result<(), SearchError> {
        if let Some(d) = self.max_distance {
            if !d.is_finite() {
                return Err(SearchError::InvalidPolicy {
                    detail: format!("max_distance must be finite, got {d}"),
                });
            }
            if d < 0.0 {
                return Err(SearchError::InvalidPolicy {
                    detail: format!("max_distance must be non-negative, got {d}"),
                });
            }
        }
        Ok(())
    }

    /// The limits applied when inserting expanded successors.
    #[must_use]
    pub fn limits(&self) -> InsertLimitsV1 {
        InsertLimitsV1 {
            max_distance: self.max_distance.filter(|d| *d > 0.0),
            max_depth: (self.max_depth > 0).then_some(self.max_depth),
        }
    }
}

impl Default for SearchPolicyV1 {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_steps: DEFAULT_MAX_STEPS,
            max_distance: None,
            seed_cost: SeedCostV1::Zero,
            record_expansions: false,
        }
    }
}

/// Seed vertex cost bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedCostV1 {
    /// Seeds start at `from_start = 0`.
    #[default]
    Zero,
    /// Seeds start at `heuristic(seed, start)`, the distance between the
    /// seed node and the requested start point. Reproduces legacy outputs.
    HeuristicToStart,
}

impl SeedCostV1 {
    /// Stable lowercase name used in reports and config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::HeuristicToStart => "heuristic_to_start",
        }
    }

    /// Inverse of [`SeedCostV1::as_str`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "zero" => Some(Self::Zero),
            "heuristic_to_start" => Some(Self::HeuristicToStart),
            _ => None,
        }
    }
}

/// Active caps for one `insert_all` batch. `None` means disabled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InsertLimitsV1 {
    pub max_distance: Option<f64>,
    pub max_depth: Option<u32>,
}

impl InsertLimitsV1 {
    /// No caps at all (used for seeding).
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }
}
