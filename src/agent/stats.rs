//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one ranking call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Ranking calls since the agent was created.
    pub decisions: u32,

    /// States cloned and advanced by one action.
    pub nodes_expanded: u64,

    /// Leaves scored by the evaluator.
    pub leaves_evaluated: u64,

    /// Leaves where the game was lost.
    pub losing_leaves: u64,

    /// Deepest ply reached.
    pub max_depth: u16,

    /// Time spent in the last ranking call (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the per-call counters, keeping the decision count.
    pub fn reset(&mut self) {
        *self = Self {
            decisions: self.decisions,
            ..Self::default()
        };
    }

    /// Calculate nodes expanded per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Share of evaluated leaves that were losses.
    #[must_use]
    pub fn losing_share(&self) -> f64 {
        if self.leaves_evaluated == 0 {
            0.0
        } else {
            self.losing_leaves as f64 / self.leaves_evaluated as f64
        }
    }
}
