//! Exhaustive lookahead over the rest of the current turn.
//!
//! Every ply enumerates all legal actions and there is no adversary, so a
//! node's value is the mean of its children rather than a max. The agent
//! only ever works on clones; the state it is handed is never mutated by
//! ranking.

use std::cmp::Ordering;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Action, PlayerId};
use crate::game::{GameState, Progress};

use super::config::AgentConfig;
use super::evaluation::{Evaluator, WeightedEvaluation};
use super::stats::SearchStats;

/// Averaged result of playing one action and every continuation after it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// The first action of the continuation.
    pub action: Action,
    /// Mean evaluation over all leaves below the action.
    pub rating: f64,
    /// Mean number of epidemics drawn along the way.
    pub epidemics: f64,
    /// Mean hand size of the acting player at the leaves.
    pub hand_size: f64,
}

/// Componentwise totals accumulated while averaging children.
#[derive(Clone, Copy, Debug, Default)]
struct Backup {
    rating: f64,
    epidemics: f64,
    hand_size: f64,
}

impl Backup {
    fn add(&mut self, other: Backup) {
        self.rating += other.rating;
        self.epidemics += other.epidemics;
        self.hand_size += other.hand_size;
    }

    fn mean(self, count: usize) -> Backup {
        let n = count as f64;
        Backup {
            rating: self.rating / n,
            epidemics: self.epidemics / n,
            hand_size: self.hand_size / n,
        }
    }
}

/// Lookahead agent.
///
/// Owns its configuration, the leaf evaluator and statistics for the last
/// ranking call.
pub struct Agent {
    config: AgentConfig,
    evaluator: Box<dyn Evaluator>,
    stats: SearchStats,
}

impl Agent {
    /// Create an agent using the weighted evaluation from `config`.
    pub fn new(config: AgentConfig) -> Self {
        let evaluator = WeightedEvaluation::new(config.weights.clone());
        Self {
            config,
            evaluator: Box::new(evaluator),
            stats: SearchStats::default(),
        }
    }

    /// Set a custom leaf evaluator.
    pub fn with_evaluator<V: Evaluator + 'static>(mut self, evaluator: V) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Get statistics from the last ranking call.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the configuration.
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Rank every legal action at the current decision point, best first.
    ///
    /// Ties keep the catalog order, so a given state always ranks the same
    /// way. Returns an empty list when the game is over.
    pub fn rank_options(&mut self, state: &GameState) -> Vec<Outcome> {
        let start = Instant::now();
        self.stats.reset();
        self.stats.decisions += 1;

        let horizon = state.actions_remaining().min(self.config.max_depth).max(1);
        let actor = state.current_player();

        let mut outcomes: Vec<Outcome> = state
            .legal_actions()
            .into_iter()
            .map(|action| {
                let backup = self.traverse(state, state, actor, &action, 1, horizon);
                Outcome {
                    action,
                    rating: backup.rating,
                    epidemics: backup.epidemics,
                    hand_size: backup.hand_size,
                }
            })
            .collect();

        outcomes.sort_by(compare_outcomes);
        self.stats.time_us = start.elapsed().as_micros() as u64;

        debug!(
            options = outcomes.len(),
            horizon,
            nodes = self.stats.nodes_expanded,
            leaves = self.stats.leaves_evaluated,
            losing = self.stats.losing_leaves,
            best = outcomes.first().map(|o| o.rating),
            "Ranked options"
        );
        outcomes
    }

    /// Top-ranked action, if any.
    pub fn best_action(&mut self, state: &GameState) -> Option<Action> {
        self.rank_options(state).first().map(|o| o.action)
    }

    /// Play out the current turn, re-ranking before every action.
    ///
    /// Stops when the turn ends or the game is over. Returns the actions
    /// that were applied.
    pub fn play_turn(&mut self, state: &mut GameState) -> Vec<Action> {
        self.play_turn_with(state, |_, _| {})
    }

    /// Like [`play_turn`](Self::play_turn), calling `before_apply` with the
    /// state each chosen action is about to be applied to.
    pub fn play_turn_with<F>(&mut self, state: &mut GameState, mut before_apply: F) -> Vec<Action>
    where
        F: FnMut(&GameState, &Action),
    {
        let mut played = Vec::new();
        while state.is_running() {
            let Some(action) = self.best_action(state) else {
                break;
            };
            before_apply(state, &action);
            played.push(action);
            match state.apply_action(&action) {
                Ok(Progress::Continue) => {}
                Ok(Progress::TurnEnded | Progress::Won) | Err(_) => break,
            }
        }
        played
    }

    fn traverse(
        &mut self,
        root: &GameState,
        parent: &GameState,
        actor: PlayerId,
        action: &Action,
        depth: usize,
        horizon: usize,
    ) -> Backup {
        let mut child = parent.clone();
        let progress = child.apply_action(action);
        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth as u16);

        let next = if depth >= horizon || !matches!(progress, Ok(Progress::Continue)) {
            Vec::new()
        } else {
            child.legal_actions()
        };

        if next.is_empty() {
            return self.leaf(root, &child, actor);
        }

        let mut total = Backup::default();
        for action in &next {
            total.add(self.traverse(root, &child, actor, action, depth + 1, horizon));
        }
        total.mean(next.len())
    }

    fn leaf(&mut self, root: &GameState, end: &GameState, actor: PlayerId) -> Backup {
        self.stats.leaves_evaluated += 1;
        if end.is_failed() {
            self.stats.losing_leaves += 1;
        }
        Backup {
            rating: self.evaluator.evaluate(root, end),
            epidemics: f64::from(end.epidemics()) - f64::from(root.epidemics()),
            hand_size: end.player(actor).hand_size() as f64,
        }
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

/// Order outcomes best first by rating.
#[must_use]
pub fn compare_outcomes(a: &Outcome, b: &Outcome) -> Ordering {
    b.rating.total_cmp(&a.rating)
}
