//! Leaf evaluation.
//!
//! An `Evaluator` scores a leaf state against the state the search started
//! from. Positive scores are better for the team. The agent only compares
//! scores, so evaluators are free to pick their own scale.

use crate::game::{GameState, Status};

use super::config::EvaluationWeights;

/// Scores a leaf relative to the search root.
pub trait Evaluator: Send + Sync {
    /// Score `end` compared with `begin`.
    fn evaluate(&self, begin: &GameState, end: &GameState) -> f64;
}

/// Weighted sum of board changes plus win and loss terms.
///
/// `+cubes removed·w − rate steps·w + cures·w − epidemics·w − outbreaks·w
/// + stations·w`, plus `win_bonus` for a won leaf and minus `loss_penalty`
/// for a lost one.
#[derive(Clone, Debug, Default)]
pub struct WeightedEvaluation {
    pub weights: EvaluationWeights,
}

impl WeightedEvaluation {
    #[must_use]
    pub fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }
}

impl Evaluator for WeightedEvaluation {
    fn evaluate(&self, begin: &GameState, end: &GameState) -> f64 {
        let w = &self.weights;
        let delta = |after: usize, before: usize| after as f64 - before as f64;

        let cubes_freed = delta(begin.board().total_cubes_on_board(), end.board().total_cubes_on_board());
        let rate = delta(end.infection_rate_index(), begin.infection_rate_index());
        let cures = delta(end.cured_count(), begin.cured_count());
        let epidemics = f64::from(end.epidemics()) - f64::from(begin.epidemics());
        let outbreaks = f64::from(end.outbreaks()) - f64::from(begin.outbreaks());
        let stations = delta(end.board().stations_on_board(), begin.board().stations_on_board());

        let mut score = cubes_freed * w.cubes - rate * w.infection_rate + cures * w.cures
            - epidemics * w.epidemics
            - outbreaks * w.outbreaks
            + stations * w.stations;

        match end.status() {
            Status::Won => score += w.win_bonus,
            Status::Lost(_) => score -= w.loss_penalty,
            Status::Running | Status::Stopped => {}
        }
        score
    }
}
