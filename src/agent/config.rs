//! Agent configuration parameters.

use serde::{Deserialize, Serialize};

/// Weights of the default evaluation.
///
/// Each weight multiplies the change of one board quantity between the
/// state the search started from and a leaf. Only the ordering matters
/// much: a cure outweighs everything short of winning, an outbreak or a
/// loss outweighs small board changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationWeights {
    /// Per cube removed from the board.
    pub cubes: f64,
    /// Per step of the infection rate index.
    pub infection_rate: f64,
    /// Per colour cured or eradicated.
    pub cures: f64,
    /// Per epidemic drawn.
    pub epidemics: f64,
    /// Per outbreak.
    pub outbreaks: f64,
    /// Per research station built.
    pub stations: f64,
    /// Added when the leaf is a win.
    pub win_bonus: f64,
    /// Subtracted when the leaf is a loss.
    pub loss_penalty: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            cubes: 1.0,
            infection_rate: 5.0,
            cures: 1000.0,
            epidemics: 5.0,
            outbreaks: 50.0,
            stations: 10.0,
            win_bonus: 10_000.0,
            loss_penalty: 500.0,
        }
    }
}

/// Lookahead agent configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Evaluation weights.
    pub weights: EvaluationWeights,

    /// Maximum plies searched (never more than the actions left in the turn).
    /// Lower values give cheaper, greedier advice.
    pub max_depth: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            weights: EvaluationWeights::default(),
            max_depth: 4,
        }
    }
}

impl AgentConfig {
    /// Create a new config with custom max depth.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Create a new config with custom weights.
    #[must_use]
    pub fn with_weights(mut self, weights: EvaluationWeights) -> Self {
        self.weights = weights;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.max_depth, 4);
        assert!(config.weights.cures > config.weights.loss_penalty);
        assert!(config.weights.loss_penalty > config.weights.outbreaks);
        assert!(config.weights.outbreaks > config.weights.stations);
    }

    #[test]
    fn test_builder_pattern() {
        let weights = EvaluationWeights { cubes: 3.0, ..Default::default() };
        let config = AgentConfig::default().with_max_depth(2).with_weights(weights);

        assert_eq!(config.max_depth, 2);
        assert_eq!(config.weights.cubes, 3.0);
        assert_eq!(config.weights.cures, 1000.0);
    }

    #[test]
    fn test_serialization() {
        let config = AgentConfig::default().with_max_depth(3);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: AgentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
