//! Lookahead agent.
//!
//! The agent ranks every legal action by the mean evaluation of all
//! continuations to the end of the turn (or `max_depth` plies, whichever
//! comes first). It works on clones of the state it is given.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pandemic_ai::agent::{Agent, AgentConfig};
//! use pandemic_ai::board::Topology;
//! use pandemic_ai::core::GameConfig;
//! use pandemic_ai::game::{GameState, PlayerSpec};
//!
//! let topology = Arc::new(Topology::standard().unwrap());
//! let state = GameState::new(topology, PlayerSpec::roster(2), GameConfig::default(), 7).unwrap();
//!
//! let mut agent = Agent::new(AgentConfig::default().with_max_depth(1));
//! let ranked = agent.rank_options(&state);
//! assert_eq!(ranked.len(), state.legal_actions().len());
//! ```

pub mod config;
pub mod evaluation;
pub mod search;
pub mod stats;

pub use config::{AgentConfig, EvaluationWeights};
pub use evaluation::{Evaluator, WeightedEvaluation};
pub use search::{compare_outcomes, Agent, Outcome};
pub use stats::SearchStats;
