//! # pandemic-ai
//!
//! A cooperative disease-containment board game engine with a lookahead
//! advisor agent.
//!
//! ## Design Principles
//!
//! 1. **One Owned Aggregate**: All game entities live in a single
//!    `GameState`. There are no process-wide registries.
//!
//! 2. **Losses Are States**: Rule-driven terminations (outbreak limit, an
//!    exhausted pool or deck, a violated precondition) end the game with a
//!    `LossReason`. Only broken invariants panic.
//!
//! 3. **Deterministic**: Every shuffle draws from a seeded `GameRng` carried
//!    by the state, so a seed reproduces a whole game.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Decks, hands and occupancy use `im-rs`
//!   so the agent can clone a state per explored action cheaply.
//!
//! - **Averaging Lookahead**: The agent scores each legal action by the mean
//!   evaluation of every continuation to the end of the turn.
//!
//! ## Modules
//!
//! - `core`: ids, players, colours, actions, RNG, configuration
//! - `board`: city graph, map loader, decks, token pools, occupancy
//! - `game`: the state machine, legal actions, infection and epidemics
//! - `agent`: lookahead search and evaluation

pub mod core;
pub mod board;
pub mod game;
pub mod agent;

// Re-export commonly used types
pub use crate::core::{
    CityId, PlayerId, PlayerMap,
    GameRng, GameRngState,
    Colour, CureStatus, Role,
    GameConfig, CuredInfectionRule, EpidemicPlacement,
    Action, ActionRecord,
};

pub use crate::board::{Topology, TopologyBuilder, MapError, load_map, parse_map};

pub use crate::game::{
    GameState, Progress, PlayerSpec,
    ActionError, LossReason, SetupError, Status,
    InfectionReport, Outbreak,
};

pub use crate::agent::{
    Agent, AgentConfig, EvaluationWeights, Evaluator, WeightedEvaluation,
    Outcome, SearchStats,
};
