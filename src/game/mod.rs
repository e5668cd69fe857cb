//! The game state machine.
//!
//! - `state`: the `GameState` aggregate, setup and queries
//! - `rules`: the legal-action catalog
//! - `apply`: action effects and the end-of-turn sequence
//! - `infection`: infection, outbreak and epidemic resolution
//! - `player`: players and roster entries
//! - `error`: status, loss reasons and errors
//! - `labels`: prompt text for actions

pub mod state;
pub mod rules;
pub mod apply;
pub mod infection;
pub mod player;
pub mod error;
pub mod labels;

pub use state::GameState;
pub use apply::Progress;
pub use infection::{InfectionReport, Outbreak, OUTBREAK_THRESHOLD};
pub use player::{Player, PlayerSpec};
pub use error::{ActionError, LossReason, SetupError, Status};
