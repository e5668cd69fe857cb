//! Game status, loss reasons and error types.
//!
//! Rule-driven endings are not errors in the usual sense: the game records
//! them in its `Status` and the action entry point reports them through
//! `ActionError::Lost`. Setup problems are ordinary errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::PoolError;
use crate::core::{Colour, PawnId, Role};

/// Why the team lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum LossReason {
    #[error("too many outbreaks")]
    OutbreakLimitExceeded,

    #[error("ran out of {0} disease cubes")]
    CubePoolExhausted(Colour),

    #[error("ran out of research stations")]
    StationPoolExhausted,

    #[error("the infection deck ran out")]
    InfectionDeckExhausted,

    #[error("the player deck ran out")]
    PlayerDeckExhausted,

    #[error("an action was applied without its precondition")]
    ActionPreconditionViolated,
}

impl From<PoolError> for LossReason {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::CubesExhausted(colour) => LossReason::CubePoolExhausted(colour),
            PoolError::StationsExhausted => LossReason::StationPoolExhausted,
        }
    }
}

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Running,
    /// Every colour cured.
    Won,
    /// A rule ended the game.
    Lost(LossReason),
    /// Stopped on request between decisions.
    Stopped,
}

impl Status {
    #[must_use]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        !self.is_running()
    }

    #[must_use]
    pub fn is_lost(self) -> bool {
        matches!(self, Status::Lost(_))
    }

    /// The loss reason, if the game was lost.
    #[must_use]
    pub fn loss_reason(self) -> Option<LossReason> {
        match self {
            Status::Lost(reason) => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Running => write!(f, "running"),
            Status::Won => write!(f, "won"),
            Status::Lost(reason) => write!(f, "lost: {}", reason),
            Status::Stopped => write!(f, "stopped"),
        }
    }
}

/// Returned by `GameState::apply_action` when the action did not leave the
/// game running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The game had already ended; nothing was applied.
    #[error("the game is already over ({0})")]
    Finished(Status),

    /// Applying the action ended the game.
    #[error("the game was lost: {0}")]
    Lost(LossReason),
}

/// Problems building a new game.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("a game needs 2 to 4 players, got {0}")]
    PlayerCount(usize),

    #[error("role {0} is taken by more than one player")]
    DuplicateRole(Role),

    #[error("{0} is used by more than one player")]
    DuplicatePawn(PawnId),

    #[error("start city '{0}' is not on the map")]
    UnknownStartCity(String),

    #[error("not enough {deck} cards: needed {needed}, have {available}")]
    NotEnoughCards {
        deck: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("placing the first research station failed: {0}")]
    Pool(#[from] PoolError),

    #[error("the initial infections ended the game: {0}")]
    Lost(LossReason),
}
