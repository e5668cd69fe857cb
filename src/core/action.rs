//! Player actions: one variant per action kind.
//!
//! Actions carry only what the acting player chooses. The acting player is
//! always the player whose turn it is, so it is not part of the action. Card
//! references are indices into that player's hand at the moment the action
//! is offered; they are only meaningful against the state that produced them.
//!
//! ```
//! use pandemic_ai::core::{Action, CityId};
//!
//! let drive = Action::DriveOrFerry { to: CityId::new(3) };
//! assert_eq!(drive.destination(), Some(CityId::new(3)));
//! ```

use serde::{Deserialize, Serialize};

use super::colour::Colour;
use super::ids::CityId;
use super::player::PlayerId;

/// A complete player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move to a neighbouring city.
    DriveOrFerry { to: CityId },
    /// Discard the hand card at `card` to fly to its city.
    DirectFlight { card: usize, to: CityId },
    /// Discard the hand card at `card`, which matches the current city, to fly anywhere.
    CharterFlight { card: usize, to: CityId },
    /// Move between two research stations.
    ShuttleFlight { to: CityId },
    /// Discard the hand card at `card`, which matches the current city, to build a station here.
    BuildResearchStation { card: usize },
    /// Remove one cube of an uncured colour from the current city.
    TreatDiseaseRemoveOneCube { colour: Colour },
    /// Remove every cube of a cured colour from the current city.
    TreatDiseaseRemoveAll { colour: Colour },
    /// Discard matching cards at a research station to cure a colour.
    DiscoverCure { colour: Colour },
    /// Give the hand card at `card` to another player.
    TransferCard { card: usize, to: PlayerId },
}

impl Action {
    /// City the acting pawn ends up in, for movement actions.
    #[must_use]
    pub fn destination(&self) -> Option<CityId> {
        match *self {
            Action::DriveOrFerry { to }
            | Action::DirectFlight { to, .. }
            | Action::CharterFlight { to, .. }
            | Action::ShuttleFlight { to } => Some(to),
            _ => None,
        }
    }

    /// Check if this action moves the acting pawn.
    #[must_use]
    pub fn is_movement(&self) -> bool {
        self.destination().is_some()
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Reporting what the agent played
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
