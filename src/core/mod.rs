//! Core types: ids, players, colours, actions, RNG, configuration.
//!
//! This module holds the small value types every other module shares.
//! Nothing here knows about the board or the rules.

pub mod ids;
pub mod player;
pub mod colour;
pub mod rng;
pub mod config;
pub mod action;

pub use ids::{CityId, CubeId, StationId, PawnId};
pub use player::{PlayerId, PlayerMap};
pub use colour::{Colour, CureStatus, Role, ColourMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, CuredInfectionRule, EpidemicPlacement};
pub use action::{Action, ActionRecord};
