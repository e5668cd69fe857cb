//! Identifier newtypes for board entities.
//!
//! Every placeable or addressable thing on the board has a small, copyable id:
//!
//! - `CityId`: index into the topology's city list
//! - `CubeId`: index into the cube pool
//! - `StationId`: index into the research station pool
//! - `PawnId`: one per player, unique across the roster
//!
//! Ids are dense indices, assigned in creation order, so they double as
//! `Vec`/`Vector` offsets.

use serde::{Deserialize, Serialize};

/// City identifier (index into the topology).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CityId(pub u16);

impl CityId {
    /// Create a new city ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the id as an index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Disease cube identifier (index into the cube pool).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CubeId(pub u16);

impl CubeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Research station identifier (index into the station pool).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId(pub u8);

impl StationId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pawn identifier. Each player owns exactly one pawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PawnId(pub u8);

impl std::fmt::Display for PawnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pawn {}", self.0)
    }
}
