//! The physical board: city graph, decks, token pools and occupancy.
//!
//! - `topology`: static city graph, built once and shared
//! - `loader`: text map format and the built-in world map
//! - `deck`: player and infection decks with a draw pointer
//! - `pools`: fixed cube and station pools
//! - `occupancy`: per-city token records kept in step with the pools

pub mod topology;
pub mod loader;
pub mod deck;
pub mod pools;
pub mod occupancy;

pub use topology::{City, Topology, TopologyBuilder, TopologyError};
pub use loader::{load_map, parse_map, MapError};
pub use deck::{CityCard, Deck, InfectionCard, PlayerCard};
pub use pools::{Cube, CubePool, PoolError, Station, StationPool, Token, TokenPool};
pub use occupancy::{Board, CityOccupancy};
