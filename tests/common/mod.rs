//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pandemic_ai::board::{parse_map, Topology};
use pandemic_ai::core::{CityId, GameConfig};
use pandemic_ai::game::{GameState, PlayerSpec};

/// Eight cities, two per colour: a five-city ring
/// (Atlanta, Chicago, Cairo, Lagos, Miami) with a tail from Cairo through
/// Delhi and Tokyo to Seoul.
pub const SMALL_MAP: &str = "\
Atlanta;Blue
Chicago;Blue
Miami;Yellow
Lagos;Yellow
Cairo;Black
Delhi;Black
Tokyo;Red
Seoul;Red
--
Atlanta;Chicago
Atlanta;Miami
Chicago;Cairo
Miami;Lagos
Lagos;Cairo
Cairo;Delhi
Delhi;Tokyo
Tokyo;Seoul
";

pub fn small_map() -> Arc<Topology> {
    Arc::new(parse_map(SMALL_MAP).unwrap())
}

pub fn standard_map() -> Arc<Topology> {
    Arc::new(Topology::standard().unwrap())
}

/// No starting hands, no epidemics, no initial infections.
pub fn quiet_config() -> GameConfig {
    GameConfig::default()
        .with_seed_infections(vec![])
        .with_starting_hand(0)
        .with_epidemic_cards(0)
}

pub fn small_game(config: GameConfig, seed: u64) -> GameState {
    GameState::new(small_map(), PlayerSpec::roster(2), config, seed).unwrap()
}

pub fn standard_game(players: usize, seed: u64) -> GameState {
    GameState::new(standard_map(), PlayerSpec::roster(players), GameConfig::default(), seed).unwrap()
}

pub fn city(state: &GameState, name: &str) -> CityId {
    state.topology().city_by_name(name).unwrap()
}
