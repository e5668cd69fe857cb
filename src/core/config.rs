//! Game configuration types.
//!
//! A game is configured at startup by providing a `GameConfig`:
//! - Pool sizes (cubes per colour, research stations)
//! - Deck parameters (epidemic count and placement, starting hand)
//! - Turn parameters (actions per turn, cards drawn, infection rate track)
//! - Loss thresholds (outbreak limit)
//! - Named rule variants (`CuredInfectionRule`)
//!
//! Every field has the classic board game value as its default, so
//! `GameConfig::default()` plays the standard game.

use serde::{Deserialize, Serialize};

/// How infections of an already cured colour are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CuredInfectionRule {
    /// Only the 3-cube epidemic infection is skipped for a cured colour.
    /// Regular infection draws still place cubes.
    #[default]
    EpidemicOnly,
    /// Every infection of a cured or eradicated colour is skipped.
    EveryInfection,
}

/// Where epidemic cards go when the player deck is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpidemicPlacement {
    /// Epidemics are shuffled uniformly through the undealt city cards.
    #[default]
    Shuffled,
    /// The undealt cards are split into one pile per epidemic, each pile gets
    /// one epidemic shuffled into it, and the piles are stacked.
    Piles,
}

/// Complete game configuration.
///
/// ```
/// use pandemic_ai::core::GameConfig;
///
/// let config = GameConfig::default().with_epidemic_cards(4).with_seed_infections(vec![1, 1]);
/// assert_eq!(config.epidemic_cards, 4);
/// assert_eq!(config.infections_per_turn(0), 2);
/// assert_eq!(config.infections_per_turn(99), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player actions per turn.
    pub actions_per_turn: usize,

    /// Player cards drawn at the end of each turn.
    pub cards_per_turn: usize,

    /// Outbreak count at which the game is lost.
    pub outbreak_limit: u32,

    /// Cubes of each colour in the pool.
    pub cubes_per_colour: usize,

    /// Research stations in the pool.
    pub research_stations: usize,

    /// Matching city cards discarded to discover a cure.
    pub cure_cards: usize,

    /// Epidemic cards added to the player deck.
    pub epidemic_cards: usize,

    /// How epidemic cards are placed in the player deck.
    pub epidemic_placement: EpidemicPlacement,

    /// Infection cards drawn per turn, indexed by infection rate index.
    /// Indices past the end use the last entry.
    pub infection_rate_track: Vec<usize>,

    /// Cube counts for the initial infection draws, in draw order.
    pub initial_infections: Vec<usize>,

    /// Treatment of infections on cured colours.
    pub cured_infection_rule: CuredInfectionRule,

    /// City hosting the first research station and every pawn at setup.
    pub start_city: String,

    /// Starting hand size. `None` uses the player-count table (2 → 4, 3 → 3, 4 → 2).
    pub starting_hand: Option<usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            actions_per_turn: 4,
            cards_per_turn: 2,
            outbreak_limit: 8,
            cubes_per_colour: 24,
            research_stations: 6,
            cure_cards: 5,
            epidemic_cards: 5,
            epidemic_placement: EpidemicPlacement::Shuffled,
            infection_rate_track: vec![2, 2, 2, 2, 3, 3, 3],
            initial_infections: vec![3, 3, 3, 2, 2, 2, 1, 1, 1],
            cured_infection_rule: CuredInfectionRule::EpidemicOnly,
            start_city: "Atlanta".to_string(),
            starting_hand: None,
        }
    }
}

impl GameConfig {
    /// Create the standard configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of epidemic cards.
    #[must_use]
    pub fn with_epidemic_cards(mut self, count: usize) -> Self {
        self.epidemic_cards = count;
        self
    }

    /// Set the epidemic placement.
    #[must_use]
    pub fn with_epidemic_placement(mut self, placement: EpidemicPlacement) -> Self {
        self.epidemic_placement = placement;
        self
    }

    /// Set the cube counts of the initial infection draws.
    #[must_use]
    pub fn with_seed_infections(mut self, counts: Vec<usize>) -> Self {
        self.initial_infections = counts;
        self
    }

    /// Set the cured-colour infection rule.
    #[must_use]
    pub fn with_cured_infection_rule(mut self, rule: CuredInfectionRule) -> Self {
        self.cured_infection_rule = rule;
        self
    }

    /// Set the start city by name.
    #[must_use]
    pub fn with_start_city(mut self, name: impl Into<String>) -> Self {
        self.start_city = name.into();
        self
    }

    /// Override the starting hand size.
    #[must_use]
    pub fn with_starting_hand(mut self, cards: usize) -> Self {
        self.starting_hand = Some(cards);
        self
    }

    /// Set the cube pool size per colour.
    #[must_use]
    pub fn with_cubes_per_colour(mut self, cubes: usize) -> Self {
        self.cubes_per_colour = cubes;
        self
    }

    /// Set the research station pool size.
    #[must_use]
    pub fn with_research_stations(mut self, stations: usize) -> Self {
        self.research_stations = stations;
        self
    }

    /// Set the number of matching cards a cure costs.
    #[must_use]
    pub fn with_cure_cards(mut self, cards: usize) -> Self {
        self.cure_cards = cards;
        self
    }

    /// Set the outbreak limit.
    #[must_use]
    pub fn with_outbreak_limit(mut self, limit: u32) -> Self {
        self.outbreak_limit = limit;
        self
    }

    /// Set the infection rate track.
    #[must_use]
    pub fn with_infection_rate_track(mut self, track: Vec<usize>) -> Self {
        self.infection_rate_track = track;
        self
    }

    /// Starting hand size for a table of `player_count` players.
    #[must_use]
    pub fn starting_hand_size(&self, player_count: usize) -> usize {
        self.starting_hand
            .unwrap_or_else(|| 6usize.saturating_sub(player_count))
    }

    /// Infection cards drawn per turn at the given infection rate index.
    #[must_use]
    pub fn infections_per_turn(&self, rate_index: usize) -> usize {
        self.infection_rate_track
            .get(rate_index)
            .or_else(|| self.infection_rate_track.last())
            .copied()
            .unwrap_or(0)
    }
}
