//! The game state machine.
//!
//! ## GameState
//!
//! One owned aggregate per game:
//! - Shared, read-only topology and configuration (`Arc`)
//! - Board occupancy and token pools
//! - Player deck and infection deck
//! - Players with their hands and locations
//! - Global markers: outbreaks, infection rate, epidemics, cures
//! - Turn pointer, status, RNG and action history
//!
//! Everything mutable is stored in `im` persistent collections, so `clone()`
//! is cheap and a clone never shares writes with its source. The lookahead
//! agent relies on that: it clones freely and never touches the live state.
//!
//! ## Lifecycle
//!
//! `Running` until an action or the end of a turn produces `Won` or
//! `Lost(reason)`, or a driver calls `stop()`. All three are terminal.
//! See `rules` for the action catalog, `apply` for action effects and
//! `infection` for the cascades.

use std::sync::Arc;

use im::Vector;
use rustc_hash::FxHashSet;
use strum::IntoEnumIterator;
use tracing::info;

use super::error::{LossReason, SetupError, Status};
use super::player::{Player, PlayerSpec};
use crate::board::{Board, CityCard, Deck, InfectionCard, PlayerCard, Topology};
use crate::core::{
    ActionRecord, CityId, Colour, ColourMap, CureStatus, EpidemicPlacement, GameConfig, GameRng,
    PlayerId, PlayerMap,
};

/// Complete game state.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub(crate) topology: Arc<Topology>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) board: Board,
    pub(crate) player_deck: Deck<PlayerCard>,
    pub(crate) infection_deck: Deck<InfectionCard>,
    pub(crate) players: PlayerMap<Player>,

    // === Markers ===
    pub(crate) outbreaks: u32,
    pub(crate) infection_rate_index: usize,
    pub(crate) epidemics: u32,
    pub(crate) cures: ColourMap<CureStatus>,

    // === Turn ===
    pub(crate) current: PlayerId,
    pub(crate) actions_taken: usize,
    pub(crate) turn_number: u32,
    pub(crate) status: Status,

    pub(crate) rng: GameRng,
    pub(crate) history: Vector<ActionRecord>,
}

impl GameState {
    /// Set up a new game.
    ///
    /// Places the first research station and every pawn on the start city,
    /// deals starting hands, adds the epidemic cards and performs the
    /// initial infections. All shuffles draw from a `GameRng` seeded with
    /// `seed`, so the same inputs always produce the same game.
    pub fn new(
        topology: Arc<Topology>,
        roster: Vec<PlayerSpec>,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, SetupError> {
        validate_roster(&roster)?;

        let start = topology
            .city_by_name(&config.start_city)
            .ok_or_else(|| SetupError::UnknownStartCity(config.start_city.clone()))?;

        let mut board = Board::new(topology.len(), config.cubes_per_colour, config.research_stations);
        board.place_station(start)?;

        let players = PlayerMap::from_vec(
            roster
                .into_iter()
                .enumerate()
                .map(|(i, spec)| {
                    board.add_pawn(spec.pawn, start);
                    Player {
                        name: spec.name.unwrap_or_else(|| format!("Player {}", i + 1)),
                        pawn: spec.pawn,
                        role: spec.role,
                        location: start,
                        hand: Vector::new(),
                    }
                })
                .collect(),
        );

        let mut state = Self {
            player_deck: Deck::new(Vec::new()),
            infection_deck: Deck::new(Vec::new()),
            board,
            players,
            outbreaks: 0,
            infection_rate_index: 0,
            epidemics: 0,
            cures: ColourMap::default(),
            current: PlayerId::new(0),
            actions_taken: 0,
            turn_number: 1,
            status: Status::Running,
            rng: GameRng::new(seed),
            history: Vector::new(),
            topology,
            config: Arc::new(config),
        };

        state.deal_player_cards()?;
        state.seed_infections()?;

        info!(
            players = state.players.player_count(),
            seed,
            player_deck = state.player_deck.len(),
            "Game set up"
        );
        Ok(state)
    }

    /// Shuffle the city cards, deal hands, then build the draw deck with
    /// the epidemic cards.
    fn deal_player_cards(&mut self) -> Result<(), SetupError> {
        let city_cards: Vec<PlayerCard> = self
            .topology
            .cities()
            .map(|city| PlayerCard::City(CityCard { city: city.id, colour: city.colour }))
            .collect();
        let mut deck = Deck::new(city_cards);
        deck.shuffle_from(0, &mut self.rng);

        let hand_size = self.config.starting_hand_size(self.players.player_count());
        let needed = hand_size * self.players.player_count();
        if needed > deck.len() {
            return Err(SetupError::NotEnoughCards {
                deck: "player",
                needed,
                available: deck.len(),
            });
        }

        for player in self.players.player_ids() {
            for _ in 0..hand_size {
                if let Some(PlayerCard::City(card)) = deck.draw() {
                    self.players[player].hand.push_back(card);
                }
            }
        }

        let remainder: Vec<PlayerCard> = deck.undrawn().copied().collect();
        self.player_deck = build_draw_deck(remainder, &self.config, &mut self.rng);
        Ok(())
    }

    /// Shuffle the infection deck and perform the initial infections.
    fn seed_infections(&mut self) -> Result<(), SetupError> {
        let cards: Vec<InfectionCard> = self
            .topology
            .city_ids()
            .map(|city| InfectionCard { city })
            .collect();
        let mut deck = Deck::new(cards);
        deck.shuffle_from(0, &mut self.rng);

        let counts = self.config.initial_infections.clone();
        if counts.len() > deck.len() {
            return Err(SetupError::NotEnoughCards {
                deck: "infection",
                needed: counts.len(),
                available: deck.len(),
            });
        }
        self.infection_deck = deck;

        for count in counts {
            let card = self
                .infection_deck
                .draw()
                .ok_or(SetupError::Lost(LossReason::InfectionDeckExhausted))?;
            let colour = self.topology.colour_of(card.city);
            self.infect(card.city, colour, count).map_err(SetupError::Lost)?;
        }
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status.is_running()
    }

    /// Check if the game ended in a loss.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status.is_lost()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == Status::Won
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Actions the current player has taken this turn.
    #[must_use]
    pub fn actions_taken(&self) -> usize {
        self.actions_taken
    }

    /// Actions the current player has left this turn.
    #[must_use]
    pub fn actions_remaining(&self) -> usize {
        self.config.actions_per_turn.saturating_sub(self.actions_taken)
    }

    /// Turn number, starting at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn outbreaks(&self) -> u32 {
        self.outbreaks
    }

    #[must_use]
    pub fn infection_rate_index(&self) -> usize {
        self.infection_rate_index
    }

    /// Infection cards drawn at the end of the current turn.
    #[must_use]
    pub fn infection_rate(&self) -> usize {
        self.config.infections_per_turn(self.infection_rate_index)
    }

    #[must_use]
    pub fn epidemics(&self) -> u32 {
        self.epidemics
    }

    #[must_use]
    pub fn cure_status(&self, colour: Colour) -> CureStatus {
        self.cures[colour]
    }

    #[must_use]
    pub fn cures(&self) -> &ColourMap<CureStatus> {
        &self.cures
    }

    /// Colours that are cured or eradicated.
    #[must_use]
    pub fn cured_count(&self) -> usize {
        self.cures.values().filter(|status| status.is_cured()).count()
    }

    #[must_use]
    pub fn player_deck(&self) -> &Deck<PlayerCard> {
        &self.player_deck
    }

    #[must_use]
    pub fn infection_deck(&self) -> &Deck<InfectionCard> {
        &self.infection_deck
    }

    /// Actions applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// City name shortcut.
    #[must_use]
    pub fn city_name(&self, city: CityId) -> &str {
        self.topology.name_of(city)
    }

    // === Control ===

    /// Stop a running game on external request.
    ///
    /// The game ends as `Stopped`, which is neither a win nor a loss.
    /// Has no effect on a game that already ended.
    pub fn stop(&mut self) {
        if self.status.is_running() {
            self.status = Status::Stopped;
            info!(turn = self.turn_number, "Game stopped on request");
        }
    }

    // === Scenario setup ===
    //
    // Direct edits for tools and tests that need a specific position. They
    // keep occupancy and pools consistent but skip the rules.

    /// Put a city card straight into a player's hand.
    pub fn give_card(&mut self, player: PlayerId, city: CityId) {
        let colour = self.topology.colour_of(city);
        self.players[player].hand.push_back(CityCard { city, colour });
    }

    /// Empty a player's hand.
    pub fn clear_hand(&mut self, player: PlayerId) {
        self.players[player].hand.clear();
    }

    /// Move a player's pawn without spending an action.
    pub fn relocate(&mut self, player: PlayerId, to: CityId) {
        let from = self.players[player].location;
        let pawn = self.players[player].pawn;
        self.board.move_pawn(pawn, from, to);
        self.players[player].location = to;
    }

    /// Place cubes without infection rules.
    pub fn place_cubes(&mut self, city: CityId, colour: Colour, count: usize) -> Result<(), LossReason> {
        for _ in 0..count {
            self.board.place_cube(city, colour)?;
        }
        Ok(())
    }

    /// Place a research station without spending a card.
    pub fn place_station(&mut self, city: CityId) -> Result<(), LossReason> {
        self.board.place_station(city)?;
        Ok(())
    }

    /// Set a colour's cure status directly.
    pub fn set_cure_status(&mut self, colour: Colour, status: CureStatus) {
        self.cures[colour] = status;
    }

    /// Check if every colour is cured or eradicated.
    pub(crate) fn all_cured(&self) -> bool {
        Colour::iter().all(|colour| self.cures[colour].is_cured())
    }

    /// Record a loss and log it.
    pub(crate) fn lose(&mut self, reason: LossReason) {
        self.status = Status::Lost(reason);
        info!(%reason, turn = self.turn_number, outbreaks = self.outbreaks, "Game lost");
    }
}

fn validate_roster(roster: &[PlayerSpec]) -> Result<(), SetupError> {
    if !(2..=4).contains(&roster.len()) {
        return Err(SetupError::PlayerCount(roster.len()));
    }

    let mut roles = FxHashSet::default();
    let mut pawns = FxHashSet::default();
    for spec in roster {
        if !roles.insert(spec.role) {
            return Err(SetupError::DuplicateRole(spec.role));
        }
        if !pawns.insert(spec.pawn) {
            return Err(SetupError::DuplicatePawn(spec.pawn));
        }
    }
    Ok(())
}

/// Add the epidemic cards to the undealt city cards.
fn build_draw_deck(remainder: Vec<PlayerCard>, config: &GameConfig, rng: &mut GameRng) -> Deck<PlayerCard> {
    let epidemics = config.epidemic_cards;

    match config.epidemic_placement {
        EpidemicPlacement::Shuffled => {
            let mut cards = remainder;
            cards.extend(std::iter::repeat(PlayerCard::Epidemic).take(epidemics));
            let mut deck = Deck::new(cards);
            deck.shuffle_from(0, rng);
            deck
        }
        EpidemicPlacement::Piles if epidemics == 0 => Deck::new(remainder),
        EpidemicPlacement::Piles => {
            let base = remainder.len() / epidemics;
            let extra = remainder.len() % epidemics;

            let mut cards = Vec::with_capacity(remainder.len() + epidemics);
            let mut pile_bounds = Vec::with_capacity(epidemics);
            let mut source = remainder.into_iter();
            for pile in 0..epidemics {
                let size = base + usize::from(pile < extra);
                let start = cards.len();
                cards.extend(source.by_ref().take(size));
                cards.push(PlayerCard::Epidemic);
                pile_bounds.push(start..cards.len());
            }

            let mut deck = Deck::new(cards);
            for bounds in pile_bounds {
                deck.shuffle_range(bounds, rng);
            }
            deck
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TopologyBuilder;
    use crate::core::{PawnId, Role};

    fn ring(size: usize) -> Arc<Topology> {
        let mut builder = TopologyBuilder::new();
        let colours: Vec<_> = Colour::iter().collect();
        let ids: Vec<_> = (0..size)
            .map(|i| {
                let name = if i == 0 { "Atlanta".to_string() } else { format!("C{}", i) };
                builder.add_city(name, colours[i % colours.len()]).unwrap()
            })
            .collect();
        for i in 0..size {
            builder.connect(ids[i], ids[(i + 1) % size]).unwrap();
        }
        Arc::new(builder.build())
    }

    #[test]
    fn test_setup_deals_hands_and_epidemics() {
        let state = GameState::new(ring(24), PlayerSpec::roster(3), GameConfig::default(), 1).unwrap();

        for (_, player) in state.players().iter() {
            assert_eq!(player.hand_size(), 3);
        }
        let epidemics = state.player_deck().cards().filter(|c| c.is_epidemic()).count();
        assert_eq!(epidemics, 5);
        assert_eq!(state.player_deck().len(), 24 - 9 + 5);
        assert_eq!(state.player_deck().pointer(), 0);
    }

    #[test]
    fn test_setup_names_players() {
        let roster = vec![
            PlayerSpec::new(Role::Medic, PawnId(0)).with_name("Ana"),
            PlayerSpec::new(Role::Scientist, PawnId(1)),
        ];
        let state = GameState::new(ring(12), roster, GameConfig::default(), 1).unwrap();
        assert_eq!(state.player(PlayerId::new(0)).name, "Ana");
        assert_eq!(state.player(PlayerId::new(1)).name, "Player 2");
    }

    #[test]
    fn test_setup_rejects_bad_rosters() {
        let config = GameConfig::default();
        assert_eq!(
            GameState::new(ring(12), PlayerSpec::roster(1), config.clone(), 1).unwrap_err(),
            SetupError::PlayerCount(1)
        );

        let roster = vec![
            PlayerSpec::new(Role::Medic, PawnId(0)),
            PlayerSpec::new(Role::Medic, PawnId(1)),
        ];
        assert_eq!(
            GameState::new(ring(12), roster, config.clone(), 1).unwrap_err(),
            SetupError::DuplicateRole(Role::Medic)
        );

        let roster = vec![
            PlayerSpec::new(Role::Medic, PawnId(0)),
            PlayerSpec::new(Role::Dispatcher, PawnId(0)),
        ];
        assert_eq!(
            GameState::new(ring(12), roster, config, 1).unwrap_err(),
            SetupError::DuplicatePawn(PawnId(0))
        );
    }

    #[test]
    fn test_setup_rejects_unknown_start_city() {
        let config = GameConfig::default().with_start_city("Nowhere");
        assert_eq!(
            GameState::new(ring(12), PlayerSpec::roster(2), config, 1).unwrap_err(),
            SetupError::UnknownStartCity("Nowhere".into())
        );
    }

    #[test]
    fn test_piles_placement_spreads_epidemics() {
        let config = GameConfig::default()
            .with_epidemic_placement(EpidemicPlacement::Piles)
            .with_epidemic_cards(4)
            .with_seed_infections(vec![]);
        let state = GameState::new(ring(24), PlayerSpec::roster(2), config, 5).unwrap();

        // 24 - 8 dealt = 16 city cards in 4 piles of 4, plus one epidemic each.
        let cards: Vec<_> = state.player_deck().cards().copied().collect();
        assert_eq!(cards.len(), 20);
        for pile in cards.chunks(5) {
            assert_eq!(pile.iter().filter(|c| c.is_epidemic()).count(), 1);
        }
    }

    #[test]
    fn test_setup_is_deterministic() {
        let a = GameState::new(ring(20), PlayerSpec::roster(2), GameConfig::default(), 9).unwrap();
        let b = GameState::new(ring(20), PlayerSpec::roster(2), GameConfig::default(), 9).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stop_only_affects_running_game() {
        let mut state = GameState::new(ring(12), PlayerSpec::roster(2), GameConfig::default(), 1).unwrap();
        state.stop();
        assert_eq!(state.status(), Status::Stopped);
        assert!(!state.is_failed());

        state.status = Status::Won;
        state.stop();
        assert_eq!(state.status(), Status::Won);
    }

    #[test]
    fn test_relocate_keeps_board_in_step() {
        let mut state = GameState::new(ring(12), PlayerSpec::roster(2), GameConfig::default(), 1).unwrap();
        let target = CityId::new(5);
        let pawn = state.player(PlayerId::new(1)).pawn;

        state.relocate(PlayerId::new(1), target);

        assert_eq!(state.player(PlayerId::new(1)).location, target);
        assert_eq!(state.board().pawns_at(target), &[pawn]);
    }
}
