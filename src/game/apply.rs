//! Action application and the end-of-turn sequence.
//!
//! `apply_action` is the only way the rules move a game forward. Every
//! step below it returns `Result<_, LossReason>`; the first loss stops the
//! step chain and becomes the game's terminal status.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{ActionError, LossReason, Status};
use super::state::GameState;
use crate::board::{CityCard, PlayerCard};
use crate::core::{Action, ActionRecord, CityId, Colour, CureStatus, PlayerId};

/// What happened after a successfully applied action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Progress {
    /// The same player acts again.
    Continue,
    /// That was the last action of the turn; cards were drawn, cities were
    /// infected and the next player is up.
    TurnEnded,
    /// Every colour is cured.
    Won,
}

impl GameState {
    /// Apply one action for the current player.
    ///
    /// On a finished game nothing happens and `ActionError::Finished` is
    /// returned. Otherwise the action is recorded and resolved; after the
    /// last action of a turn the end-of-turn sequence runs. A loss at any
    /// point ends the game and is returned as `ActionError::Lost`.
    pub fn apply_action(&mut self, action: &Action) -> Result<Progress, ActionError> {
        if !self.status.is_running() {
            return Err(ActionError::Finished(self.status));
        }

        let player = self.current;
        self.history.push_back(ActionRecord::new(
            player,
            *action,
            self.turn_number,
            self.actions_taken as u32,
        ));
        debug!(player = %player, ?action, "Applying action");

        if let Err(reason) = self.perform(player, action) {
            self.lose(reason);
            return Err(ActionError::Lost(reason));
        }
        self.actions_taken += 1;

        if self.all_cured() {
            self.status = Status::Won;
            info!(turn = self.turn_number, "All diseases cured, game won");
            return Ok(Progress::Won);
        }

        if self.actions_taken >= self.config.actions_per_turn {
            if let Err(reason) = self.end_turn() {
                self.lose(reason);
                return Err(ActionError::Lost(reason));
            }
            return Ok(Progress::TurnEnded);
        }

        Ok(Progress::Continue)
    }

    fn perform(&mut self, player: PlayerId, action: &Action) -> Result<(), LossReason> {
        let here = self.players[player].location;

        match *action {
            Action::DriveOrFerry { to } => {
                require(self.topology.are_neighbours(here, to))?;
                self.relocate(player, to);
            }
            Action::DirectFlight { card, to } => {
                let discarded = self.discard(player, card, |c| c.city == to)?;
                self.relocate(player, discarded.city);
            }
            Action::CharterFlight { card, to } => {
                require(self.topology.get(to).is_some())?;
                self.discard(player, card, |c| c.city == here)?;
                self.relocate(player, to);
            }
            Action::ShuttleFlight { to } => {
                require(self.topology.get(to).is_some() && self.board.has_station(to))?;
                self.relocate(player, to);
            }
            Action::BuildResearchStation { card } => {
                self.discard(player, card, |c| c.city == here)?;
                self.board.place_station(here)?;
            }
            Action::TreatDiseaseRemoveOneCube { colour } => {
                require(self.board.remove_cube(here, colour))?;
                self.check_eradication(colour);
            }
            Action::TreatDiseaseRemoveAll { colour } => {
                self.board.remove_all_cubes(here, colour);
                self.check_eradication(colour);
            }
            Action::DiscoverCure { colour } => {
                let needed = self.config.cure_cards;
                require(self.players[player].cards_of(colour) >= needed)?;
                self.discard_colour(player, colour, needed);
                if self.cures[colour] == CureStatus::Uncured {
                    self.cures[colour] = CureStatus::Cured;
                }
                info!(%colour, "Cure discovered");
            }
            Action::TransferCard { card, to } => {
                require(to != player && self.players.get(to).is_some())?;
                let given = self.discard(player, card, |_| true)?;
                self.players[to].hand.push_back(given);
            }
        }
        Ok(())
    }

    /// Remove the hand card at `index` if it passes `check`.
    fn discard(
        &mut self,
        player: PlayerId,
        index: usize,
        check: impl Fn(&CityCard) -> bool,
    ) -> Result<CityCard, LossReason> {
        let hand = &mut self.players[player].hand;
        require(hand.get(index).is_some_and(check))?;
        Ok(hand.remove(index))
    }

    /// Remove the first `count` cards of `colour`, keeping the rest in order.
    fn discard_colour(&mut self, player: PlayerId, colour: Colour, count: usize) {
        let hand = &mut self.players[player].hand;
        let mut removed = 0;
        hand.retain(|card| {
            if removed < count && card.colour == colour {
                removed += 1;
                false
            } else {
                true
            }
        });
    }

    /// A cured colour with no cubes left anywhere becomes eradicated.
    fn check_eradication(&mut self, colour: Colour) {
        if self.cures[colour] == CureStatus::Cured && self.board.cubes_on_board(colour) == 0 {
            self.cures[colour] = CureStatus::Eradicated;
            info!(%colour, "Disease eradicated");
        }
    }

    /// Draw player cards, infect cities and pass the turn.
    fn end_turn(&mut self) -> Result<(), LossReason> {
        let player = self.current;

        for _ in 0..self.config.cards_per_turn {
            match self.player_deck.draw().ok_or(LossReason::PlayerDeckExhausted)? {
                PlayerCard::City(card) => self.players[player].hand.push_back(card),
                PlayerCard::Epidemic => {
                    self.resolve_epidemic()?;
                }
            }
        }

        for _ in 0..self.infection_rate() {
            let card = self
                .infection_deck
                .draw()
                .ok_or(LossReason::InfectionDeckExhausted)?;
            let colour = self.topology.colour_of(card.city);
            self.infect(card.city, colour, 1)?;
        }

        self.current = player.next(self.players.player_count());
        self.actions_taken = 0;
        self.turn_number += 1;
        debug!(
            turn = self.turn_number,
            player = %self.current,
            outbreaks = self.outbreaks,
            "Turn passed"
        );
        Ok(())
    }

    /// City the current player's pawn is on.
    #[must_use]
    pub fn current_city(&self) -> CityId {
        self.players[self.current].location
    }
}

fn require(condition: bool) -> Result<(), LossReason> {
    if condition {
        Ok(())
    } else {
        Err(LossReason::ActionPreconditionViolated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::board::TopologyBuilder;
    use crate::core::GameConfig;
    use crate::game::PlayerSpec;

    // A - B - C line, all blue, with two red cities hanging off C.
    fn game() -> GameState {
        let mut builder = TopologyBuilder::new();
        for (name, colour) in [
            ("Atlanta", Colour::Blue),
            ("B", Colour::Blue),
            ("C", Colour::Blue),
            ("D", Colour::Red),
            ("E", Colour::Red),
        ] {
            builder.add_city(name, colour).unwrap();
        }
        builder.connect_by_name("Atlanta", "B").unwrap();
        builder.connect_by_name("B", "C").unwrap();
        builder.connect_by_name("C", "D").unwrap();
        builder.connect_by_name("C", "E").unwrap();

        let config = GameConfig::default()
            .with_seed_infections(vec![])
            .with_starting_hand(0)
            .with_epidemic_cards(0);
        let mut state =
            GameState::new(Arc::new(builder.build()), PlayerSpec::roster(2), config, 3).unwrap();
        state.clear_hand(PlayerId::new(0));
        state.clear_hand(PlayerId::new(1));
        state
    }

    #[test]
    fn test_drive_moves_pawn() {
        let mut state = game();
        let b = CityId::new(1);
        assert_eq!(state.apply_action(&Action::DriveOrFerry { to: b }), Ok(Progress::Continue));
        assert_eq!(state.current_city(), b);
        assert_eq!(state.actions_taken(), 1);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_drive_to_non_neighbour_loses() {
        let mut state = game();
        let result = state.apply_action(&Action::DriveOrFerry { to: CityId::new(3) });
        assert_eq!(result, Err(ActionError::Lost(LossReason::ActionPreconditionViolated)));
        assert!(state.is_failed());
    }

    #[test]
    fn test_direct_flight_requires_matching_card() {
        let mut state = game();
        let p0 = PlayerId::new(0);
        state.give_card(p0, CityId::new(2));

        let mut ok = state.clone();
        ok.apply_action(&Action::DirectFlight { card: 0, to: CityId::new(2) }).unwrap();
        assert_eq!(ok.current_city(), CityId::new(2));
        assert_eq!(ok.player(p0).hand_size(), 0);

        let result = state.apply_action(&Action::DirectFlight { card: 0, to: CityId::new(3) });
        assert_eq!(result, Err(ActionError::Lost(LossReason::ActionPreconditionViolated)));
    }

    #[test]
    fn test_bad_hand_index_loses() {
        let mut state = game();
        let result = state.apply_action(&Action::BuildResearchStation { card: 4 });
        assert_eq!(result, Err(ActionError::Lost(LossReason::ActionPreconditionViolated)));
    }

    #[test]
    fn test_charter_and_build() {
        let mut state = game();
        let p0 = PlayerId::new(0);
        let here = state.current_city();
        state.give_card(p0, here);
        state.give_card(p0, CityId::new(4));

        state.apply_action(&Action::DirectFlight { card: 1, to: CityId::new(4) }).unwrap();
        assert_eq!(state.current_city(), CityId::new(4));

        // The remaining card is for Atlanta, not E.
        let mut charter = state.clone();
        let result = charter.apply_action(&Action::CharterFlight { card: 0, to: CityId::new(1) });
        assert!(result.is_err());

        state.give_card(p0, CityId::new(4));
        state.apply_action(&Action::BuildResearchStation { card: 1 }).unwrap();
        assert!(state.board().has_station(CityId::new(4)));
        assert_eq!(state.board().stations_on_board(), 2);
    }

    #[test]
    fn test_shuttle_requires_station() {
        let mut state = game();
        let mut bad = state.clone();
        assert!(bad.apply_action(&Action::ShuttleFlight { to: CityId::new(2) }).is_err());

        state.place_station(CityId::new(2)).unwrap();
        state.apply_action(&Action::ShuttleFlight { to: CityId::new(2) }).unwrap();
        assert_eq!(state.current_city(), CityId::new(2));
    }

    #[test]
    fn test_treat_and_eradicate() {
        let mut state = game();
        let here = state.current_city();
        state.place_cubes(here, Colour::Blue, 2).unwrap();

        state.apply_action(&Action::TreatDiseaseRemoveOneCube { colour: Colour::Blue }).unwrap();
        assert_eq!(state.board().cube_count(here, Colour::Blue), 1);
        assert_eq!(state.cure_status(Colour::Blue), CureStatus::Uncured);

        state.set_cure_status(Colour::Blue, CureStatus::Cured);
        state.apply_action(&Action::TreatDiseaseRemoveAll { colour: Colour::Blue }).unwrap();
        assert_eq!(state.board().cube_count(here, Colour::Blue), 0);
        assert_eq!(state.cure_status(Colour::Blue), CureStatus::Eradicated);
    }

    #[test]
    fn test_treat_without_cube_loses() {
        let mut state = game();
        let result = state.apply_action(&Action::TreatDiseaseRemoveOneCube { colour: Colour::Red });
        assert_eq!(result, Err(ActionError::Lost(LossReason::ActionPreconditionViolated)));
    }

    #[test]
    fn test_transfer_card() {
        let mut state = game();
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        state.give_card(p0, CityId::new(3));

        state.apply_action(&Action::TransferCard { card: 0, to: p1 }).unwrap();
        assert_eq!(state.player(p0).hand_size(), 0);
        assert_eq!(state.player(p1).hand[0].city, CityId::new(3));

        let mut to_self = state.clone();
        to_self.give_card(p0, CityId::new(2));
        assert!(to_self.apply_action(&Action::TransferCard { card: 0, to: p0 }).is_err());
    }

    #[test]
    fn test_end_of_turn_passes_play() {
        let mut state = game();
        let a = state.current_city();
        let b = CityId::new(1);
        for to in [b, a, b] {
            assert_eq!(state.apply_action(&Action::DriveOrFerry { to }), Ok(Progress::Continue));
        }
        let infection_pointer = state.infection_deck().pointer();

        assert_eq!(state.apply_action(&Action::DriveOrFerry { to: a }), Ok(Progress::TurnEnded));
        assert_eq!(state.current_player(), PlayerId::new(1));
        assert_eq!(state.actions_taken(), 0);
        assert_eq!(state.turn_number(), 2);
        assert_eq!(state.player(PlayerId::new(0)).hand_size(), 2);
        assert_eq!(state.infection_deck().pointer(), infection_pointer + 2);
    }

    #[test]
    fn test_finished_game_is_noop() {
        let mut state = game();
        state.stop();
        let before = state.clone();

        let result = state.apply_action(&Action::DriveOrFerry { to: CityId::new(1) });
        assert_eq!(result, Err(ActionError::Finished(Status::Stopped)));
        assert_eq!(state, before);
    }
}
