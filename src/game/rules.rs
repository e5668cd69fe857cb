//! The legal-action catalog.
//!
//! The catalog is rebuilt from the current city, hand and board at every
//! decision point. Its order is fixed, which keeps agent rankings
//! reproducible:
//!
//! 1. Treat: one per cube colour in the city (remove one, or remove all if cured)
//! 2. Drive or ferry: one per neighbour
//! 3. Per hand card, in hand order: charter flights to every other city plus
//!    a station build if the card matches the current city, otherwise a direct
//!    flight; then a transfer to each other player
//! 4. With a station in the city: cures, then shuttle flights

use strum::IntoEnumIterator;

use super::state::GameState;
use crate::core::{Action, Colour};

impl GameState {
    /// Every action the current player may take now.
    ///
    /// Empty once the game has ended.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        if !self.is_running() {
            return actions;
        }

        let player_id = self.current;
        let player = &self.players[player_id];
        let here = player.location;
        let has_station = self.board.has_station(here);

        for colour in self.board.colours_at(here) {
            if self.cures[colour].is_cured() {
                actions.push(Action::TreatDiseaseRemoveAll { colour });
            } else {
                actions.push(Action::TreatDiseaseRemoveOneCube { colour });
            }
        }

        for &to in self.topology.neighbours_of(here) {
            actions.push(Action::DriveOrFerry { to });
        }

        for (card, city_card) in player.hand.iter().enumerate() {
            if city_card.city == here {
                for to in self.topology.city_ids().filter(|city| *city != here) {
                    actions.push(Action::CharterFlight { card, to });
                }
                actions.push(Action::BuildResearchStation { card });
            } else {
                actions.push(Action::DirectFlight { card, to: city_card.city });
            }

            for other in self.players.player_ids().filter(|p| *p != player_id) {
                actions.push(Action::TransferCard { card, to: other });
            }
        }

        if has_station {
            for colour in Colour::iter() {
                if !self.cures[colour].is_cured() && player.cards_of(colour) >= self.config.cure_cards {
                    actions.push(Action::DiscoverCure { colour });
                }
            }
            for to in self.board.station_cities() {
                if to != here {
                    actions.push(Action::ShuttleFlight { to });
                }
            }
        }

        actions
    }
}
