//! Human-readable prompt lines for actions.

use crate::core::Action;

use super::state::GameState;

impl Action {
    /// Describe this action against the state that offered it.
    ///
    /// Card indices are resolved through the current player's hand, so the
    /// text is only meaningful for the state the action came from.
    #[must_use]
    pub fn describe(&self, state: &GameState) -> String {
        let name = |city| state.city_name(city).to_string();
        let card = |index: usize| {
            state
                .player(state.current_player())
                .hand
                .get(index)
                .map(|c| format!("{} ({})", state.city_name(c.city), c.colour))
                .unwrap_or_else(|| format!("card #{}", index))
        };

        match *self {
            Action::DriveOrFerry { to } => format!("Drive or ferry to {}", name(to)),
            Action::DirectFlight { card: index, to } => {
                format!("Direct flight to {}, discarding {}", name(to), card(index))
            }
            Action::CharterFlight { card: index, to } => {
                format!("Charter flight to {}, discarding {}", name(to), card(index))
            }
            Action::ShuttleFlight { to } => {
                format!("Shuttle flight to the research station in {}", name(to))
            }
            Action::BuildResearchStation { card: index } => {
                format!("Build a research station here, discarding {}", card(index))
            }
            Action::TreatDiseaseRemoveOneCube { colour } => format!("Treat disease: remove one {} cube", colour),
            Action::TreatDiseaseRemoveAll { colour } => {
                format!("Treat disease: remove all {} cubes (cured)", colour)
            }
            Action::DiscoverCure { colour } => format!("Discover a cure for {}", colour),
            Action::TransferCard { card: index, to } => {
                let recipient = state
                    .players()
                    .get(to)
                    .map_or_else(|| to.to_string(), |p| p.name.clone());
                format!("Give {} to {}", card(index), recipient)
            }
        }
    }
}
