//! Terminal driver: menus, board printouts and autoplay.

use anyhow::Result;
use dialoguer::Select;
use strum::IntoEnumIterator;
use tracing::info;

use pandemic_ai::agent::Agent;
use pandemic_ai::core::{Colour, CureStatus};
use pandemic_ai::game::{GameState, Progress, Status};

const MENU: [&str; 5] = ["Perform action", "View cards", "Consult agent", "View board", "Quit"];

/// Agent suggestions shown by "Consult agent".
const ADVICE_SHOWN: usize = 5;

/// Owns the live game and the advisor for one session.
pub struct Console {
    state: GameState,
    agent: Agent,
}

impl Console {
    pub fn new(state: GameState, agent: Agent) -> Self {
        Self { state, agent }
    }

    /// Interactive loop until the game ends or the user quits.
    pub fn run(&mut self) -> Result<()> {
        println!("{}", self.summary());
        while self.state.is_running() {
            let prompt = format!(
                "{} in {} ({} actions left)",
                self.current_name(),
                self.state.city_name(self.state.current_city()),
                self.state.actions_remaining()
            );
            let choice = Select::new().with_prompt(prompt).items(&MENU[..]).default(0).interact()?;
            match choice {
                0 => self.perform()?,
                1 => println!("{}", self.cards()),
                2 => println!("{}", self.advice()),
                3 => println!("{}", self.summary()),
                _ => self.state.stop(),
            }
        }
        println!("{}", final_message(self.state.status()));
        Ok(())
    }

    /// Let the agent play every seat until the game ends or `max_turns`
    /// turns have been played.
    pub fn autoplay(&mut self, max_turns: Option<u32>) -> Result<()> {
        while self.state.is_running() {
            if max_turns.is_some_and(|limit| self.state.turn_number() > limit) {
                self.state.stop();
                break;
            }
            let turn = self.state.turn_number();
            let seat = self.current_name();
            let described: Vec<String> = self.plan_and_play();
            println!("Turn {} ({}): {}", turn, seat, described.join("; "));
            info!(
                turn,
                outbreaks = self.state.outbreaks(),
                cubes = self.state.board().total_cubes_on_board(),
                cured = self.state.cured_count(),
                "Turn played"
            );
        }
        println!("{}", self.summary());
        println!("{}", final_message(self.state.status()));
        Ok(())
    }

    /// Play one turn with the agent, describing each action before it is
    /// applied (card indices refer to the hand at that point).
    fn plan_and_play(&mut self) -> Vec<String> {
        let mut described = Vec::new();
        self.agent
            .play_turn_with(&mut self.state, |state, action| described.push(action.describe(state)));
        described
    }

    fn perform(&mut self) -> Result<()> {
        let actions = self.state.legal_actions();
        if actions.is_empty() {
            println!("No legal actions.");
            return Ok(());
        }
        let labels: Vec<String> = actions.iter().map(|a| a.describe(&self.state)).collect();
        let choice = Select::new()
            .with_prompt("Choose an action")
            .items(&labels[..])
            .default(0)
            .interact()?;

        let turn = self.state.turn_number();
        match self.state.apply_action(&actions[choice]) {
            Ok(Progress::TurnEnded) => {
                println!("Turn {} over. {}", turn, self.markers());
            }
            Ok(Progress::Continue | Progress::Won) | Err(_) => {}
        }
        Ok(())
    }

    fn current_name(&self) -> String {
        self.state.player(self.state.current_player()).name.clone()
    }

    fn cards(&self) -> String {
        let mut out = String::new();
        for (_, player) in self.state.players().iter() {
            let hand: Vec<String> = player
                .hand
                .iter()
                .map(|card| format!("{} ({})", self.state.city_name(card.city), card.colour))
                .collect();
            out.push_str(&format!("{} [{}]: {}\n", player.name, player.role, hand.join(", ")));
        }
        out
    }

    fn advice(&mut self) -> String {
        let ranked = self.agent.rank_options(&self.state);
        let mut out = String::new();
        for (rank, outcome) in ranked.iter().take(ADVICE_SHOWN).enumerate() {
            out.push_str(&format!(
                "{}. {} (rating {:.1}, epidemics {:.2}, hand {:.1})\n",
                rank + 1,
                outcome.action.describe(&self.state),
                outcome.rating,
                outcome.epidemics,
                outcome.hand_size
            ));
        }
        let stats = self.agent.stats();
        out.push_str(&format!(
            "{} nodes, {} leaves in {} ms",
            stats.nodes_expanded,
            stats.leaves_evaluated,
            stats.time_us / 1000
        ));
        out
    }

    fn markers(&self) -> String {
        let cures: Vec<String> = Colour::iter()
            .map(|colour| {
                let mark = match self.state.cure_status(colour) {
                    CureStatus::Uncured => "-",
                    CureStatus::Cured => "cured",
                    CureStatus::Eradicated => "eradicated",
                };
                format!("{} {}", colour, mark)
            })
            .collect();
        format!(
            "Outbreaks {}/{}, infection rate {}, epidemics {}, cures: {}",
            self.state.outbreaks(),
            self.state.config().outbreak_limit,
            self.state.infection_rate(),
            self.state.epidemics(),
            cures.join(", ")
        )
    }

    fn summary(&self) -> String {
        let board = self.state.board();
        let mut out = format!("Turn {}. {}\n", self.state.turn_number(), self.markers());
        for city in self.state.topology().cities() {
            let cubes: Vec<String> = board
                .colours_at(city.id)
                .into_iter()
                .map(|colour| format!("{}x{}", board.cube_count(city.id, colour), colour))
                .collect();
            let station = board.has_station(city.id);
            if cubes.is_empty() && !station {
                continue;
            }
            out.push_str(&format!(
                "  {}{}: {}\n",
                city.name,
                if station { " [station]" } else { "" },
                cubes.join(" ")
            ));
        }
        for (_, player) in self.state.players().iter() {
            out.push_str(&format!("  {} is in {}\n", player.name, self.state.city_name(player.location)));
        }
        out
    }
}

/// Closing line for a finished game.
pub fn final_message(status: Status) -> String {
    match status {
        Status::Won => "All four diseases are cured. The team wins!".to_string(),
        Status::Lost(reason) => format!("The team lost: {}.", reason),
        Status::Stopped => "Game stopped.".to_string(),
        Status::Running => "The game is still running.".to_string(),
    }
}
