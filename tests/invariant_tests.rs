//! Property tests over random play on the standard map.

mod common;

use proptest::prelude::*;
use strum::IntoEnumIterator;

use pandemic_ai::core::Colour;
use pandemic_ai::game::{ActionError, GameState, LossReason, Status};

use common::standard_game;

fn assert_cubes_conserved(state: &GameState) {
    let per_colour = state.config().cubes_per_colour;
    for colour in Colour::iter() {
        let board = state.board();
        assert_eq!(
            board.cubes_on_board(colour) + board.cubes_in_pool(colour),
            per_colour,
            "{} cubes not conserved",
            colour
        );
    }
}

fn assert_no_city_over_threshold(state: &GameState) {
    for city in state.topology().city_ids() {
        for colour in Colour::iter() {
            assert!(state.board().cube_count(city, colour) <= 3);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_random_play_keeps_invariants(
        seed in any::<u64>(),
        players in 2usize..=4,
        choices in prop::collection::vec(any::<usize>(), 1..120),
    ) {
        let mut state = standard_game(players, seed);
        assert_cubes_conserved(&state);

        for choice in choices {
            let actions = state.legal_actions();
            if actions.is_empty() {
                break;
            }
            let action = actions[choice % actions.len()];
            let outbreaks_before = state.outbreaks();

            let result = state.apply_action(&action);

            prop_assert_ne!(result, Err(ActionError::Lost(LossReason::ActionPreconditionViolated)));
            prop_assert!(state.outbreaks() >= outbreaks_before);
            prop_assert!(state.outbreaks() <= state.config().outbreak_limit);
            if state.outbreaks() == state.config().outbreak_limit {
                prop_assert_eq!(state.status(), Status::Lost(LossReason::OutbreakLimitExceeded));
            }
            if state.is_running() {
                prop_assert!(state.outbreaks() < state.config().outbreak_limit);
            }
            assert_cubes_conserved(&state);
            assert_no_city_over_threshold(&state);
        }
    }

    #[test]
    fn prop_clone_mutation_leaves_original(
        seed in any::<u64>(),
        choices in prop::collection::vec(any::<usize>(), 1..12),
    ) {
        let original = standard_game(2, seed);
        let snapshot = original.clone();

        let mut copy = original.clone();
        for choice in choices {
            let actions = copy.legal_actions();
            if actions.is_empty() {
                break;
            }
            let _ = copy.apply_action(&actions[choice % actions.len()]);
        }

        prop_assert_eq!(&original, &snapshot);
        prop_assert_eq!(original.player_deck().pointer(), snapshot.player_deck().pointer());
        prop_assert_eq!(original.infection_deck().pointer(), snapshot.infection_deck().pointer());
        prop_assert_eq!(original.rng(), snapshot.rng());
        prop_assert!(original.history().is_empty());
    }
}
