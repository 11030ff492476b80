//! Property-based tests over arbitrary dice scripts and token choices.
//!
//! Run with: cargo test --release --test prop_game

use proptest::prelude::*;

use ludo_game_engine::engine::config::RulesConfig;
use ludo_game_engine::engine::dice::ScriptedDice;
use ludo_game_engine::games::ludo::board::{global_index, is_safe, position, RING_LEN};
use ludo_game_engine::games::ludo::invariants::check_invariants;
use ludo_game_engine::games::ludo::token::Token;
use ludo_game_engine::games::ludo::{
    Game, GamePhase, LudoError, PlayerId, TokenId, TurnPhase,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Any dice script and any sequence of selections, legal or not, keeps every invariant.
    #[test]
    fn prop_random_calls_keep_invariants(
        faces in prop::collection::vec(1u8..=6, 1..64),
        picks in prop::collection::vec(0usize..6, 1..400),
        three_sixes in any::<bool>(),
    ) {
        let rules = RulesConfig { three_sixes_skip_turn: three_sixes, ..RulesConfig::default() };
        let mut game = Game::with_dice(&rules, Box::new(ScriptedDice::new(faces)));

        for pick in picks {
            if game.is_over() {
                break;
            }
            let before = game.session().clone();
            let result = match game.turn_phase() {
                TurnPhase::Idle => game.start_turn(),
                TurnPhase::AwaitingRoll => game.roll(),
                TurnPhase::AwaitingSelection { .. } => game.select_token(pick),
            };
            match result {
                Ok(events) => prop_assert!(!events.is_empty()),
                Err(err) => {
                    // Rejections never touch the session.
                    prop_assert_eq!(game.session(), &before);
                    let expected =
                        matches!(err, LudoError::InvalidMove(_) | LudoError::UnknownToken(_));
                    prop_assert!(expected, "unexpected error {:?}", err);
                }
            }
            let violations = check_invariants(game.session());
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
    }

    /// A move either fully succeeds or leaves the token exactly as it was.
    #[test]
    fn prop_token_move_is_atomic(steps in -1i8..=56, roll in 1u8..=6, unlocked in any::<bool>()) {
        let token = Token::placed(TokenId::ALL[0], steps);
        let mut moved = token;
        match moved.apply_move(roll, unlocked) {
            Ok(to) => {
                prop_assert_eq!(moved.steps(), to);
                prop_assert!(to <= 56);
                prop_assert!(unlocked || to <= 50);
            }
            Err(_) => prop_assert_eq!(moved, token),
        }
    }

    /// Ring positions are pure and agree with the global index.
    #[test]
    fn prop_position_is_pure(seat in 0usize..4, steps in 0i8..=50, slot in 0usize..4) {
        let player = PlayerId::ALL[seat];
        let slot = TokenId::ALL[slot];
        let idx = global_index(player, steps);
        prop_assert_eq!(idx, Some((seat * 13 + steps as usize) % RING_LEN));
        prop_assert_eq!(position(player, steps, slot), position(player, steps, TokenId::ALL[0]));

        // Every seat's path reaches this cell at the matching step.
        for other in PlayerId::ALL {
            let other_steps = ((idx.unwrap_or(0) + RING_LEN - other.index() * 13) % RING_LEN) as i8;
            if other_steps <= 50 {
                prop_assert_eq!(position(other, other_steps, slot), position(player, steps, slot));
                prop_assert_eq!(is_safe(other, other_steps), is_safe(player, steps));
            }
        }
    }

    /// Whoever forfeits and in whatever order, the one player left is ranked first.
    #[test]
    fn prop_forfeits_leave_one_survivor(plan in prop::collection::vec(0usize..4, 3)) {
        // A 1 never frees a token from home, so every roll passes the turn.
        let mut game =
            Game::with_dice(&RulesConfig::default(), Box::new(ScriptedDice::new(vec![1])));
        let mut forfeited = Vec::new();
        for passes in plan {
            prop_assert!(!game.is_over());
            for _ in 0..passes {
                game.start_turn().unwrap();
                game.roll().unwrap();
            }
            game.start_turn().unwrap();
            let seat = game.current_player();
            game.forfeit(seat.index()).unwrap();
            forfeited.push(seat);
        }

        prop_assert_eq!(game.phase(), GamePhase::Finished);
        let survivor = PlayerId::ALL.into_iter().find(|id| !forfeited.contains(id));
        prop_assert!(survivor.is_some());
        prop_assert_eq!(game.rank_list(), survivor.as_slice());
        prop_assert!(check_invariants(game.session()).is_empty());
    }
}
