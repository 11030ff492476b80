//! Synchronous self-play: drives one game to the end with a token picker,
//! checking session invariants after every call. Used by the arena and the
//! soak tests.

use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::picker::TokenPicker;
use crate::games::ludo::invariants::{check_invariants, InvariantViolation};
use crate::games::ludo::ranking::did_not_finish;
use crate::games::ludo::types::NUM_PLAYERS;
use crate::games::ludo::{Game, PlayerId, TurnPhase};

#[derive(Debug, Clone)]
pub struct SimParams {
    /// Hard cap on inbound calls before the game is abandoned.
    pub max_actions: usize,
    /// Chance that the player on turn forfeits instead of rolling.
    pub forfeit_rate: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            max_actions: 20_000,
            forfeit_rate: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    /// Reached the Finished phase within the action cap.
    pub completed: bool,
    pub actions: usize,
    pub turns: usize,
    pub rolls: usize,
    pub captures: [u32; NUM_PLAYERS],
    pub ranking: Vec<PlayerId>,
    pub forfeited: Vec<PlayerId>,
    pub violations: Vec<InvariantViolation>,
}

impl GameRecord {
    pub fn winner(&self) -> Option<PlayerId> {
        self.ranking.first().copied()
    }
}

/// Play `game` until it is over, the action cap is hit, or an invariant breaks.
pub fn play_game(
    game: &mut Game,
    picker: &dyn TokenPicker,
    rng: &mut StdRng,
    params: &SimParams,
) -> GameRecord {
    let mut record = GameRecord::default();

    while record.actions < params.max_actions && !game.is_over() {
        let result = match game.turn_phase() {
            TurnPhase::Idle => {
                record.turns += 1;
                game.start_turn()
            }
            TurnPhase::AwaitingRoll => {
                if params.forfeit_rate > 0.0 && rng.gen_bool(params.forfeit_rate) {
                    game.forfeit(game.current_player().index())
                } else {
                    record.rolls += 1;
                    game.roll()
                }
            }
            TurnPhase::AwaitingSelection { .. } => {
                let movable = game.movable_tokens();
                match picker.pick(game, &movable, rng) {
                    Some(token) => game.select_token(token.index()),
                    None => {
                        record.violations.push(InvariantViolation {
                            message: format!("picker {} found nothing to move", picker.name()),
                        });
                        break;
                    }
                }
            }
        };
        record.actions += 1;

        if let Err(err) = result {
            record.violations.push(InvariantViolation {
                message: format!("automated action rejected: {err}"),
            });
            break;
        }
        let violations = check_invariants(game.session());
        if !violations.is_empty() {
            record.violations.extend(violations);
            break;
        }
    }

    let session = game.session();
    record.completed = game.is_over();
    record.ranking = session.rank_list.clone();
    record.forfeited = did_not_finish(session);
    for player in &session.players {
        record.captures[player.id.index()] = player.capture_count;
    }
    if !record.completed {
        tracing::warn!(actions = record.actions, "game abandoned before finishing");
    }
    record
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::engine::config::RulesConfig;
    use crate::engine::picker::{FirstMovable, RandomMovable};

    fn seeded_game(seed: u64) -> Game {
        Game::new(&RulesConfig {
            random_seed: Some(seed),
            ..RulesConfig::default()
        })
    }

    #[test]
    fn test_plays_to_completion() {
        let mut game = seeded_game(3);
        let mut rng = StdRng::seed_from_u64(3);
        let record = play_game(&mut game, &RandomMovable, &mut rng, &SimParams::default());
        assert!(record.violations.is_empty(), "{:?}", record.violations);
        assert!(record.completed);
        assert_eq!(record.ranking.len(), 4);
        assert!(record.winner().is_some());
        assert!(record.forfeited.is_empty());
    }

    #[test]
    fn test_same_seed_same_game() {
        let run = |seed| {
            let mut game = seeded_game(seed);
            let mut rng = StdRng::seed_from_u64(seed);
            play_game(&mut game, &FirstMovable, &mut rng, &SimParams::default())
        };
        let a = run(11);
        let b = run(11);
        assert_eq!(a.actions, b.actions);
        assert_eq!(a.ranking, b.ranking);
        assert_eq!(a.captures, b.captures);
    }

    #[test]
    fn test_action_cap() {
        let mut game = seeded_game(5);
        let mut rng = StdRng::seed_from_u64(5);
        let params = SimParams {
            max_actions: 10,
            ..SimParams::default()
        };
        let record = play_game(&mut game, &FirstMovable, &mut rng, &params);
        assert!(!record.completed);
        assert_eq!(record.actions, 10);
        assert!(record.violations.is_empty());
    }

    #[test]
    fn test_forfeits_end_the_game() {
        let mut game = seeded_game(8);
        let mut rng = StdRng::seed_from_u64(8);
        let params = SimParams {
            forfeit_rate: 0.5,
            ..SimParams::default()
        };
        let record = play_game(&mut game, &RandomMovable, &mut rng, &params);
        assert!(record.violations.is_empty(), "{:?}", record.violations);
        assert!(record.completed);
        assert!(!record.forfeited.is_empty());
        assert_eq!(record.ranking.len() + record.forfeited.len(), 4);
    }
}
