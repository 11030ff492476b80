//! Turn controller: roll, eligibility, token selection, repeat or advance.

use crate::engine::config::RulesConfig;
use crate::engine::dice::DiceSource;

use super::capture;
use super::error::LudoError;
use super::events::GameEvent;
use super::ranking::{check_termination, record_finish};
use super::session::GameSession;
use super::types::{
    GamePhase, PlayerId, TokenId, TokenState, TurnAction, TurnPhase, NUM_PLAYERS,
};

/// Sixes in a row that void the turn when the three-sixes rule is on.
const SIXES_LIMIT: u8 = 3;

/// Drives one session's turns. Owns the dice so every roll goes through it.
pub struct TurnController {
    dice: Box<dyn DiceSource>,
    three_sixes_skip_turn: bool,
}

impl TurnController {
    pub fn new(rules: &RulesConfig, dice: Box<dyn DiceSource>) -> Self {
        Self {
            dice,
            three_sixes_skip_turn: rules.three_sixes_skip_turn,
        }
    }

    /// Begin the current player's turn. The first call moves the game out of Setup.
    pub fn start_turn(&self, session: &mut GameSession) -> Result<Vec<GameEvent>, LudoError> {
        if session.phase == GamePhase::Finished {
            return Err(LudoError::GameNotPlaying {
                action: TurnAction::StartTurn,
                game_phase: session.phase,
            });
        }
        if session.turn != TurnPhase::Idle {
            return Err(LudoError::IllegalTurnAction {
                action: TurnAction::StartTurn,
                phase: session.turn,
            });
        }

        let mut events = Vec::new();
        if session.phase == GamePhase::Setup {
            session.phase = GamePhase::Playing;
            tracing::info!("game started");
            events.push(GameEvent::GameStarted);
        }
        session.turn = TurnPhase::AwaitingRoll;
        tracing::debug!(player = %session.current, "turn started");
        events.push(GameEvent::TurnStarted {
            player: session.current,
        });
        Ok(events)
    }

    /// Roll the die for the current player.
    ///
    /// With no legal move the turn passes straight away, even on a six.
    pub fn roll(&mut self, session: &mut GameSession) -> Result<Vec<GameEvent>, LudoError> {
        ensure_playing(session, TurnAction::Roll)?;
        if session.turn != TurnPhase::AwaitingRoll {
            return Err(LudoError::IllegalTurnAction {
                action: TurnAction::Roll,
                phase: session.turn,
            });
        }

        let value = self.dice.roll();
        if !(1..=6).contains(&value) {
            return Err(LudoError::InvalidRoll(value));
        }

        let player = session.current;
        tracing::debug!(player = %player, value, "rolled");
        let mut events = Vec::new();

        if value == 6 {
            session.consecutive_sixes += 1;
        } else {
            session.consecutive_sixes = 0;
        }
        if self.three_sixes_skip_turn && session.consecutive_sixes >= SIXES_LIMIT {
            tracing::info!(player = %player, "third six in a row, turn forfeited");
            events.push(GameEvent::Rolled {
                player,
                value,
                movable: Vec::new(),
            });
            events.push(GameEvent::ThreeSixesPenalty { player });
            pass_turn(session, &mut events);
            return Ok(events);
        }

        let movable = movable_tokens(session, value);
        events.push(GameEvent::Rolled {
            player,
            value,
            movable: movable.clone(),
        });
        if movable.is_empty() {
            tracing::debug!(player = %player, value, "no movable tokens");
            events.push(GameEvent::NoMovableTokens { player, value });
            pass_turn(session, &mut events);
        } else {
            session.turn = TurnPhase::AwaitingSelection { roll: value };
        }
        Ok(events)
    }

    /// Move token `token` of the current player by the pending roll.
    pub fn select_token(
        &self,
        session: &mut GameSession,
        token: usize,
    ) -> Result<Vec<GameEvent>, LudoError> {
        let token = TokenId::new(token)?;
        ensure_playing(session, TurnAction::SelectToken)?;
        let roll = match session.turn {
            TurnPhase::AwaitingSelection { roll } => roll,
            phase => {
                return Err(LudoError::IllegalTurnAction {
                    action: TurnAction::SelectToken,
                    phase,
                })
            }
        };

        let player = session.current;
        let mover = session.player_mut(player);
        let stretch_unlocked = mover.has_captured;
        let moving = mover.token_mut(token);
        let from = moving.steps();
        let to = moving.apply_move(roll, stretch_unlocked)?;

        let mut events = Vec::new();
        if from < 0 {
            tracing::debug!(player = %player, token = token.index(), "token entered the ring");
            events.push(GameEvent::TokenEntered { player, token });
        } else {
            tracing::debug!(player = %player, token = token.index(), from, to, "token moved");
            events.push(GameEvent::TokenMoved {
                player,
                token,
                from,
                to,
            });
        }

        let outcome = capture::resolve(&mut session.players, player, token);
        if let Some(global_index) = outcome.global_index {
            for &(owner, victim) in &outcome.captured {
                events.push(GameEvent::TokenCaptured {
                    by: player,
                    player: owner,
                    token: victim,
                    global_index,
                });
            }
        }

        if session.player(player).token(token).state() == TokenState::Finished {
            events.push(GameEvent::TokenFinished { player, token });
        }

        // A player who just brought its last token home gives up the turn, six or not.
        if record_finish(session, player, &mut events) {
            session.turn = TurnPhase::Idle;
            if !check_termination(session, &mut events) {
                pass_turn(session, &mut events);
            }
            return Ok(events);
        }

        let rolled_six = roll == 6;
        let captured = !outcome.is_empty();
        if rolled_six || captured {
            session.turn = TurnPhase::AwaitingRoll;
            tracing::debug!(player = %player, rolled_six, captured, "turn repeats");
            events.push(GameEvent::TurnRepeated {
                player,
                rolled_six,
                captured,
            });
        } else {
            pass_turn(session, &mut events);
        }
        Ok(events)
    }

    /// Withdraw `player` from the game. Only the player holding the turn may forfeit.
    pub fn forfeit(
        &self,
        session: &mut GameSession,
        player: usize,
    ) -> Result<Vec<GameEvent>, LudoError> {
        let player = PlayerId::new(player)?;
        ensure_playing(session, TurnAction::Forfeit)?;
        if player != session.current {
            return Err(LudoError::NotPlayersTurn {
                requested: player.index(),
                current: session.current.index(),
            });
        }

        session.player_mut(player).forfeited = true;
        session.turn = TurnPhase::Idle;
        tracing::info!(player = %player, "player forfeited");
        let mut events = vec![GameEvent::PlayerForfeited { player }];
        if !check_termination(session, &mut events) {
            pass_turn(session, &mut events);
        }
        Ok(events)
    }
}

/// Tokens of the current player that can legally use `roll`.
pub fn movable_tokens(session: &GameSession, roll: u8) -> Vec<TokenId> {
    let player = session.current_player();
    player
        .tokens
        .iter()
        .filter(|t| t.check_move(roll, player.has_captured).is_ok())
        .map(|t| t.slot())
        .collect()
}

fn ensure_playing(session: &GameSession, action: TurnAction) -> Result<(), LudoError> {
    if session.phase == GamePhase::Playing {
        Ok(())
    } else {
        Err(LudoError::GameNotPlaying {
            action,
            game_phase: session.phase,
        })
    }
}

/// Hand the turn to the next active player in seat order.
///
/// Checks at most one full lap, so it terminates even if nobody is active.
fn pass_turn(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    let from = session.current;
    let to = std::iter::successors(Some(from.next()), |id| Some(id.next()))
        .take(NUM_PLAYERS)
        .find(|id| session.player(*id).is_active())
        .unwrap_or(from);

    session.current = to;
    session.turn = TurnPhase::Idle;
    session.consecutive_sixes = 0;
    tracing::debug!(from = %from, to = %to, "turn passed");
    events.push(GameEvent::TurnPassed { from, to });
}
