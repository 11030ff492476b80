//! Error taxonomy for the Ludo rules engine.
//!
//! Every error is non-fatal and is returned before any state is touched, so a
//! rejected call always leaves the game exactly as it was.

use serde::Serialize;
use thiserror::Error;

use super::types::{GamePhase, TurnAction, TurnPhase};

/// Why a single token move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum MoveRejected {
    /// Token is at home and the roll was not a 6.
    #[error("token is at home and needs a 6 to enter the board")]
    NotActivatable,
    /// Move would carry the token past the goal.
    #[error("move would overshoot the goal")]
    Overshoot,
    /// Owner has not captured yet, so the home stretch is closed.
    #[error("home stretch is locked until the player captures a token")]
    StretchLocked,
    #[error("token has already reached the goal")]
    AlreadyFinished,
}

/// Errors returned by the inbound calls on [`Game`](super::game::Game).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LudoError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveRejected),

    /// An operation was requested out of turn order.
    #[error("illegal turn action: cannot {action} while {phase}")]
    IllegalTurnAction { action: TurnAction, phase: TurnPhase },

    /// A call arrived while the game is not in the Playing phase.
    #[error("illegal turn action: cannot {action} while the game is {game_phase}")]
    GameNotPlaying {
        action: TurnAction,
        game_phase: GamePhase,
    },

    /// Forfeit requested for a player who does not hold the turn.
    #[error("player {requested} cannot forfeit during player {current}'s turn")]
    NotPlayersTurn { requested: usize, current: usize },

    #[error("unknown token id {0} (expected 0..4)")]
    UnknownToken(usize),

    #[error("unknown player id {0} (expected 0..4)")]
    UnknownPlayer(usize),

    /// The dice source produced a face outside 1..=6.
    #[error("dice source produced {0}, expected a value in 1..=6")]
    InvalidRoll(u8),
}

impl LudoError {
    /// True for every variant that reports an out-of-order call.
    ///
    /// `GameNotPlaying` and `NotPlayersTurn` are refinements of the same
    /// failure class as `IllegalTurnAction`.
    pub fn is_illegal_turn_action(&self) -> bool {
        matches!(
            self,
            LudoError::IllegalTurnAction { .. }
                | LudoError::GameNotPlaying { .. }
                | LudoError::NotPlayersTurn { .. }
        )
    }
}
