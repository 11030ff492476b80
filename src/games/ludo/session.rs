//! Mutable game session: the single source of truth the rules operate on.

use super::token::Token;
use super::types::{
    GamePhase, Player, PlayerId, TokenId, TurnPhase, NUM_PLAYERS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub players: [Player; NUM_PLAYERS],
    /// Seat holding the turn.
    pub current: PlayerId,
    pub phase: GamePhase,
    pub turn: TurnPhase,
    /// Finishing order; rank is position + 1.
    pub rank_list: Vec<PlayerId>,
    /// Sixes rolled in a row by the current player during this turn.
    pub consecutive_sixes: u8,
}

impl GameSession {
    /// Fresh table: every token home, seat 0 to start, game in Setup.
    pub fn new() -> Self {
        Self {
            players: PlayerId::ALL.map(Player::new),
            current: PlayerId::ALL[0],
            phase: GamePhase::Setup,
            turn: TurnPhase::Idle,
            rank_list: Vec::new(),
            consecutive_sixes: 0,
        }
    }

    /// The roll waiting for a token selection, if any.
    pub fn pending_roll(&self) -> Option<u8> {
        match self.turn {
            TurnPhase::AwaitingSelection { roll } => Some(roll),
            _ => None,
        }
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Players still taking turns.
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.id)
            .collect()
    }

    /// Put a token directly at `steps`, for building positions by hand.
    ///
    /// Bypasses the move rules; the token's state is derived from `steps`.
    pub fn place_token(&mut self, player: PlayerId, token: TokenId, steps: i8) {
        *self.player_mut(player).token_mut(token) = Token::placed(token, steps);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::ludo::types::TokenState;

    #[test]
    fn test_new_session() {
        let s = GameSession::new();
        assert_eq!(s.phase, GamePhase::Setup);
        assert_eq!(s.current, PlayerId::ALL[0]);
        assert_eq!(s.pending_roll(), None);
        assert_eq!(s.active_players().len(), 4);
        assert!(s.rank_list.is_empty());
    }

    #[test]
    fn test_pending_roll_only_while_selecting() {
        let mut s = GameSession::new();
        s.turn = TurnPhase::AwaitingRoll;
        assert_eq!(s.pending_roll(), None);
        s.turn = TurnPhase::AwaitingSelection { roll: 5 };
        assert_eq!(s.pending_roll(), Some(5));
    }

    #[test]
    fn test_place_token() {
        let mut s = GameSession::new();
        s.place_token(PlayerId::ALL[2], TokenId::ALL[1], 56);
        let t = s.player(PlayerId::ALL[2]).token(TokenId::ALL[1]);
        assert_eq!(t.state(), TokenState::Finished);
        assert_eq!(t.slot(), TokenId::ALL[1]);
    }
}
