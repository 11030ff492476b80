//! Read-only view of a session for renderers and logs.

use serde::Serialize;

use super::board::{position, Cell};
use super::session::GameSession;
use super::types::{Color, GamePhase, PlayerId, TokenId, TokenState, TurnPhase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenView {
    pub slot: TokenId,
    pub steps: i8,
    pub state: TokenState,
    /// Grid cell the renderer should draw the token on.
    pub cell: Cell,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub color: Color,
    pub tokens: Vec<TokenView>,
    pub has_captured: bool,
    pub capture_count: u32,
    pub forfeited: bool,
    pub finished: bool,
    /// 1-based finishing rank, 0 while unranked.
    pub final_rank: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub turn: TurnPhase,
    pub current_player: PlayerId,
    pub pending_roll: Option<u8>,
    pub rank_list: Vec<PlayerId>,
    pub players: Vec<PlayerView>,
}

impl GameSnapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let players = session
            .players
            .iter()
            .map(|p| PlayerView {
                id: p.id,
                color: p.id.color(),
                tokens: p
                    .tokens
                    .iter()
                    .map(|t| TokenView {
                        slot: t.slot(),
                        steps: t.steps(),
                        state: t.state(),
                        cell: position(p.id, t.steps(), t.slot()),
                    })
                    .collect(),
                has_captured: p.has_captured,
                capture_count: p.capture_count,
                forfeited: p.forfeited,
                finished: p.finished,
                final_rank: p.final_rank,
            })
            .collect();

        Self {
            phase: session.phase,
            turn: session.turn,
            current_player: session.current,
            pending_roll: session.pending_roll(),
            rank_list: session.rank_list.clone(),
            players,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
