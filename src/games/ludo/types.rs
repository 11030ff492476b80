//! Ludo core types: identifiers, colors, phases and the per-player record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::LudoError;
use super::token::Token;

pub const NUM_PLAYERS: usize = 4;
pub const TOKENS_PER_PLAYER: usize = 4;

/// Seat index 0..4. Turn order is ascending seat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PlayerId(u8);

impl PlayerId {
    pub const ALL: [PlayerId; NUM_PLAYERS] = [PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(3)];

    pub fn new(raw: usize) -> Result<Self, LudoError> {
        if raw < NUM_PLAYERS {
            Ok(PlayerId(raw as u8))
        } else {
            Err(LudoError::UnknownPlayer(raw))
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn color(self) -> Color {
        Color::ALL[self.index()]
    }

    /// Next seat in turn order, wrapping 3 -> 0.
    pub fn next(self) -> PlayerId {
        PlayerId((self.0 + 1) % NUM_PLAYERS as u8)
    }
}

impl TryFrom<usize> for PlayerId {
    type Error = LudoError;

    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        PlayerId::new(raw)
    }
}

impl From<PlayerId> for usize {
    fn from(id: PlayerId) -> usize {
        id.index()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color())
    }
}

/// Which of a player's four tokens (0..4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TokenId(u8);

impl TokenId {
    pub const ALL: [TokenId; TOKENS_PER_PLAYER] = [TokenId(0), TokenId(1), TokenId(2), TokenId(3)];

    pub fn new(raw: usize) -> Result<Self, LudoError> {
        if raw < TOKENS_PER_PLAYER {
            Ok(TokenId(raw as u8))
        } else {
            Err(LudoError::UnknownToken(raw))
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for TokenId {
    type Error = LudoError;

    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        TokenId::new(raw)
    }
}

impl From<TokenId> for usize {
    fn from(id: TokenId) -> usize {
        id.index()
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color identity of a seat, as shown by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    pub const ALL: [Color; NUM_PLAYERS] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenState {
    Home,
    Active,
    Finished,
}

/// Top-level game phase. Playing -> Finished is one-way until a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Setup,
    Playing,
    Finished,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Setup => "in setup",
            GamePhase::Playing => "playing",
            GamePhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Where the active player is inside their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum TurnPhase {
    /// The turn has passed to this player but has not been started.
    Idle,
    AwaitingRoll,
    /// A roll is pending and at least one token can use it.
    AwaitingSelection { roll: u8 },
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnPhase::Idle => f.write_str("the turn has not been started"),
            TurnPhase::AwaitingRoll => f.write_str("awaiting a roll"),
            TurnPhase::AwaitingSelection { roll } => {
                write!(f, "awaiting token selection (rolled {roll})")
            }
        }
    }
}

/// Inbound operations, named in `IllegalTurnAction` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnAction {
    StartTurn,
    Roll,
    SelectToken,
    Forfeit,
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnAction::StartTurn => "start a turn",
            TurnAction::Roll => "roll",
            TurnAction::SelectToken => "select a token",
            TurnAction::Forfeit => "forfeit",
        };
        f.write_str(name)
    }
}

/// One seat at the table. Owns its four tokens exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub tokens: [Token; TOKENS_PER_PLAYER],
    /// Set on the first capture; unlocks the home stretch for every token.
    pub has_captured: bool,
    pub capture_count: u32,
    pub forfeited: bool,
    pub finished: bool,
    /// 1-based finishing position; 0 while unranked.
    pub final_rank: u8,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            tokens: TokenId::ALL.map(Token::new),
            has_captured: false,
            capture_count: 0,
            forfeited: false,
            finished: false,
            final_rank: 0,
        }
    }

    /// Neither forfeited nor finished: still takes turns.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.forfeited && !self.finished
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    pub fn token_mut(&mut self, id: TokenId) -> &mut Token {
        &mut self.tokens[id.index()]
    }

    pub fn all_tokens_finished(&self) -> bool {
        self.tokens.iter().all(|t| t.state() == TokenState::Finished)
    }
}
