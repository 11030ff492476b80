//! Events returned by every inbound call, in the order they happened.
//!
//! The presentation layer uses these to trigger sounds and animations; the
//! engine never waits on them.

use serde::Serialize;

use super::types::{PlayerId, TokenId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum GameEvent {
    GameStarted,
    TurnStarted {
        player: PlayerId,
    },
    Rolled {
        player: PlayerId,
        value: u8,
        /// Tokens that can legally use this roll.
        movable: Vec<TokenId>,
    },
    NoMovableTokens {
        player: PlayerId,
        value: u8,
    },
    /// Third six in a row with the three-sixes rule enabled; the roll is void.
    ThreeSixesPenalty {
        player: PlayerId,
    },
    TokenEntered {
        player: PlayerId,
        token: TokenId,
    },
    TokenMoved {
        player: PlayerId,
        token: TokenId,
        from: i8,
        to: i8,
    },
    TokenCaptured {
        by: PlayerId,
        player: PlayerId,
        token: TokenId,
        /// Ring index where the capture happened.
        global_index: usize,
    },
    TokenFinished {
        player: PlayerId,
        token: TokenId,
    },
    PlayerFinished {
        player: PlayerId,
        rank: u8,
    },
    PlayerForfeited {
        player: PlayerId,
    },
    TurnRepeated {
        player: PlayerId,
        rolled_six: bool,
        captured: bool,
    },
    TurnPassed {
        from: PlayerId,
        to: PlayerId,
    },
    GameOver {
        ranking: Vec<PlayerId>,
    },
    GameReset,
}

impl GameEvent {
    /// Short name matching the serialized `event_type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameStarted => "game_started",
            GameEvent::TurnStarted { .. } => "turn_started",
            GameEvent::Rolled { .. } => "rolled",
            GameEvent::NoMovableTokens { .. } => "no_movable_tokens",
            GameEvent::ThreeSixesPenalty { .. } => "three_sixes_penalty",
            GameEvent::TokenEntered { .. } => "token_entered",
            GameEvent::TokenMoved { .. } => "token_moved",
            GameEvent::TokenCaptured { .. } => "token_captured",
            GameEvent::TokenFinished { .. } => "token_finished",
            GameEvent::PlayerFinished { .. } => "player_finished",
            GameEvent::PlayerForfeited { .. } => "player_forfeited",
            GameEvent::TurnRepeated { .. } => "turn_repeated",
            GameEvent::TurnPassed { .. } => "turn_passed",
            GameEvent::GameOver { .. } => "game_over",
            GameEvent::GameReset => "game_reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_tag_matches_name() {
        let events = vec![
            GameEvent::GameStarted,
            GameEvent::Rolled {
                player: PlayerId::ALL[1],
                value: 4,
                movable: vec![TokenId::ALL[0], TokenId::ALL[2]],
            },
            GameEvent::TokenCaptured {
                by: PlayerId::ALL[0],
                player: PlayerId::ALL[3],
                token: TokenId::ALL[1],
                global_index: 5,
            },
            GameEvent::GameOver {
                ranking: vec![PlayerId::ALL[2], PlayerId::ALL[0]],
            },
        ];
        for event in &events {
            let json = serde_json::to_value(event).unwrap();
            assert_eq!(json["event_type"], event.name());
        }
    }

    #[test]
    fn test_ids_serialize_as_integers() {
        let json = serde_json::to_value(GameEvent::Rolled {
            player: PlayerId::ALL[1],
            value: 6,
            movable: vec![TokenId::ALL[3]],
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event_type": "rolled", "player": 1, "value": 6, "movable": [3]})
        );
    }
}
