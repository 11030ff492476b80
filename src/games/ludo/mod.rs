//! Four-player Ludo rules engine.
//!
//! Hosts drive a [`Game`] through `start_turn`, `roll`, `select_token`,
//! `forfeit` and `reset_game`, render from [`GameSnapshot`], and react to the
//! returned [`GameEvent`]s.

pub mod board;
pub mod capture;
pub mod error;
pub mod events;
pub mod game;
pub mod invariants;
pub mod ranking;
pub mod session;
pub mod snapshot;
pub mod token;
pub mod turn;
pub mod types;

pub use error::{LudoError, MoveRejected};
pub use events::GameEvent;
pub use game::Game;
pub use session::GameSession;
pub use snapshot::GameSnapshot;
pub use types::{Color, GamePhase, PlayerId, TokenId, TokenState, TurnPhase};
