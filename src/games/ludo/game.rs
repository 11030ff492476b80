//! The `Game` facade: the only entry point a host needs.
//!
//! Every operation returns the events it caused, or a `LudoError` leaving the
//! session exactly as it was.

use crate::engine::config::RulesConfig;
use crate::engine::dice::{DiceSource, RandomDice};

use super::error::LudoError;
use super::events::GameEvent;
use super::session::GameSession;
use super::snapshot::GameSnapshot;
use super::turn::{movable_tokens, TurnController};
use super::types::{GamePhase, PlayerId, TokenId, TurnAction, TurnPhase};

pub struct Game {
    session: GameSession,
    turns: TurnController,
}

impl Game {
    /// New game rolling real dice, seeded from `rules.random_seed` when set.
    pub fn new(rules: &RulesConfig) -> Self {
        Self::with_dice(rules, Box::new(RandomDice::new(rules.random_seed)))
    }

    pub fn with_dice(rules: &RulesConfig, dice: Box<dyn DiceSource>) -> Self {
        Self::from_session(GameSession::new(), rules, dice)
    }

    /// Resume from an existing session, e.g. a hand-built test position.
    pub fn from_session(
        session: GameSession,
        rules: &RulesConfig,
        dice: Box<dyn DiceSource>,
    ) -> Self {
        Self {
            session,
            turns: TurnController::new(rules, dice),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.session.turn
    }

    pub fn current_player(&self) -> PlayerId {
        self.session.current
    }

    pub fn pending_roll(&self) -> Option<u8> {
        self.session.pending_roll()
    }

    pub fn rank_list(&self) -> &[PlayerId] {
        &self.session.rank_list
    }

    pub fn is_over(&self) -> bool {
        self.session.phase == GamePhase::Finished
    }

    /// Tokens the current player may select. Empty unless a roll is pending.
    pub fn movable_tokens(&self) -> Vec<TokenId> {
        match self.session.pending_roll() {
            Some(roll) => movable_tokens(&self.session, roll),
            None => Vec::new(),
        }
    }

    pub fn start_turn(&mut self) -> Result<Vec<GameEvent>, LudoError> {
        let result = self.turns.start_turn(&mut self.session);
        log_rejection(TurnAction::StartTurn, result)
    }

    pub fn roll(&mut self) -> Result<Vec<GameEvent>, LudoError> {
        let result = self.turns.roll(&mut self.session);
        log_rejection(TurnAction::Roll, result)
    }

    pub fn select_token(&mut self, token: usize) -> Result<Vec<GameEvent>, LudoError> {
        let result = self.turns.select_token(&mut self.session, token);
        log_rejection(TurnAction::SelectToken, result)
    }

    pub fn forfeit(&mut self, player: usize) -> Result<Vec<GameEvent>, LudoError> {
        let result = self.turns.forfeit(&mut self.session, player);
        log_rejection(TurnAction::Forfeit, result)
    }

    /// Put every token home, clear flags and rankings, and hand the first
    /// turn to seat 0. The game is immediately Playing. The dice stream is
    /// not rewound.
    pub fn reset_game(&mut self) -> Vec<GameEvent> {
        let mut session = GameSession::new();
        session.phase = GamePhase::Playing;
        self.session = session;
        tracing::info!("game reset");
        vec![GameEvent::GameReset]
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_session(&self.session)
    }
}

fn log_rejection(
    action: TurnAction,
    result: Result<Vec<GameEvent>, LudoError>,
) -> Result<Vec<GameEvent>, LudoError> {
    if let Err(err) = &result {
        tracing::warn!(action = %action, error = %err, "rejected");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dice::ScriptedDice;

    fn scripted(faces: &[u8]) -> Game {
        let dice = Box::new(ScriptedDice::new(faces.to_vec()));
        Game::with_dice(&RulesConfig::default(), dice)
    }

    #[test]
    fn test_movable_tokens_empty_without_roll() {
        let mut game = scripted(&[6]);
        assert!(game.movable_tokens().is_empty());
        game.start_turn().unwrap();
        assert!(game.movable_tokens().is_empty());
        game.roll().unwrap();
        assert_eq!(game.movable_tokens(), TokenId::ALL.to_vec());
    }

    #[test]
    fn test_reset_game() {
        let mut game = scripted(&[6]);
        game.start_turn().unwrap();
        game.roll().unwrap();
        game.select_token(0).unwrap();

        let events = game.reset_game();
        assert_eq!(events, vec![GameEvent::GameReset]);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.turn_phase(), TurnPhase::Idle);
        assert_eq!(game.current_player(), PlayerId::ALL[0]);
        assert_eq!(game.session().players, GameSession::new().players);

        // Already Playing: starting a turn does not announce a new game.
        let events = game.start_turn().unwrap();
        assert_eq!(events, vec![GameEvent::TurnStarted { player: PlayerId::ALL[0] }]);
    }

    #[test]
    fn test_reset_clears_capture_and_sixes() {
        let mut session = GameSession::new();
        session.phase = GamePhase::Playing;
        session.place_token(PlayerId::ALL[0], TokenId::ALL[0], 2);
        session.place_token(PlayerId::ALL[1], TokenId::ALL[0], 44);
        let dice = Box::new(ScriptedDice::new(vec![3, 6]));
        let mut game = Game::from_session(session, &RulesConfig::default(), dice);

        game.start_turn().unwrap();
        game.roll().unwrap();
        let events = game.select_token(0).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::TokenCaptured { global_index: 5, .. })));
        game.roll().unwrap();
        let p0 = game.session().player(PlayerId::ALL[0]);
        assert!(p0.has_captured);
        assert_eq!(p0.capture_count, 1);
        assert_eq!(game.session().consecutive_sixes, 1);
        assert_eq!(game.pending_roll(), Some(6));

        game.reset_game();
        let p0 = game.session().player(PlayerId::ALL[0]);
        assert!(!p0.has_captured);
        assert_eq!(p0.capture_count, 0);
        assert_eq!(p0.token(TokenId::ALL[0]).steps(), -1);
        assert_eq!(game.session().consecutive_sixes, 0);
        assert!(game.rank_list().is_empty());
        assert_eq!(game.pending_roll(), None);
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let mut game = scripted(&[2]);
        let before = game.session().clone();
        assert!(game.roll().is_err());
        assert!(game.select_token(0).is_err());
        assert!(game.forfeit(0).is_err());
        assert_eq!(game.session(), &before);
    }
}
