//! Token state machine: HOME -> ACTIVE -> FINISHED.
//!
//! A token stores only its slot and step count; its grid position is derived
//! on demand through [`board::position`](super::board::position).

use serde::Serialize;

use super::board::{GOAL_STEPS, HOME_STEPS, LAST_RING_STEP};
use super::error::MoveRejected;
use super::types::{TokenId, TokenState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token {
    slot: TokenId,
    steps: i8,
    state: TokenState,
}

impl Token {
    /// A token waiting in its home base.
    pub fn new(slot: TokenId) -> Self {
        Self {
            slot,
            steps: HOME_STEPS,
            state: TokenState::Home,
        }
    }

    /// A token already `steps` along its path. The state is derived from the
    /// step count and out-of-range values are clamped, so the result always
    /// satisfies the steps/state invariant.
    pub fn placed(slot: TokenId, steps: i8) -> Self {
        let steps = steps.clamp(HOME_STEPS, GOAL_STEPS);
        let state = match steps {
            HOME_STEPS => TokenState::Home,
            GOAL_STEPS => TokenState::Finished,
            _ => TokenState::Active,
        };
        Self { slot, steps, state }
    }

    #[inline]
    pub fn slot(&self) -> TokenId {
        self.slot
    }

    #[inline]
    pub fn steps(&self) -> i8 {
        self.steps
    }

    #[inline]
    pub fn state(&self) -> TokenState {
        self.state
    }

    /// On the shared ring (steps 0..=50), where it can capture and be captured.
    pub fn is_on_ring(&self) -> bool {
        self.state == TokenState::Active && self.steps <= LAST_RING_STEP
    }

    /// Steps the token would end on if it moved `roll`, without mutating.
    ///
    /// `stretch_unlocked` is the owner's `has_captured` flag.
    pub fn check_move(&self, roll: u8, stretch_unlocked: bool) -> Result<i8, MoveRejected> {
        debug_assert!((1..=6).contains(&roll), "die face out of range: {roll}");
        match self.state {
            TokenState::Home => {
                if roll == 6 {
                    Ok(0)
                } else {
                    Err(MoveRejected::NotActivatable)
                }
            }
            TokenState::Active => {
                let next = self.steps.saturating_add(roll as i8);
                if next > GOAL_STEPS {
                    Err(MoveRejected::Overshoot)
                } else if next > LAST_RING_STEP && !stretch_unlocked {
                    Err(MoveRejected::StretchLocked)
                } else {
                    Ok(next)
                }
            }
            TokenState::Finished => Err(MoveRejected::AlreadyFinished),
        }
    }

    /// Apply a move of `roll`. On rejection nothing changes.
    pub fn apply_move(&mut self, roll: u8, stretch_unlocked: bool) -> Result<i8, MoveRejected> {
        let next = self.check_move(roll, stretch_unlocked)?;
        self.steps = next;
        self.state = if next == GOAL_STEPS {
            TokenState::Finished
        } else {
            TokenState::Active
        };
        Ok(next)
    }

    /// Send the token back to its base. Idempotent.
    pub fn reset_to_home(&mut self) {
        self.steps = HOME_STEPS;
        self.state = TokenState::Home;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_at(steps: i8) -> Token {
        Token::placed(TokenId::ALL[0], steps)
    }

    #[test]
    fn test_home_needs_six() {
        let mut t = Token::new(TokenId::ALL[1]);
        for roll in 1..=5 {
            assert_eq!(t.apply_move(roll, true), Err(MoveRejected::NotActivatable));
            assert_eq!(t, Token::new(TokenId::ALL[1]));
        }
        assert_eq!(t.apply_move(6, false), Ok(0));
        assert_eq!(t.state(), TokenState::Active);
        assert_eq!(t.steps(), 0);
    }

    #[test]
    fn test_ring_move_without_capture() {
        let mut t = token_at(46);
        assert_eq!(t.apply_move(4, false), Ok(50));
        assert_eq!(t.state(), TokenState::Active);
    }

    #[test]
    fn test_stretch_locked_until_capture() {
        let mut t = token_at(50);
        assert_eq!(t.apply_move(3, false), Err(MoveRejected::StretchLocked));
        assert_eq!(t.steps(), 50);
        assert_eq!(t.state(), TokenState::Active);
        assert_eq!(t.apply_move(3, true), Ok(53));
    }

    #[test]
    fn test_overshoot_checked_before_lock() {
        let t = token_at(52);
        assert_eq!(t.check_move(5, true), Err(MoveRejected::Overshoot));
        let t = token_at(48);
        // 48 + 6 = 54: inside the goal, so only the lock applies.
        assert_eq!(t.check_move(6, false), Err(MoveRejected::StretchLocked));
    }

    #[test]
    fn test_exact_roll_finishes() {
        let mut t = token_at(53);
        assert_eq!(t.apply_move(3, true), Ok(56));
        assert_eq!(t.state(), TokenState::Finished);
        assert_eq!(t.apply_move(1, true), Err(MoveRejected::AlreadyFinished));
        assert_eq!(t.steps(), 56);
    }

    #[test]
    fn test_reset_to_home_is_idempotent() {
        let mut t = token_at(17);
        t.reset_to_home();
        assert_eq!(t, Token::new(TokenId::ALL[0]));
        t.reset_to_home();
        assert_eq!(t, Token::new(TokenId::ALL[0]));
    }

    #[test]
    fn test_placed_derives_state() {
        assert_eq!(token_at(-1).state(), TokenState::Home);
        assert_eq!(token_at(0).state(), TokenState::Active);
        assert_eq!(token_at(55).state(), TokenState::Active);
        assert_eq!(token_at(56).state(), TokenState::Finished);
        assert_eq!(token_at(100).steps(), 56);
        assert_eq!(token_at(-20).steps(), -1);
    }

    #[test]
    fn test_on_ring() {
        assert!(token_at(0).is_on_ring());
        assert!(token_at(50).is_on_ring());
        assert!(!token_at(51).is_on_ring());
        assert!(!token_at(-1).is_on_ring());
    }
}
