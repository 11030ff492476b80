//! Capture resolution after a completed move.
//!
//! Captures are decided by ring-index equality: a token that lands on an
//! unsafe ring cell sends every opposing token on that cell back home.

use serde::Serialize;

use super::board::{global_index, is_safe_index};
use super::types::{Player, PlayerId, TokenId, NUM_PLAYERS};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaptureOutcome {
    /// Ring index the mover landed on, when a capture was possible at all.
    pub global_index: Option<usize>,
    /// Opposing tokens sent home, in seat then slot order.
    pub captured: Vec<(PlayerId, TokenId)>,
}

impl CaptureOutcome {
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }

    pub fn count(&self) -> usize {
        self.captured.len()
    }
}

/// Resolve captures for the token `token` of `mover`, which has just moved.
///
/// Friendly tokens sharing the cell are left alone. Opponents who have
/// forfeited or finished are out of play and cannot be captured. Any capture
/// sets the mover's `has_captured` for the rest of the game and adds one to
/// its capture count per token taken.
pub fn resolve(
    players: &mut [Player; NUM_PLAYERS],
    mover: PlayerId,
    token: TokenId,
) -> CaptureOutcome {
    let moved = *players[mover.index()].token(token);
    if !moved.is_on_ring() {
        return CaptureOutcome::default();
    }
    let target = match global_index(mover, moved.steps()) {
        Some(idx) if !is_safe_index(idx) => idx,
        _ => return CaptureOutcome::default(),
    };

    let mut captured = Vec::new();
    for opponent in players.iter_mut() {
        if opponent.id == mover || !opponent.is_active() {
            continue;
        }
        let owner = opponent.id;
        for victim in opponent.tokens.iter_mut() {
            if victim.is_on_ring() && global_index(owner, victim.steps()) == Some(target) {
                victim.reset_to_home();
                captured.push((owner, victim.slot()));
            }
        }
    }

    if !captured.is_empty() {
        let capturer = &mut players[mover.index()];
        capturer.has_captured = true;
        capturer.capture_count += captured.len() as u32;
        tracing::info!(
            player = %mover,
            global_index = target,
            count = captured.len(),
            "captured opposing tokens"
        );
    }

    CaptureOutcome {
        global_index: Some(target),
        captured,
    }
}
