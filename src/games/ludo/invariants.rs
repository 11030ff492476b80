//! Session invariants: sanity checks that detect engine bugs.
//!
//! None of these should ever trigger through the public operations. The
//! simulator runs them after every action.

use std::collections::HashMap;

use thiserror::Error;

use super::board::{global_index, is_safe_index, GOAL_STEPS, HOME_STEPS, LAST_RING_STEP};
use super::session::GameSession;
use super::turn::movable_tokens;
use super::types::{GamePhase, PlayerId, TokenState, TurnPhase};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Check every session invariant. Empty when all hold.
#[must_use]
pub fn check_invariants(session: &GameSession) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    check_tokens(session, &mut violations);
    check_players(session, &mut violations);
    check_ranking(session, &mut violations);
    check_phase(session, &mut violations);
    check_shared_cells(session, &mut violations);
    violations
}

fn check_tokens(session: &GameSession, violations: &mut Vec<InvariantViolation>) {
    for player in &session.players {
        for (i, token) in player.tokens.iter().enumerate() {
            if token.slot().index() != i {
                violations.push(InvariantViolation::new(format!(
                    "player {} token in position {} carries slot {}",
                    player.id.index(),
                    i,
                    token.slot().index()
                )));
            }
            let steps = token.steps();
            let consistent = match token.state() {
                TokenState::Home => steps == HOME_STEPS,
                TokenState::Active => (0..GOAL_STEPS).contains(&steps),
                TokenState::Finished => steps == GOAL_STEPS,
            };
            if !consistent {
                violations.push(InvariantViolation::new(format!(
                    "player {} token {} is {:?} at step {}",
                    player.id.index(),
                    i,
                    token.state(),
                    steps
                )));
            }
            if steps > LAST_RING_STEP && !player.has_captured {
                violations.push(InvariantViolation::new(format!(
                    "player {} token {} reached step {} without a capture",
                    player.id.index(),
                    i,
                    steps
                )));
            }
        }
    }
}

fn check_players(session: &GameSession, violations: &mut Vec<InvariantViolation>) {
    for player in &session.players {
        let idx = player.id.index();
        if player.forfeited && player.finished {
            violations.push(InvariantViolation::new(format!(
                "player {idx} is both forfeited and finished"
            )));
        }
        if player.finished && !player.all_tokens_finished() {
            violations.push(InvariantViolation::new(format!(
                "player {idx} is finished with tokens still out"
            )));
        }
        if player.has_captured != (player.capture_count > 0) {
            violations.push(InvariantViolation::new(format!(
                "player {idx} has_captured={} but capture_count={}",
                player.has_captured, player.capture_count
            )));
        }
    }
}

fn check_ranking(session: &GameSession, violations: &mut Vec<InvariantViolation>) {
    let mut seen: Vec<PlayerId> = Vec::with_capacity(session.rank_list.len());
    for (pos, id) in session.rank_list.iter().enumerate() {
        if seen.contains(id) {
            violations.push(InvariantViolation::new(format!(
                "player {} ranked twice",
                id.index()
            )));
        }
        seen.push(*id);

        let player = session.player(*id);
        if player.forfeited {
            violations.push(InvariantViolation::new(format!(
                "forfeited player {} appears in the ranking",
                id.index()
            )));
        }
        if usize::from(player.final_rank) != pos + 1 {
            violations.push(InvariantViolation::new(format!(
                "player {} at ranking position {} has final_rank {}",
                id.index(),
                pos + 1,
                player.final_rank
            )));
        }
        // Only the elimination survivor is ranked without finishing, and only at game end.
        let survivor = session.phase == GamePhase::Finished && pos + 1 == session.rank_list.len();
        if !player.finished && !survivor {
            violations.push(InvariantViolation::new(format!(
                "player {} is ranked but not finished",
                id.index()
            )));
        }
    }

    for player in &session.players {
        if player.finished && !seen.contains(&player.id) {
            violations.push(InvariantViolation::new(format!(
                "finished player {} is missing from the ranking",
                player.id.index()
            )));
        }
        if !seen.contains(&player.id) && player.final_rank != 0 {
            violations.push(InvariantViolation::new(format!(
                "unranked player {} has final_rank {}",
                player.id.index(),
                player.final_rank
            )));
        }
    }
}

fn check_phase(session: &GameSession, violations: &mut Vec<InvariantViolation>) {
    let active = session.active_players().len();
    match session.phase {
        GamePhase::Setup => {
            let untouched = session
                .players
                .iter()
                .all(|p| p.tokens.iter().all(|t| t.state() == TokenState::Home));
            if !untouched || !session.rank_list.is_empty() {
                violations.push(InvariantViolation::new(
                    "tokens moved or players ranked before the game started".to_string(),
                ));
            }
        }
        GamePhase::Playing => {
            if active < 2 {
                violations.push(InvariantViolation::new(format!(
                    "game still playing with {active} active players"
                )));
            }
            if !session.current_player().is_active() {
                violations.push(InvariantViolation::new(format!(
                    "turn held by inactive player {}",
                    session.current.index()
                )));
            }
            if let TurnPhase::AwaitingSelection { roll } = session.turn {
                if movable_tokens(session, roll).is_empty() {
                    violations.push(InvariantViolation::new(format!(
                        "awaiting selection for roll {roll} with no movable token"
                    )));
                }
            }
        }
        GamePhase::Finished => {
            if active > 1 {
                violations.push(InvariantViolation::new(format!(
                    "game over with {active} active players"
                )));
            }
            if session.turn != TurnPhase::Idle {
                violations.push(InvariantViolation::new(format!(
                    "game over but turn is {}",
                    session.turn
                )));
            }
        }
    }
}

/// Opposing active tokens never share an unsafe ring cell: the later arrival
/// would have captured the earlier one.
fn check_shared_cells(session: &GameSession, violations: &mut Vec<InvariantViolation>) {
    let mut occupants: HashMap<usize, PlayerId> = HashMap::new();
    for player in session.players.iter().filter(|p| p.is_active()) {
        for token in player.tokens.iter().filter(|t| t.is_on_ring()) {
            let Some(idx) = global_index(player.id, token.steps()) else {
                continue;
            };
            if is_safe_index(idx) {
                continue;
            }
            match occupants.get(&idx) {
                Some(other) if *other != player.id => {
                    violations.push(InvariantViolation::new(format!(
                        "players {} and {} share unsafe ring cell {}",
                        other.index(),
                        player.id.index(),
                        idx
                    )));
                }
                Some(_) => {}
                None => {
                    occupants.insert(idx, player.id);
                }
            }
        }
    }
}
