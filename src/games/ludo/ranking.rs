//! Phase and ranking bookkeeping: finish recording and the elimination rule.

use super::events::GameEvent;
use super::session::GameSession;
use super::types::{GamePhase, PlayerId, TurnPhase};

/// Mark `player` finished if all four of its tokens have reached the goal.
///
/// Appends the player to the rank list and returns `true` the first time it
/// applies; returns `false` for players already out of play.
pub fn record_finish(
    session: &mut GameSession,
    player: PlayerId,
    events: &mut Vec<GameEvent>,
) -> bool {
    let p = &mut session.players[player.index()];
    if !p.is_active() || !p.all_tokens_finished() {
        return false;
    }
    session.rank_list.push(player);
    let rank = session.rank_list.len() as u8;
    p.finished = true;
    p.final_rank = rank;
    tracing::info!(player = %player, rank, "player finished");
    events.push(GameEvent::PlayerFinished { player, rank });
    true
}

/// End the game once at most one player is still active.
///
/// The remaining player, if any, is ranked next even though some of its
/// tokens are still out. It keeps `finished == false` since not every token
/// made it home. Returns whether the game is over.
pub fn check_termination(session: &mut GameSession, events: &mut Vec<GameEvent>) -> bool {
    if session.phase == GamePhase::Finished {
        return true;
    }
    let active = session.active_players();
    if active.len() > 1 {
        return false;
    }

    for id in active {
        session.rank_list.push(id);
        session.players[id.index()].final_rank = session.rank_list.len() as u8;
    }
    session.phase = GamePhase::Finished;
    session.turn = TurnPhase::Idle;
    session.consecutive_sixes = 0;

    tracing::info!(ranking = ?session.rank_list, "game over");
    events.push(GameEvent::GameOver {
        ranking: session.rank_list.clone(),
    });
    true
}

/// Players who forfeited, in seat order. They are never ranked.
pub fn did_not_finish(session: &GameSession) -> Vec<PlayerId> {
    session
        .players
        .iter()
        .filter(|p| p.forfeited)
        .map(|p| p.id)
        .collect()
}
