//! Board geometry: maps a player's logical progress to a canonical grid cell.
//!
//! The board is a 15×15 grid. All four players share one 52-cell ring; each
//! player enters it 13 cells further round than the previous seat and leaves
//! it into a private 6-cell home stretch ending at the center. Nothing here
//! holds state, and nothing here knows about pixels.

use serde::{Deserialize, Serialize};

use super::types::{PlayerId, TokenId};

/// Steps value of a token sitting in its home base.
pub const HOME_STEPS: i8 = -1;
/// Last step on the shared ring; anything above is the home stretch.
pub const LAST_RING_STEP: i8 = 50;
/// Steps value of a token that has reached the center.
pub const GOAL_STEPS: i8 = 56;
pub const RING_LEN: usize = 52;
/// Ring distance between consecutive seats' entry cells.
pub const SEAT_OFFSET: usize = 13;

/// Global ring indices on which no capture can happen: the four entry cells
/// and the four star cells eight steps past each of them.
pub const SAFE_INDICES: [usize; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// A cell on the 15×15 board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub col: u8,
    pub row: u8,
}

const fn cell(col: u8, row: u8) -> Cell {
    Cell { col, row }
}

/// Ring cells by global index, clockwise from the red entry cell.
const RING: [Cell; RING_LEN] = [
    cell(1, 6), cell(2, 6), cell(3, 6), cell(4, 6), cell(5, 6),
    cell(6, 5), cell(6, 4), cell(6, 3), cell(6, 2), cell(6, 1), cell(6, 0),
    cell(7, 0), cell(8, 0),
    cell(8, 1), cell(8, 2), cell(8, 3), cell(8, 4), cell(8, 5),
    cell(9, 6), cell(10, 6), cell(11, 6), cell(12, 6), cell(13, 6), cell(14, 6),
    cell(14, 7), cell(14, 8),
    cell(13, 8), cell(12, 8), cell(11, 8), cell(10, 8), cell(9, 8),
    cell(8, 9), cell(8, 10), cell(8, 11), cell(8, 12), cell(8, 13), cell(8, 14),
    cell(7, 14), cell(6, 14),
    cell(6, 13), cell(6, 12), cell(6, 11), cell(6, 10), cell(6, 9),
    cell(5, 8), cell(4, 8), cell(3, 8), cell(2, 8), cell(1, 8), cell(0, 8),
    cell(0, 7), cell(0, 6),
];

/// Home stretch cells per seat, steps 51..=56. The last entry is the goal.
const STRETCH: [[Cell; 6]; 4] = [
    [cell(1, 7), cell(2, 7), cell(3, 7), cell(4, 7), cell(5, 7), cell(6, 7)],
    [cell(7, 1), cell(7, 2), cell(7, 3), cell(7, 4), cell(7, 5), cell(7, 6)],
    [cell(13, 7), cell(12, 7), cell(11, 7), cell(10, 7), cell(9, 7), cell(8, 7)],
    [cell(7, 13), cell(7, 12), cell(7, 11), cell(7, 10), cell(7, 9), cell(7, 8)],
];

/// Top-left corner of each seat's 6×6 home quadrant.
const BASE_ORIGIN: [Cell; 4] = [cell(0, 0), cell(9, 0), cell(9, 9), cell(0, 9)];

/// Ring index of a token `steps` along its owner's path, or `None` when the
/// token is at home or on its private stretch.
pub fn global_index(player: PlayerId, steps: i8) -> Option<usize> {
    if !(0..=LAST_RING_STEP).contains(&steps) {
        return None;
    }
    Some((player.index() * SEAT_OFFSET + steps as usize) % RING_LEN)
}

#[inline]
pub fn is_safe_index(index: usize) -> bool {
    SAFE_INDICES.contains(&index)
}

/// Whether a token of `player` at `steps` is immune from capture: anywhere
/// off the ring, or on one of the safe ring cells.
pub fn is_safe(player: PlayerId, steps: i8) -> bool {
    match global_index(player, steps) {
        Some(idx) => is_safe_index(idx),
        None => true,
    }
}

#[inline]
pub fn ring_cell(index: usize) -> Cell {
    RING[index % RING_LEN]
}

/// Grid cell of a token.
///
/// Total over all inputs: steps below 0 are treated as home and steps past
/// the goal as the goal. `slot` only matters at home, where each of the four
/// tokens has its own spot in the quadrant.
pub fn position(player: PlayerId, steps: i8, slot: TokenId) -> Cell {
    let seat = player.index();
    if steps < 0 {
        let origin = BASE_ORIGIN[seat];
        let s = slot.index();
        let dc = if s % 2 == 0 { 1 } else { 4 };
        let dr = if s < 2 { 1 } else { 4 };
        return cell(origin.col + dc, origin.row + dr);
    }
    if steps <= LAST_RING_STEP {
        // Checked above: steps is in 0..=50.
        return RING[(seat * SEAT_OFFSET + steps as usize) % RING_LEN];
    }
    let k = (steps.min(GOAL_STEPS) - LAST_RING_STEP - 1) as usize;
    STRETCH[seat][k]
}
