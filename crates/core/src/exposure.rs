//! Exposure analysis - which stacked tiles can currently be picked.
//!
//! A column's topmost tile is selectable when:
//! 1. it exists and is not a blocker,
//! 2. nothing rests on it: the level above is empty in the 3x3 block of columns
//!    around it (diagonal overhang counts),
//! 3. it is not blocked on both sides: a side is blocked when any of the three
//!    columns two grid cells away (same row and the rows either side) holds a tile
//!    at the same level.
//!
//! The scan is recomputed from scratch after every mutation.

use crate::board::Board;
use crate::types::Position;

/// Test the column at (row, col); returns the selectable top position, if any.
pub fn selectable_at(board: &Board, row: i32, col: i32) -> Option<Position> {
    let h = board.column_height(row, col) as i32;
    if h == 0 {
        return None;
    }
    let top = h - 1;
    if board.probe(row, col, top).is_blocker() {
        return None;
    }

    for dr in -1..=1 {
        for dc in -1..=1 {
            if !board.probe(row + dr, col + dc, h).is_empty() {
                return None;
            }
        }
    }

    let side_blocked = |dc: i32| (-1..=1).any(|dr| !board.probe(row + dr, col + dc, top).is_empty());
    if side_blocked(-2) && side_blocked(2) {
        return None;
    }

    Some(Position::new(row as u8, col as u8, top as u8))
}

/// Whether the tile at `pos` is exactly the selectable top of its column.
pub fn is_selectable(board: &Board, pos: Position) -> bool {
    selectable_at(board, pos.row as i32, pos.col as i32) == Some(pos)
}

/// All selectable positions, in row-major scan order.
pub fn selectable_positions(board: &Board) -> Vec<Position> {
    let mut out = Vec::new();
    for row in 0..board.rows() as i32 {
        for col in 0..board.cols() as i32 {
            if let Some(pos) = selectable_at(board, row, col) {
                out.push(pos);
            }
        }
    }
    out
}
