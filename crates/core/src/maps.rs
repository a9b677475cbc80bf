//! Built-in layouts
//!
//! All built-in maps hold exactly 144 tile slots. Tiles are two grid cells wide and
//! two tall, so whole-tile steps are 2 and half-tile offsets are 1.

use crate::map::{Map, MapError};
use crate::types::Position;

/// Names accepted by [`builtin`], in menu order.
pub const BUILTIN_NAMES: [&str; 3] = ["turtle", "pyramid", "bridges"];

/// Look up a built-in map by name.
pub fn builtin(name: &str) -> Option<Result<Map, MapError>> {
    match name {
        "turtle" => Some(turtle()),
        "pyramid" => Some(pyramid()),
        "bridges" => Some(bridges()),
        _ => None,
    }
}

/// The classic five-level turtle.
pub fn turtle() -> Result<Map, MapError> {
    let mut slots = Vec::with_capacity(144);

    // (tile row, first tile column, last tile column)
    const BASE_ROWS: [(u8, u8, u8); 8] = [
        (0, 1, 12),
        (1, 3, 10),
        (2, 2, 11),
        (3, 1, 12),
        (4, 1, 12),
        (5, 2, 11),
        (6, 3, 10),
        (7, 1, 12),
    ];
    for (row, first, last) in BASE_ROWS {
        for col in first..=last {
            slots.push(Position::new(row * 2, col * 2, 0));
        }
    }
    // Head and tail sit half a tile lower, between base rows 3 and 4.
    slots.push(Position::new(7, 0, 0));
    slots.push(Position::new(7, 26, 0));
    slots.push(Position::new(7, 28, 0));

    block(&mut slots, 1, 2, 8, 6, 6);
    block(&mut slots, 2, 4, 10, 4, 4);
    block(&mut slots, 3, 6, 12, 2, 2);
    slots.push(Position::new(7, 13, 4));

    Map::new("turtle", 16, 30, slots, Vec::new())
}

/// A five-level stepped pyramid topped by a 2x2 tower.
pub fn pyramid() -> Result<Map, MapError> {
    let mut slots = Vec::with_capacity(144);
    block(&mut slots, 0, 0, 0, 8, 10);
    block(&mut slots, 1, 2, 2, 6, 8);
    block(&mut slots, 2, 6, 6, 2, 4);
    block(&mut slots, 3, 6, 8, 2, 2);
    block(&mut slots, 4, 6, 8, 2, 2);
    Map::new("pyramid", 16, 20, slots, Vec::new())
}

/// Four towers joined by bridges around a blocker pillar.
pub fn bridges() -> Result<Map, MapError> {
    let mut slots = Vec::with_capacity(144);

    for (row, col) in [(0, 0), (0, 16), (12, 0), (12, 16)] {
        block(&mut slots, 0, row, col, 4, 4);
        block(&mut slots, 1, row + 1, col + 1, 3, 3);
        block(&mut slots, 2, row + 2, col + 2, 2, 2);
        block(&mut slots, 3, row + 3, col + 3, 1, 1);
    }

    // Horizontal bridges between the upper and lower tower pairs.
    for row in [3, 15] {
        block(&mut slots, 0, row, 8, 1, 4);
        block(&mut slots, 1, row, 10, 1, 2);
    }
    // Vertical bridges between the left and right tower pairs.
    for col in [2, 18] {
        block(&mut slots, 0, 8, col, 2, 2);
        block(&mut slots, 1, 8, col + 1, 2, 1);
    }

    let mut blockers = Vec::new();
    block(&mut blockers, 0, 8, 10, 2, 2);
    blockers.push(Position::new(9, 11, 1));

    Map::new("bridges", 20, 24, slots, blockers)
}

/// Push a `rows x cols` rectangle of whole tiles anchored at (row, col).
fn block(out: &mut Vec<Position>, height: u8, row: u8, col: u8, rows: u8, cols: u8) {
    for r in 0..rows {
        for c in 0..cols {
            out.push(Position::new(row + r * 2, col + c * 2, height));
        }
    }
}
