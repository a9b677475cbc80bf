//! Map module - static level geometry
//!
//! A map lists the tile slots that receive the pile and the blocker positions that
//! stay on the board for the whole game. Maps are validated on construction so the
//! generator never sees out-of-range or overlapping coordinates.

use std::collections::HashSet;
use std::fmt;

use crate::types::{Position, MAX_COLS, MAX_HEIGHT, MAX_ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Row/column counts are zero or exceed the grid.
    BadDimensions { rows: u32, cols: u32 },
    /// Tile slot count is zero or odd.
    UnpairedSlots { count: usize },
    /// Tile slot count differs from the required pile size.
    WrongSlotCount { expected: usize, found: usize },
    /// A coordinate lies outside the map's own dimensions.
    OutOfBounds { pos: Position },
    /// Two slots (or a slot and a blocker) share a coordinate.
    Duplicate { pos: Position },
    /// The map text could not be parsed.
    Parse { line: usize, reason: String },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::BadDimensions { rows, cols } => {
                write!(f, "malformed map: bad dimensions {rows}x{cols}")
            }
            MapError::UnpairedSlots { count } => {
                write!(f, "malformed map: {count} tile slots cannot be paired")
            }
            MapError::WrongSlotCount { expected, found } => {
                write!(f, "malformed map: expected {expected} tile slots, found {found}")
            }
            MapError::OutOfBounds { pos } => write!(
                f,
                "malformed map: position ({}, {}, {}) is out of bounds",
                pos.row, pos.col, pos.height
            ),
            MapError::Duplicate { pos } => write!(
                f,
                "malformed map: position ({}, {}, {}) is used twice",
                pos.row, pos.col, pos.height
            ),
            MapError::Parse { line, reason } => {
                write!(f, "malformed map: line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for MapError {}

/// Validated level geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    name: String,
    rows: u8,
    cols: u8,
    slots: Vec<Position>,
    blockers: Vec<Position>,
}

impl Map {
    /// Validate and build a map
    ///
    /// ```
    /// use tui_mahjong_core::Map;
    /// use tui_mahjong_core::types::Position;
    ///
    /// let map = Map::new(
    ///     "pair",
    ///     3,
    ///     6,
    ///     vec![Position::new(0, 0, 0), Position::new(0, 4, 0)],
    ///     vec![],
    /// )
    /// .unwrap();
    /// assert_eq!(map.slots().len(), 2);
    ///
    /// let odd = Map::new("odd", 3, 6, vec![Position::new(0, 0, 0)], vec![]);
    /// assert!(odd.is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        rows: u8,
        cols: u8,
        slots: Vec<Position>,
        blockers: Vec<Position>,
    ) -> Result<Self, MapError> {
        if rows == 0 || cols == 0 || rows > MAX_ROWS || cols > MAX_COLS {
            return Err(MapError::BadDimensions {
                rows: rows as u32,
                cols: cols as u32,
            });
        }
        if slots.is_empty() || slots.len() % 2 != 0 {
            return Err(MapError::UnpairedSlots { count: slots.len() });
        }

        let mut seen = HashSet::with_capacity(slots.len() + blockers.len());
        for &pos in slots.iter().chain(blockers.iter()) {
            if pos.row >= rows || pos.col >= cols || pos.height >= MAX_HEIGHT {
                return Err(MapError::OutOfBounds { pos });
            }
            if !seen.insert(pos) {
                return Err(MapError::Duplicate { pos });
            }
        }

        Ok(Self {
            name: name.into(),
            rows,
            cols,
            slots,
            blockers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Tile slot positions, in map order
    pub fn slots(&self) -> &[Position] {
        &self.slots
    }

    /// Immovable blocker positions
    pub fn blockers(&self) -> &[Position] {
        &self.blockers
    }

    /// Require an exact slot count (map files must match the standard pile)
    pub fn require_slots(&self, expected: usize) -> Result<(), MapError> {
        if self.slots.len() != expected {
            return Err(MapError::WrongSlotCount {
                expected,
                found: self.slots.len(),
            });
        }
        Ok(())
    }
}
