//! Save-game text codec
//!
//! ```text
//! <rows> <cols>
//! <value>                        one line per cell, rows x cols x 16, scan order
//! <undo count>
//! <row> <col> <height> <value>   one line per undo record, oldest first
//! ```
//!
//! The codec works on strings only; reading and writing the file is up to the
//! caller.

use std::collections::HashSet;
use std::fmt::{self, Write as _};

use crate::board::Board;
use crate::rules::fits;
use crate::types::{Position, Tile, MAX_COLS, MAX_HEIGHT, MAX_ROWS};
use crate::undo::{UndoRecord, UndoStack};

/// Why a save file was rejected (`CorruptSaveData`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveErrorKind {
    MissingLine,
    BadNumber(String),
    WrongFieldCount { expected: usize, found: usize },
    BadDimensions { rows: u32, cols: u32 },
    InvalidTile(u32),
    OddUndoCount(usize),
    /// More records than there are empty cells to restore them into.
    UndoCountTooLarge { count: usize, empty: usize },
    UndoOutsideBoard(Position),
    UndoOnOccupiedCell(Position),
    DuplicateUndoRecord(Position),
    /// The two records of a pair hold tiles that do not fit.
    UnmatchedUndoPair(Position),
    TrailingData,
}

impl fmt::Display for SaveErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveErrorKind::MissingLine => write!(f, "unexpected end of file"),
            SaveErrorKind::BadNumber(text) => write!(f, "invalid number {text:?}"),
            SaveErrorKind::WrongFieldCount { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            SaveErrorKind::BadDimensions { rows, cols } => {
                write!(f, "bad board dimensions {rows}x{cols}")
            }
            SaveErrorKind::InvalidTile(value) => write!(f, "invalid tile value {value}"),
            SaveErrorKind::OddUndoCount(count) => write!(f, "odd undo record count {count}"),
            SaveErrorKind::UndoCountTooLarge { count, empty } => {
                write!(f, "{count} undo records but only {empty} empty cells")
            }
            SaveErrorKind::UndoOutsideBoard(pos) => write!(
                f,
                "undo record ({}, {}, {}) lies outside the board",
                pos.row, pos.col, pos.height
            ),
            SaveErrorKind::UndoOnOccupiedCell(pos) => write!(
                f,
                "undo record ({}, {}, {}) points at an occupied cell",
                pos.row, pos.col, pos.height
            ),
            SaveErrorKind::DuplicateUndoRecord(pos) => write!(
                f,
                "undo record ({}, {}, {}) appears twice",
                pos.row, pos.col, pos.height
            ),
            SaveErrorKind::UnmatchedUndoPair(pos) => write!(
                f,
                "undo record ({}, {}, {}) does not fit its partner",
                pos.row, pos.col, pos.height
            ),
            SaveErrorKind::TrailingData => write!(f, "unexpected data after the undo records"),
        }
    }
}

/// A corrupt save file, with the 1-based line the problem was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveError {
    pub line: usize,
    pub reason: SaveErrorKind,
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "corrupt save data at line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for SaveError {}

/// A decoded save file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedGame {
    pub board: Board,
    pub undo: UndoStack,
}

/// Serialize a board and its undo history.
pub fn encode(board: &Board, undo: &UndoStack) -> String {
    let mut out = String::with_capacity(board.cells().len() * 3 + undo.len() * 16 + 16);
    let _ = writeln!(out, "{} {}", board.rows(), board.cols());
    for tile in board.cells() {
        let _ = writeln!(out, "{}", tile.raw());
    }
    let _ = writeln!(out, "{}", undo.len());
    for record in undo.records() {
        let pos = record.position;
        let _ = writeln!(
            out,
            "{} {} {} {}",
            pos.row,
            pos.col,
            pos.height,
            record.tile.raw()
        );
    }
    out
}

/// Parse a save file produced by [`encode`].
///
/// ```
/// use tui_mahjong_core::persist::{decode, encode};
/// use tui_mahjong_core::types::{Category, Position, Tile};
/// use tui_mahjong_core::{Board, UndoRecord, UndoStack};
///
/// let mut board = Board::with_dimensions(2, 4);
/// board.set(Position::new(0, 0, 0), Tile::new(Category::Dots, 4));
/// board.recount();
///
/// let mut undo = UndoStack::new();
/// let removed = Tile::new(Category::Winds, 1);
/// undo.push_pair(
///     UndoRecord::new(Position::new(1, 0, 0), removed),
///     UndoRecord::new(Position::new(1, 2, 0), removed),
/// );
///
/// let saved = decode(&encode(&board, &undo)).unwrap();
/// assert_eq!(saved.board, board);
/// assert_eq!(saved.undo, undo);
///
/// assert!(decode("2 4\n0\n").is_err());
/// ```
pub fn decode(text: &str) -> Result<SavedGame, SaveError> {
    let mut reader = Reader::new(text);

    let [rows, cols] = reader.numbers::<2>()?;
    if rows == 0 || cols == 0 || rows > MAX_ROWS as u32 || cols > MAX_COLS as u32 {
        return Err(reader.error(SaveErrorKind::BadDimensions { rows, cols }));
    }
    let mut board = Board::with_dimensions(rows as u8, cols as u8);

    for row in 0..board.rows() {
        for col in 0..board.cols() {
            for height in 0..MAX_HEIGHT {
                let [value] = reader.numbers::<1>()?;
                let tile =
                    cell_tile(value).ok_or_else(|| reader.error(SaveErrorKind::InvalidTile(value)))?;
                board.set(Position::new(row, col, height), tile);
            }
        }
    }
    board.recount();

    let [count] = reader.numbers::<1>()?;
    let count = count as usize;
    if count % 2 != 0 {
        return Err(reader.error(SaveErrorKind::OddUndoCount(count)));
    }
    let empty = board.cells().len() - board.tile_count();
    if count > empty {
        return Err(reader.error(SaveErrorKind::UndoCountTooLarge { count, empty }));
    }

    let mut records: Vec<UndoRecord> = Vec::with_capacity(count);
    let mut seen = HashSet::with_capacity(count);
    for _ in 0..count {
        let [row, col, height, value] = reader.numbers::<4>()?;
        // Anything past u8 is outside every board.
        let narrow = |v: u32| u8::try_from(v).unwrap_or(u8::MAX);
        let pos = Position::new(narrow(row), narrow(col), narrow(height));
        if !board.contains(pos) {
            return Err(reader.error(SaveErrorKind::UndoOutsideBoard(pos)));
        }
        if !board.get(pos).is_empty() {
            return Err(reader.error(SaveErrorKind::UndoOnOccupiedCell(pos)));
        }
        if !seen.insert(pos) {
            return Err(reader.error(SaveErrorKind::DuplicateUndoRecord(pos)));
        }
        let tile = cell_tile(value)
            .filter(|tile| tile.is_playable())
            .ok_or_else(|| reader.error(SaveErrorKind::InvalidTile(value)))?;
        // Records come in pairs, first removed first.
        if records.len() % 2 == 1 {
            let partner = records[records.len() - 1];
            if !fits(partner.tile, tile) {
                return Err(reader.error(SaveErrorKind::UnmatchedUndoPair(pos)));
            }
        }
        records.push(UndoRecord::new(pos, tile));
    }

    if reader.has_more() {
        return Err(reader.error(SaveErrorKind::TrailingData));
    }

    let undo = UndoStack::from_records(records)
        .ok_or_else(|| reader.error(SaveErrorKind::OddUndoCount(count)))?;
    Ok(SavedGame { board, undo })
}

/// A stored cell must be empty or carry a known category.
fn cell_tile(value: u32) -> Option<Tile> {
    let raw = u8::try_from(value).ok()?;
    let tile = Tile::from_raw(raw);
    (tile.is_empty() || tile.category().is_some()).then_some(tile)
}

struct Reader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    line: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            line: 0,
        }
    }

    fn error(&self, reason: SaveErrorKind) -> SaveError {
        SaveError {
            line: self.line.max(1),
            reason,
        }
    }

    fn numbers<const N: usize>(&mut self) -> Result<[u32; N], SaveError> {
        let Some((index, text)) = self.lines.next() else {
            self.line += 1;
            return Err(self.error(SaveErrorKind::MissingLine));
        };
        self.line = index + 1;

        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() != N {
            return Err(self.error(SaveErrorKind::WrongFieldCount {
                expected: N,
                found: fields.len(),
            }));
        }
        let mut out = [0u32; N];
        for (slot, field) in out.iter_mut().zip(fields) {
            *slot = field
                .parse()
                .map_err(|_| self.error(SaveErrorKind::BadNumber(field.to_string())))?;
        }
        Ok(out)
    }

    /// Whether any non-blank line remains.
    fn has_more(&mut self) -> bool {
        for (index, text) in self.lines.by_ref() {
            if !text.trim().is_empty() {
                self.line = index + 1;
                return true;
            }
        }
        false
    }
}
