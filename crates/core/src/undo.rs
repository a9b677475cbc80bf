//! Undo stack - removed tiles, recorded two per match
use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Position, Tile};

/// One removed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoRecord {
    pub position: Position,
    pub tile: Tile,
}

impl UndoRecord {
    pub fn new(position: Position, tile: Tile) -> Self {
        Self { position, tile }
    }
}

/// Linear stack of removed tiles. Always holds an even number of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    records: Vec<UndoRecord>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a stack from saved records; `None` when the count is odd.
    pub fn from_records(records: Vec<UndoRecord>) -> Option<Self> {
        if records.len() % 2 != 0 {
            return None;
        }
        Some(Self { records })
    }

    /// Record a match; `first` is restored last.
    pub fn push_pair(&mut self, first: UndoRecord, second: UndoRecord) {
        self.records.push(first);
        self.records.push(second);
    }

    /// Pop the most recent match, most recent record first.
    pub fn pop_pair(&mut self) -> Option<ArrayVec<UndoRecord, 2>> {
        if self.records.len() < 2 {
            return None;
        }
        let mut pair = ArrayVec::new();
        for _ in 0..2 {
            if let Some(record) = self.records.pop() {
                pair.push(record);
            }
        }
        Some(pair)
    }

    /// Pop the most recent match and put both tiles back on `board`.
    pub fn restore_pair(&mut self, board: &mut Board) -> Option<ArrayVec<UndoRecord, 2>> {
        let pair = self.pop_pair()?;
        for record in &pair {
            board.set(record.position, record.tile);
        }
        board.set_tile_count(board.tile_count() + pair.len());
        Some(pair)
    }

    /// Number of records (twice the number of matches)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Records from oldest to newest
    pub fn records(&self) -> &[UndoRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn pop_returns_pair_newest_first() {
        let a = UndoRecord::new(Position::new(0, 0, 0), Tile::new(Category::Dots, 3));
        let b = UndoRecord::new(Position::new(0, 4, 0), Tile::new(Category::Dots, 3));
        let mut stack = UndoStack::new();
        stack.push_pair(a, b);
        assert_eq!(stack.len(), 2);

        let pair = stack.pop_pair().unwrap();
        assert_eq!(pair.as_slice(), &[b, a]);
        assert!(stack.is_empty());
        assert!(stack.pop_pair().is_none());
    }

    #[test]
    fn restore_pair_touches_only_recorded_cells() {
        let mut board = Board::with_dimensions(4, 8);
        let keep = Position::new(2, 2, 0);
        board.set(keep, Tile::BLOCKER);
        board.set_tile_count(1);

        let a = UndoRecord::new(Position::new(0, 0, 0), Tile::new(Category::Winds, 2));
        let b = UndoRecord::new(Position::new(0, 6, 0), Tile::new(Category::Winds, 2));
        let mut stack = UndoStack::new();
        stack.push_pair(a, b);

        let before = board.clone();
        stack.restore_pair(&mut board).unwrap();
        assert_eq!(board.tile_count(), 3);
        assert_eq!(board.get(a.position), a.tile);
        assert_eq!(board.get(b.position), b.tile);
        assert_eq!(board.get(keep), Tile::BLOCKER);

        let changed = board
            .cells()
            .iter()
            .zip(before.cells())
            .filter(|(x, y)| x != y)
            .count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn odd_record_count_is_rejected() {
        let r = UndoRecord::new(Position::new(0, 0, 0), Tile::new(Category::Dots, 1));
        assert!(UndoStack::from_records(vec![r]).is_none());
        assert_eq!(UndoStack::from_records(vec![r, r]).map(|s| s.len()), Some(2));
    }
}
