//! Board module - the 3-D tile grid
//!
//! The board is a `rows x cols x MAX_HEIGHT` grid where each cell holds a tile value.
//! Uses a flat vector sized to the map's own dimensions.
//! Coordinates: (row, col, height); the flat layout is row-major, then column, then
//! height, which is also the scan order of saved games.
//!
//! Every accessor is bounds-safe: probes outside the board read as empty and writes
//! outside the board are ignored. The "no floating tiles" invariant is maintained by
//! the generator and by pairwise removal, not by `set`.

use crate::types::{Position, Tile, MAX_COLS, MAX_HEIGHT, MAX_ROWS};

/// The game board - flat storage of `rows * cols * MAX_HEIGHT` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    /// Flat array of cells, ((row * cols) + col) * MAX_HEIGHT + height
    cells: Vec<Tile>,
    /// Number of placed tiles (blockers included)
    tile_count: usize,
}

impl Board {
    /// Create a new empty board with the full grid dimensions
    pub fn new() -> Self {
        Self::with_dimensions(MAX_ROWS, MAX_COLS)
    }

    /// Create a new empty board; dimensions are clamped to the grid bounds
    pub fn with_dimensions(rows: u8, cols: u8) -> Self {
        let rows = rows.min(MAX_ROWS);
        let cols = cols.min(MAX_COLS);
        let len = rows as usize * cols as usize * MAX_HEIGHT as usize;
        Self {
            rows,
            cols,
            cells: vec![Tile::EMPTY; len],
            tile_count: 0,
        }
    }

    /// Calculate flat index from signed coordinates
    #[inline(always)]
    fn index(&self, row: i32, col: i32, height: i32) -> Option<usize> {
        if row < 0
            || row >= self.rows as i32
            || col < 0
            || col >= self.cols as i32
            || height < 0
            || height >= MAX_HEIGHT as i32
        {
            return None;
        }
        let column = row as usize * self.cols as usize + col as usize;
        Some(column * MAX_HEIGHT as usize + height as usize)
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn height(&self) -> u8 {
        MAX_HEIGHT
    }

    /// Get the tile at `pos`; `Tile::EMPTY` when out of bounds
    pub fn get(&self, pos: Position) -> Tile {
        self.probe(pos.row as i32, pos.col as i32, pos.height as i32)
    }

    /// Set the tile at `pos`; out-of-bounds writes are ignored
    pub fn set(&mut self, pos: Position, tile: Tile) {
        if let Some(idx) = self.index(pos.row as i32, pos.col as i32, pos.height as i32) {
            self.cells[idx] = tile;
        }
    }

    /// Read a cell by signed coordinates (neighbour probes may go negative)
    #[inline]
    pub fn probe(&self, row: i32, col: i32, height: i32) -> Tile {
        self.index(row, col, height)
            .map(|idx| self.cells[idx])
            .unwrap_or(Tile::EMPTY)
    }

    /// Whether `pos` lies inside this board's dimensions
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos.row as i32, pos.col as i32, pos.height as i32)
            .is_some()
    }

    /// Number of occupied levels in a column (index of the topmost tile + 1)
    pub fn column_height(&self, row: i32, col: i32) -> u8 {
        let Some(base) = self.index(row, col, 0) else {
            return 0;
        };
        let stack = &self.cells[base..base + MAX_HEIGHT as usize];
        stack
            .iter()
            .rposition(|tile| !tile.is_empty())
            .map(|top| top as u8 + 1)
            .unwrap_or(0)
    }

    /// Number of placed tiles, as maintained by the caller
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    pub fn set_tile_count(&mut self, count: usize) {
        self.tile_count = count;
    }

    /// Recompute the tile count from the occupied cells
    pub fn recount(&mut self) {
        self.tile_count = self.cells.iter().filter(|t| !t.is_empty()).count();
    }

    /// Whether any removable (non-blocker) tile remains
    pub fn has_playable_tiles(&self) -> bool {
        self.cells.iter().any(|t| t.is_playable())
    }

    /// All occupied positions in scan order (row, column, height)
    pub fn occupied_positions(&self) -> Vec<Position> {
        let mut out = Vec::with_capacity(self.tile_count);
        self.for_each_cell(|pos, tile| {
            if !tile.is_empty() {
                out.push(pos);
            }
        });
        out
    }

    /// Visit every cell in scan order
    pub fn for_each_cell(&self, mut f: impl FnMut(Position, Tile)) {
        let h = MAX_HEIGHT as usize;
        for (idx, &tile) in self.cells.iter().enumerate() {
            let column = idx / h;
            let pos = Position::new(
                (column / self.cols as usize) as u8,
                (column % self.cols as usize) as u8,
                (idx % h) as u8,
            );
            f(pos, tile);
        }
    }

    /// Get a reference to the internal cells array (scan order)
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Tile::EMPTY);
        self.tile_count = 0;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
