//! Bounded exhaustive solver
//!
//! Depth-first search over exposed fitting pairs. Boards already explored are
//! remembered by fingerprint, so the many orders that reach the same position are
//! only expanded once.

use std::collections::HashSet;
use std::fmt;

use crate::core::{fits, selectable_positions, Board};
use crate::types::{Position, Tile};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hash of the board dimensions and every cell in scan order.
pub fn board_fingerprint(board: &Board) -> u64 {
    let mut hash = FNV_OFFSET;
    let header = [board.rows(), board.cols()];
    for byte in header.iter().copied().chain(board.cells().iter().map(|t| t.raw())) {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// More than `budget` distinct boards were expanded.
    BudgetExhausted { budget: u64 },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::BudgetExhausted { budget } => {
                write!(f, "solver gave up after {budget} positions")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// Find a removal sequence that clears every removable tile.
///
/// Returns `Ok(None)` when no sequence exists.
pub fn solve(board: &Board, budget: u64) -> Result<Option<Vec<[Position; 2]>>, SolveError> {
    let mut solver = Solver {
        visited: HashSet::new(),
        path: Vec::new(),
        expanded: 0,
        budget,
    };
    let mut board = board.clone();
    if solver.search(&mut board)? {
        Ok(Some(solver.path))
    } else {
        Ok(None)
    }
}

struct Solver {
    visited: HashSet<u64>,
    path: Vec<[Position; 2]>,
    expanded: u64,
    budget: u64,
}

impl Solver {
    fn search(&mut self, board: &mut Board) -> Result<bool, SolveError> {
        if !board.has_playable_tiles() {
            return Ok(true);
        }
        if !self.visited.insert(board_fingerprint(board)) {
            return Ok(false);
        }
        self.expanded += 1;
        if self.expanded > self.budget {
            return Err(SolveError::BudgetExhausted {
                budget: self.budget,
            });
        }

        let exposed = selectable_positions(board);
        for (i, &a) in exposed.iter().enumerate() {
            let ta = board.get(a);
            for &b in &exposed[i + 1..] {
                let tb = board.get(b);
                if !fits(ta, tb) {
                    continue;
                }
                board.set(a, Tile::EMPTY);
                board.set(b, Tile::EMPTY);
                self.path.push([a, b]);

                if self.search(board)? {
                    return Ok(true);
                }

                self.path.pop();
                board.set(a, ta);
                board.set(b, tb);
            }
        }
        Ok(false)
    }
}
