use std::fmt;

use crate::core::{fits, is_selectable, Board, GameSession, GameStatus, SelectOutcome};
use crate::types::{Position, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    NotPlayable,
    SamePosition,
    NotSelectable,
    NoMatch,
}

impl MatchError {
    pub fn code(self) -> &'static str {
        match self {
            MatchError::NotPlayable => "not_playable",
            MatchError::SamePosition | MatchError::NotSelectable | MatchError::NoMatch => {
                "invalid_match"
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            MatchError::NotPlayable => "game is not playable",
            MatchError::SamePosition => "both positions name the same tile",
            MatchError::NotSelectable => "tile is not exposed",
            MatchError::NoMatch => "tiles do not match",
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for MatchError {}

/// A move list failed at `step` (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayError {
    pub step: usize,
    pub error: MatchError,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "move {} rejected: {}", self.step, self.error.message())
    }
}

impl std::error::Error for ReplayError {}

fn check_pair(board: &Board, a: Position, b: Position) -> Result<(), MatchError> {
    if a == b {
        return Err(MatchError::SamePosition);
    }
    if !is_selectable(board, a) || !is_selectable(board, b) {
        return Err(MatchError::NotSelectable);
    }
    if !fits(board.get(a), board.get(b)) {
        return Err(MatchError::NoMatch);
    }
    Ok(())
}

/// Remove the pair at `a` and `b` from a running session.
///
/// Any pending selection is dropped first, so the session records `a` as the
/// first tile of the pair.
pub fn apply_match(session: &mut GameSession, a: Position, b: Position) -> Result<(), MatchError> {
    if session.status() != GameStatus::Playing {
        return Err(MatchError::NotPlayable);
    }
    check_pair(session.board(), a, b)?;

    let (Some(first), Some(second)) = (session.index_of(a), session.index_of(b)) else {
        return Err(MatchError::NotSelectable);
    };

    session.clear_selection();
    session.select(first);
    match session.select(second) {
        SelectOutcome::Matched { .. } => Ok(()),
        _ => Err(MatchError::NotPlayable),
    }
}

/// Play `moves` in order on a copy of `board`.
///
/// Returns the board after the last move, or the index of the first illegal one.
pub fn replay(board: &Board, moves: &[[Position; 2]]) -> Result<Board, ReplayError> {
    let mut board = board.clone();
    for (step, &[a, b]) in moves.iter().enumerate() {
        check_pair(&board, a, b).map_err(|error| ReplayError { step, error })?;
        board.set(a, Tile::EMPTY);
        board.set(b, Tile::EMPTY);
        board.set_tile_count(board.tile_count().saturating_sub(2));
    }
    Ok(board)
}
