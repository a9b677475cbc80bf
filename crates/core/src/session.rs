//! Game session - one game in progress
//!
//! The session owns the board, the undo history and the player-facing cursor
//! state. Selectable tiles are kept in display order (by row band, then column);
//! caret, selection and hint cursors are indices into that list and are
//! re-clamped after every board mutation.

use crate::board::Board;
use crate::exposure::selectable_positions;
use crate::generator::{generate_with_limits, Deal, GenerationError, GeneratorLimits};
use crate::map::Map;
use crate::persist::SavedGame;
use crate::pile::Pile;
use crate::rng::RandomSource;
use crate::rules::fits;
use crate::types::{Position, Tile, MAX_COLS};
use crate::undo::{UndoRecord, UndoStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Every removable tile is gone.
    Won,
    /// Tiles remain but no exposed pair fits.
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

/// Result of [`GameSession::select`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Index out of range or the game is over.
    Ignored,
    Selected,
    Deselected,
    /// The pair was removed; `first` is the previously selected tile.
    Matched { first: Position, second: Position },
}

/// Display key: row bands two rows high, then column.
fn display_key(pos: &Position) -> i32 {
    ((pos.row as i32 - 1) / 2) * MAX_COLS as i32 + pos.col as i32
}

#[derive(Debug, Clone)]
pub struct GameSession {
    map_name: String,
    board: Board,
    undo: UndoStack,
    selectable: Vec<Position>,
    caret: usize,
    selection: Option<usize>,
    hint_index: usize,
    hint_offset: usize,
    status: GameStatus,
}

impl GameSession {
    /// Deal a fresh game on `map` with a shuffled standard pile.
    pub fn new_game<R: RandomSource>(
        map: &Map,
        rng: &mut R,
        limits: GeneratorLimits,
    ) -> Result<Self, GenerationError> {
        let pile = Pile::standard().shuffled(rng);
        Self::with_pile(map, &pile, rng, limits)
    }

    /// Deal `pile` onto `map` as given, without shuffling it first.
    pub fn with_pile<R: RandomSource>(
        map: &Map,
        pile: &Pile,
        rng: &mut R,
        limits: GeneratorLimits,
    ) -> Result<Self, GenerationError> {
        let deal = generate_with_limits(map, pile, rng, limits)?;
        Ok(Self::from_deal(map.name(), deal))
    }

    pub fn from_deal(map_name: &str, deal: Deal) -> Self {
        Self::from_board(map_name, deal.board, UndoStack::new())
    }

    /// Resume a saved game.
    pub fn from_saved(map_name: &str, saved: SavedGame) -> Self {
        Self::from_board(map_name, saved.board, saved.undo)
    }

    pub fn from_board(map_name: &str, board: Board, undo: UndoStack) -> Self {
        let mut session = Self {
            map_name: map_name.to_string(),
            board,
            undo,
            selectable: Vec::new(),
            caret: 0,
            selection: None,
            hint_index: 0,
            hint_offset: 0,
            status: GameStatus::Playing,
        };
        session.refresh();
        session.update_status();
        session
    }

    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    /// Selectable positions in display order
    pub fn selectable(&self) -> &[Position] {
        &self.selectable
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn caret_position(&self) -> Option<Position> {
        self.selectable.get(self.caret).copied()
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selection_position(&self) -> Option<Position> {
        self.selection.and_then(|i| self.selectable.get(i).copied())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Display index of a selectable position
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.selectable.iter().position(|&p| p == pos)
    }

    /// Removable tiles still on the board (blockers excluded)
    pub fn tiles_left(&self) -> usize {
        self.board.cells().iter().filter(|t| t.is_playable()).count()
    }

    /// Number of exposed pairs that fit
    pub fn moves_left(&self) -> usize {
        let mut count = 0;
        for (i, &a) in self.selectable.iter().enumerate() {
            let ta = self.board.get(a);
            for &b in &self.selectable[i + 1..] {
                if fits(ta, self.board.get(b)) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn pair_exists(&self) -> bool {
        self.selectable.iter().enumerate().any(|(i, &a)| {
            let ta = self.board.get(a);
            self.selectable[i + 1..]
                .iter()
                .any(|&b| fits(ta, self.board.get(b)))
        })
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Select the tile under the caret.
    pub fn select_caret(&mut self) -> SelectOutcome {
        self.select(self.caret)
    }

    /// Select the tile at display `index`.
    ///
    /// Selecting the current selection again deselects it. Selecting a second
    /// tile that fits the first removes both.
    pub fn select(&mut self, index: usize) -> SelectOutcome {
        if self.status != GameStatus::Playing || index >= self.selectable.len() {
            return SelectOutcome::Ignored;
        }
        if self.selection == Some(index) {
            self.selection = None;
            return SelectOutcome::Deselected;
        }

        if let Some(selected) = self.selection {
            let first = self.selectable[selected];
            let second = self.selectable[index];
            if fits(self.board.get(first), self.board.get(second)) {
                self.remove_pair(first, second);
                return SelectOutcome::Matched { first, second };
            }
        }

        self.caret = index;
        self.selection = Some(index);
        SelectOutcome::Selected
    }

    fn remove_pair(&mut self, first: Position, second: Position) {
        self.undo.push_pair(
            UndoRecord::new(first, self.board.get(first)),
            UndoRecord::new(second, self.board.get(second)),
        );
        self.board.set(first, Tile::EMPTY);
        self.board.set(second, Tile::EMPTY);
        self.board
            .set_tile_count(self.board.tile_count().saturating_sub(2));
        self.selection = None;
        self.refresh();
        self.update_status();
    }

    /// Put the last removed pair back. Returns the restored records.
    pub fn undo(&mut self) -> Option<[UndoRecord; 2]> {
        let pair = self.undo.restore_pair(&mut self.board)?;
        self.selection = None;
        self.refresh();
        self.status = GameStatus::Playing;
        pair.into_inner().ok()
    }

    /// Highlight the next fitting pair after the previous hint, wrapping once.
    ///
    /// Sets the selection to the first tile and the caret to the second.
    pub fn hint(&mut self) -> Option<(usize, usize)> {
        let n = self.selectable.len();
        loop {
            let from_origin = self.hint_index == 0 && self.hint_offset == 0;
            for i in self.hint_index..n {
                let ta = self.board.get(self.selectable[i]);
                for j in i + 1 + self.hint_offset..n {
                    if fits(ta, self.board.get(self.selectable[j])) {
                        self.hint_index = i;
                        self.hint_offset = j - i;
                        self.selection = Some(i);
                        self.caret = j;
                        return Some((i, j));
                    }
                }
                self.hint_offset = 0;
            }
            self.hint_index = 0;
            self.hint_offset = 0;
            if from_origin {
                return None;
            }
        }
    }

    pub fn caret_next(&mut self) {
        let n = self.selectable.len();
        if n > 0 {
            self.caret = (self.caret + 1) % n;
        }
    }

    pub fn caret_prev(&mut self) {
        let n = self.selectable.len();
        if n > 0 {
            self.caret = (self.caret + n - 1) % n;
        }
    }

    /// Move to the nearest selectable tile in a row above.
    pub fn caret_up(&mut self) {
        self.caret_vertical(|row, current| row < current);
    }

    /// Move to the nearest selectable tile in a row below.
    pub fn caret_down(&mut self) {
        self.caret_vertical(|row, current| row > current);
    }

    fn caret_vertical(&mut self, wanted: impl Fn(u8, u8) -> bool) {
        let Some(current) = self.caret_position() else {
            return;
        };
        let best = self
            .selectable
            .iter()
            .enumerate()
            .filter(|(_, p)| wanted(p.row, current.row))
            .min_by_key(|(i, p)| {
                (
                    p.row.abs_diff(current.row),
                    p.col.abs_diff(current.col),
                    *i,
                )
            })
            .map(|(i, _)| i);
        if let Some(i) = best {
            self.caret = i;
        }
    }

    /// Snapshot for the save file.
    pub fn to_saved(&self) -> SavedGame {
        SavedGame {
            board: self.board.clone(),
            undo: self.undo.clone(),
        }
    }

    fn refresh(&mut self) {
        let mut selectable = selectable_positions(&self.board);
        selectable.sort_by_key(display_key);
        self.selectable = selectable;

        let n = self.selectable.len();
        self.caret = if n == 0 { 0 } else { self.caret.min(n - 1) };
        if self.selection.is_some_and(|i| i >= n) {
            self.selection = None;
        }
        self.hint_index = 0;
        self.hint_offset = 0;
    }

    fn update_status(&mut self) {
        self.status = if !self.board.has_playable_tiles() {
            GameStatus::Won
        } else if !self.pair_exists() {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        };
    }
}
