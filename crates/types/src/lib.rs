//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, save files).
//!
//! # Grid Dimensions
//!
//! Tiles live in a bounded 3-D grid. A tile occupies a 2x2 footprint of grid
//! cells, so horizontally adjacent tiles sit two columns apart.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAX_ROWS` | 24 | Rows of the grid (indexed 0-23) |
//! | `MAX_COLS` | 40 | Columns of the grid (indexed 0-39) |
//! | `MAX_HEIGHT` | 16 | Stack levels per column (indexed 0-15) |
//! | `PILE_SIZE` | 144 | Tiles dealt onto a standard map |
//!
//! # Tile Encoding
//!
//! A tile is one byte: the high nibble is the category, the low nibble the rank.
//!
//! | Category | Nibble | Ranks |
//! |----------|--------|-------|
//! | Character | `0x10` | 1-9 |
//! | Dots | `0x20` | 1-9 |
//! | Bamboo | `0x30` | 1-9 |
//! | Winds | `0x40` | 1-4 |
//! | Dragons | `0x50` | 1-3 |
//! | Seasons | `0x60` | 1-4 |
//! | Flowers | `0x70` | 1-4 |
//! | Blocker | `0x80` | 1 |
//!
//! `0x00` is an empty cell and `0xFF` is the generation placeholder.
//!
//! # Examples
//!
//! ```
//! use tui_mahjong_types::{Category, GameAction, Position, Tile};
//!
//! let tile = Tile::new(Category::Dots, 7);
//! assert_eq!(tile.raw(), 0x27);
//! assert_eq!(tile.category(), Some(Category::Dots));
//! assert_eq!(tile.rank(), 7);
//!
//! assert!(Tile::new(Category::Seasons, 2).is_bonus());
//! assert!(Tile::BLOCKER.is_blocker());
//!
//! let pos = Position::new(3, 10, 1);
//! assert_eq!((pos.row, pos.col, pos.height), (3, 10, 1));
//!
//! assert_eq!(GameAction::from_str("undo"), Some(GameAction::Undo));
//! ```

/// Grid rows (24)
pub const MAX_ROWS: u8 = 24;

/// Grid columns (40)
pub const MAX_COLS: u8 = 40;

/// Stack levels per column (16)
pub const MAX_HEIGHT: u8 = 16;

/// Number of tiles in the standard pile (144)
pub const PILE_SIZE: usize = 144;

/// Mask selecting the category nibble of a tile.
pub const CATEGORY_MASK: u8 = 0xF0;

/// Mask that folds seasons and flowers into one bonus group.
pub const BONUS_GROUP_MASK: u8 = 0xE0;

/// Value of `tile & BONUS_GROUP_MASK` for seasons and flowers.
pub const BONUS_GROUP: u8 = 0x60;

/// Tile categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Character,
    Dots,
    Bamboo,
    Winds,
    Dragons,
    Seasons,
    Flowers,
    Blocker,
}

impl Category {
    /// All categories in encoding order.
    pub const ALL: [Category; 8] = [
        Category::Character,
        Category::Dots,
        Category::Bamboo,
        Category::Winds,
        Category::Dragons,
        Category::Seasons,
        Category::Flowers,
        Category::Blocker,
    ];

    /// High-nibble encoding of this category.
    pub const fn nibble(self) -> u8 {
        match self {
            Category::Character => 0x10,
            Category::Dots => 0x20,
            Category::Bamboo => 0x30,
            Category::Winds => 0x40,
            Category::Dragons => 0x50,
            Category::Seasons => 0x60,
            Category::Flowers => 0x70,
            Category::Blocker => 0x80,
        }
    }

    /// Decode the category nibble of a raw tile value.
    ///
    /// ```
    /// use tui_mahjong_types::Category;
    ///
    /// assert_eq!(Category::from_raw(0x34), Some(Category::Bamboo));
    /// assert_eq!(Category::from_raw(0x00), None);
    /// assert_eq!(Category::from_raw(0xFF), None);
    /// ```
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw & CATEGORY_MASK {
            0x10 => Some(Category::Character),
            0x20 => Some(Category::Dots),
            0x30 => Some(Category::Bamboo),
            0x40 => Some(Category::Winds),
            0x50 => Some(Category::Dragons),
            0x60 => Some(Category::Seasons),
            0x70 => Some(Category::Flowers),
            0x80 => Some(Category::Blocker),
            _ => None,
        }
    }

    /// Seasons and flowers match within their category regardless of rank.
    pub const fn is_bonus(self) -> bool {
        matches!(self, Category::Seasons | Category::Flowers)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Character => "character",
            Category::Dots => "dots",
            Category::Bamboo => "bamboo",
            Category::Winds => "winds",
            Category::Dragons => "dragons",
            Category::Seasons => "seasons",
            Category::Flowers => "flowers",
            Category::Blocker => "blocker",
        }
    }
}

/// A tile value (category nibble + rank nibble)
///
/// `Tile::EMPTY` marks an empty cell. `Tile::PLACEHOLDER` marks a cell that
/// belongs to the layout but has not been assigned a face yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tile(u8);

impl Tile {
    pub const EMPTY: Tile = Tile(0x00);
    pub const PLACEHOLDER: Tile = Tile(0xFF);
    pub const BLOCKER: Tile = Tile(0x81);

    /// Build a tile from a category and a rank (low nibble only).
    pub const fn new(category: Category, rank: u8) -> Self {
        Tile(category.nibble() | (rank & 0x0F))
    }

    pub const fn from_raw(raw: u8) -> Self {
        Tile(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_placeholder(self) -> bool {
        self.0 == Self::PLACEHOLDER.0
    }

    pub const fn category(self) -> Option<Category> {
        Category::from_raw(self.0)
    }

    pub const fn rank(self) -> u8 {
        self.0 & 0x0F
    }

    pub const fn is_blocker(self) -> bool {
        self.0 & CATEGORY_MASK == 0x80
    }

    pub const fn is_bonus(self) -> bool {
        self.0 & BONUS_GROUP_MASK == BONUS_GROUP
    }

    /// Occupied by something that can be removed by a match.
    pub const fn is_playable(self) -> bool {
        !self.is_empty() && !self.is_blocker()
    }
}

impl From<u8> for Tile {
    fn from(raw: u8) -> Self {
        Tile(raw)
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        tile.0
    }
}

/// A coordinate into the tile grid
///
/// Equality is component-wise. The derived ordering is by row, then column,
/// then height, which matches the board's scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: u8,
    pub col: u8,
    pub height: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8, height: u8) -> Self {
        Self { row, col, height }
    }

    /// Whether the coordinate lies inside the full grid bounds.
    pub const fn in_grid(self) -> bool {
        self.row < MAX_ROWS && self.col < MAX_COLS && self.height < MAX_HEIGHT
    }
}

/// Player actions that can be applied to a game session
///
/// These actions are produced by terminal input and consumed by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move the caret to the previous selectable tile
    CaretLeft,
    /// Move the caret to the next selectable tile
    CaretRight,
    /// Move the caret to the nearest selectable tile in an upper row
    CaretUp,
    /// Move the caret to the nearest selectable tile in a lower row
    CaretDown,
    /// Select (or deselect) the tile under the caret
    Select,
    /// Highlight the next matching pair
    Hint,
    /// Restore the last removed pair
    Undo,
    /// Deal a new game on the current map
    NewGame,
    /// Deal a new game on the next available map
    NextMap,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_mahjong_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("caretLeft"), Some(GameAction::CaretLeft));
    /// assert_eq!(GameAction::from_str("HINT"), Some(GameAction::Hint));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "caretleft" => Some(GameAction::CaretLeft),
            "caretright" => Some(GameAction::CaretRight),
            "caretup" => Some(GameAction::CaretUp),
            "caretdown" => Some(GameAction::CaretDown),
            "select" => Some(GameAction::Select),
            "hint" => Some(GameAction::Hint),
            "undo" => Some(GameAction::Undo),
            "newgame" => Some(GameAction::NewGame),
            "nextmap" => Some(GameAction::NextMap),
            _ => None,
        }
    }

    /// Convert to camelCase string (used by the journal)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::CaretLeft => "caretLeft",
            GameAction::CaretRight => "caretRight",
            GameAction::CaretUp => "caretUp",
            GameAction::CaretDown => "caretDown",
            GameAction::Select => "select",
            GameAction::Hint => "hint",
            GameAction::Undo => "undo",
            GameAction::NewGame => "newGame",
            GameAction::NextMap => "nextMap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_nibbles_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_raw(category.nibble()), Some(category));
            assert_eq!(Tile::new(category, 1).category(), Some(category));
        }
    }

    #[test]
    fn bonus_group_covers_seasons_and_flowers_only() {
        for category in Category::ALL {
            let tile = Tile::new(category, 3);
            assert_eq!(tile.is_bonus(), category.is_bonus(), "{:?}", category);
        }
        assert!(!Tile::PLACEHOLDER.is_bonus());
    }

    #[test]
    fn special_values() {
        assert!(Tile::EMPTY.is_empty());
        assert!(!Tile::EMPTY.is_playable());
        assert!(Tile::PLACEHOLDER.is_placeholder());
        assert!(Tile::PLACEHOLDER.is_playable());
        assert_eq!(Tile::PLACEHOLDER.category(), None);
        assert!(Tile::BLOCKER.is_blocker());
        assert!(!Tile::BLOCKER.is_playable());
        assert_eq!(Tile::BLOCKER.raw(), 0x81);
    }

    #[test]
    fn position_grid_bounds() {
        assert!(Position::new(23, 39, 15).in_grid());
        assert!(!Position::new(24, 0, 0).in_grid());
        assert!(!Position::new(0, 40, 0).in_grid());
        assert!(!Position::new(0, 0, 16).in_grid());
    }

    #[test]
    fn action_strings_round_trip() {
        for action in [
            GameAction::CaretLeft,
            GameAction::CaretRight,
            GameAction::CaretUp,
            GameAction::CaretDown,
            GameAction::Select,
            GameAction::Hint,
            GameAction::Undo,
            GameAction::NewGame,
            GameAction::NextMap,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
