//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the board model, the matching and exposure rules, the
//! solvable-deal generator and the game session. It has **zero dependencies** on
//! terminal, filesystem, or clock, making it:
//!
//! - **Deterministic**: Same seed and map produce the identical deal
//! - **Testable**: Unit tests next to every rule
//! - **Portable**: Runs in the terminal front end, the headless `deal` tool, or a bench
//!
//! # Module Structure
//!
//! - [`board`]: dynamically sized 3-D tile grid with bounds-safe accessors
//! - [`rules`]: the pairing rule ([`fits`])
//! - [`exposure`]: which column tops are currently selectable
//! - [`pile`]: the 144-tile multiset and its pair-preserving shuffle
//! - [`map`], [`map_file`], [`maps`]: level geometry, its text format, built-in layouts
//! - [`generator`]: reverse-deal backtracking that guarantees a solvable board
//! - [`paint`]: back-to-front draw order for overlapping tiles
//! - [`undo`], [`persist`]: removal history and the save-game text codec
//! - [`session`]: one game in progress (cursor, selection, hints, win/loss)
//!
//! # Game Rules
//!
//! - **Exposure**: a tile can be taken when nothing rests on it and at least one of
//!   its left or right sides is free
//! - **Matching**: identical tiles pair up; any season pairs with any season and any
//!   flower with any flower
//! - **Blockers**: immovable obstacles that never match and never leave the board
//! - **End**: the game is won when only blockers remain and lost when no exposed
//!   pair fits
//!
//! # Example
//!
//! ```
//! use tui_mahjong_core::{maps, GameSession, GameStatus, GeneratorLimits, SimpleRng};
//!
//! let map = maps::turtle().unwrap();
//! let mut rng = SimpleRng::new(12345);
//! let mut game = GameSession::new_game(&map, &mut rng, GeneratorLimits::default()).unwrap();
//! assert_eq!(game.tiles_left(), 144);
//!
//! // A hint selects the first tile and moves the caret onto its partner
//! let (first, second) = game.hint().unwrap();
//! assert_eq!(game.selection(), Some(first));
//! game.select(second);
//! assert_eq!(game.tiles_left(), 142);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```

pub mod board;
pub mod exposure;
pub mod generator;
pub mod map;
pub mod map_file;
pub mod maps;
pub mod paint;
pub mod persist;
pub mod pile;
pub mod rng;
pub mod rules;
pub mod session;
pub mod undo;

pub use tui_mahjong_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use exposure::{is_selectable, selectable_positions};
pub use generator::{generate, generate_with_limits, Deal, GenerationError, GeneratorLimits};
pub use map::{Map, MapError};
pub use paint::paint_order;
pub use persist::{SaveError, SavedGame};
pub use pile::{Pile, PileError};
pub use rng::{FixedOrder, RandomSource, SimpleRng};
pub use rules::fits;
pub use session::{GameSession, GameStatus, SelectOutcome};
pub use undo::{UndoRecord, UndoStack};
