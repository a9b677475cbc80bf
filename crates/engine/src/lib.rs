//! Engine helpers on top of the core session.
//!
//! - [`play`]: validated removal of a pair by position, and replay of a move list
//! - [`solve`]: bounded exhaustive search for a complete removal sequence

pub mod play;
pub mod solve;

pub use tui_mahjong_core as core;
pub use tui_mahjong_types as types;

pub use play::{apply_match, replay, MatchError, ReplayError};
pub use solve::{board_fingerprint, solve, SolveError};
