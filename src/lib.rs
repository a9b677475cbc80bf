//! TUI Mahjong (workspace facade crate).
//!
//! Re-exports the member crates as `tui_mahjong::{core,engine,input,term,types}` and
//! owns everything that touches the filesystem: settings, map directory, saves and
//! the event journal.

pub mod journal;
pub mod settings;

pub use tui_mahjong_core as core;
pub use tui_mahjong_engine as engine;
pub use tui_mahjong_input as input;
pub use tui_mahjong_term as term;
pub use tui_mahjong_types as types;
