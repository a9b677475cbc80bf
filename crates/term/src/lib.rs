//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the mahjong board. It renders into
//! a plain framebuffer that can be flushed to a terminal backend, without any
//! widget or layout library in between.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Paint stacked tiles back to front with a visible level offset
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per grid column)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_mahjong_core as core;
pub use tui_mahjong_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_label, AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
