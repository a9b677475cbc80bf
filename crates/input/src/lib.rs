//! Terminal input module.
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`]. Every action is a discrete key
//! press, so there is no repeat or release handling.

pub mod map;

pub use tui_mahjong_types as types;

pub use map::{handle_key_event, should_quit};
