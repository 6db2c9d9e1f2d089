//! Terminal input module (engine-facing).
//!
//! This module is independent of the game engine. It maps `crossterm` key
//! events into [`crate::types::Command`]s; each key press is one discrete
//! command, with no auto-repeat of its own.

pub mod map;

pub use tetromino_types as types;

pub use map::{handle_key_event, should_quit};
