//! Terminal falling-block puzzle (workspace facade crate).
//!
//! Keeps a single `tetromino_tui::{core, input, term, types}` public API while
//! the implementation lives in dedicated crates under `crates/`.

pub use tetromino_core as core;
pub use tetromino_input as input;
pub use tetromino_term as term;
pub use tetromino_types as types;
