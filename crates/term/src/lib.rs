//! Terminal rendering layer.
//!
//! A small, game-oriented rendering pipeline: derive a [`RenderFrame`] from
//! the current game state, paint it into a [`FrameBuffer`] with [`GameView`],
//! then flush it with [`TerminalRenderer`].
//!
//! Only the last step does I/O; everything before it is pure and unit-tested.

pub mod fb;
pub mod frame;
pub mod game_view;
pub mod renderer;

pub use tetromino_core as core;
pub use tetromino_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use frame::{DrawEffect, RenderFrame};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
