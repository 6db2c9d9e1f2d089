//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board engine and the game state machine. It has
//! no dependencies on terminal I/O, making it:
//!
//! - **Deterministic**: Same seed and event sequence produce identical games
//! - **Testable**: Every transition is a plain function from state to state
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: Sparse, immutable occupancy grid with geometric transforms,
//!   collision-checked merging, and line detection/removal
//! - [`pieces`]: The seven tetromino shapes
//! - [`game_state`]: Falling / Flashing / GameOver states and the `step` reducer
//! - [`game`]: The context object owned by the run loop
//! - [`config`]: Board size, spawn column, and timing
//! - [`rng`]: Seeded uniform piece and rotation selection
//!
//! # Game Rules
//!
//! - **Spawn**: A uniformly random piece with a uniformly random number of
//!   counter-clockwise quarter turns appears at the spawn column; if the
//!   unrotated piece does not fit there, the game is over
//! - **Wall kick**: Rotations (and the spawn orientation) try the current
//!   position, then one column to the left, and nothing else
//! - **Lock**: A piece locks when a downward move or a gravity step is blocked
//! - **Line clear**: Full rows flash for a fixed number of stages, then are
//!   removed and the rows above drop by one
//!
//! # Example
//!
//! ```
//! use tetromino_core::{Game, GameConfig};
//! use tetromino_types::Command;
//!
//! let mut game = Game::new(GameConfig::default().with_seed(12345), 0);
//!
//! game.command(Command::MoveRight);
//! game.command(Command::RotateCw);
//! game.tick(1_000);
//!
//! assert!(game.state().is_falling());
//! ```

pub mod board;
pub mod config;
pub mod game;
pub mod game_state;
pub mod pieces;
pub mod rng;

pub use tetromino_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use game::Game;
pub use game_state::{fits, GameState, StepContext};
pub use pieces::{piece, Piece, CATALOG};
pub use rng::SimpleRng;
