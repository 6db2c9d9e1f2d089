//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data with no I/O, making them usable in any context
//! (engine, terminal rendering, tests).
//!
//! # Coordinates
//!
//! A [`Position`] is a pair of signed integers: `x` is the column and grows
//! to the right, `y` is the row and grows downward. Gravity increases `y`.
//! Positions carry no implicit bounds; containment is always checked by the
//! caller against an explicit width and height.
//!
//! # Timing Defaults
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the run loop (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 500 | Gravity step interval |
//! | `FLASH_STAGE_MS` | 80 | Duration of one line-clear animation stage |
//! | `FLASH_STAGE_COUNT` | 6 | Number of stages before lines are removed |

use std::fmt;
use std::ops::{Add, Sub};

/// Default board dimensions
pub const BOARD_WIDTH: i32 = 10;
pub const BOARD_HEIGHT: i32 = 20;

/// Timing defaults (in milliseconds)
pub const TICK_MS: u64 = 16;
pub const FALL_INTERVAL_MS: u64 = 500;
pub const FLASH_STAGE_MS: u64 = 80;
pub const FLASH_STAGE_COUNT: u32 = 6;

/// Cell color. Purely cosmetic; one per piece kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Orange,
    Blue,
    Green,
    Red,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Cyan,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
        Color::Blue,
        Color::Green,
        Color::Red,
    ];

    /// Single-letter tag used by the ASCII board dump
    pub fn letter(&self) -> char {
        match self {
            Color::Cyan => 'c',
            Color::Yellow => 'y',
            Color::Purple => 'p',
            Color::Orange => 'o',
            Color::Blue => 'b',
            Color::Green => 'g',
            Color::Red => 'r',
        }
    }
}

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::T,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Fill color of the piece
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Purple,
            PieceKind::L => Color::Orange,
            PieceKind::J => Color::Blue,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
        }
    }

    /// Lowercase name, for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Board coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A failed merge: both boards occupy `at`.
///
/// This is an ordinary outcome ("cannot place here"), not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cells collide at {at}")]
pub struct Collision {
    pub at: Position,
}

/// Player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Restart,
}

impl Command {
    /// Name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Restart => "restart",
        }
    }

    /// Translation requested by a movement command
    pub fn delta(&self) -> Option<Position> {
        match self {
            Command::MoveLeft => Some(Position::new(-1, 0)),
            Command::MoveRight => Some(Position::new(1, 0)),
            Command::SoftDrop => Some(Position::new(0, 1)),
            _ => None,
        }
    }
}

/// Everything the state machine reacts to, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Clock tick carrying a monotonic timestamp
    Tick { now_ms: u64 },
    Command(Command),
}

impl From<Command> for Event {
    fn from(cmd: Command) -> Self {
        Event::Command(cmd)
    }
}
