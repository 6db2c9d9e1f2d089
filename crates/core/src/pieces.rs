//! Pieces module - the seven tetromino shapes
//!
//! Shapes are given in local coordinates with the bounding box anchored at
//! the origin. Orientation changes are derived geometrically from the board
//! transforms, so only the spawn orientation is stored.

use crate::board::Board;
use crate::types::PieceKind;

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i32, i32);

/// Static definition of a tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub cells: [MinoOffset; 4],
}

impl Piece {
    /// The piece as a board in its local coordinates
    pub fn board(&self) -> Board {
        Board::from_positions(&self.cells, self.kind.color())
    }
}

/// All pieces, in [`PieceKind::ALL`] order
pub const CATALOG: [Piece; 7] = [
    Piece {
        kind: PieceKind::O,
        cells: [(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Piece {
        kind: PieceKind::T,
        cells: [(1, 0), (0, 1), (1, 1), (2, 1)],
    },
    Piece {
        kind: PieceKind::I,
        cells: [(0, 0), (1, 0), (2, 0), (3, 0)],
    },
    Piece {
        kind: PieceKind::L,
        cells: [(2, 0), (0, 1), (1, 1), (2, 1)],
    },
    Piece {
        kind: PieceKind::J,
        cells: [(0, 0), (0, 1), (1, 1), (2, 1)],
    },
    Piece {
        kind: PieceKind::S,
        cells: [(1, 0), (2, 0), (0, 1), (1, 1)],
    },
    Piece {
        kind: PieceKind::Z,
        cells: [(0, 0), (1, 0), (1, 1), (2, 1)],
    },
];

/// Look up a piece by kind
pub fn piece(kind: PieceKind) -> &'static Piece {
    match kind {
        PieceKind::O => &CATALOG[0],
        PieceKind::T => &CATALOG[1],
        PieceKind::I => &CATALOG[2],
        PieceKind::L => &CATALOG[3],
        PieceKind::J => &CATALOG[4],
        PieceKind::S => &CATALOG[5],
        PieceKind::Z => &CATALOG[6],
    }
}
