//! Board module - sparse occupancy grid
//!
//! A board maps positions to colors; an absent key is an empty cell. The same
//! type holds the playfield (every locked cell) and a falling piece (its four
//! cells, either in local coordinates or shifted onto the playfield).
//!
//! Boards are values. Every transform returns a new board and leaves `self`
//! untouched, so an older snapshot stays valid while the next one is built.
//! Coordinates: x grows to the right, y grows downward.

use std::collections::BTreeMap;
use std::fmt;

use crate::types::{Collision, Color, Position};

/// Sparse grid of colored cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: BTreeMap<Position, Color>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a piece from a literal shape and one fill color
    pub fn from_positions(positions: &[(i32, i32)], color: Color) -> Self {
        positions
            .iter()
            .map(|&p| (Position::from(p), color))
            .collect()
    }

    /// Color at `pos`, or `None` if the cell is empty
    pub fn get(&self, pos: Position) -> Option<Color> {
        self.cells.get(&pos).copied()
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells.contains_key(&pos)
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Color)> + '_ {
        self.cells.iter().map(|(&p, &c)| (p, c))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.keys().copied()
    }

    /// Map every occupied position, keeping colors.
    ///
    /// If two cells land on the same position the later one (in position
    /// order) wins; the geometric transforms used here are all injective.
    pub fn modified(&self, transform: impl Fn(Position) -> Position) -> Board {
        self.iter().map(|(p, c)| (transform(p), c)).collect()
    }

    /// Like [`Board::modified`], but cells mapped to `None` are dropped
    pub fn modified_filter(&self, transform: impl Fn(Position) -> Option<Position>) -> Board {
        self.iter()
            .filter_map(|(p, c)| transform(p).map(|p| (p, c)))
            .collect()
    }

    /// Swap x and y of every cell
    pub fn transposed(&self) -> Board {
        self.modified(|p| Position::new(p.y, p.x))
    }

    /// Negate y of every cell
    pub fn mirrored_y(&self) -> Board {
        self.modified(|p| Position::new(p.x, -p.y))
    }

    /// Rotate 90° clockwise (screen coordinates): mirror then transpose.
    ///
    /// The result usually sits in negative x; re-normalize with
    /// [`Board::normalized`] before placing it.
    pub fn rotated(&self) -> Board {
        self.mirrored_y().transposed()
    }

    /// Rotate 90° counter-clockwise
    pub fn rotated_counter(&self) -> Board {
        self.rotated().rotated().rotated()
    }

    /// Minimum x and minimum y over all cells, each clamped to at most 0
    pub fn negative_shift(&self) -> Position {
        self.positions().fold(Position::ORIGIN, |acc, p| {
            Position::new(acc.x.min(p.x), acc.y.min(p.y))
        })
    }

    /// Translate every cell by `(dx, dy)`
    pub fn shifted(&self, dx: i32, dy: i32) -> Board {
        self.modified(|p| Position::new(p.x + dx, p.y + dy))
    }

    pub fn shifted_by(&self, offset: Position) -> Board {
        self.shifted(offset.x, offset.y)
    }

    /// Move cells with negative coordinates back into the non-negative quadrant
    pub fn normalized(&self) -> Board {
        let neg = self.negative_shift();
        self.shifted(-neg.x, -neg.y)
    }

    /// Union with `other`, failing on the first shared position.
    ///
    /// Neither input changes. Callers that only test legality discard the
    /// returned board.
    pub fn merged(&self, other: &Board) -> Result<Board, Collision> {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut cells = large.cells.clone();
        for (pos, color) in small.iter() {
            if cells.insert(pos, color).is_some() {
                return Err(Collision { at: pos });
            }
        }
        Ok(Board { cells })
    }

    /// True iff every cell satisfies `0 <= x < width` and `0 <= y < height`
    pub fn contained(&self, width: i32, height: i32) -> bool {
        self.positions()
            .all(|p| p.x >= 0 && p.x < width && p.y >= 0 && p.y < height)
    }

    /// Rows whose every column in `[0, width)` is occupied, ascending
    pub fn whole_lines(&self, width: i32, height: i32) -> Vec<i32> {
        (0..height)
            .filter(|&y| (0..width).all(|x| self.is_occupied(Position::new(x, y))))
            .collect()
    }

    /// Remove row `y` and move every row above it down by one.
    ///
    /// Rows below `y` are untouched, so several lines can be removed by
    /// calling this in ascending row order.
    pub fn kill_line(&self, y: i32) -> Board {
        self.modified_filter(|p| match p.y {
            row if row == y => None,
            row if row < y => Some(Position::new(p.x, row + 1)),
            _ => Some(p),
        })
    }

    /// Remove every listed row (must be ascending)
    pub fn kill_lines(&self, lines: &[i32]) -> Board {
        lines
            .iter()
            .fold(self.clone(), |board, &y| board.kill_line(y))
    }
}

impl FromIterator<(Position, Color)> for Board {
    fn from_iter<I: IntoIterator<Item = (Position, Color)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// ASCII dump of the bounding box from the origin, for logs and test failures
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max = self.positions().fold(Position::ORIGIN, |acc, p| {
            Position::new(acc.x.max(p.x), acc.y.max(p.y))
        });
        let min = self.negative_shift();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let ch = self
                    .get(Position::new(x, y))
                    .map(|c| c.letter())
                    .unwrap_or('.');
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
