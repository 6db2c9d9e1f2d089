//! Render query: what to draw for a given game state.
//!
//! This is a pure read of a [`GameState`]: one flattened board plus an effect
//! tag. The engine never depends on it.

use crate::core::{Board, GameConfig, GameState};

/// Whole-board effect applied while drawing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawEffect {
    None,
    /// Highlight these rows
    Flash { rows: Vec<i32> },
    /// Game over: everything dimmed
    Darker,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub width: i32,
    pub height: i32,
    pub board: Board,
    pub effect: DrawEffect,
}

impl RenderFrame {
    /// Derive the frame for `state`.
    ///
    /// While falling, the piece is merged into the locked cells. While
    /// flashing, rows are highlighted on odd stages only, so they blink.
    pub fn from_state(state: &GameState, config: &GameConfig) -> Self {
        let (board, effect) = match state {
            GameState::Falling { board, .. } => {
                let piece = state.falling_cells().unwrap_or_default();
                // A valid Falling state always merges; draw the locked cells
                // alone if it somehow doesn't.
                (board.merged(&piece).unwrap_or_else(|_| board.clone()), DrawEffect::None)
            }
            GameState::Flashing {
                board, stage, lines, ..
            } => {
                let effect = if stage % 2 == 1 {
                    DrawEffect::Flash {
                        rows: lines.clone(),
                    }
                } else {
                    DrawEffect::None
                };
                (board.clone(), effect)
            }
            GameState::GameOver { board } => (board.clone(), DrawEffect::Darker),
        };

        Self {
            width: config.width,
            height: config.height,
            board,
            effect,
        }
    }

    pub fn is_flashed_row(&self, y: i32) -> bool {
        matches!(&self.effect, DrawEffect::Flash { rows } if rows.contains(&y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Position};

    fn config() -> GameConfig {
        GameConfig::default().with_size(4, 4)
    }

    #[test]
    fn test_falling_merges_piece() {
        let state = GameState::Falling {
            board: Board::from_positions(&[(0, 3)], Color::Red),
            falling: Board::from_positions(&[(0, 0), (1, 0)], Color::Blue),
            shift: Position::new(2, 1),
            time_since_fall: 0,
        };
        let frame = RenderFrame::from_state(&state, &config());
        assert_eq!(frame.effect, DrawEffect::None);
        assert_eq!(frame.board.len(), 3);
        assert_eq!(frame.board.get(Position::new(3, 1)), Some(Color::Blue));
        assert_eq!(frame.board.get(Position::new(0, 3)), Some(Color::Red));
    }

    #[test]
    fn test_flash_only_on_odd_stages() {
        let flashing = |stage| GameState::Flashing {
            board: Board::new(),
            stage,
            last_stage_switch: 0,
            lines: vec![2, 3],
        };
        let even = RenderFrame::from_state(&flashing(2), &config());
        assert_eq!(even.effect, DrawEffect::None);

        let odd = RenderFrame::from_state(&flashing(3), &config());
        assert_eq!(odd.effect, DrawEffect::Flash { rows: vec![2, 3] });
        assert!(odd.is_flashed_row(3));
        assert!(!odd.is_flashed_row(1));
    }

    #[test]
    fn test_game_over_is_darker() {
        let state = GameState::GameOver {
            board: Board::from_positions(&[(1, 1)], Color::Green),
        };
        let frame = RenderFrame::from_state(&state, &config());
        assert_eq!(frame.effect, DrawEffect::Darker);
        assert_eq!(frame.board.len(), 1);
        assert_eq!((frame.width, frame.height), (4, 4));
    }
}
