//! GameView: paints a [`RenderFrame`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::frame::{DrawEffect, RenderFrame};
use crate::types::{Color, Position};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const FLASH_BG: Rgb = Rgb::new(235, 235, 235);
const BLOCK: char = '█';

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers can reuse one framebuffer across frames.
    pub fn render_into(&self, frame: &RenderFrame, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        // Oversized boards saturate and get clipped by the framebuffer.
        let cols = u16::try_from(frame.width.max(0)).unwrap_or(u16::MAX);
        let rows = u16::try_from(frame.height.max(0)).unwrap_or(u16::MAX);
        let frame_w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let darker = frame.effect == DrawEffect::Darker;
        let border = CellStyle::plain(
            if darker {
                Rgb::new(110, 110, 110)
            } else {
                Rgb::new(200, 200, 200)
            },
            Rgb::new(0, 0, 0),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Every cell is at least one terminal cell, so nothing past the
        // viewport size in board cells can be visible.
        for y in 0..rows.min(viewport.height) {
            let flashed = frame.is_flashed_row(y as i32);
            for x in 0..cols.min(viewport.width) {
                let color = frame.board.get(Position::new(x as i32, y as i32));
                let (ch, style) = match (color, flashed) {
                    (_, true) => (BLOCK, CellStyle::plain(FLASH_BG, FLASH_BG)),
                    (Some(color), false) => {
                        let fg = if darker {
                            cell_rgb(color).shade(45)
                        } else {
                            cell_rgb(color)
                        };
                        let style = CellStyle {
                            bold: !darker,
                            ..CellStyle::plain(fg, BOARD_BG)
                        };
                        (BLOCK, style)
                    }
                    (None, false) => {
                        let style = CellStyle {
                            dim: true,
                            ..CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG)
                        };
                        ('·', style)
                    }
                };
                let px = start_x
                    .saturating_add(1)
                    .saturating_add(x.saturating_mul(self.cell_w));
                let py = start_y
                    .saturating_add(1)
                    .saturating_add(y.saturating_mul(self.cell_h));
                if px >= viewport.width || py >= viewport.height {
                    continue;
                }
                fb.fill_rect(px, py, self.cell_w, self.cell_h, style.cell(ch));
            }
        }

        if darker {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            draw_overlay_text(
                fb,
                start_x,
                start_y.saturating_add(1),
                frame_w,
                frame_h,
                "r: restart",
            );
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &RenderFrame, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }
}

fn cell_rgb(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Purple => Rgb::new(200, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let right = x + w - 1;
    let bottom = y + h - 1;

    fb.set(x, y, style.cell('┌'));
    fb.set(right, y, style.cell('┐'));
    fb.set(x, bottom, style.cell('└'));
    fb.set(right, bottom, style.cell('┘'));
    for cx in x + 1..right {
        fb.set(cx, y, style.cell('─'));
        fb.set(cx, bottom, style.cell('─'));
    }
    for cy in y + 1..bottom {
        fb.set(x, cy, style.cell('│'));
        fb.set(right, cy, style.cell('│'));
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
    };
    fb.put_str(x, mid_y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;

    fn frame(board: Board, effect: DrawEffect) -> RenderFrame {
        RenderFrame {
            width: 4,
            height: 3,
            board,
            effect,
        }
    }

    #[test]
    fn test_color_table_is_distinct() {
        for (i, &a) in Color::ALL.iter().enumerate() {
            for &b in &Color::ALL[i + 1..] {
                assert_ne!(cell_rgb(a), cell_rgb(b), "{:?} and {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_flashed_row_is_solid() {
        let board = Board::from_positions(&[(0, 1), (1, 1), (2, 1), (3, 1)], Color::Red);
        let fb = GameView::default().render(
            &frame(board, DrawEffect::Flash { rows: vec![1] }),
            Viewport::new(10, 5),
        );
        // Row 1 of the board is terminal row 2; all 8 inner columns are solid.
        assert_eq!(fb.row_text(2), "│████████│");
        assert_eq!(fb.get(1, 2).map(|c| c.style.bg), Some(FLASH_BG));
    }

    #[test]
    fn test_oversized_board_is_clipped() {
        let oversized = RenderFrame {
            width: 40_000,
            height: 70_000,
            board: Board::from_positions(&[(0, 0), (39_999, 69_999)], Color::Red),
            effect: DrawEffect::Darker,
        };
        let fb = GameView::default().render(&oversized, Viewport::new(80, 24));
        assert_eq!((fb.width(), fb.height()), (80, 24));
    }

    #[test]
    fn test_darker_dims_cells() {
        let board = Board::from_positions(&[(0, 0)], Color::Red);
        let normal = GameView::default().render(&frame(board.clone(), DrawEffect::None), Viewport::new(10, 5));
        let dark = GameView::default().render(&frame(board, DrawEffect::Darker), Viewport::new(10, 5));
        let fg = |fb: &FrameBuffer| fb.get(1, 1).map(|c| c.style.fg);
        assert_eq!(fg(&normal), Some(cell_rgb(Color::Red)));
        assert_eq!(fg(&dark), Some(cell_rgb(Color::Red).shade(45)));
    }
}
