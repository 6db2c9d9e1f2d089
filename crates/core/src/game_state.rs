//! Game state module - the Falling / Flashing / GameOver state machine
//!
//! [`GameState::step`] is the whole transition function: it takes the current
//! snapshot and one [`Event`] and returns the next snapshot. It never mutates
//! its input, so a renderer may keep reading the previous state while the next
//! one is computed.
//!
//! Placement rule used everywhere: a piece at a shift is legal iff the shifted
//! piece merges with the locked board without collision *and* lies inside the
//! board bounds.

use arrayvec::ArrayVec;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces;
use crate::rng::SimpleRng;
use crate::types::{Command, Event, Position};

/// Everything a transition may consult besides the state itself
pub struct StepContext<'a> {
    pub config: &'a GameConfig,
    pub rng: &'a mut SimpleRng,
    /// Timestamp of the most recent clock tick
    pub now_ms: u64,
}

impl<'a> StepContext<'a> {
    pub fn new(config: &'a GameConfig, rng: &'a mut SimpleRng, now_ms: u64) -> Self {
        Self {
            config,
            rng,
            now_ms,
        }
    }
}

/// One immutable snapshot of the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    /// A piece is in play.
    Falling {
        /// Locked cells
        board: Board,
        /// Falling piece in its own local coordinates
        falling: Board,
        /// Offset that places `falling` on the board
        shift: Position,
        /// Timestamp of the last gravity step (or of the spawn)
        time_since_fall: u64,
    },
    /// Full lines are blinking before removal.
    Flashing {
        /// Locked cells, including the piece that completed the lines
        board: Board,
        /// Animation frame, `0 <= stage < flash_stage_count`
        stage: u32,
        last_stage_switch: u64,
        /// Full rows, ascending
        lines: Vec<i32>,
    },
    GameOver { board: Board },
}

impl GameState {
    /// Fresh game: empty board plus a spawned piece
    pub fn initial(ctx: &mut StepContext<'_>) -> GameState {
        Self::spawn(Board::new(), ctx)
    }

    /// Create the next Falling state on `board`, or GameOver if the new piece
    /// cannot be placed.
    ///
    /// The piece kind and the number of counter-clockwise quarter turns are
    /// both uniform. The unrotated piece at the spawn shift decides the loss
    /// condition. Each turned orientation is tried in order and the last one
    /// that fits is kept.
    pub fn spawn(board: Board, ctx: &mut StepContext<'_>) -> GameState {
        let kind = ctx.rng.next_kind();
        let turns = ctx.rng.next_turns();
        let spawn_shift = Position::new(ctx.config.spawn_column, 0);
        let base = pieces::piece(kind).board();

        if !fits(&board, &base, spawn_shift, ctx.config) {
            info!(kind = kind.as_str(), cells = board.len(), "spawn blocked, game over");
            return GameState::GameOver { board };
        }

        let (falling, shift) = spawn_orientation(&board, base, turns, spawn_shift, ctx.config);

        debug!(kind = kind.as_str(), turns, x = shift.x, "spawned piece");
        GameState::Falling {
            board,
            falling,
            shift,
            time_since_fall: ctx.now_ms,
        }
    }

    /// Apply one event and return the resulting state
    pub fn step(&self, event: Event, ctx: &mut StepContext<'_>) -> GameState {
        match event {
            Event::Tick { now_ms } => {
                ctx.now_ms = now_ms;
                self.tick(ctx)
            }
            Event::Command(cmd) => self.command(cmd, ctx),
        }
    }

    fn command(&self, cmd: Command, ctx: &mut StepContext<'_>) -> GameState {
        if cmd == Command::Restart {
            info!(from = self.name(), "restart");
            return GameState::initial(ctx);
        }

        let GameState::Falling {
            board,
            falling,
            shift,
            time_since_fall,
        } = self
        else {
            // Only restart does anything outside of Falling.
            return self.clone();
        };

        match cmd {
            Command::MoveLeft | Command::MoveRight | Command::SoftDrop => {
                let Some(delta) = cmd.delta() else {
                    return self.clone();
                };
                let candidate = *shift + delta;
                if fits(board, falling, candidate, ctx.config) {
                    GameState::Falling {
                        board: board.clone(),
                        falling: falling.clone(),
                        shift: candidate,
                        time_since_fall: *time_since_fall,
                    }
                } else if delta.y > 0 {
                    lock(board, falling, *shift, ctx)
                } else {
                    self.clone()
                }
            }
            Command::RotateCw | Command::RotateCcw => {
                let turned = if cmd == Command::RotateCw {
                    falling.rotated()
                } else {
                    falling.rotated_counter()
                };
                let turned = turned.normalized();
                match first_fit(board, &turned, *shift, ctx.config) {
                    Some(new_shift) => GameState::Falling {
                        board: board.clone(),
                        falling: turned,
                        shift: new_shift,
                        time_since_fall: *time_since_fall,
                    },
                    None => self.clone(),
                }
            }
            Command::Restart => self.clone(),
        }
    }

    fn tick(&self, ctx: &mut StepContext<'_>) -> GameState {
        let now = ctx.now_ms;
        match self {
            GameState::Falling {
                board,
                falling,
                shift,
                time_since_fall,
            } => {
                if now.saturating_sub(*time_since_fall) < ctx.config.fall_interval_ms {
                    return self.clone();
                }
                let candidate = *shift + Position::new(0, 1);
                if fits(board, falling, candidate, ctx.config) {
                    GameState::Falling {
                        board: board.clone(),
                        falling: falling.clone(),
                        shift: candidate,
                        time_since_fall: now,
                    }
                } else {
                    lock(board, falling, *shift, ctx)
                }
            }
            GameState::Flashing {
                board,
                stage,
                last_stage_switch,
                lines,
            } => {
                let stage_ms = ctx.config.flash_stage_ms.max(1);
                let stage_count = ctx.config.flash_stage_count;
                let mut stage = *stage;
                let mut last = *last_stage_switch;
                while stage < stage_count && now.saturating_sub(last) >= stage_ms {
                    stage += 1;
                    last += stage_ms;
                }

                if stage >= stage_count {
                    let cleared = board.kill_lines(lines);
                    debug!(lines = lines.len(), "lines removed");
                    GameState::spawn(cleared, ctx)
                } else {
                    GameState::Flashing {
                        board: board.clone(),
                        stage,
                        last_stage_switch: last,
                        lines: lines.clone(),
                    }
                }
            }
            // Stale ticks after the game ended do nothing.
            GameState::GameOver { .. } => self.clone(),
        }
    }

    /// Locked cells (for Falling this excludes the piece)
    pub fn board(&self) -> &Board {
        match self {
            GameState::Falling { board, .. }
            | GameState::Flashing { board, .. }
            | GameState::GameOver { board } => board,
        }
    }

    /// The falling piece in board coordinates
    pub fn falling_cells(&self) -> Option<Board> {
        match self {
            GameState::Falling { falling, shift, .. } => Some(falling.shifted_by(*shift)),
            _ => None,
        }
    }

    pub fn is_falling(&self) -> bool {
        matches!(self, GameState::Falling { .. })
    }

    pub fn is_flashing(&self) -> bool {
        matches!(self, GameState::Flashing { .. })
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, GameState::GameOver { .. })
    }

    /// Variant name, for logs
    pub fn name(&self) -> &'static str {
        match self {
            GameState::Falling { .. } => "falling",
            GameState::Flashing { .. } => "flashing",
            GameState::GameOver { .. } => "game_over",
        }
    }
}

/// Legal placement: no overlap with the locked board, fully inside bounds
pub fn fits(board: &Board, piece: &Board, shift: Position, config: &GameConfig) -> bool {
    let placed = piece.shifted_by(shift);
    placed.contained(config.width, config.height) && board.merged(&placed).is_ok()
}

/// Shifts tried for a placement: as requested, then one column to the left
fn kick_candidates(shift: Position) -> ArrayVec<Position, 2> {
    let mut out = ArrayVec::new();
    out.push(shift);
    out.push(shift - Position::new(1, 0));
    out
}

fn first_fit(
    board: &Board,
    piece: &Board,
    shift: Position,
    config: &GameConfig,
) -> Option<Position> {
    kick_candidates(shift)
        .into_iter()
        .find(|&candidate| fits(board, piece, candidate, config))
}

/// Turn `base` counter-clockwise `turns` times, trying each orientation at
/// `shift` and one column left. The last orientation that fits wins; `base`
/// at `shift` must already fit.
fn spawn_orientation(
    board: &Board,
    base: Board,
    turns: u32,
    shift: Position,
    config: &GameConfig,
) -> (Board, Position) {
    let mut placed = (base.clone(), shift);
    let mut current = base;
    for _ in 0..turns {
        current = current.rotated_counter().normalized();
        if let Some(at) = first_fit(board, &current, shift, config) {
            placed = (current.clone(), at);
        }
    }
    placed
}

/// Merge the piece into the board, then flash full lines or spawn the next piece
fn lock(board: &Board, falling: &Board, shift: Position, ctx: &mut StepContext<'_>) -> GameState {
    let locked = match board.merged(&falling.shifted_by(shift)) {
        Ok(locked) => locked,
        Err(collision) => {
            // The last accepted position always merged; reaching this means
            // the state was built by hand with an overlapping piece.
            warn!(%collision, "falling piece overlaps locked cells, ending game");
            return GameState::GameOver {
                board: board.clone(),
            };
        }
    };

    let lines = locked.whole_lines(ctx.config.width, ctx.config.height);
    debug!(x = shift.x, y = shift.y, full = lines.len(), "piece locked");
    if lines.is_empty() {
        GameState::spawn(locked, ctx)
    } else {
        GameState::Flashing {
            board: locked,
            stage: 0,
            last_stage_switch: ctx.now_ms,
            lines,
        }
    }
}
