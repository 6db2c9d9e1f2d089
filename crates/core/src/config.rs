//! Game configuration: board size, spawn column, timing, seed.

use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, FALL_INTERVAL_MS, FLASH_STAGE_COUNT, FLASH_STAGE_MS, TICK_MS,
};

/// Smallest board that fits every piece in every orientation
pub const MIN_BOARD_SIZE: i32 = 4;

/// Largest accepted width or height; keeps the drawn board well inside a
/// terminal-sized viewport
pub const MAX_BOARD_SIZE: i32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    /// Column of the spawn shift; the wall-kick tries one column left of it
    pub spawn_column: i32,
    pub fall_interval_ms: u64,
    pub flash_stage_ms: u64,
    pub flash_stage_count: u32,
    pub tick_ms: u64,
    /// Fixed RNG seed; `None` seeds from the wall clock
    pub seed: Option<u64>,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            spawn_column: centered_spawn_column(BOARD_WIDTH),
            fall_interval_ms: FALL_INTERVAL_MS,
            flash_stage_ms: FLASH_STAGE_MS,
            flash_stage_count: FLASH_STAGE_COUNT,
            tick_ms: TICK_MS,
            seed: None,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup.
    ///
    /// Missing, unparsable, or out-of-range values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse_u64 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());
        let parse_dim = |key: &str, fallback: i32| {
            lookup(key)
                .and_then(|s| s.trim().parse::<i32>().ok())
                .filter(|v| (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(v))
                .unwrap_or(fallback)
        };

        let width = parse_dim("TETRIS_WIDTH", defaults.width);
        let height = parse_dim("TETRIS_HEIGHT", defaults.height);

        let fall_interval_ms = parse_u64("TETRIS_FALL_MS")
            .filter(|&v| v > 0)
            .unwrap_or(defaults.fall_interval_ms);
        let flash_stage_ms = parse_u64("TETRIS_FLASH_STAGE_MS")
            .filter(|&v| v > 0)
            .unwrap_or(defaults.flash_stage_ms);
        let flash_stage_count = lookup("TETRIS_FLASH_STAGES")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(defaults.flash_stage_count);
        let tick_ms = parse_u64("TETRIS_TICK_MS")
            .filter(|&v| v > 0)
            .unwrap_or(defaults.tick_ms);

        let seed = parse_u64("TETRIS_SEED");

        let log_path = lookup("TETRIS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            width,
            height,
            spawn_column: centered_spawn_column(width),
            fall_interval_ms,
            flash_stage_ms,
            flash_stage_count,
            tick_ms,
            seed,
            log_path,
        }
    }

    /// Resize the board; the spawn column is re-centered
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self.spawn_column = centered_spawn_column(width);
        self
    }

    pub fn with_spawn_column(mut self, column: i32) -> Self {
        self.spawn_column = column;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_fall_interval_ms(mut self, ms: u64) -> Self {
        self.fall_interval_ms = ms;
        self
    }

    pub fn with_flash(mut self, stage_ms: u64, stage_count: u32) -> Self {
        self.flash_stage_ms = stage_ms;
        self.flash_stage_count = stage_count;
        self
    }
}

/// Leftmost column that centers a four-wide piece
fn centered_spawn_column(width: i32) -> i32 {
    ((width - 4) / 2).max(0)
}
