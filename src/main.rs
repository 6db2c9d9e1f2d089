//! Terminal runner (default binary).
//!
//! Owns the single live [`Game`] and drives it from one loop: render the
//! current state, apply key commands in arrival order until the next frame is
//! due, then deliver a clock tick. Configuration comes from `TETRIS_*`
//! environment variables; logs go to `TETRIS_LOG_PATH` when set.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use tracing::{debug, error, info};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use tetromino_tui::core::{Game, GameConfig};
use tetromino_tui::input::{handle_key_event, should_quit};
use tetromino_tui::term::{FrameBuffer, GameView, RenderFrame, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(config.log_path.as_deref())?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        error!("exiting with error: {e:#}");
    }
    result
}

/// Log to a file, never to the raw-mode terminal. Without a path logging is off.
fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {path}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let tick = Duration::from_millis(config.tick_ms);
    let mut game = Game::new(config, now_ms());
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut next_tick = Instant::now() + tick;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let frame = RenderFrame::from_state(game.state(), game.config());
        view.render_into(&frame, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input until the next tick is due.
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(cmd) = handle_key_event(key) {
                        debug!(command = cmd.as_str(), "input");
                        game.command(cmd);
                    }
                }
                TermEvent::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        game.tick(now_ms());
        next_tick += tick;
        let now = Instant::now();
        if next_tick < now {
            // Fell behind (suspended, slow terminal): skip missed frames.
            next_tick = now + tick;
        }
    }
}
