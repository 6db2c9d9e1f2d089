//! Game context - owns the live state and everything transitions need
//!
//! The run loop owns exactly one [`Game`]. Clock ticks and player commands are
//! fed through [`Game::handle`] in arrival order; each call is one atomic
//! transition of the state machine.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::config::GameConfig;
use crate::game_state::{GameState, StepContext};
use crate::rng::SimpleRng;
use crate::types::{Command, Event};

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    rng: SimpleRng,
    state: GameState,
    now_ms: u64,
}

impl Game {
    /// Start a game at clock time `now_ms`.
    ///
    /// Uses `config.seed` when set, otherwise seeds from the wall clock.
    pub fn new(config: GameConfig, now_ms: u64) -> Self {
        let seed = config.seed.unwrap_or_else(wall_clock_seed);
        debug!(seed, width = config.width, height = config.height, "new game");
        Self::with_rng(config, SimpleRng::from_seed_u64(seed), now_ms)
    }

    pub fn with_rng(config: GameConfig, mut rng: SimpleRng, now_ms: u64) -> Self {
        let state = {
            let mut ctx = StepContext::new(&config, &mut rng, now_ms);
            GameState::initial(&mut ctx)
        };
        Self {
            config,
            rng,
            state,
            now_ms,
        }
    }

    /// Apply one event and return the new state.
    ///
    /// Tick timestamps older than the last one seen are treated as "no time
    /// passed" so the clock never runs backwards.
    pub fn handle(&mut self, event: Event) -> &GameState {
        let event = match event {
            Event::Tick { now_ms } => Event::Tick {
                now_ms: now_ms.max(self.now_ms),
            },
            other => other,
        };

        let mut ctx = StepContext::new(&self.config, &mut self.rng, self.now_ms);
        let next = self.state.step(event, &mut ctx);
        self.now_ms = ctx.now_ms;

        if next.name() != self.state.name() {
            debug!(from = self.state.name(), to = next.name(), "transition");
        }
        self.state = next;
        &self.state
    }

    pub fn tick(&mut self, now_ms: u64) -> &GameState {
        self.handle(Event::Tick { now_ms })
    }

    pub fn command(&mut self, cmd: Command) -> &GameState {
        self.handle(Event::Command(cmd))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Timestamp of the last tick applied
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Replace the live state (tests and tools).
    pub fn set_state(&mut self, state: GameState) {
        self.state = state;
    }
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Game {
        Game::new(GameConfig::default().with_seed(12345), 0)
    }

    #[test]
    fn test_new_game_is_falling() {
        let game = seeded();
        assert!(game.state().is_falling());
        assert!(game.state().board().is_empty());
        assert_eq!(game.now_ms(), 0);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = seeded();
        let mut b = seeded();
        for t in 1..200u64 {
            a.tick(t * 50);
            b.tick(t * 50);
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut game = seeded();
        game.tick(1_000);
        game.tick(10);
        assert_eq!(game.now_ms(), 1_000);
    }

    #[test]
    fn test_commands_do_not_move_clock() {
        let mut game = seeded();
        game.tick(300);
        game.command(Command::MoveLeft);
        assert_eq!(game.now_ms(), 300);
    }

    #[test]
    fn test_gravity_over_time_eventually_locks() {
        let mut game = seeded();
        let interval = game.config().fall_interval_ms;
        let height = game.config().height as u64;
        for step in 1..=(height + 2) {
            game.tick(step * interval);
        }
        assert_eq!(game.state().board().len(), 4);
    }
}
