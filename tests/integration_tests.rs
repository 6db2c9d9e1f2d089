//! Integration tests for the game loop: event sequences through `Game`

use tetromino_tui::core::{fits, Board, Game, GameConfig, GameState, SimpleRng, StepContext};
use tetromino_tui::types::{Color, Command, Event, Position};

fn game(width: i32, height: i32, seed: u64) -> Game {
    Game::new(GameConfig::default().with_size(width, height).with_seed(seed), 0)
}

/// Assert the falling piece (if any) is a legal placement
fn assert_valid(state: &GameState, config: &GameConfig) {
    if let GameState::Falling {
        board,
        falling,
        shift,
        ..
    } = state
    {
        assert_eq!(falling.len(), 4);
        assert!(
            fits(board, falling, *shift, config),
            "invalid falling piece at {}:\n{}",
            shift,
            falling
        );
    }
}

#[test]
fn test_game_lifecycle() {
    let game = game(10, 20, 12345);
    assert!(game.state().is_falling());
    assert!(game.state().board().is_empty());
    assert_valid(game.state(), game.config());
}

#[test]
fn test_soft_drop_until_lock_on_8x20() {
    for seed in 1..=20 {
        let mut game = game(8, 20, seed);

        let mut drops = 0;
        let last_cells = loop {
            let cells = game.state().falling_cells().unwrap();
            game.command(Command::SoftDrop);
            drops += 1;
            assert!(drops <= 21, "piece never locked (seed {})", seed);
            if !game.state().board().is_empty() {
                break cells;
            }
        };

        let locked = game.state().board();
        assert!(locked.contained(8, 20));
        assert_eq!(locked, &last_cells, "seed {}", seed);
        // The piece came to rest on the floor.
        assert!(locked.positions().any(|p| p.y == 19));
        assert_valid(game.state(), game.config());
    }
}

#[test]
fn test_gravity_moves_piece_down_once_per_interval() {
    let mut game = game(10, 20, 7);
    let interval = game.config().fall_interval_ms;
    let start = game.state().falling_cells().unwrap();

    game.tick(interval - 1);
    assert_eq!(game.state().falling_cells().unwrap(), start);

    game.tick(interval);
    assert_eq!(game.state().falling_cells().unwrap(), start.shifted(0, 1));

    // Not another full interval since the last step.
    game.tick(interval + interval / 2);
    assert_eq!(game.state().falling_cells().unwrap(), start.shifted(0, 1));

    game.tick(2 * interval);
    assert_eq!(game.state().falling_cells().unwrap(), start.shifted(0, 2));
}

#[test]
fn test_stacking_without_moving_ends_in_game_over() {
    for seed in [1, 99, 4242] {
        let mut game = game(6, 8, seed);
        let mut steps = 0;
        while !game.state().is_game_over() {
            assert_valid(game.state(), game.config());
            if game.state().is_flashing() {
                let now = game.now_ms() + 1_000;
                game.tick(now);
            } else {
                game.command(Command::SoftDrop);
            }
            steps += 1;
            assert!(steps < 10_000, "no game over (seed {})", seed);
        }

        // Terminal: ticks and moves change nothing.
        let over = game.state().clone();
        game.tick(game.now_ms() + 60_000);
        game.command(Command::MoveLeft);
        game.command(Command::RotateCw);
        assert_eq!(game.state(), &over);

        game.command(Command::Restart);
        assert!(game.state().is_falling());
        assert!(game.state().board().is_empty());
    }
}

#[test]
fn test_spawn_on_fully_blocked_board_is_game_over() {
    let config = GameConfig::default();
    let blocked: Board = (0..config.width)
        .flat_map(|x| (0..4).map(move |y| (Position::new(x, y), Color::Red)))
        .collect();

    for seed in 1..=50 {
        let mut rng = SimpleRng::new(seed);
        let mut ctx = StepContext::new(&config, &mut rng, 0);
        let state = GameState::spawn(blocked.clone(), &mut ctx);
        assert_eq!(
            state,
            GameState::GameOver {
                board: blocked.clone()
            }
        );
    }
}

#[test]
fn test_flash_timing_and_line_removal() {
    let config = GameConfig::default().with_size(4, 6).with_flash(50, 4).with_seed(3);
    let mut game = Game::new(config, 1_000);

    // Rows 4 and 5 full, one marker cell on row 3.
    let mut board: Board = (0..4)
        .flat_map(|x| [4, 5].map(|y| (Position::new(x, y), Color::Cyan)))
        .collect();
    board = board
        .merged(&Board::from_positions(&[(2, 3)], Color::Red))
        .unwrap();
    game.set_state(GameState::Flashing {
        board,
        stage: 0,
        last_stage_switch: 1_000,
        lines: vec![4, 5],
    });

    game.tick(1_049);
    assert!(matches!(game.state(), GameState::Flashing { stage: 0, .. }));

    game.tick(1_050);
    assert!(matches!(game.state(), GameState::Flashing { stage: 1, .. }));

    game.tick(1_150);
    assert!(matches!(game.state(), GameState::Flashing { stage: 3, .. }));

    game.tick(1_200);
    assert!(game.state().is_falling());
    let cleared = game.state().board();
    assert_eq!(cleared.len(), 1);
    // The marker dropped by both removed lines.
    assert_eq!(cleared.get(Position::new(2, 5)), Some(Color::Red));
    assert!(cleared.whole_lines(4, 6).is_empty());
}

#[test]
fn test_line_clear_through_play() {
    // 4x6 board with a one-column gap on the bottom row and a vertical I
    // one step above it.
    let config = GameConfig::default().with_size(4, 6).with_flash(10, 2).with_seed(5);
    let mut game = Game::new(config, 0);
    let board = Board::from_positions(&[(0, 5), (1, 5), (2, 5), (0, 4)], Color::Green);
    let vertical_i = Board::from_positions(&[(0, 0), (0, 1), (0, 2), (0, 3)], Color::Cyan);
    game.set_state(GameState::Falling {
        board,
        falling: vertical_i,
        shift: Position::new(3, 2),
        time_since_fall: 0,
    });

    game.command(Command::SoftDrop);
    match game.state() {
        GameState::Flashing { lines, stage, .. } => {
            assert_eq!(lines, &vec![5]);
            assert_eq!(*stage, 0);
        }
        other => panic!("expected flashing, got {}", other.name()),
    }

    // Movement is ignored while flashing.
    let flashing = game.state().clone();
    game.command(Command::MoveLeft);
    assert_eq!(game.state(), &flashing);

    game.tick(20);
    assert!(game.state().is_falling());
    let board = game.state().board();
    // Row 4 dropped into row 5; rows 2..4 of the I dropped by one.
    assert_eq!(board.get(Position::new(0, 5)), Some(Color::Green));
    assert_eq!(board.get(Position::new(3, 5)), Some(Color::Cyan));
    assert_eq!(board.get(Position::new(3, 4)), Some(Color::Cyan));
    assert_eq!(board.get(Position::new(3, 3)), Some(Color::Cyan));
    assert_eq!(board.len(), 4);
}

#[test]
fn test_events_apply_in_order() {
    let mut a = game(10, 20, 77);
    let mut b = game(10, 20, 77);
    let events = [
        Event::Command(Command::MoveRight),
        Event::Tick { now_ms: 600 },
        Event::Command(Command::RotateCw),
        Event::Command(Command::MoveLeft),
        Event::Tick { now_ms: 1_200 },
    ];
    for event in events {
        a.handle(event);
    }
    for event in events {
        b.handle(event);
    }
    assert_eq!(a.state(), b.state());

    let mut reordered = game(10, 20, 77);
    reordered.handle(Event::Command(Command::MoveLeft));
    reordered.handle(Event::Command(Command::MoveLeft));
    assert_ne!(reordered.state(), a.state());
}

#[test]
fn test_previous_snapshot_survives_transition() {
    let mut game = game(10, 20, 11);
    let before = game.state().clone();
    let cells_before = before.falling_cells().unwrap();

    game.command(Command::SoftDrop);

    assert_eq!(before.falling_cells().unwrap(), cells_before);
    assert_ne!(game.state(), &before);
}
