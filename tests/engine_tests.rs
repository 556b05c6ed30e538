//! Engine tests - gravity, locking, row clears, rotation and the state machine

use blockfall::core::{Engine, ScriptedPieces};
use blockfall::types::{Cell, Command, GameStatus, PieceKind, Rotation, EMPTY_COLOR};

fn engine_with(kinds: &[PieceKind]) -> Engine {
    Engine::with_source(ScriptedPieces::new(kinds))
}

fn shift(engine: &mut Engine, dx: i8) {
    let command = if dx < 0 { Command::MoveLeft } else { Command::MoveRight };
    for _ in 0..dx.abs() {
        assert!(engine.apply(command));
    }
}

#[test]
fn test_bar_falls_nineteen_rows_before_locking() {
    let mut engine = engine_with(&[PieceKind::I]);
    for _ in 0..19 {
        assert!(engine.tick());
    }
    let active = engine.active().unwrap();
    assert_eq!((active.x, active.y), (5, 19));
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.field().landed_count(), 0);
    assert!(engine.is_resting());

    assert!(engine.tick());
    let event = engine.take_last_event().unwrap();
    assert_eq!(event.top_row, 19);
    assert!(!event.game_over);
    assert_eq!(engine.field().landed_count(), 4);
    for x in 5..=8 {
        assert_eq!(engine.field().landed_kind(x, 19), Some(PieceKind::I));
    }
    // A fresh piece is already at the spawn anchor.
    let next = engine.active().unwrap();
    assert_eq!((next.x, next.y), (5, 0));
}

#[test]
fn test_soft_drop_never_locks() {
    let mut engine = engine_with(&[PieceKind::O]);
    let mut drops = 0;
    while engine.apply(Command::SoftDrop) {
        drops += 1;
    }
    assert_eq!(drops, 18);
    assert_eq!(engine.field().landed_count(), 0);
    assert_eq!(engine.active().unwrap().y, 18);
}

#[test]
fn test_hard_drop_locks_like_tick() {
    let mut dropped = engine_with(&[PieceKind::T]);
    assert!(dropped.apply(Command::HardDrop));

    let mut ticked = engine_with(&[PieceKind::T]);
    while ticked.field().landed_count() == 0 {
        ticked.tick();
    }

    assert_eq!(dropped.snapshot(), ticked.snapshot());
}

#[test]
fn test_single_row_clear_scores_100() {
    let mut engine = engine_with(&[PieceKind::I, PieceKind::I, PieceKind::O]);

    shift(&mut engine, -4);
    assert!(engine.apply(Command::HardDrop));
    assert!(engine.apply(Command::HardDrop));
    shift(&mut engine, 4);
    assert!(engine.apply(Command::HardDrop));

    assert_eq!(engine.score(), 100);
    assert_eq!(engine.lines_cleared(), 1);
    // The upper half of the square dropped into the cleared row.
    assert_eq!(engine.field().landed_count(), 2);
    assert_eq!(engine.field().landed_kind(9, 19), Some(PieceKind::O));
    assert_eq!(engine.field().landed_kind(10, 19), Some(PieceKind::O));
    assert_eq!(engine.color(5, 19), EMPTY_COLOR);
}

#[test]
fn test_two_row_clear_scores_300() {
    let mut engine = engine_with(&[PieceKind::O]);
    for dx in [-4, -2, 0, 2] {
        shift(&mut engine, dx);
        assert!(engine.apply(Command::HardDrop));
        assert_eq!(engine.score(), 0);
    }
    shift(&mut engine, 4);
    assert!(engine.apply(Command::HardDrop));

    assert_eq!(engine.score(), 300);
    assert_eq!(engine.lines_cleared(), 2);
    assert_eq!(engine.field().landed_count(), 0);
}

#[test]
fn test_four_row_clear_scores_1500() {
    let mut engine = engine_with(&[PieceKind::I]);
    // Vertical bars occupy column anchor + 1; spawn anchor is x = 5.
    for column in 1..=10i8 {
        assert!(engine.apply(Command::RotateCw));
        shift(&mut engine, column - 6);
        assert!(engine.apply(Command::HardDrop));
    }

    assert_eq!(engine.score(), 1500);
    assert_eq!(engine.lines_cleared(), 4);
    assert_eq!(engine.field().landed_count(), 0);
    assert_eq!(engine.status(), GameStatus::Playing);
}

#[test]
fn test_score_accumulates_across_locks() {
    let mut engine = engine_with(&[PieceKind::O]);
    for _ in 0..2 {
        for dx in [-4, -2, 0, 2, 4] {
            shift(&mut engine, dx);
            engine.apply(Command::HardDrop);
        }
    }
    assert_eq!(engine.score(), 600);
}

#[test]
fn test_stacking_to_the_top_ends_the_game() {
    let mut engine = engine_with(&[PieceKind::O]);
    let mut ticks = 0;
    while engine.status() == GameStatus::Playing {
        assert!(engine.tick());
        ticks += 1;
        assert!(ticks < 1000, "game never ended");
    }
    assert_eq!(engine.status(), GameStatus::GameOver);
    assert!(engine.active().is_none());
    // Ten squares stacked in columns 5-6, the last locked on rows 0-1.
    assert_eq!(engine.field().landed_count(), 40);
    assert_eq!(engine.cell(5, 0), Cell::of(PieceKind::O));

    let frozen = engine.snapshot();
    assert!(!engine.tick());
    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::RotateCw,
        Command::Pause,
    ] {
        assert!(!engine.apply(command), "{:?}", command);
    }
    assert_eq!(engine.snapshot(), frozen);
}

#[test]
fn test_game_ends_when_lock_reaches_row_one() {
    // Flat bars stack one row at a time in the same four columns.
    let mut engine = engine_with(&[PieceKind::I]);
    for expected_top in (2..=19).rev() {
        assert!(engine.apply(Command::HardDrop));
        let event = engine.take_last_event().unwrap();
        assert_eq!(event.top_row, expected_top);
        assert!(!event.game_over);
        assert_eq!(engine.status(), GameStatus::Playing);
    }

    assert!(engine.apply(Command::HardDrop));
    let event = engine.take_last_event().unwrap();
    assert_eq!(event.top_row, 1);
    assert!(event.game_over);
    assert_eq!(engine.status(), GameStatus::GameOver);
    assert!(engine.active().is_none());
}

#[test]
fn test_restart_after_game_over() {
    let mut engine = engine_with(&[PieceKind::O]);
    while engine.status() != GameStatus::GameOver {
        engine.apply(Command::HardDrop);
    }

    assert!(engine.apply(Command::Restart));
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.field().landed_count(), 0);
    assert_eq!(engine.games_played(), 2);
    assert!(engine.active().is_some());
}

#[test]
fn test_move_into_wall_is_rejected_without_repaint() {
    let mut engine = engine_with(&[PieceKind::O]);
    shift(&mut engine, -4);
    let before = engine.snapshot();

    assert!(!engine.apply(Command::MoveLeft));
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.active().unwrap().x, 1);
}

#[test]
fn test_move_rejected_once_resting() {
    let mut engine = engine_with(&[PieceKind::T]);
    while engine.apply(Command::SoftDrop) {}
    assert!(engine.is_resting());
    assert!(!engine.apply(Command::MoveLeft));
    assert!(!engine.apply(Command::MoveRight));
}

#[test]
fn test_square_rotation_is_noop() {
    let mut engine = engine_with(&[PieceKind::O]);
    let before = engine.snapshot();
    assert!(!engine.apply(Command::RotateCw));
    assert!(!engine.apply(Command::RotateCcw));
    assert_eq!(engine.snapshot(), before);
    assert_eq!(engine.active().unwrap().rotation, Rotation::North);
}

#[test]
fn test_rotation_cycles_through_frames() {
    let mut engine = engine_with(&[PieceKind::T]);
    engine.tick();
    engine.tick();

    let mut seen = Vec::new();
    for _ in 0..4 {
        assert!(engine.apply(Command::RotateCw));
        seen.push(engine.active().unwrap().rotation);
    }
    assert_eq!(
        seen,
        vec![Rotation::East, Rotation::South, Rotation::West, Rotation::North]
    );

    assert!(engine.apply(Command::RotateCcw));
    assert_eq!(engine.active().unwrap().rotation, Rotation::West);
}

#[test]
fn test_rotation_blocked_by_wall() {
    let mut engine = engine_with(&[PieceKind::I]);
    assert!(engine.apply(Command::RotateCw));
    // Vertical bar against the right wall: the horizontal frame would poke
    // through it.
    shift(&mut engine, 4);
    assert!(!engine.apply(Command::RotateCw));
    assert_eq!(engine.active().unwrap().rotation, Rotation::East);
}

#[test]
fn test_rotation_blocked_at_floor() {
    let mut engine = engine_with(&[PieceKind::T]);
    while engine.apply(Command::SoftDrop) {}
    // Every new cell of the East frame would need a free cell below it; one
    // of them sits on the floor.
    let before = engine.snapshot();
    assert!(!engine.apply(Command::RotateCw));
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_pause_freezes_the_game() {
    let mut engine = engine_with(&[PieceKind::S]);
    assert!(engine.apply(Command::Pause));
    let before = engine.snapshot();

    assert!(!engine.tick());
    assert!(!engine.apply(Command::HardDrop));
    assert!(!engine.apply(Command::MoveLeft));
    assert!(!engine.apply(Command::RotateCcw));
    assert_eq!(engine.snapshot(), before);

    assert!(engine.apply(Command::Pause));
    assert!(engine.tick());
}

#[test]
fn test_restart_while_paused() {
    let mut engine = engine_with(&[PieceKind::S]);
    engine.apply(Command::HardDrop);
    engine.apply(Command::Pause);

    assert!(engine.apply(Command::Restart));
    assert_eq!(engine.status(), GameStatus::Playing);
    assert_eq!(engine.field().landed_count(), 0);
}

#[test]
fn test_start_new_game_is_idempotent_on_display() {
    let mut engine = engine_with(&[PieceKind::L]);
    engine.apply(Command::HardDrop);

    engine.start_new_game();
    let first = engine.snapshot().grid;
    engine.start_new_game();
    assert_eq!(engine.snapshot().grid, first);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Engine::new(2024);
    let mut b = Engine::new(2024);
    let script = [
        Command::MoveLeft,
        Command::RotateCw,
        Command::HardDrop,
        Command::MoveRight,
        Command::MoveRight,
        Command::HardDrop,
        Command::SoftDrop,
        Command::RotateCcw,
        Command::HardDrop,
    ];
    for command in script {
        assert_eq!(a.apply(command), b.apply(command));
        a.tick();
        b.tick();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
