//! Property tests: random command sequences against the engine invariants.
//!
//! Run longer with: PROPTEST_CASES=10000 cargo test --release engine_invariants

use proptest::prelude::*;

use blockfall::core::Engine;
use blockfall::types::{
    Cell, Command, GameStatus, BOTTOM_ROW, GRID_HEIGHT, GRID_WIDTH, WALL_COLOR,
};

/// A gravity tick, or one player command.
#[derive(Debug, Clone, Copy)]
enum Step {
    Tick,
    Apply(Command),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => Just(Step::Tick),
        2 => Just(Step::Apply(Command::MoveLeft)),
        2 => Just(Step::Apply(Command::MoveRight)),
        2 => Just(Step::Apply(Command::RotateCw)),
        1 => Just(Step::Apply(Command::RotateCcw)),
        2 => Just(Step::Apply(Command::SoftDrop)),
        1 => Just(Step::Apply(Command::HardDrop)),
        1 => Just(Step::Apply(Command::Pause)),
    ]
}

fn check_invariants(engine: &Engine) -> Result<(), TestCaseError> {
    let field = engine.field();
    for y in 0..GRID_HEIGHT as i8 {
        for x in 0..GRID_WIDTH as i8 {
            let wall = x == 0 || x == 11 || y == 20;
            prop_assert_eq!(field.is_wall(x, y), wall);
            if wall {
                prop_assert_eq!(engine.color(x, y), WALL_COLOR);
            }
            prop_assert_eq!(
                field.is_occupied(x, y),
                wall || field.landed_kind(x, y).is_some()
            );
        }
    }

    let mut landed = 0;
    for ((x, y), kind) in field.landed_cells() {
        prop_assert!(!field.is_wall(x, y));
        prop_assert_eq!(engine.cell(x, y), Cell::of(kind));
        landed += 1;
    }
    prop_assert_eq!(landed, field.landed_count());

    // A complete row never survives a lock (the game-ending lock skips the scan).
    if engine.status() != GameStatus::GameOver {
        for y in 0..=BOTTOM_ROW {
            prop_assert!(!field.is_row_filled(y), "row {} left filled", y);
        }
    }

    match engine.active() {
        Some(piece) => {
            prop_assert!(engine.status() != GameStatus::GameOver);
            for (x, y) in piece.cells() {
                prop_assert!(!field.is_occupied(x, y));
                prop_assert_eq!(engine.cell(x, y), Cell::of(piece.kind));
            }
        }
        None => {
            prop_assert_eq!(engine.status(), GameStatus::GameOver);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn random_play_keeps_field_consistent(
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(), 1..400),
    ) {
        let mut engine = Engine::new(seed);
        let mut last_score = engine.score();

        for step in steps {
            let before = engine.snapshot();
            let changed = match step {
                Step::Tick => engine.tick(),
                Step::Apply(command) => engine.apply(command),
            };
            if !changed {
                prop_assert_eq!(engine.snapshot(), before, "{:?} reported no change", step);
            }

            check_invariants(&engine)?;

            prop_assert!(engine.score() >= last_score);
            prop_assert_eq!(engine.score() % 100, 0);
            last_score = engine.score();

            if engine.status() == GameStatus::GameOver {
                break;
            }
        }
    }

    #[test]
    fn same_seed_same_outcome(
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(), 1..200),
    ) {
        let mut a = Engine::new(seed);
        let mut b = Engine::new(seed);
        for step in steps {
            match step {
                Step::Tick => {
                    prop_assert_eq!(a.tick(), b.tick());
                }
                Step::Apply(command) => {
                    prop_assert_eq!(a.apply(command), b.apply(command));
                }
            }
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn paused_engine_ignores_everything_but_pause(
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(), 1..100),
    ) {
        let mut engine = Engine::new(seed);
        engine.apply(Command::Pause);
        let frozen = engine.snapshot();
        for step in steps {
            match step {
                Step::Apply(Command::Pause) => {}
                Step::Tick => {
                    prop_assert!(!engine.tick());
                }
                Step::Apply(command) => {
                    prop_assert!(!engine.apply(command));
                }
            }
        }
        prop_assert_eq!(engine.snapshot(), frozen);
    }
}
