//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every game rule. It has no dependency on the terminal or
//! on input handling, so the same engine drives the interactive binary, the
//! tests and the benches.
//!
//! # Module Structure
//!
//! - [`catalog`]: the seven tetromino kinds, four clockwise frames each
//! - [`rng`]: injectable piece sources (seeded uniform, scripted)
//! - [`field`]: 12x21 walled grid, landed cells, row clear and shift
//! - [`scoring`]: doubling combo bonus for rows cleared by one lock
//! - [`engine`]: active piece, gravity, lock/clear and the game state machine
//! - [`shared`]: `Arc<Mutex<_>>` handle for the gravity and input threads
//! - [`snapshot`]: copy of the display state for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at anchor (5, 0) and fall one row per gravity tick.
//! - A piece locks on the tick after it comes to rest; the next piece spawns
//!   immediately.
//! - Rows filled by a lock are cleared top-down and everything above drops.
//!   The first row is worth 100 points and each further row doubles the bonus.
//! - A lock whose top cell is on row 0 or 1 ends the game.
//! - Rotation has no wall kicks: it fails if any new cell, or the cell below
//!   one, is blocked.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Engine, ScriptedPieces};
//! use blockfall_types::{Command, GameStatus, PieceKind};
//!
//! let mut engine = Engine::with_source(ScriptedPieces::repeat(PieceKind::I));
//! engine.apply(Command::MoveLeft);
//! engine.apply(Command::HardDrop);
//!
//! assert_eq!(engine.status(), GameStatus::Playing);
//! assert_eq!(engine.field().landed_count(), 4);
//! ```

pub mod catalog;
pub mod engine;
pub mod field;
pub mod rng;
pub mod scoring;
pub mod shared;
pub mod snapshot;

pub use blockfall_types as types;

pub use catalog::{frame, frame_at, random_piece, CellOffset, PieceShape};
pub use engine::{ActivePiece, Engine};
pub use field::{CellGrid, Field, Pos};
pub use rng::{PieceSource, ScriptedPieces, UniformPieces};
pub use scoring::{clear_bonus, ComboBonus};
pub use shared::SharedEngine;
pub use snapshot::GameSnapshot;
