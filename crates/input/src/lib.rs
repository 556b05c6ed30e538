//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. The mapping is
//! a pure function of the key and the current game status; timing and key
//! repeat are left to the terminal.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit};
