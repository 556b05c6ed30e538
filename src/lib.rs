//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one name so the binary, integration
//! tests and benches can use `blockfall::{core,input,term,types}`. Driver
//! configuration lives here because only the binary needs it.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::DriverConfig;
