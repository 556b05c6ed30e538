//! Terminal game renderer.
//!
//! Renders engine snapshots into a plain framebuffer of styled glyphs, then
//! flushes that framebuffer to the terminal with crossterm. No widget or
//! layout library is involved; each grid cell is drawn two columns wide to
//! keep cells roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, GridRect, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
