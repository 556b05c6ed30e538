use crate::engine::ActivePiece;
use crate::field::CellGrid;
use crate::types::{Cell, GameStatus, GRID_HEIGHT, GRID_WIDTH};

/// Copy of everything a renderer needs, taken under a single lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Displayed cells (`grid[y][x]`), walls and the live piece included
    pub grid: CellGrid,
    pub active: Option<ActivePiece>,
    pub status: GameStatus,
    pub score: u32,
    pub lines_cleared: u32,
    pub games_played: u32,
}

impl GameSnapshot {
    /// Displayed cell at (x, y). Panics off-grid.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        self.grid[y as usize][x as usize]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[Cell::Empty; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            status: GameStatus::Playing,
            score: 0,
            lines_cleared: 0,
            games_played: 0,
        }
    }
}
