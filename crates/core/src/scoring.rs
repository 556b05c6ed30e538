//! Scoring module - combo bonus for rows cleared by a single lock
//!
//! The first row cleared by a lock is worth [`FIRST_ROW_BONUS`]; every further
//! row cleared by the same lock doubles the running bonus before adding it:
//! 100, then +200, then +400, ... The total is added to the score once.

use crate::types::FIRST_ROW_BONUS;

/// Accumulates the combo bonus while rows are cleared one by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComboBonus {
    rows: u32,
    running: u32,
    total: u32,
}

impl ComboBonus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one cleared row and return the points it earned.
    pub fn row_cleared(&mut self) -> u32 {
        self.running = if self.rows == 0 {
            FIRST_ROW_BONUS
        } else {
            self.running.saturating_mul(2)
        };
        self.rows += 1;
        self.total = self.total.saturating_add(self.running);
        self.running
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn total(&self) -> u32 {
        self.total
    }
}

/// Points for clearing `rows` rows with one lock.
pub fn clear_bonus(rows: u32) -> u32 {
    let mut combo = ComboBonus::new();
    for _ in 0..rows {
        combo.row_cleared();
    }
    combo.total()
}
