//! Field module - the walled grid and the landed cells
//!
//! The grid is 12 columns x 21 rows: the playfield (x 1..=10, y 0..=19) plus a
//! wall column on each side and a wall row at the bottom. Coordinates are
//! (x, y) with y growing downwards.
//!
//! Two views are kept:
//! - the display grid (flat array, row-major), which also carries the painted
//!   footprint of the live piece, and
//! - the landed map, the authoritative record of locked cells.
//!
//! Every landed-map mutation repaints the display grid in the same call, so
//! `is_occupied(x, y) == is_wall(x, y) || landed_kind(x, y).is_some()` holds
//! between any two calls.
//!
//! Querying a coordinate outside the grid is a contract violation and panics.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::types::{
    Cell, PieceKind, Rgb, BOTTOM_ROW, FLOOR_Y, GRID_HEIGHT, GRID_WIDTH, LEFT_WALL_X, RIGHT_WALL_X,
};

/// Absolute grid position
pub type Pos = (i8, i8);

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// Display rows as handed to renderers: `grid[y][x]`.
pub type CellGrid = [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize];

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Flat array of display cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
    landed: HashMap<Pos, PieceKind>,
}

impl Field {
    /// Create a field with walls and an empty playfield
    pub fn new() -> Self {
        let mut field = Self {
            cells: [Cell::Empty; GRID_SIZE],
            landed: HashMap::new(),
        };
        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                if Self::wall_at(x, y) {
                    field.cells[Self::index(x, y)] = Cell::Wall;
                }
            }
        }
        field
    }

    /// Whether (x, y) lies on the allocated grid.
    pub fn contains(x: i8, y: i8) -> bool {
        x >= 0 && x < GRID_WIDTH as i8 && y >= 0 && y < GRID_HEIGHT as i8
    }

    fn wall_at(x: i8, y: i8) -> bool {
        x == LEFT_WALL_X || x == RIGHT_WALL_X || y == FLOOR_Y
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> usize {
        assert!(
            Self::contains(x, y),
            "cell ({}, {}) is outside the {}x{} grid",
            x,
            y,
            GRID_WIDTH,
            GRID_HEIGHT
        );
        (y as usize) * (GRID_WIDTH as usize) + (x as usize)
    }

    fn assert_playable_row(y: i8) {
        assert!(
            (0..=BOTTOM_ROW).contains(&y),
            "row {} is not a playfield row",
            y
        );
    }

    pub fn is_wall(&self, x: i8, y: i8) -> bool {
        matches!(self.cells[Self::index(x, y)], Cell::Wall)
    }

    /// True for walls and landed cells. The painted active piece never counts.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.is_wall(x, y) || self.landed.contains_key(&(x, y))
    }

    pub fn cell(&self, x: i8, y: i8) -> Cell {
        self.cells[Self::index(x, y)]
    }

    pub fn color(&self, x: i8, y: i8) -> Rgb {
        self.cell(x, y).color()
    }

    /// Overwrite the displayed cell without touching the landed map.
    ///
    /// # Panics
    ///
    /// Panics when (x, y) is a wall or a wall would be painted.
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) {
        let idx = Self::index(x, y);
        assert!(
            self.cells[idx] != Cell::Wall && cell != Cell::Wall,
            "walls are immutable: ({}, {})",
            x,
            y
        );
        self.cells[idx] = cell;
    }

    /// `set_cell` for every position in `cells`.
    pub fn paint(&mut self, cells: &[Pos], cell: Cell) {
        for &(x, y) in cells {
            self.set_cell(x, y, cell);
        }
    }

    /// Make `cells` permanently occupied by `kind` until their row is cleared.
    pub fn lock_cells(&mut self, cells: &[Pos], kind: PieceKind) {
        for &(x, y) in cells {
            self.set_cell(x, y, Cell::of(kind));
            self.landed.insert((x, y), kind);
        }
    }

    pub fn landed_kind(&self, x: i8, y: i8) -> Option<PieceKind> {
        self.landed.get(&(x, y)).copied()
    }

    pub fn landed_count(&self) -> usize {
        self.landed.len()
    }

    /// Every landed cell with its kind, in no particular order.
    pub fn landed_cells(&self) -> impl Iterator<Item = (Pos, PieceKind)> + '_ {
        self.landed.iter().map(|(&pos, &kind)| (pos, kind))
    }

    /// Check if every non-wall column of row `y` is occupied
    pub fn is_row_filled(&self, y: i8) -> bool {
        Self::assert_playable_row(y);
        (LEFT_WALL_X + 1..RIGHT_WALL_X).all(|x| self.is_occupied(x, y))
    }

    /// Remove every landed cell of row `y` and repaint those cells empty.
    pub fn clear_row(&mut self, y: i8) {
        Self::assert_playable_row(y);
        for x in LEFT_WALL_X + 1..RIGHT_WALL_X {
            if self.landed.remove(&(x, y)).is_some() {
                self.cells[Self::index(x, y)] = Cell::Empty;
            }
        }
    }

    /// Move every landed cell at row <= `from_row` one row down.
    ///
    /// Row `from_row + 1` is overwritten with the contents of `from_row`; rows
    /// below it are untouched. A negative `from_row` (nothing above the top
    /// row) is a no-op.
    pub fn shift_down(&mut self, from_row: i8) {
        if from_row < 0 {
            return;
        }
        assert!(
            from_row < BOTTOM_ROW,
            "cannot shift row {} onto the floor",
            from_row
        );

        self.clear_row(from_row + 1);

        let mut moving: Vec<(Pos, PieceKind)> = self
            .landed
            .iter()
            .filter(|(&(_, y), _)| y <= from_row)
            .map(|(&pos, &kind)| (pos, kind))
            .collect();
        // Bottom-up: each target cell has already been vacated.
        moving.sort_unstable_by_key(|&((x, y), _)| (Reverse(y), x));

        for ((x, y), kind) in moving {
            self.landed.remove(&(x, y));
            self.cells[Self::index(x, y)] = Cell::Empty;
            self.landed.insert((x, y + 1), kind);
            self.cells[Self::index(x, y + 1)] = Cell::of(kind);
        }
    }

    /// Clear the landed map and repaint every non-wall cell empty.
    pub fn reset(&mut self) {
        self.landed.clear();
        for cell in self.cells.iter_mut() {
            if *cell != Cell::Wall {
                *cell = Cell::Empty;
            }
        }
    }

    /// Copy the display grid into `out` (`out[y][x]`).
    pub fn write_grid(&self, out: &mut CellGrid) {
        let width = GRID_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * width..(y + 1) * width]);
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}
