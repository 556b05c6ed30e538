//! Game engine - active piece, gravity, lock/clear and the game state machine
//!
//! States: `Playing`, `Paused`, `GameOver`. A freshly built engine has already
//! started its first game. Every command either applies cleanly or is a silent
//! no-op; rejected moves are normal control flow and are reported as `false`.
//!
//! Paused blocks every command except `Pause` and `Restart`. `tick` does
//! nothing outside `Playing`.

use std::fmt;

use arrayvec::ArrayVec;
use log::{debug, info, trace};

use crate::catalog::{self, PieceShape};
use crate::field::{Field, Pos};
use crate::rng::{PieceSource, UniformPieces};
use crate::scoring::ComboBonus;
use crate::snapshot::GameSnapshot;
use crate::types::{
    Cell, Command, GameStatus, LockEvent, PieceKind, Rgb, Rotation, BOTTOM_ROW, GAME_OVER_ROW,
    SPAWN_X, SPAWN_Y,
};

/// The falling piece under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Piece at the spawn anchor in its spawn frame
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn shape(&self) -> PieceShape {
        catalog::frame(self.kind, self.rotation)
    }

    /// Absolute grid cells (anchor + frame offsets)
    pub fn cells(&self) -> [Pos; 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn rotated(&self, clockwise: bool) -> Self {
        Self {
            rotation: self.rotation.step(clockwise),
            ..*self
        }
    }

    /// Row of the highest occupied cell
    pub fn top_row(&self) -> i8 {
        self.y + catalog::min_row(&self.shape())
    }

    /// Cells whose neighbour in direction (dx, dy) is not part of the piece.
    ///
    /// Only these cells can run into something when the piece moves that way.
    pub fn leading_edge(&self, dx: i8, dy: i8) -> ArrayVec<Pos, 4> {
        let cells = self.cells();
        cells
            .iter()
            .copied()
            .filter(|&(x, y)| !cells.contains(&(x + dx, y + dy)))
            .collect()
    }
}

/// The game engine: owns the field, the active piece, score and state
pub struct Engine {
    field: Field,
    pieces: Box<dyn PieceSource>,
    active: Option<ActivePiece>,
    status: GameStatus,
    score: u32,
    /// Rows cleared in the current game.
    lines_cleared: u32,
    /// Number of games started by this engine (1 after construction).
    games_played: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("active", &self.active)
            .field("status", &self.status)
            .field("score", &self.score)
            .field("lines_cleared", &self.lines_cleared)
            .field("games_played", &self.games_played)
            .field("landed", &self.field.landed_count())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Engine drawing pieces uniformly from a `Pcg32` seeded with `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_source(UniformPieces::seeded(seed))
    }

    /// Engine drawing pieces from `source`; the first game is started immediately.
    pub fn with_source(source: impl PieceSource + 'static) -> Self {
        let mut engine = Self {
            field: Field::new(),
            pieces: Box::new(source),
            active: None,
            status: GameStatus::Playing,
            score: 0,
            lines_cleared: 0,
            games_played: 0,
            last_event: None,
        };
        engine.start_new_game();
        engine
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// Displayed cell, including the live piece's painted footprint.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        self.field.cell(x, y)
    }

    /// Displayed color, including the live piece's painted footprint.
    pub fn color(&self, x: i8, y: i8) -> Rgb {
        self.field.color(x, y)
    }

    /// Whether the active piece sits on a wall or landed cell.
    pub fn is_resting(&self) -> bool {
        self.active.is_some_and(|piece| self.piece_resting(&piece))
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.write_grid(&mut out.grid);
        out.active = self.active;
        out.status = self.status;
        out.score = self.score;
        out.lines_cleared = self.lines_cleared;
        out.games_played = self.games_played;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Reset the field and score, then spawn a fresh piece. Valid from any state.
    pub fn start_new_game(&mut self) {
        self.field.reset();
        self.active = None;
        self.score = 0;
        self.lines_cleared = 0;
        self.last_event = None;
        self.status = GameStatus::Playing;
        self.games_played = self.games_played.wrapping_add(1);
        self.spawn_piece();
        info!("game {} started", self.games_played);
    }

    /// Flip between Playing and Paused. No-op once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            GameStatus::GameOver => return false,
        };
        info!("status -> {}", self.status.as_str());
        true
    }

    /// Apply a command under the pause policy
    pub fn apply(&mut self, command: Command) -> bool {
        if self.status == GameStatus::Paused && !command.allowed_while_paused() {
            return false;
        }
        match command {
            Command::MoveLeft => self.move_horizontal(-1),
            Command::MoveRight => self.move_horizontal(1),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.rotate(true),
            Command::RotateCcw => self.rotate(false),
            Command::Pause => self.toggle_pause(),
            Command::Restart => {
                self.start_new_game();
                true
            }
        }
    }

    /// Advance gravity by one row, locking the piece when it cannot fall.
    pub fn tick(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        self.erase(&piece);
        if self.piece_resting(&piece) {
            self.lock(piece);
        } else {
            let fallen = piece.shifted(0, 1);
            self.place(fallen);
            trace!("{} fell to y={}", fallen.kind.as_str(), fallen.y);
        }
        true
    }

    /// Shift the piece one column. Rejected while resting or when the leading
    /// edge would run into a wall or landed cell.
    pub fn move_horizontal(&mut self, dx: i8) -> bool {
        let dx = dx.signum();
        if dx == 0 || self.status != GameStatus::Playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        if self.piece_resting(&piece) || self.edge_blocked(&piece, dx, 0) {
            return false;
        }
        self.erase(&piece);
        self.place(piece.shifted(dx, 0));
        true
    }

    /// Move the piece one row down if nothing is below it. Never locks.
    pub fn soft_drop(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        if self.piece_resting(&piece) {
            return false;
        }
        self.erase(&piece);
        self.place(piece.shifted(0, 1));
        true
    }

    /// Drop the piece until it rests, then lock it exactly as `tick` would.
    pub fn hard_drop(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        self.erase(&piece);
        while !self.piece_resting(&piece) {
            piece = piece.shifted(0, 1);
        }
        self.lock(piece);
        true
    }

    /// Step to the next (clockwise) or previous rotation frame at the same anchor.
    ///
    /// Every cell the new frame adds must be free, and so must the cell directly
    /// below it. The square never rotates.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };
        if catalog::is_rotation_invariant(piece.kind) {
            return false;
        }

        let candidate = piece.rotated(clockwise);
        let current = piece.cells();
        let rejected = candidate
            .cells()
            .iter()
            .filter(|cell| !current.contains(cell))
            .any(|&(x, y)| self.blocked(x, y) || self.blocked(x, y + 1));
        if rejected {
            return false;
        }

        self.erase(&piece);
        self.place(candidate);
        true
    }

    fn spawn_piece(&mut self) {
        let (kind, _) = catalog::random_piece(&mut *self.pieces);
        let piece = ActivePiece::spawn(kind);
        self.place(piece);
        debug!("spawned {}", kind.as_str());
    }

    fn lock(&mut self, piece: ActivePiece) {
        self.field.lock_cells(&piece.cells(), piece.kind);
        self.active = None;

        let top = piece.top_row();
        debug!(
            "locked {} at ({}, {}), top row {}",
            piece.kind.as_str(),
            piece.x,
            piece.y,
            top
        );

        if top <= GAME_OVER_ROW {
            self.status = GameStatus::GameOver;
            self.last_event = Some(LockEvent {
                kind: piece.kind,
                top_row: top,
                lines_cleared: 0,
                points: 0,
                game_over: true,
            });
            info!("game over, final score {}", self.score);
            return;
        }

        self.spawn_piece();

        // Rows above the locked piece's top cannot have just been completed.
        let mut combo = ComboBonus::new();
        for y in top..=BOTTOM_ROW {
            if self.field.is_row_filled(y) {
                self.field.clear_row(y);
                self.field.shift_down(y - 1);
                combo.row_cleared();
            }
        }

        let points = combo.total();
        self.score = self.score.saturating_add(points);
        self.lines_cleared = self.lines_cleared.saturating_add(combo.rows());
        if combo.rows() > 0 {
            info!(
                "cleared {} row(s) for {} points, score {}",
                combo.rows(),
                points,
                self.score
            );
        }

        self.last_event = Some(LockEvent {
            kind: piece.kind,
            top_row: top,
            lines_cleared: combo.rows(),
            points,
            game_over: false,
        });
    }

    fn erase(&mut self, piece: &ActivePiece) {
        self.field.paint(&piece.cells(), Cell::Empty);
    }

    fn place(&mut self, piece: ActivePiece) {
        self.field.paint(&piece.cells(), Cell::of(piece.kind));
        self.active = Some(piece);
    }

    /// Off-grid positions block like walls.
    fn blocked(&self, x: i8, y: i8) -> bool {
        !Field::contains(x, y) || self.field.is_occupied(x, y)
    }

    fn edge_blocked(&self, piece: &ActivePiece, dx: i8, dy: i8) -> bool {
        piece
            .leading_edge(dx, dy)
            .iter()
            .any(|&(x, y)| self.blocked(x + dx, y + dy))
    }

    fn piece_resting(&self, piece: &ActivePiece) -> bool {
        self.edge_blocked(piece, 0, 1)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}
