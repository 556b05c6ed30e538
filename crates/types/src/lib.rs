//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, key mapping).
//!
//! # Grid Dimensions
//!
//! The addressable grid is the playfield plus a one-cell wall on the left,
//! right and bottom edges. There is no top wall row.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_WIDTH` | 12 | Columns including both side walls |
//! | `GRID_HEIGHT` | 21 | Rows including the bottom wall |
//! | `PLAYFIELD_WIDTH` | 10 | Playable columns (x = 1..=10) |
//! | `PLAYFIELD_HEIGHT` | 20 | Playable rows (y = 0..=19) |
//! | `SPAWN_X`, `SPAWN_Y` | (5, 0) | Anchor of every freshly spawned piece |
//! | `GAME_OVER_ROW` | 1 | A lock whose top cell is at or above this row ends the game |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation, GRID_HEIGHT, GRID_WIDTH};
//!
//! // Parse from string (case-insensitive)
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! // Rotate
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! // Parse a command
//! assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
//!
//! assert_eq!(GRID_WIDTH, 12);
//! assert_eq!(GRID_HEIGHT, 21);
//! ```

/// Grid width in cells, side walls included (12 columns)
pub const GRID_WIDTH: u8 = 12;

/// Grid height in cells, bottom wall included (21 rows)
pub const GRID_HEIGHT: u8 = 21;

/// Playable columns between the walls
pub const PLAYFIELD_WIDTH: u8 = 10;

/// Playable rows above the bottom wall
pub const PLAYFIELD_HEIGHT: u8 = 20;

/// Column of the left wall
pub const LEFT_WALL_X: i8 = 0;

/// Column of the right wall
pub const RIGHT_WALL_X: i8 = GRID_WIDTH as i8 - 1;

/// Row of the bottom wall
pub const FLOOR_Y: i8 = GRID_HEIGHT as i8 - 1;

/// Lowest playable row
pub const BOTTOM_ROW: i8 = FLOOR_Y - 1;

/// Spawn anchor column
pub const SPAWN_X: i8 = 5;

/// Spawn anchor row
pub const SPAWN_Y: i8 = 0;

/// A piece that locks with its topmost cell on this row (or above) ends the game.
pub const GAME_OVER_ROW: i8 = 1;

/// Gravity period used by the driver when none is configured (1 row per second).
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Render/input poll period used by the driver when none is configured.
pub const DEFAULT_FRAME_MS: u64 = 16;

/// Points for the first row cleared by a single lock. Each further row in the
/// same lock doubles the running bonus before it is added.
pub const FIRST_ROW_BONUS: u32 = 100;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel to 70%, the way a "darker" shade is derived for
    /// overlays and inactive states.
    pub const fn darker(self) -> Self {
        Self {
            r: (self.r as u16 * 7 / 10) as u8,
            g: (self.g as u16 * 7 / 10) as u8,
            b: (self.b as u16 * 7 / 10) as u8,
        }
    }
}

/// Color of the wall cells.
pub const WALL_COLOR: Rgb = Rgb::new(128, 124, 124);

/// Color of an empty playfield cell.
pub const EMPTY_COLOR: Rgb = Rgb::new(0, 0, 0);

/// The seven tetromino piece kinds
///
/// Each kind is bound to exactly one color:
/// - **I**: Cyan, straight bar
/// - **O**: Yellow, 2x2 square (rotation is a no-op)
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// The color every cell of this kind is painted with.
    pub const fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::T => Rgb::new(161, 0, 240),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::Z => Rgb::new(255, 0, 0),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 200, 0),
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Single uppercase letter.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation frames of a piece kind.
///
/// - **North**: Spawn frame (index 0)
/// - **East**: One clockwise step (index 1)
/// - **South**: Two steps (index 2)
/// - **West**: Three clockwise steps, or one counter-clockwise (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Frame index in `0..4`.
    pub const fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Total for any index: the index is taken modulo 4.
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::from_index(1), Rotation::East);
    /// assert_eq!(Rotation::from_index(6), Rotation::South);
    /// ```
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (next frame)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub const fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (previous frame)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub const fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// `rotate_cw` when `clockwise`, `rotate_ccw` otherwise.
    pub const fn step(self, clockwise: bool) -> Self {
        if clockwise {
            self.rotate_cw()
        } else {
            self.rotate_ccw()
        }
    }
}

/// A cell of the display grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Immutable border cell.
    Wall,
    #[default]
    Empty,
    /// Painted with a piece color, either locked or the live active piece.
    Filled(Rgb),
}

impl Cell {
    /// Cell painted with the color of `kind`.
    pub const fn of(kind: PieceKind) -> Self {
        Cell::Filled(kind.color())
    }

    pub const fn color(self) -> Rgb {
        match self {
            Cell::Wall => WALL_COLOR,
            Cell::Empty => EMPTY_COLOR,
            Cell::Filled(rgb) => rgb,
        }
    }
}

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Commands the input collaborator forwards to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDrop,
    /// Drop piece until it rests, then lock it
    HardDrop,
    /// Advance to the next rotation frame
    RotateCw,
    /// Retreat to the previous rotation frame
    RotateCcw,
    /// Toggle between Playing and Paused
    Pause,
    /// Start a new game from any state
    Restart,
}

impl Command {
    /// Parse command from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("rotateccw"), Some(Command::RotateCcw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "pause" => Some(Command::Pause),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Pause => "pause",
            Command::Restart => "restart",
        }
    }

    /// Whether the command still applies while the game is paused.
    pub const fn allowed_while_paused(self) -> bool {
        matches!(self, Command::Pause | Command::Restart)
    }
}

/// Engine-side event emitted after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Row of the piece's topmost cell once locked.
    pub top_row: i8,
    pub lines_cleared: u32,
    /// Combo bonus added to the score by this lock.
    pub points: u32,
    pub game_over: bool,
}
