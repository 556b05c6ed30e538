//! Piece catalog - tetromino frames for every kind and rotation
//!
//! Each kind has four frames, listed clockwise starting from the spawn frame.
//! Every frame is normalised so that its topmost cell sits on relative row 0;
//! the row of a piece's highest cell is therefore always its anchor row.

use crate::rng::PieceSource;
use crate::types::{PieceKind, Rotation};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the anchor
pub type PieceShape = [CellOffset; 4];

const I_FRAMES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_FRAMES: [PieceShape; 4] = [[(0, 0), (0, 1), (1, 0), (1, 1)]; 4];

const T_FRAMES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_FRAMES: [PieceShape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_FRAMES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_FRAMES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (0, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 0)],
    [(1, 0), (1, 1), (1, 2), (2, 0)],
];

const L_FRAMES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (2, 1), (2, 0)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 0), (1, 0), (2, 0), (0, 1)],
    [(1, 0), (1, 1), (1, 2), (0, 0)],
];

fn frames(kind: PieceKind) -> &'static [PieceShape; 4] {
    match kind {
        PieceKind::I => &I_FRAMES,
        PieceKind::O => &O_FRAMES,
        PieceKind::T => &T_FRAMES,
        PieceKind::S => &S_FRAMES,
        PieceKind::Z => &Z_FRAMES,
        PieceKind::J => &J_FRAMES,
        PieceKind::L => &L_FRAMES,
    }
}

/// Get the frame (cell offsets) for a piece kind and rotation
pub fn frame(kind: PieceKind, rotation: Rotation) -> PieceShape {
    frames(kind)[rotation.index()]
}

/// Frame lookup by raw rotation index; total for every index (taken mod 4).
pub fn frame_at(kind: PieceKind, rotation_index: usize) -> PieceShape {
    frame(kind, Rotation::from_index(rotation_index))
}

/// Draw a kind from `source` and return it with its spawn frame.
pub fn random_piece(source: &mut dyn PieceSource) -> (PieceKind, PieceShape) {
    let kind = source.next_kind();
    (kind, frame(kind, Rotation::North))
}

/// Highest relative row of a frame (0 for every catalog frame).
pub fn min_row(shape: &PieceShape) -> i8 {
    shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0)
}

/// Whether every frame of `kind` is identical, making rotation a no-op.
pub fn is_rotation_invariant(kind: PieceKind) -> bool {
    let f = frames(kind);
    f.iter().all(|shape| same_cells(shape, &f[0]))
}

/// Set equality of two frames (cell order ignored).
pub fn same_cells(a: &PieceShape, b: &PieceShape) -> bool {
    a.iter().all(|c| b.contains(c)) && b.iter().all(|c| a.contains(c))
}
