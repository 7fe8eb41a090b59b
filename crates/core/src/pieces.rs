//! Pieces module - piece definitions and the built-in tetromino catalog
//!
//! A definition is what content supplies per piece: a name, a color and the
//! ordered list of rotation masks. Masks are deliberately ragged; trailing
//! empty cells are left out and the encoder fills them in.

use crate::piece::{Piece, PieceError};
use crate::shape::{Mask, ShapeTable};
use crate::types::{GridPos, Rgb};

/// Width of the widest rotation box among the standard pieces.
const SPAWN_BOX: i32 = 4;

/// Spawn position on a playfield `cols` cells wide: top row, with the
/// rotation box centered between the walls.
pub const fn spawn_position(cols: i32) -> GridPos {
    let x = (cols - SPAWN_BOX) / 2;
    GridPos::new(if x < 0 { 0 } else { x }, 0)
}

/// Spawn position on the built-in 12-column playfield.
pub const SPAWN_POSITION: GridPos = spawn_position(12);

/// One piece as described by content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDef {
    pub name: String,
    pub color: Rgb,
    pub rotations: Vec<Mask>,
}

impl PieceDef {
    pub fn new(name: impl Into<String>, color: Rgb, rotations: Vec<Mask>) -> Self {
        Self {
            name: name.into(),
            color,
            rotations,
        }
    }

    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    pub fn encode(&self) -> ShapeTable {
        ShapeTable::encode(&self.rotations)
    }

    /// Create a piece in rotation 0.
    pub fn spawn(&self, position: GridPos) -> Result<Piece, PieceError> {
        Piece::from_table(self.name.clone(), self.color, self.encode(), position)
    }

    /// Create a piece in an assigned rotation.
    pub fn spawn_rotated(&self, position: GridPos, rotation: usize) -> Result<Piece, PieceError> {
        self.spawn(position)?.with_rotation(rotation)
    }
}

fn mask(rows: &[&[i32]]) -> Mask {
    rows.iter().map(|r| r.to_vec()).collect()
}

/// The seven standard tetrominoes.
///
/// Rotation counts follow the shapes' symmetry: O has one, I/S/Z two,
/// T/J/L four.
pub fn standard_pieces() -> Vec<PieceDef> {
    vec![
        PieceDef::new(
            "I",
            Rgb::CYAN,
            vec![
                mask(&[&[1, 1, 1, 1]]),
                mask(&[&[0, 1], &[0, 1], &[0, 1], &[0, 1]]),
            ],
        ),
        PieceDef::new("O", Rgb::YELLOW, vec![mask(&[&[0, 1, 1], &[0, 1, 1]])]),
        PieceDef::new(
            "T",
            Rgb::PURPLE,
            vec![
                mask(&[&[0, 1], &[1, 1, 1]]),
                mask(&[&[0, 1], &[0, 1, 1], &[0, 1]]),
                mask(&[&[], &[1, 1, 1], &[0, 1]]),
                mask(&[&[0, 1], &[1, 1], &[0, 1]]),
            ],
        ),
        PieceDef::new(
            "S",
            Rgb::GREEN,
            vec![
                mask(&[&[0, 1, 1], &[1, 1]]),
                mask(&[&[0, 1], &[0, 1, 1], &[0, 0, 1]]),
            ],
        ),
        PieceDef::new(
            "Z",
            Rgb::RED,
            vec![
                mask(&[&[1, 1], &[0, 1, 1]]),
                mask(&[&[0, 0, 1], &[0, 1, 1], &[0, 1]]),
            ],
        ),
        PieceDef::new(
            "J",
            Rgb::BLUE,
            vec![
                mask(&[&[1], &[1, 1, 1]]),
                mask(&[&[0, 1, 1], &[0, 1], &[0, 1]]),
                mask(&[&[], &[1, 1, 1], &[0, 0, 1]]),
                mask(&[&[0, 1], &[0, 1], &[1, 1]]),
            ],
        ),
        PieceDef::new(
            "L",
            Rgb::ORANGE,
            vec![
                mask(&[&[0, 0, 1], &[1, 1, 1]]),
                mask(&[&[0, 1], &[0, 1], &[0, 1, 1]]),
                mask(&[&[], &[1, 1, 1], &[1]]),
                mask(&[&[1, 1], &[0, 1], &[0, 1]]),
            ],
        ),
    ]
}
