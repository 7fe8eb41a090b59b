//! Collision capability consulted before a piece commits a move or rotation.
//!
//! The piece never decides on its own whether it fits: it asks a `Collision`
//! implementation. [`Unbounded`] accepts everything; the playfield occupancy
//! grid is the concrete rule set used by a running game.

use crate::piece::Piece;
use crate::types::Direction;

pub trait Collision {
    /// Whether `piece` may move one cell in `direction`.
    fn can_move(&self, piece: &Piece, direction: Direction) -> bool;

    /// Whether `piece` may take rotation state `next_rotation` in place.
    fn can_rotate(&self, piece: &Piece, next_rotation: usize) -> bool;
}

impl<C: Collision + ?Sized> Collision for &C {
    fn can_move(&self, piece: &Piece, direction: Direction) -> bool {
        (**self).can_move(piece, direction)
    }

    fn can_rotate(&self, piece: &Piece, next_rotation: usize) -> bool {
        (**self).can_rotate(piece, next_rotation)
    }
}

/// Open space: every move and rotation is allowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl Collision for Unbounded {
    fn can_move(&self, _piece: &Piece, _direction: Direction) -> bool {
        true
    }

    fn can_rotate(&self, _piece: &Piece, _next_rotation: usize) -> bool {
        true
    }
}
