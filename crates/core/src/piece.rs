//! Piece module - a falling piece with its rotation state machine
//!
//! A piece owns its encoded [`ShapeTable`], the current and previous rotation,
//! its board position (top-left cell of the 4x4 box) and a dirty flag.
//!
//! Rotation is cyclic: `0 -> 1 -> ... -> n-1 -> 0`. Moves and checked
//! rotations consult a [`Collision`] implementation before committing; a
//! refused request leaves the piece untouched and reports
//! [`Outcome::Blocked`] so the caller can play the matching cue.

use arrayvec::ArrayVec;
use log::{debug, trace};
use thiserror::Error;

use crate::collision::Collision;
use crate::shape::ShapeTable;
use crate::surface::Surface;
use crate::types::{Direction, GridPos, Rect, Rgb, CELLS_PER_ROTATION, SHAPE_SIDE};

/// Absolute grid cells covered by a piece (at most one 4x4 block).
pub type PieceCells = ArrayVec<GridPos, CELLS_PER_ROTATION>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PieceError {
    #[error("piece {0:?} has no rotation states")]
    NoRotations(String),
    #[error("rotation {rotation} out of range for piece {name:?} with {count} rotations")]
    RotationOutOfRange {
        name: String,
        rotation: usize,
        count: usize,
    },
    #[error("piece catalog is empty")]
    EmptyCatalog,
}

/// Result of a move or rotation request.
///
/// `Moved` and `Rotated` mean the state changed; `Blocked` means the
/// collision rules refused it and nothing changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved,
    Rotated,
    Blocked,
}

impl Outcome {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Outcome::Blocked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    name: String,
    color: Rgb,
    shape: ShapeTable,
    current_rotation: usize,
    previous_rotation: usize,
    position: GridPos,
    previous_position: GridPos,
    dirty: bool,
}

impl Piece {
    /// Encode `masks` and create a piece in rotation 0 at `position`.
    ///
    /// Fails when `masks` is empty: a piece needs at least one rotation.
    pub fn new<M, R>(
        name: impl Into<String>,
        color: Rgb,
        masks: &[M],
        position: GridPos,
    ) -> Result<Self, PieceError>
    where
        M: AsRef<[R]>,
        R: AsRef<[i32]>,
    {
        Self::from_table(name, color, ShapeTable::encode(masks), position)
    }

    /// Create a piece from an already encoded table.
    pub fn from_table(
        name: impl Into<String>,
        color: Rgb,
        shape: ShapeTable,
        position: GridPos,
    ) -> Result<Self, PieceError> {
        let name = name.into();
        if shape.rotation_count() == 0 {
            return Err(PieceError::NoRotations(name));
        }
        debug!(
            "piece {} encoded: {} rotations\n{}",
            name,
            shape.rotation_count(),
            shape.dump()
        );
        Ok(Self {
            name,
            color,
            shape,
            current_rotation: 0,
            previous_rotation: 0,
            position,
            previous_position: position,
            dirty: true,
        })
    }

    /// Start in an assigned rotation instead of 0.
    pub fn with_rotation(mut self, rotation: usize) -> Result<Self, PieceError> {
        let count = self.rotation_count();
        if rotation >= count {
            return Err(PieceError::RotationOutOfRange {
                name: self.name,
                rotation,
                count,
            });
        }
        self.current_rotation = rotation;
        self.previous_rotation = rotation;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn shape_table(&self) -> &ShapeTable {
        &self.shape
    }

    pub fn rotation_count(&self) -> usize {
        self.shape.rotation_count()
    }

    pub fn current_rotation(&self) -> usize {
        self.current_rotation
    }

    pub fn previous_rotation(&self) -> usize {
        self.previous_rotation
    }

    /// Rotation state the next `rotate` would enter.
    pub fn next_rotation(&self) -> usize {
        (self.current_rotation + 1) % self.rotation_count()
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    pub fn previous_position(&self) -> GridPos {
        self.previous_position
    }

    /// Place the piece directly, e.g. into a preview box.
    pub fn set_position(&mut self, position: GridPos) {
        if position != self.position {
            self.previous_position = self.position;
            self.position = position;
            self.dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Advance to the next rotation unconditionally.
    pub fn rotate(&mut self) {
        self.previous_rotation = self.current_rotation;
        self.current_rotation = self.next_rotation();
        self.dirty = true;
        trace!(
            "piece {} rotated {} -> {}",
            self.name,
            self.previous_rotation,
            self.current_rotation
        );
    }

    /// Rotate if `collision` allows the next rotation state.
    pub fn try_rotate<C: Collision + ?Sized>(&mut self, collision: &C) -> Outcome {
        if !collision.can_rotate(self, self.next_rotation()) {
            trace!("piece {} rotation blocked", self.name);
            return Outcome::Blocked;
        }
        self.rotate();
        Outcome::Rotated
    }

    /// Move one cell in `direction` if `collision` allows it.
    pub fn try_move<C: Collision + ?Sized>(&mut self, direction: Direction, collision: &C) -> Outcome {
        if !collision.can_move(self, direction) {
            trace!("piece {} blocked moving {}", self.name, direction.as_str());
            return Outcome::Blocked;
        }
        self.previous_position = self.position;
        self.position = self.position.step(direction);
        self.dirty = true;
        Outcome::Moved
    }

    /// Absolute cells of the current rotation at the current position.
    pub fn cells(&self) -> PieceCells {
        self.cells_at(self.current_rotation, self.position)
    }

    /// Absolute cells of any rotation at any position.
    pub fn cells_at(&self, rotation: usize, position: GridPos) -> PieceCells {
        self.shape
            .cells(rotation)
            .map(|(col, row)| GridPos::new(position.x + col as i32, position.y + row as i32))
            .collect()
    }

    /// Project the current rotation onto `surface` as `grid`-sized squares.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S, grid: i32) {
        let block = self.shape.rotation(self.current_rotation);
        for (i, &cell) in block.iter().enumerate() {
            if cell != 1 {
                continue;
            }
            let row = (i / SHAPE_SIDE) as i32;
            let col = (i % SHAPE_SIDE) as i32;
            let rect = Rect::new(
                (self.position.x + col) * grid,
                (self.position.y + row) * grid,
                grid,
                grid,
            );
            surface.draw_rectangle(rect, self.color);
        }
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Unbounded;
    use crate::surface::RecordingSurface;

    struct Wall;

    impl Collision for Wall {
        fn can_move(&self, _piece: &Piece, _direction: Direction) -> bool {
            false
        }

        fn can_rotate(&self, _piece: &Piece, _next_rotation: usize) -> bool {
            false
        }
    }

    fn t_piece() -> Piece {
        Piece::new(
            "T",
            Rgb::PURPLE,
            &[
                vec![vec![0, 1], vec![1, 1, 1]],
                vec![vec![0, 1], vec![0, 1, 1], vec![0, 1]],
                vec![vec![], vec![1, 1, 1], vec![0, 1]],
                vec![vec![0, 1], vec![1, 1], vec![0, 1]],
            ],
            GridPos::new(3, 0),
        )
        .unwrap()
    }

    #[test]
    fn new_piece_starts_dirty_in_rotation_zero() {
        let p = t_piece();
        assert_eq!(p.current_rotation(), 0);
        assert_eq!(p.previous_rotation(), 0);
        assert_eq!(p.rotation_count(), 4);
        assert!(p.is_dirty());
    }

    #[test]
    fn no_masks_is_an_error() {
        let masks: [Vec<Vec<i32>>; 0] = [];
        let err = Piece::new("X", Rgb::RED, &masks, GridPos::default()).unwrap_err();
        assert_eq!(err, PieceError::NoRotations("X".to_string()));
    }

    #[test]
    fn assigned_rotation_is_validated() {
        let p = t_piece().with_rotation(2).unwrap();
        assert_eq!(p.current_rotation(), 2);
        assert!(matches!(
            t_piece().with_rotation(4),
            Err(PieceError::RotationOutOfRange { rotation: 4, count: 4, .. })
        ));
    }

    #[test]
    fn rotate_wraps_and_tracks_previous() {
        let mut p = t_piece();
        p.rotate();
        p.rotate();
        p.rotate();
        assert_eq!(p.current_rotation(), 3);
        assert_eq!(p.previous_rotation(), 2);
        p.rotate();
        assert_eq!(p.current_rotation(), 0);
        assert_eq!(p.previous_rotation(), 3);
    }

    #[test]
    fn blocked_requests_change_nothing() {
        let mut p = t_piece();
        let mut s = RecordingSurface::new();
        p.draw(&mut s, 10);
        assert!(!p.is_dirty());

        assert_eq!(p.try_move(Direction::Left, &Wall), Outcome::Blocked);
        assert_eq!(p.try_rotate(&Wall), Outcome::Blocked);
        assert_eq!(p.position(), GridPos::new(3, 0));
        assert_eq!(p.current_rotation(), 0);
        assert!(!p.is_dirty());
    }

    #[test]
    fn move_commits_and_saves_previous_position() {
        let mut p = t_piece();
        assert_eq!(p.try_move(Direction::Down, &Unbounded), Outcome::Moved);
        assert_eq!(p.try_move(Direction::Right, &Unbounded), Outcome::Moved);
        assert_eq!(p.position(), GridPos::new(4, 1));
        assert_eq!(p.previous_position(), GridPos::new(3, 1));
    }

    #[test]
    fn cells_follow_rotation_and_position() {
        let p = t_piece();
        let cells: Vec<_> = p.cells().into_iter().collect();
        assert_eq!(
            cells,
            vec![
                GridPos::new(4, 0),
                GridPos::new(3, 1),
                GridPos::new(4, 1),
                GridPos::new(5, 1)
            ]
        );
        let east = p.cells_at(1, GridPos::new(0, 0));
        assert_eq!(east.as_slice(), &[GridPos::new(1, 0), GridPos::new(1, 1), GridPos::new(2, 1), GridPos::new(1, 2)]);
    }

    #[test]
    fn draw_clears_dirty_and_emits_one_rect_per_cell() {
        let mut p = t_piece();
        let mut s = RecordingSurface::new();
        p.draw(&mut s, 20);
        assert!(!p.is_dirty());
        assert_eq!(s.rectangles().len(), 4);
        assert_eq!(s.rectangles()[0], (Rect::new(80, 0, 20, 20), Rgb::PURPLE));
    }
}
