//! Shape module - flat multi-rotation shape tables
//!
//! A piece's rotations arrive as ragged 2D masks (a rotation may list a single
//! row, or rows of different lengths). They are encoded once into one flat
//! table of 0/1 cells with a fixed stride of 16 cells per rotation:
//!
//! ```text
//! index = rotation * 16 + row * 4 + col
//! ```
//!
//! Cells the source mask does not reach are empty. Any value other than `1`
//! is empty too, so malformed masks are normalized rather than rejected.

use crate::types::{CELLS_PER_ROTATION, SHAPE_SIDE};

/// A ragged rotation mask as supplied by content: rows of 0/1 cells.
pub type Mask = Vec<Vec<i32>>;

/// Flat, fixed-stride lookup table of every rotation of one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTable {
    /// Row-major 4x4 blocks, one per rotation, in input order
    cells: Box<[u8]>,
}

impl ShapeTable {
    /// Encode a sequence of rotation masks.
    ///
    /// Accepts anything indexable as rows of cells, so both `Vec<Vec<i32>>`
    /// content masks and fixed arrays work.
    ///
    /// # Examples
    ///
    /// ```
    /// use grid_tetris_core::ShapeTable;
    ///
    /// let table = ShapeTable::encode(&[vec![vec![1, 1, 1, 1]]]);
    /// assert_eq!(table.rotation_count(), 1);
    /// assert_eq!(&table.rotation(0)[..4], &[1, 1, 1, 1]);
    /// assert!(table.rotation(0)[4..].iter().all(|&c| c == 0));
    /// ```
    pub fn encode<M, R>(masks: &[M]) -> Self
    where
        M: AsRef<[R]>,
        R: AsRef<[i32]>,
    {
        let mut cells = Vec::with_capacity(masks.len() * CELLS_PER_ROTATION);
        for mask in masks {
            let rows = mask.as_ref();
            for row in 0..SHAPE_SIDE {
                for col in 0..SHAPE_SIDE {
                    let set = rows
                        .get(row)
                        .and_then(|r| r.as_ref().get(col))
                        .is_some_and(|&v| v == 1);
                    cells.push(u8::from(set));
                }
            }
        }
        Self {
            cells: cells.into_boxed_slice(),
        }
    }

    /// Number of rotation blocks in the table.
    pub fn rotation_count(&self) -> usize {
        self.cells.len() / CELLS_PER_ROTATION
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// The 16-cell block of one rotation.
    ///
    /// Panics if `rotation >= rotation_count()`, like slice indexing.
    #[inline]
    pub fn rotation(&self, rotation: usize) -> &[u8] {
        let start = rotation * CELLS_PER_ROTATION;
        &self.cells[start..start + CELLS_PER_ROTATION]
    }

    #[inline]
    pub fn is_set(&self, rotation: usize, row: usize, col: usize) -> bool {
        self.rotation(rotation)[row * SHAPE_SIDE + col] == 1
    }

    /// `(col, row)` of every set cell in one rotation, row-major.
    pub fn cells(&self, rotation: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rotation(rotation)
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == 1)
            .map(|(i, _)| (i % SHAPE_SIDE, i / SHAPE_SIDE))
    }

    /// Text dump of every rotation: one line of `0`/`1` per row, blocks
    /// separated by `****`.
    pub fn dump(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rotation_count() * 9);
        for rotation in 0..self.rotation_count() {
            for row in self.rotation(rotation).chunks_exact(SHAPE_SIDE) {
                for &c in row {
                    out.push(if c == 1 { '1' } else { '0' });
                }
                out.push('\n');
            }
            out.push_str("****\n");
        }
        out
    }
}
