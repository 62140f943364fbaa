#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Cell identifiers and grid geometry.
//!
//! Cells live in an arena indexed by `CellId` (0 to 80, row-major), so the
//! constraint graph can store peer and group membership as plain index lists
//! instead of references between live cell objects.

use std::fmt;

/// The side length of the grid.
pub const SIDE: usize = 9;

/// The total number of cells.
pub const CELL_COUNT: usize = SIDE * SIDE;

/// An arena index identifying one of the 81 cells, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellId(u8);

impl CellId {
    /// Creates an id from a row-major index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        debug_assert!(index < CELL_COUNT);
        Self(index as u8)
    }

    /// Creates an id from `(x, y)` coordinates, `0 <= x, y <= 8`.
    #[must_use]
    pub const fn from_coords(x: usize, y: usize) -> Self {
        Self::new(y * SIDE + x)
    }

    /// The row-major index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The column coordinate.
    #[must_use]
    pub const fn x(self) -> usize {
        self.0 as usize % SIDE
    }

    /// The row coordinate.
    #[must_use]
    pub const fn y(self) -> usize {
        self.0 as usize / SIDE
    }

    /// The index of the 3x3 box containing this cell, 0 to 8 in row-major
    /// box order.
    #[must_use]
    pub const fn box_index(self) -> usize {
        (self.y() / 3) * 3 + self.x() / 3
    }

    /// Whether two cells share a row, column or box without being the same
    /// cell. The relation is symmetric.
    #[must_use]
    pub const fn is_peer_of(self, other: Self) -> bool {
        self.0 != other.0
            && (self.x() == other.x()
                || self.y() == other.y()
                || self.box_index() == other.box_index())
    }

    /// Iterates over all 81 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..CELL_COUNT).map(Self::new)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}
