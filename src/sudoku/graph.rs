#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The static constraint structure of the puzzle.
//!
//! Every cell has exactly 20 peers: the 8 other cells of its row, the 8 of
//! its column and the 4 remaining cells of its box. The graph stores peer
//! and group membership as precomputed `CellId` lists, built once and never
//! mutated; all puzzle state lives in the [`Grid`](crate::sudoku::grid::Grid).

use crate::sudoku::cell::{CellId, SIDE};
use smallvec::SmallVec;

/// The number of peers of every cell.
pub const PEER_COUNT: usize = 20;

/// Peer lists and row/column/box groups, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph {
    peers: Vec<SmallVec<[CellId; PEER_COUNT]>>,
    rows: [[CellId; SIDE]; SIDE],
    cols: [[CellId; SIDE]; SIDE],
    boxes: [[CellId; SIDE]; SIDE],
}

impl ConstraintGraph {
    /// Builds the graph: for every ordered pair of distinct cells sharing a
    /// row, column or box, a peer edge is recorded.
    #[must_use]
    pub fn new() -> Self {
        let peers = CellId::all()
            .map(|a| CellId::all().filter(|&b| a.is_peer_of(b)).collect())
            .collect();

        let mut rows = [[CellId::default(); SIDE]; SIDE];
        let mut cols = [[CellId::default(); SIDE]; SIDE];
        let mut boxes = [[CellId::default(); SIDE]; SIDE];
        for y in 0..SIDE {
            for x in 0..SIDE {
                let id = CellId::from_coords(x, y);
                rows[y][x] = id;
                cols[x][y] = id;
                // Boxes fill in row-major order within each box.
                boxes[id.box_index()][(y % 3) * 3 + x % 3] = id;
            }
        }

        Self {
            peers,
            rows,
            cols,
            boxes,
        }
    }

    /// The 20 peers of `id`.
    #[must_use]
    pub fn peers(&self, id: CellId) -> &[CellId] {
        &self.peers[id.index()]
    }

    /// The cells of row `y`, left to right.
    #[must_use]
    pub const fn row(&self, y: usize) -> &[CellId; SIDE] {
        &self.rows[y]
    }

    /// The cells of column `x`, top to bottom.
    #[must_use]
    pub const fn col(&self, x: usize) -> &[CellId; SIDE] {
        &self.cols[x]
    }

    /// The cells of box `b`, in row-major order within the box.
    #[must_use]
    pub const fn boxed(&self, b: usize) -> &[CellId; SIDE] {
        &self.boxes[b]
    }

    /// The row containing `id`.
    #[must_use]
    pub const fn row_of(&self, id: CellId) -> &[CellId; SIDE] {
        self.row(id.y())
    }

    /// The column containing `id`.
    #[must_use]
    pub const fn col_of(&self, id: CellId) -> &[CellId; SIDE] {
        self.col(id.x())
    }

    /// The box containing `id`.
    #[must_use]
    pub const fn box_of(&self, id: CellId) -> &[CellId; SIDE] {
        self.boxed(id.box_index())
    }
}

impl Default for ConstraintGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::cell::CELL_COUNT;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_every_cell_has_twenty_peers() {
        let graph = ConstraintGraph::new();
        for id in CellId::all() {
            assert_eq!(graph.peers(id).len(), PEER_COUNT, "cell {id}");
        }
    }

    #[test]
    fn test_peer_lists_are_symmetric() {
        let graph = ConstraintGraph::new();
        for a in CellId::all() {
            for &b in graph.peers(a) {
                assert!(graph.peers(b).contains(&a), "{b} missing peer {a}");
            }
        }
    }

    #[test]
    fn test_boxes_partition_the_grid() {
        let graph = ConstraintGraph::new();
        let mut seen = FxHashSet::default();
        for b in 0..SIDE {
            for &id in graph.boxed(b) {
                assert_eq!(id.box_index(), b);
                assert!(seen.insert(id), "{id} appears in two boxes");
            }
        }
        assert_eq!(seen.len(), CELL_COUNT);
    }

    #[test]
    fn test_groups_contain_their_cell() {
        let graph = ConstraintGraph::new();
        for id in CellId::all() {
            assert!(graph.row_of(id).contains(&id));
            assert!(graph.col_of(id).contains(&id));
            assert!(graph.box_of(id).contains(&id));
        }
    }

    #[test]
    fn test_peers_are_row_col_box_mates() {
        let graph = ConstraintGraph::new();
        let id = CellId::from_coords(4, 4);
        for &peer in graph.peers(id) {
            assert!(
                peer.x() == id.x() || peer.y() == id.y() || peer.box_index() == id.box_index()
            );
            assert_ne!(peer, id);
        }
    }
}
