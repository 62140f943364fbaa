#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Depth-first backtracking over residual ambiguity.
//!
//! The search starts exactly where the propagation fixed point left the
//! grid. It scans cells in row-major order, branches on the first cell
//! whose domain still holds more than one digit, and tries that cell's
//! candidates in ascending order. Each assignment is guarded only by the
//! local peer-validity check; the propagation rules are not re-run inside
//! the search. A branch saves the cell's domain by value before collapsing
//! it and restores that copy on failure, so no partial state leaks across
//! branches. The first solution found wins.
//!
//! Recursion depth is bounded by the 81 cells, one frame per ambiguous
//! cell. Worst-case behavior is exponential, but propagation is expected
//! to resolve all but a handful of cells for typical puzzles.

use crate::sudoku::cell::CellId;
use crate::sudoku::domain::{Digit, Domain};
use crate::sudoku::graph::ConstraintGraph;
use crate::sudoku::grid::Grid;
use log::trace;

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Candidate assignments tried.
    pub decisions: usize,
    /// Assignments undone after a failed branch.
    pub backtracks: usize,
}

/// A backtracking search over the cells propagation left ambiguous.
#[derive(Debug)]
pub struct Search<'a> {
    graph: &'a ConstraintGraph,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    /// Creates a search over `graph`.
    #[must_use]
    pub const fn new(graph: &'a ConstraintGraph) -> Self {
        Self {
            graph,
            stats: SearchStats {
                decisions: 0,
                backtracks: 0,
            },
        }
    }

    /// Runs the search to completion. Returns `true` when every cell ends
    /// up solved; `false` means every branch from this state dead-ends and
    /// the grid is back in the state it was handed over in.
    pub fn run(&mut self, grid: &mut Grid) -> bool {
        let Some(cell) = CellId::all().find(|&id| grid[id].len() > 1) else {
            // No ambiguous cell remains. A cell emptied by a contradiction
            // also has no candidates to branch on, so completion must be
            // checked rather than assumed.
            return grid.is_complete();
        };

        let saved = grid[cell];
        for digit in saved.iter() {
            if !self.is_valid_assignment(grid, cell, digit) {
                continue;
            }

            trace!("branching on {cell} = {digit}");
            self.stats.decisions += 1;
            grid[cell] = Domain::singleton(digit);
            if self.run(grid) {
                return true;
            }

            trace!("backtracking from {cell} = {digit}");
            self.stats.backtracks += 1;
            grid[cell] = saved;
        }

        false
    }

    /// Whether no peer of `cell` is already solved to `digit`. Necessary
    /// and sufficient for the final grid to satisfy the Sudoku rules.
    fn is_valid_assignment(&self, grid: &Grid, cell: CellId, digit: Digit) -> bool {
        self.graph
            .peers(cell)
            .iter()
            .all(|&peer| grid[peer].solved_digit() != Some(digit))
    }

    /// The counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::cell::SIDE;
    use crate::sudoku::grid::EXAMPLE_HARD;
    use crate::sudoku::propagation::Propagator;
    use rustc_hash::FxHashSet;

    fn assert_valid_solution(grid: &Grid) {
        let graph = ConstraintGraph::new();
        for i in 0..SIDE {
            for group in [graph.row(i), graph.col(i), graph.boxed(i)] {
                let digits: FxHashSet<Digit> = group
                    .iter()
                    .map(|&id| grid[id].solved_digit().expect("unsolved cell"))
                    .collect();
                assert_eq!(digits.len(), SIDE, "group {i} repeats a digit");
            }
        }
    }

    #[test]
    fn test_empty_grid_search_finds_a_valid_grid() {
        let graph = ConstraintGraph::new();
        let mut grid = Grid::blank();
        assert!(Search::new(&graph).run(&mut grid));
        assert!(grid.is_complete());
        assert_valid_solution(&grid);
    }

    #[test]
    fn test_empty_grid_search_is_deterministic() {
        // Choose-first scan order and ascending candidates fix the result.
        let graph = ConstraintGraph::new();
        let mut grid = Grid::blank();
        Search::new(&graph).run(&mut grid);
        let digits: String = grid
            .solved_digits()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            digits,
            "123456789456789123789123456214365897365897214897214365531642978642978531978531642"
        );
    }

    #[test]
    fn test_search_completes_propagated_puzzle() {
        let graph = ConstraintGraph::new();
        let mut grid: Grid = EXAMPLE_HARD.parse().unwrap();
        Propagator::new(&graph).propagate(&mut grid);
        assert!(Search::new(&graph).run(&mut grid));
        assert_valid_solution(&grid);
    }

    #[test]
    fn test_failed_search_restores_domains() {
        // One cell pair left ambiguous; the second has both candidates
        // blocked by solved peers, so every branch of the first fails and
        // both domains must come back untouched.
        let mut grid = Grid::blank();
        for id in CellId::all() {
            grid[id] = Domain::singleton(9);
        }
        let first = CellId::from_coords(0, 0);
        let second = CellId::from_coords(8, 8);
        grid[first] = [1, 2].into_iter().collect();
        grid[second] = [3, 4].into_iter().collect();
        grid[CellId::from_coords(7, 8)] = Domain::singleton(3);
        grid[CellId::from_coords(6, 8)] = Domain::singleton(4);

        let graph = ConstraintGraph::new();
        let mut search = Search::new(&graph);
        assert!(!search.run(&mut grid));
        let pair: Domain = [1, 2].into_iter().collect();
        assert_eq!(grid[first], pair);
        let pair: Domain = [3, 4].into_iter().collect();
        assert_eq!(grid[second], pair);
        assert_eq!(search.stats().decisions, search.stats().backtracks);
    }

    #[test]
    fn test_emptied_domain_is_a_dead_end() {
        let mut grid = Grid::blank();
        for id in CellId::all() {
            grid[id] = Domain::singleton(9);
        }
        grid[CellId::from_coords(0, 0)] = Domain::empty();

        let graph = ConstraintGraph::new();
        assert!(!Search::new(&graph).run(&mut grid));
    }
}
