#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The orchestrating solver.
//!
//! A [`Solver`] wires the pieces together: it builds the constraint graph
//! once, runs the [`Propagator`] to its fixed point, and hands whatever
//! ambiguity remains to the backtracking [`Search`]. Success yields a
//! [`Solution`], the completed grid in row-major order; failure means the
//! puzzle has no completion.

use crate::sudoku::cell::{CELL_COUNT, CellId, SIDE};
use crate::sudoku::domain::Digit;
use crate::sudoku::graph::ConstraintGraph;
use crate::sudoku::grid::{Grid, ParseGridError};
use crate::sudoku::propagation::{PropagationStats, Propagator};
use crate::sudoku::search::{Search, SearchStats};
use log::debug;
use rustc_hash::FxHashSet;
use std::fmt;
use std::ops::Index;

/// Counters describing one full solve: the propagation rounds and the
/// search that followed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// Per-round removal counts from the propagation phase.
    pub propagation: PropagationStats,
    /// Decision and backtrack counts from the search phase.
    pub search: SearchStats,
}

/// A completed grid: 81 digits in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solution([Digit; CELL_COUNT]);

impl Solution {
    /// The digits in row-major order.
    #[must_use]
    pub const fn digits(&self) -> &[Digit; CELL_COUNT] {
        &self.0
    }

    /// Iterates over the digits in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Digit> {
        self.0.into_iter()
    }

    /// Whether every row, column and box contains each digit exactly once.
    #[must_use]
    pub fn verify(&self) -> bool {
        let group_ok = |cells: &[CellId; SIDE]| {
            let digits: FxHashSet<Digit> = cells.iter().map(|&id| self[id]).collect();
            digits.len() == SIDE
        };
        let graph = ConstraintGraph::new();
        (0..SIDE).all(|i| {
            group_ok(graph.row(i)) && group_ok(graph.col(i)) && group_ok(graph.boxed(i))
        })
    }
}

impl Index<CellId> for Solution {
    type Output = Digit;

    fn index(&self, id: CellId) -> &Self::Output {
        &self.0[id.index()]
    }
}

impl fmt::Display for Solution {
    /// Renders the solved grid with the same frame as
    /// [`Grid`](crate::sudoku::grid::Grid): `|` separators after columns 3
    /// and 6 and a rule after rows 3 and 6.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..SIDE {
            for x in 0..SIDE {
                if x > 0 {
                    f.write_str(if x % 3 == 0 { " | " } else { " " })?;
                }
                write!(f, "{}", self[CellId::from_coords(x, y)])?;
            }
            writeln!(f)?;
            if y == 2 || y == 5 {
                writeln!(f, "------+-------+------")?;
            }
        }
        Ok(())
    }
}

/// Solves one puzzle: propagation to a fixed point, then backtracking.
#[derive(Debug, Clone)]
pub struct Solver {
    grid: Grid,
    graph: ConstraintGraph,
    stats: SolveStats,
}

impl Solver {
    /// Creates a solver for `grid`, building the constraint graph.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            graph: ConstraintGraph::new(),
            stats: SolveStats::default(),
        }
    }

    /// Parses an 81-character puzzle line and creates a solver for it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGridError`] when the line is not a well-formed
    /// puzzle string.
    pub fn from_line(input: &str) -> Result<Self, ParseGridError> {
        Ok(Self::new(input.parse()?))
    }

    /// Runs propagation to its fixed point and then the backtracking
    /// search.
    ///
    /// Returns the completed grid, or `None` when the puzzle has no
    /// solution: either propagation emptied a domain or the search
    /// exhausted every branch from the root.
    pub fn solve(&mut self) -> Option<Solution> {
        self.stats.propagation = Propagator::new(&self.graph).propagate(&mut self.grid);
        debug!(
            "propagation removed {} candidates over {} rounds, {} cells solved",
            self.stats.propagation.removed(),
            self.stats.propagation.rounds.len(),
            self.grid.solved_cells()
        );

        if self.grid.has_contradiction() {
            debug!("propagation emptied a domain; puzzle is unsolvable");
            return None;
        }

        let mut search = Search::new(&self.graph);
        let solved = search.run(&mut self.grid);
        self.stats.search = search.stats();
        debug!(
            "search made {} decisions and {} backtracks",
            self.stats.search.decisions, self.stats.search.backtracks
        );

        if solved {
            self.grid.solved_digits().map(Solution)
        } else {
            None
        }
    }

    /// The grid in its current state: parsed, propagated or solved.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The counters accumulated by [`solve`](Self::solve).
    #[must_use]
    pub const fn stats(&self) -> &SolveStats {
        &self.stats
    }
}
