#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The fixed-point propagation engine.
//!
//! This module provides the `Propagator`, which shrinks the candidate
//! domains of a [`Grid`] by repeatedly applying three deduction rules:
//!
//! 1.  **Elimination (naked single):** a solved cell's digit cannot appear
//!     in any of its 20 peers.
//! 2.  **Only-candidate (hidden single):** if a digit fits exactly one cell
//!     of a row, column or box, that cell must hold it, even while its
//!     domain still lists other candidates.
//! 3.  **Box-line reduction (pointing pairs/triples):** if a digit is
//!     confined within a box to two or three cells that also share a row
//!     or column, it can be removed from the rest of that row or column.
//!
//! Each rule is iterated to a local fixed point before the next runs, and
//! the outer loop runs all three per round until a full round removes zero
//! candidates. Termination is guaranteed: the total candidate count is a
//! non-negative integer that strictly decreases in every productive round.
//!
//! The rules that remove from many cells at once first compute a plan of
//! removals against a fixed snapshot of the domains, then apply it, so no
//! pass reads state it is mutating mid-scan. Removal counts are recorded
//! per rule per round for diagnostics.

use crate::sudoku::cell::{CellId, SIDE};
use crate::sudoku::domain::Digit;
use crate::sudoku::graph::ConstraintGraph;
use crate::sudoku::grid::Grid;
use log::{debug, trace};

/// Candidates removed by each rule during one outer round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundStats {
    /// Removals by the elimination rule.
    pub eliminated: usize,
    /// Removals by the only-candidate rule.
    pub hidden_singles: usize,
    /// Removals by box-line reduction.
    pub box_line: usize,
}

impl RoundStats {
    /// Total candidates removed in the round. The outer loop stops when
    /// this reaches zero.
    #[must_use]
    pub const fn total(self) -> usize {
        self.eliminated + self.hidden_singles + self.box_line
    }
}

/// Removal counts for a whole propagation run, one entry per round.
///
/// The final entry is always the all-zero round that proved the fixed
/// point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropagationStats {
    /// Per-round removal counts, in order.
    pub rounds: Vec<RoundStats>,
}

impl PropagationStats {
    /// Total candidates removed across all rounds and rules.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.rounds.iter().map(|r| r.total()).sum()
    }

    /// Per-rule totals summed over the rounds.
    #[must_use]
    pub fn totals(&self) -> RoundStats {
        self.rounds
            .iter()
            .fold(RoundStats::default(), |acc, r| RoundStats {
                eliminated: acc.eliminated + r.eliminated,
                hidden_singles: acc.hidden_singles + r.hidden_singles,
                box_line: acc.box_line + r.box_line,
            })
    }
}

/// Applies the deduction rules to a grid until nothing more can be removed.
///
/// The propagator borrows the immutable constraint graph; all mutation goes
/// through the grid handed to [`propagate`](Self::propagate).
#[derive(Debug, Clone, Copy)]
pub struct Propagator<'a> {
    graph: &'a ConstraintGraph,
}

impl<'a> Propagator<'a> {
    /// Creates a propagator over `graph`.
    #[must_use]
    pub const fn new(graph: &'a ConstraintGraph) -> Self {
        Self { graph }
    }

    /// Runs all three rules per round until a full round removes zero
    /// candidates, and reports the per-rule removal counts.
    pub fn propagate(&self, grid: &mut Grid) -> PropagationStats {
        let mut stats = PropagationStats::default();
        loop {
            let round = RoundStats {
                eliminated: self.eliminate_solved(grid),
                hidden_singles: self.assign_hidden_singles(grid),
                box_line: self.reduce_box_lines(grid),
            };
            debug!(
                "round {}: eliminated {}, hidden singles {}, box-line {} ({} candidates left)",
                stats.rounds.len() + 1,
                round.eliminated,
                round.hidden_singles,
                round.box_line,
                grid.total_candidates()
            );
            stats.rounds.push(round);
            if round.total() == 0 {
                return stats;
            }
        }
    }

    /// Elimination: every solved cell's digit is removed from all its
    /// peers. Removing a digit may solve a peer, so the pass repeats until
    /// a sweep plans nothing new.
    fn eliminate_solved(&self, grid: &mut Grid) -> usize {
        let mut removed = 0;
        loop {
            let planned: Vec<(CellId, Digit)> = CellId::all()
                .filter_map(|id| grid[id].solved_digit().map(|d| (id, d)))
                .flat_map(|(id, d)| self.graph.peers(id).iter().map(move |&peer| (peer, d)))
                .filter(|&(peer, d)| grid[peer].contains(d))
                .collect();

            let changed = self.apply(grid, &planned);
            if changed == 0 {
                return removed;
            }
            removed += changed;
        }
    }

    /// Only-candidate: an unsolved cell whose candidate digit appears
    /// nowhere else in one of its groups collapses to that digit. The
    /// lowest qualifying digit wins and the cell is updated immediately.
    fn assign_hidden_singles(&self, grid: &mut Grid) -> usize {
        let mut removed = 0;
        loop {
            let mut changed = 0;
            for id in CellId::all() {
                let domain = grid[id];
                if domain.len() <= 1 {
                    continue;
                }
                for digit in domain.iter() {
                    if self.is_sole_home(grid, id, digit) {
                        trace!("{id} is the only home for {digit}");
                        grid[id].collapse(digit);
                        changed += domain.len() - 1;
                        break;
                    }
                }
            }
            if changed == 0 {
                return removed;
            }
            removed += changed;
        }
    }

    /// Whether no other cell in the row, column or box of `id` still has
    /// `digit` as a candidate.
    fn is_sole_home(&self, grid: &Grid, id: CellId, digit: Digit) -> bool {
        let alone_in = |group: &[CellId; SIDE]| {
            group
                .iter()
                .all(|&other| other == id || !grid[other].contains(digit))
        };
        alone_in(self.graph.row_of(id))
            || alone_in(self.graph.col_of(id))
            || alone_in(self.graph.box_of(id))
    }

    /// Box-line reduction: when the cells of a box still offering a digit
    /// number two or three and all share a row (or column), the digit is
    /// removed from that row (or column) outside the box.
    fn reduce_box_lines(&self, grid: &mut Grid) -> usize {
        let mut removed = 0;
        loop {
            let mut planned: Vec<(CellId, Digit)> = Vec::new();
            for b in 0..SIDE {
                for digit in 1..=9 {
                    let holders: Vec<CellId> = self
                        .graph
                        .boxed(b)
                        .iter()
                        .copied()
                        .filter(|&id| grid[id].contains(digit))
                        .collect();
                    if !(2..=3).contains(&holders.len()) {
                        continue;
                    }

                    let first = holders[0];
                    if holders.iter().all(|id| id.y() == first.y()) {
                        planned.extend(self.outside_box(grid, self.graph.row_of(first), b, digit));
                    }
                    if holders.iter().all(|id| id.x() == first.x()) {
                        planned.extend(self.outside_box(grid, self.graph.col_of(first), b, digit));
                    }
                }
            }

            let changed = self.apply(grid, &planned);
            if changed == 0 {
                return removed;
            }
            removed += changed;
        }
    }

    /// The cells of `line` outside box `b` that still offer `digit`,
    /// paired with the digit for the removal plan.
    fn outside_box<'g>(
        &self,
        grid: &'g Grid,
        line: &'g [CellId; SIDE],
        b: usize,
        digit: Digit,
    ) -> impl Iterator<Item = (CellId, Digit)> + 'g {
        line.iter()
            .copied()
            .filter(move |&id| id.box_index() != b && grid[id].contains(digit))
            .map(move |id| (id, digit))
    }

    /// Applies a removal plan, counting only removals that changed a
    /// domain. Duplicate plan entries are harmless.
    #[allow(clippy::unused_self)]
    fn apply(&self, grid: &mut Grid, planned: &[(CellId, Digit)]) -> usize {
        planned
            .iter()
            .filter(|&&(id, digit)| grid[id].remove(digit))
            .count()
    }
}
