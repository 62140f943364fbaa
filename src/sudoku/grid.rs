#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 81-cell grid of candidate domains.
//!
//! A `Grid` is parsed from an 81-character digit string in row-major order,
//! where '0' marks a blank cell. Parsing is the only place malformed input
//! is rejected; the propagation and search layers assume a well-formed grid.

use crate::sudoku::cell::{CELL_COUNT, CellId, SIDE};
use crate::sudoku::domain::{Digit, Domain};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

/// The classic example puzzle, solvable by propagation alone.
pub const EXAMPLE_EASY: &str =
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

/// A 17-clue puzzle that leaves work for the backtracking search.
pub const EXAMPLE_HARD: &str =
    "000000000000003085001020000000507000004000100090000000500000073002010000000040009";

/// An error raised when an input line is not a well-formed puzzle string.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseGridError {
    /// The input did not hold exactly 81 characters.
    #[error("expected 81 characters, found {found}")]
    BadLength {
        /// The number of characters in the input.
        found: usize,
    },

    /// A character other than '0' to '9' appeared in the input.
    #[error("invalid character {found:?} at index {index}")]
    BadDigit {
        /// Row-major position of the offending character.
        index: usize,
        /// The character found there.
        found: char,
    },
}

/// The mutable state of a puzzle: one domain per cell.
///
/// The peer structure lives in [`ConstraintGraph`](crate::sudoku::graph::ConstraintGraph)
/// and never changes; only the domains here are mutated by propagation and
/// search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    domains: [Domain; CELL_COUNT],
}

impl Grid {
    /// A grid of 81 blank cells.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            domains: [Domain::full(); CELL_COUNT],
        }
    }

    /// The sum of all domain sizes. A blank grid holds 729 candidates; a
    /// solved grid holds 81.
    #[must_use]
    pub fn total_candidates(&self) -> usize {
        self.domains.iter().map(|d| d.len()).sum()
    }

    /// The number of solved cells.
    #[must_use]
    pub fn solved_cells(&self) -> usize {
        self.domains.iter().filter(|d| d.is_solved()).count()
    }

    /// Whether every cell is solved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.domains.iter().all(|d| d.is_solved())
    }

    /// Whether any cell has run out of candidates.
    #[must_use]
    pub fn has_contradiction(&self) -> bool {
        self.domains.iter().any(|d| d.is_empty())
    }

    /// The 81 solved digits in row-major order, or `None` while any cell
    /// remains unsolved.
    #[must_use]
    pub fn solved_digits(&self) -> Option<[Digit; CELL_COUNT]> {
        let mut digits = [0; CELL_COUNT];
        for (slot, domain) in digits.iter_mut().zip(&self.domains) {
            *slot = domain.solved_digit()?;
        }
        Some(digits)
    }
}

impl Index<CellId> for Grid {
    type Output = Domain;

    fn index(&self, id: CellId) -> &Self::Output {
        &self.domains[id.index()]
    }
}

impl IndexMut<CellId> for Grid {
    fn index_mut(&mut self, id: CellId) -> &mut Self::Output {
        &mut self.domains[id.index()]
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let count = input.chars().count();
        if count != CELL_COUNT {
            return Err(ParseGridError::BadLength { found: count });
        }

        let mut grid = Self::blank();
        for (index, found) in input.chars().enumerate() {
            match found.to_digit(10) {
                Some(0) => {}
                #[allow(clippy::cast_possible_truncation)]
                Some(d) => grid.domains[index] = Domain::singleton(d as Digit),
                None => return Err(ParseGridError::BadDigit { index, found }),
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    /// Renders the grid with `|` separators after columns 3 and 6 and a
    /// `------+-------+------` rule after rows 3 and 6. Unsolved cells show
    /// as `-`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..SIDE {
            for x in 0..SIDE {
                if x > 0 {
                    f.write_str(if x % 3 == 0 { " | " } else { " " })?;
                }
                match self[CellId::from_coords(x, y)].solved_digit() {
                    Some(d) => write!(f, "{d}")?,
                    None => f.write_str("-")?,
                }
            }
            writeln!(f)?;
            if y == 2 || y == 5 {
                writeln!(f, "------+-------+------")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_grid() {
        let grid: Grid = "0".repeat(81).parse().unwrap();
        assert_eq!(grid, Grid::blank());
        assert_eq!(grid.total_candidates(), 729);
        assert_eq!(grid.solved_cells(), 0);
    }

    #[test]
    fn test_parse_clues_become_singletons() {
        let grid: Grid = EXAMPLE_EASY.parse().unwrap();
        assert_eq!(grid[CellId::from_coords(0, 0)], Domain::singleton(5));
        assert_eq!(grid[CellId::from_coords(1, 0)], Domain::singleton(3));
        assert_eq!(grid[CellId::from_coords(2, 0)], Domain::full());
        assert_eq!(grid.solved_cells(), 30);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            "123".parse::<Grid>(),
            Err(ParseGridError::BadLength { found: 3 })
        );
    }

    #[test]
    fn test_parse_rejects_bad_character() {
        let mut input = "0".repeat(81);
        input.replace_range(40..41, "x");
        assert_eq!(
            input.parse::<Grid>(),
            Err(ParseGridError::BadDigit {
                index: 40,
                found: 'x'
            })
        );
    }

    #[test]
    fn test_example_puzzles_parse() {
        assert!(EXAMPLE_EASY.parse::<Grid>().is_ok());
        assert!(EXAMPLE_HARD.parse::<Grid>().is_ok());
    }

    #[test]
    fn test_solved_digits_requires_completion() {
        let grid: Grid = EXAMPLE_EASY.parse().unwrap();
        assert_eq!(grid.solved_digits(), None);
    }

    #[test]
    fn test_display_blank_cells_and_separators() {
        let grid: Grid = EXAMPLE_EASY.parse().unwrap();
        let rendered = grid.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "5 3 - | - 7 - | - - -");
        assert_eq!(lines[3], "------+-------+------");
        assert_eq!(lines[7], "------+-------+------");
        assert_eq!(lines[10], "- - - | - 8 - | - 7 9");
    }
}
