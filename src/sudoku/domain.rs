#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Candidate domains represented as 9-bit sets.
//!
//! Each cell of the grid carries a `Domain`: the set of digits (1 to 9) the
//! cell could still take. Bit `d - 1` of the backing `u16` is set when digit
//! `d` remains a candidate. Because the representation is a single machine
//! word, saving and restoring a domain across a backtracking branch is a
//! plain value copy.

use std::fmt;

/// A Sudoku digit, 1 to 9.
pub type Digit = u8;

/// Bit mask with all nine candidate bits set.
const ALL_DIGITS: u16 = 0x1FF;

/// The set of digits a cell could still take.
///
/// A domain is *solved* when it holds exactly one digit. An empty domain
/// signals a contradiction: the puzzle has no completion in which the cell
/// can be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(u16);

impl Domain {
    /// The full domain {1..9}, the state of a blank cell.
    #[must_use]
    pub const fn full() -> Self {
        Self(ALL_DIGITS)
    }

    /// The empty domain, signalling a contradiction.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// A domain holding exactly `digit`.
    #[must_use]
    pub const fn singleton(digit: Digit) -> Self {
        Self(1 << (digit - 1))
    }

    /// Whether `digit` is still a candidate.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.0 & (1 << (digit - 1)) != 0
    }

    /// The number of remaining candidates.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether no candidates remain.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether exactly one candidate remains.
    #[must_use]
    pub const fn is_solved(self) -> bool {
        self.0.is_power_of_two()
    }

    /// The single remaining digit, or `None` if the cell is not solved.
    #[must_use]
    pub const fn solved_digit(self) -> Option<Digit> {
        if self.is_solved() {
            Some(self.0.trailing_zeros() as Digit + 1)
        } else {
            None
        }
    }

    /// Removes `digit` from the domain, returning whether it was present.
    pub const fn remove(&mut self, digit: Digit) -> bool {
        let present = self.contains(digit);
        self.0 &= !(1 << (digit - 1));
        present
    }

    /// Collapses the domain to `digit` alone.
    pub const fn collapse(&mut self, digit: Digit) {
        self.0 = 1 << (digit - 1);
    }

    /// Iterates over the remaining candidates in ascending order.
    pub fn iter(self) -> impl Iterator<Item = Digit> {
        (1..=9).filter(move |&d| self.contains(d))
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, d) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<Digit> for Domain {
    fn from_iter<I: IntoIterator<Item = Digit>>(digits: I) -> Self {
        let mut domain = Self::empty();
        for d in digits {
            domain.0 |= 1 << (d - 1);
        }
        domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_has_nine_candidates() {
        let domain = Domain::full();
        assert_eq!(domain.len(), 9);
        assert!((1..=9).all(|d| domain.contains(d)));
        assert!(!domain.is_solved());
    }

    #[test]
    fn test_singleton_is_solved() {
        for d in 1..=9 {
            let domain = Domain::singleton(d);
            assert_eq!(domain.len(), 1);
            assert!(domain.is_solved());
            assert_eq!(domain.solved_digit(), Some(d));
        }
    }

    #[test]
    fn test_remove_reports_presence() {
        let mut domain = Domain::full();
        assert!(domain.remove(5));
        assert!(!domain.remove(5));
        assert_eq!(domain.len(), 8);
        assert!(!domain.contains(5));
    }

    #[test]
    fn test_remove_to_empty_signals_contradiction() {
        let mut domain = Domain::singleton(3);
        assert!(domain.remove(3));
        assert!(domain.is_empty());
        assert_eq!(domain.solved_digit(), None);
    }

    #[test]
    fn test_collapse() {
        let mut domain = Domain::full();
        domain.collapse(7);
        assert_eq!(domain, Domain::singleton(7));
    }

    #[test]
    fn test_iter_is_ascending() {
        let domain: Domain = [9, 1, 4].into_iter().collect();
        let digits: Vec<Digit> = domain.iter().collect();
        assert_eq!(digits, vec![1, 4, 9]);
    }

    #[test]
    fn test_display() {
        let domain: Domain = [2, 6].into_iter().collect();
        assert_eq!(domain.to_string(), "{2 6}");
    }
}
