#![deny(missing_docs)]
//! This crate provides a Sudoku solver built on constraint propagation and backtracking search.

/// The `sudoku` module implements the solver: candidate domains, the constraint graph,
/// the deduction rules and the backtracking search over residual ambiguity.
pub mod sudoku;
