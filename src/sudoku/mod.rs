#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// Cell identifiers and grid geometry.
pub mod cell;
/// Candidate domains as small fixed-capacity bitsets.
pub mod domain;
/// The constraint graph: peer lists, boxes, rows and columns.
pub mod graph;
/// The 81-cell grid of domains, parsing and rendering.
pub mod grid;
/// The fixed-point propagation engine and its deduction rules.
pub mod propagation;
/// Depth-first backtracking search with domain save/restore.
pub mod search;
/// The orchestrating solver and the solved-grid type.
pub mod solver;
