#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides functionality for solving Sudoku puzzles.

/// The `cover` module reduces a grid to a binary exact-cover instance.
pub mod cover;

/// The `grid` module holds the grid model and its textual serialization.
pub mod grid;

/// The `solver` module orchestrates reduction, search and decoding.
pub mod solver;

/// The `suite` module holds the scripted acceptance battery.
pub mod suite;
