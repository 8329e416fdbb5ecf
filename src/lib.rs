#![deny(missing_docs)]
//! This crate provides an exact-cover Sudoku solver built on Knuth's Dancing Links (DLX).
//!
//! A puzzle is reduced to a binary exact-cover instance (one constraint column per
//! cell, row-digit, column-digit and box-digit requirement; one candidate row per
//! possible placement) and handed to a toroidal sparse-matrix backtracking search
//! with the minimum-size-column heuristic.

/// The `dlx` module implements the puzzle-agnostic exact-cover engine: the toroidal
/// sparse-matrix node pool and the Dancing Links search over it.
pub mod dlx;

/// The `sudoku` module implements the puzzle side: the grid model, the reduction to
/// exact cover, the solver facade and the scripted acceptance suite.
pub mod sudoku;
