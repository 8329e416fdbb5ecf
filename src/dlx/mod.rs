#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Dancing Links (DLX) exact-cover engine.
//!
//! The engine is puzzle-agnostic: callers describe an instance as a set of
//! constraint columns and a list of rows, each row naming the columns it
//! covers, and get back the first exact cover found (if any).

/// The `matrix` module holds the toroidal doubly-linked sparse matrix.
pub mod matrix;

/// The `search` module holds the backtracking search over a matrix.
pub mod search;
