#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! The solver facade: grid in, grid (or a verdict of unsolvability) out.
//!
//! Orchestrates the pipeline described by the crate docs: reduce the grid to
//! an exact-cover instance, assemble the DLX matrix, run the search, decode
//! the chosen candidates back into a grid. Unsolvability is a value, not an
//! error; only malformed input (size, parse) is ever reported as an error,
//! and that happens before any solving starts.

use crate::dlx::search;
use crate::sudoku::cover::{Candidate, CoverInstance};
use crate::sudoku::grid::Grid;
use std::time::{Duration, Instant};

/// Verdict of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A completed grid satisfying every row, column and box constraint,
    /// with all givens preserved.
    Solved(Grid),
    /// The search exhausted every assignment extending the givens.
    Unsolvable,
}

impl SolveOutcome {
    /// Whether a solution was found.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// The solved grid, if any.
    #[must_use]
    pub const fn grid(&self) -> Option<&Grid> {
        match self {
            Self::Solved(grid) => Some(grid),
            Self::Unsolvable => None,
        }
    }
}

/// Solves `grid`, returning the first solution found or `Unsolvable`.
///
/// The search is deterministic: repeated calls on the same grid return the
/// same outcome bit for bit.
#[must_use]
pub fn solve(grid: &Grid) -> SolveOutcome {
    solve_timed(grid).0
}

/// Solves `grid` and reports how long the search took.
///
/// The elapsed time covers only the Dancing Links search, measured with the
/// monotonic [`Instant`] clock; building the cover instance and the matrix
/// is excluded, so the figure reflects the part that varies with puzzle
/// hardness.
#[must_use]
pub fn solve_timed(grid: &Grid) -> (SolveOutcome, Duration) {
    let instance = CoverInstance::from_grid(grid);
    let mut matrix = instance.to_matrix();

    let clock = Instant::now();
    let rows = search::first_solution(&mut matrix);
    let elapsed = clock.elapsed();

    debug_assert!(matrix.fully_restored(), "search left the matrix dirty");

    match rows {
        Some(rows) => {
            let mut solved = grid.clone();
            for id in rows {
                let Candidate { row, col, digit } = Candidate::from_id(id, grid.size());
                solved.set(row, col, digit);
            }
            (SolveOutcome::Solved(solved), elapsed)
        }
        None => (SolveOutcome::Unsolvable, elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Grid {
        Grid::parse(input, Grid::infer_size(input.len()).unwrap()).unwrap()
    }

    #[test]
    fn completed_grid_passes_through() {
        let input = "974236158638591742125487936316754289742918563589362417867125394253649871491873625";
        let outcome = solve(&parse(input));
        assert_eq!(outcome.grid().unwrap().to_string(), input);
    }

    #[test]
    fn fills_the_last_empty_cell() {
        let puzzle = parse(
            "2564891733746159829817234565932748617128.6549468591327635147298127958634849362715",
        );
        let outcome = solve(&puzzle);
        assert_eq!(
            outcome.grid().unwrap().to_string(),
            "256489173374615982981723456593274861712836549468591327635147298127958634849362715"
        );
    }

    #[test]
    fn solves_a_deep_backtracking_puzzle() {
        let puzzle = parse(
            "..............3.85..1.2.......5.7.....4...1...9.......5......73..2.1........4...9",
        );
        let outcome = solve(&puzzle);
        assert_eq!(
            outcome.grid().unwrap().to_string(),
            "987654321246173985351928746128537694634892157795461832519286473472319568863745219"
        );
    }

    #[test]
    fn solves_an_empty_grid_to_a_valid_completion() {
        let puzzle = Grid::new(9).unwrap();
        let outcome = solve(&puzzle);
        let solved = outcome.grid().unwrap();
        assert!(solved.is_solved());
    }

    #[test]
    fn reports_duplicate_givens_as_unsolvable() {
        let puzzle = parse(
            ".4.1..35.............2.5......4.89..26.....12.5.3....7..4...16.6....7....1..8..2.",
        );
        assert_eq!(solve(&puzzle), SolveOutcome::Unsolvable);
    }

    #[test]
    fn solution_preserves_givens() {
        let puzzle = parse(
            "..2.3...8.....8....31.2.....6..5.27..1.....5.2.4.6..31....8.6.5.......13..531.4..",
        );
        let outcome = solve(&puzzle);
        let solved = outcome.grid().unwrap();
        assert!(solved.is_solved());
        assert!(solved.preserves_givens(&puzzle));
    }

    #[test]
    fn repeated_solves_agree() {
        let puzzle = parse(
            ".39...12....9.7...8..4.1..6.42...79...........91...54.5..1.9..3...8.5....14...87.",
        );
        assert_eq!(solve(&puzzle), solve(&puzzle));
    }

    #[test]
    fn solves_a_four_by_four() {
        let puzzle = parse("2.4..1....3..4.2");
        let outcome = solve(&puzzle);
        assert_eq!(
            outcome.grid().unwrap().to_string(),
            "2341412312343412"
        );
    }

    /// A puzzle that forces deep backtracking must still hand the matrix
    /// back exactly as built: every cover matched by an uncover.
    #[test]
    fn deep_backtracking_leaves_matrix_pristine() {
        let puzzle = parse(
            "..............3.85..1.2.......5.7.....4...1...9.......5......73..2.1........4...9",
        );
        let mut matrix = CoverInstance::from_grid(&puzzle).to_matrix();
        assert!(search::first_solution(&mut matrix).is_some());
        assert!(matrix.fully_restored());
    }

    /// Exhaustively confirms an unsolvable verdict on a grid small enough to
    /// brute-force: no assignment extending the givens satisfies the rules.
    #[test]
    fn unsolvable_verdict_matches_brute_force() {
        // The repeated 3 and 4 collide within the first two columns.
        let puzzle = parse("34..........34..");
        assert_eq!(solve(&puzzle), SolveOutcome::Unsolvable);
        assert!(!brute_force_solvable(&puzzle));

        // Sanity: the brute-force agrees on a solvable sibling too.
        let solvable = parse("34..........43..");
        assert!(solve(&solvable).is_solved());
        assert!(brute_force_solvable(&solvable));
    }

    fn brute_force_solvable(grid: &Grid) -> bool {
        fn fits(grid: &Grid, row: usize, col: usize, digit: u8) -> bool {
            let size = grid.size();
            let region = grid.region_size();
            let (band, stack) = (row / region * region, col / region * region);
            (0..size).all(|i| grid.get(row, i) != digit && grid.get(i, col) != digit)
                && (0..region * region)
                    .all(|i| grid.get(band + i / region, stack + i % region) != digit)
        }

        fn fill(grid: &mut Grid, cell: usize) -> bool {
            let size = grid.size();
            if cell == size * size {
                return grid.is_solved();
            }
            let (row, col) = (cell / size, cell % size);
            if grid.get(row, col) != 0 {
                return fill(grid, cell + 1);
            }
            for digit in 1..=size as u8 {
                if fits(grid, row, col, digit) {
                    grid.set(row, col, digit);
                    if fill(grid, cell + 1) {
                        return true;
                    }
                    grid.set(row, col, 0);
                }
            }
            false
        }

        fill(&mut grid.clone(), 0)
    }
}
