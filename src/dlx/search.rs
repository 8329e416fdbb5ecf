#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! Backtracking search over a [`Matrix`], Knuth's Algorithm DLX.
//!
//! The search repeatedly picks the uncovered column with the fewest live
//! nodes (minimum remaining values), covers it, and tries each of its rows
//! in insertion order. Both choices are deterministic, so a given matrix
//! always yields the same first solution.

use crate::dlx::matrix::{Matrix, RowId};

/// Finds the first exact cover of `matrix`, returning the chosen row ids.
///
/// The matrix is borrowed mutably because the search rewires its links in
/// place, but every cover is matched by an uncover on the way out: whether a
/// solution was found or the search was exhausted, the matrix is handed back
/// in its exact post-build state.
///
/// No allocation happens inside the search itself; the two buffers are sized
/// up front (a solution can never select more rows than there are columns).
pub fn first_solution(matrix: &mut Matrix) -> Option<Vec<RowId>> {
    let mut stack = Vec::with_capacity(matrix.column_count());
    let mut found = Vec::with_capacity(matrix.column_count());
    search(matrix, &mut stack, &mut found).then_some(found)
}

/// One level of the recursion: chooses a column, tries its rows, undoes
/// everything it covered before returning. Recursion depth is bounded by the
/// number of columns that can still be covered, i.e. the solution length.
fn search(matrix: &mut Matrix, stack: &mut Vec<RowId>, found: &mut Vec<RowId>) -> bool {
    let Some(header) = matrix.min_size_column() else {
        // No uncovered column left: the rows on the stack are a solution.
        found.extend_from_slice(stack);
        return true;
    };
    if matrix.size_of(header) == 0 {
        return false;
    }

    matrix.cover(header);
    let mut hit = false;
    let mut row = matrix.down(header);
    while row != header {
        stack.push(matrix.row_of(row));
        let mut node = matrix.right(row);
        while node != row {
            matrix.cover(matrix.column_of(node));
            node = matrix.right(node);
        }

        hit = search(matrix, stack, found);

        let mut node = matrix.left(row);
        while node != row {
            matrix.uncover(matrix.column_of(node));
            node = matrix.left(node);
        }
        stack.pop();

        if hit {
            break;
        }
        row = matrix.down(row);
    }
    matrix.uncover(header);
    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The worked example from Wikipedia's Algorithm X article: six rows
    /// over seven columns with the unique cover {B, D, F}.
    fn wikipedia_instance() -> Matrix {
        let mut matrix = Matrix::with_capacity(7, 17);
        matrix.add_row(0, &[0, 3, 6]); // A
        matrix.add_row(1, &[0, 3]); // B
        matrix.add_row(2, &[3, 4, 6]); // C
        matrix.add_row(3, &[2, 4, 5]); // D
        matrix.add_row(4, &[1, 2, 5, 6]); // E
        matrix.add_row(5, &[1, 6]); // F
        matrix
    }

    #[test]
    fn finds_the_unique_cover() {
        let mut matrix = wikipedia_instance();
        let mut rows = first_solution(&mut matrix).expect("instance is coverable");
        rows.sort_unstable();
        assert_eq!(rows, vec![1, 3, 5]);
    }

    #[test]
    fn matrix_is_restored_after_success() {
        let mut matrix = wikipedia_instance();
        assert!(first_solution(&mut matrix).is_some());
        assert!(matrix.fully_restored());
    }

    #[test]
    fn matrix_is_restored_after_exhaustion() {
        // Column 2 is uncoverable, forcing a full backtrack.
        let mut matrix = Matrix::new(3);
        matrix.add_row(0, &[0]);
        matrix.add_row(1, &[1]);
        matrix.add_row(2, &[0, 1]);
        assert_eq!(first_solution(&mut matrix), None);
        assert!(matrix.fully_restored());
    }

    #[test]
    fn reports_exhaustion_for_conflicting_rows() {
        // Both rows fight over column 0, leaving column 2 uncovered.
        let mut matrix = Matrix::new(3);
        matrix.add_row(0, &[0, 1]);
        matrix.add_row(1, &[0, 2]);
        matrix.add_row(2, &[0, 1, 2]);
        let rows = first_solution(&mut matrix);
        assert_eq!(rows, Some(vec![2]));
    }

    #[test]
    fn covered_root_is_an_empty_solution() {
        let mut matrix = Matrix::new(0);
        assert_eq!(first_solution(&mut matrix), Some(Vec::new()));
    }

    #[test]
    fn first_of_several_solutions_follows_insertion_order() {
        // Rows 0 and 1 are interchangeable covers; insertion order decides.
        let mut matrix = Matrix::new(2);
        matrix.add_row(0, &[0, 1]);
        matrix.add_row(1, &[0, 1]);
        assert_eq!(first_solution(&mut matrix), Some(vec![0]));
    }

    #[test]
    fn repeated_solves_are_deterministic() {
        let mut matrix = wikipedia_instance();
        let first = first_solution(&mut matrix);
        let second = first_solution(&mut matrix);
        assert_eq!(first, second);
    }
}
