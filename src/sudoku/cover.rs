#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]

//! Reduction of a Sudoku grid to a binary exact-cover instance.
//!
//! A grid of side `N` yields `4·N²` constraint columns in four families:
//!
//! 1. *Cell*: cell `(r, c)` is filled. Column index `r·N + c`, offset 0.
//! 2. *Row-digit*: row `r` contains digit `d`. Offset `N²`.
//! 3. *Column-digit*: column `c` contains digit `d`. Offset `2·N²`.
//! 4. *Box-digit*: box `(r/√N)·√N + c/√N` contains digit `d`. Offset `3·N²`.
//!
//! Each candidate placement `(r, c, d)` covers exactly one column of each
//! family; selecting a set of candidates that covers every column exactly
//! once is the same as completing the grid.
//!
//! Candidates are enumerated row-major with digits ascending, and a filled
//! cell collapses to the single candidate matching its given. That order is
//! part of the solver's contract: it is what pins the first-found solution
//! of a puzzle with several completions. Conflicting givens are emitted
//! faithfully rather than rejected; the search then exhausts and the puzzle
//! is reported unsolvable, which keeps semantic judgment in one place.

use crate::dlx::matrix::{ColumnId, Matrix, RowId};
use crate::sudoku::grid::Grid;
use itertools::Itertools;

/// One possible placement: `digit` at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Zero-based row of the placement.
    pub row: usize,
    /// Zero-based column of the placement.
    pub col: usize,
    /// The digit placed, in `1..=N`.
    pub digit: u8,
}

impl Candidate {
    /// Encodes the candidate as its matrix row id:
    /// `(row·N + col)·N + (digit − 1)`.
    ///
    /// The encoding is a bijection, so [`Candidate::from_id`] recovers the
    /// placement without a side table.
    #[must_use]
    pub const fn id(&self, size: usize) -> RowId {
        ((self.row * size + self.col) * size + (self.digit as usize - 1)) as RowId
    }

    /// Decodes a matrix row id back into the placement it encodes.
    #[must_use]
    pub const fn from_id(id: RowId, size: usize) -> Self {
        let id = id as usize;
        Self {
            row: id / (size * size),
            col: (id / size) % size,
            digit: (id % size + 1) as u8,
        }
    }

    /// The four constraint columns this candidate covers, in family order
    /// (cell, row-digit, column-digit, box-digit).
    #[must_use]
    pub fn constraint_columns(&self, size: usize, region: usize) -> [ColumnId; 4] {
        let digit = self.digit as usize - 1;
        let cells = size * size;
        let boxed = (self.row / region) * region + self.col / region;
        [
            self.row * size + self.col,
            cells + self.row * size + digit,
            2 * cells + self.col * size + digit,
            3 * cells + boxed * size + digit,
        ]
        .map(|column| column as ColumnId)
    }
}

/// The exact-cover instance built from one grid: the constraint column
/// count plus the ordered candidate list.
#[derive(Debug, Clone)]
pub struct CoverInstance {
    size: usize,
    region: usize,
    candidates: Vec<Candidate>,
}

impl CoverInstance {
    /// Builds the instance for `grid`: `N` candidates per empty cell, one
    /// per filled cell.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let size = grid.size();
        let mut candidates = Vec::with_capacity(size * size * size);
        for (row, col) in (0..size).cartesian_product(0..size) {
            match grid.get(row, col) {
                0 => candidates.extend(
                    (1..=size as u8).map(|digit| Candidate { row, col, digit }),
                ),
                given => candidates.push(Candidate {
                    row,
                    col,
                    digit: given,
                }),
            }
        }
        Self {
            size,
            region: grid.region_size(),
            candidates,
        }
    }

    /// Number of constraint columns, always `4·N²`.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        4 * self.size * self.size
    }

    /// The candidates in enumeration order.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Assembles the DLX matrix: one row per candidate, inserted in
    /// enumeration order, over an exactly-sized node pool.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix {
        let mut matrix = Matrix::with_capacity(self.column_count(), 4 * self.candidates.len());
        for candidate in &self.candidates {
            matrix.add_row(
                candidate.id(self.size),
                &candidate.constraint_columns(self.size, self.region),
            );
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip() {
        for size in [4, 9, 16] {
            for (row, col) in [(0, 0), (1, size - 2), (size - 1, size - 1)] {
                for digit in [1, (size / 2) as u8, size as u8] {
                    let candidate = Candidate { row, col, digit };
                    assert_eq!(Candidate::from_id(candidate.id(size), size), candidate);
                }
            }
        }
    }

    #[test]
    fn constraint_columns_hit_each_family() {
        let first = Candidate {
            row: 0,
            col: 0,
            digit: 1,
        };
        assert_eq!(first.constraint_columns(9, 3), [0, 81, 162, 243]);

        let last = Candidate {
            row: 8,
            col: 8,
            digit: 9,
        };
        // Box (8/3)*3 + 8/3 = 8, the bottom-right one.
        assert_eq!(last.constraint_columns(9, 3), [80, 161, 242, 323]);

        let mid = Candidate {
            row: 4,
            col: 7,
            digit: 2,
        };
        assert_eq!(
            mid.constraint_columns(9, 3),
            [43, 81 + 37, 162 + 64, 243 + 46]
        );
    }

    #[test]
    fn empty_grid_emits_all_candidates() {
        let grid = Grid::new(9).unwrap();
        let instance = CoverInstance::from_grid(&grid);
        assert_eq!(instance.column_count(), 324);
        assert_eq!(instance.candidates().len(), 729);
    }

    #[test]
    fn givens_collapse_to_single_candidates() {
        let mut grid = Grid::new(4).unwrap();
        grid.set(0, 0, 3);
        grid.set(2, 1, 1);
        let instance = CoverInstance::from_grid(&grid);
        assert_eq!(instance.candidates().len(), 14 * 4 + 2);
        assert_eq!(
            instance.candidates()[0],
            Candidate {
                row: 0,
                col: 0,
                digit: 3
            }
        );
    }

    #[test]
    fn conflicting_givens_are_emitted_faithfully() {
        // Two 1s in the top row: the builder must not reject them.
        let grid = Grid::parse("11..............", 4).unwrap();
        let instance = CoverInstance::from_grid(&grid);
        assert_eq!(instance.candidates().len(), 14 * 4 + 2);
        let rowdigit = |candidate: &Candidate| candidate.constraint_columns(4, 2)[1];
        assert_eq!(
            rowdigit(&instance.candidates()[0]),
            rowdigit(&instance.candidates()[1])
        );
    }

    #[test]
    fn candidate_enumeration_is_row_major_digits_ascending() {
        let grid = Grid::new(4).unwrap();
        let instance = CoverInstance::from_grid(&grid);
        let ids = instance
            .candidates()
            .iter()
            .map(|candidate| candidate.id(4))
            .collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ids.first(), Some(&0));
        assert_eq!(ids.last(), Some(&63));
    }

    #[test]
    fn matrix_pool_is_sized_exactly() {
        let grid = Grid::new(4).unwrap();
        let instance = CoverInstance::from_grid(&grid);
        let matrix = instance.to_matrix();
        assert_eq!(
            matrix.node_count(),
            1 + instance.column_count() + 4 * instance.candidates().len()
        );
        assert!(matrix.fully_restored());
    }
}
