#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]

//! The Sudoku grid model and its textual serialization.
//!
//! A grid of side `N` (a perfect square, at least 4) holds cell values in
//! `0..=N` where `0` denotes an empty cell. Grids serialize to exactly `N²`
//! characters: `.` for an empty cell, `'1'..='9'` for values 1 through 9 and
//! `'A'..` for values 10 and up (`'A'` = 10, uppercase only). The alphabet is
//! one character per cell, so serialization and parsing are exact inverses;
//! it caps the supported side length at 35 (`'Z'`), far above any practical
//! puzzle. No solving logic lives here.

use bit_vec::BitVec;
use itertools::Itertools;
use smallvec::{smallvec, SmallVec};
use std::fmt::{self, Display, Write};

/// Smallest supported side length.
pub const MIN_SIZE: usize = 4;

/// Largest side length the one-character-per-cell alphabet can express.
pub const MAX_SIZE: usize = 35;

/// Ways a grid can fail to be constructed or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The requested side length is below 4, above [`MAX_SIZE`], or not a
    /// perfect square.
    InvalidSize(usize),
    /// No supported grid serializes to the given number of characters.
    BadImportLength(usize),
    /// The input string does not hold exactly `N²` characters.
    BadLength {
        /// Number of characters a grid of the requested size serializes to.
        expected: usize,
        /// Number of characters actually supplied.
        found: usize,
    },
    /// The input string holds a character outside the alphabet, or one that
    /// decodes to a value above the grid size.
    BadCharacter {
        /// The offending character.
        character: char,
        /// Zero-based position of the character in the input.
        position: usize,
    },
}

impl Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize(size) => write!(
                f,
                "invalid grid size {size}: the side length must be a perfect square between {MIN_SIZE} and {MAX_SIZE}"
            ),
            Self::BadImportLength(length) => {
                write!(f, "cannot infer a grid size from {length} characters")
            }
            Self::BadLength { expected, found } => {
                write!(f, "expected {expected} characters, found {found}")
            }
            Self::BadCharacter {
                character,
                position,
            } => write!(f, "invalid character {character:?} at position {position}"),
        }
    }
}

impl std::error::Error for GridError {}

/// An `N`×`N` Sudoku grid. `0` represents an empty cell.
///
/// Cells of the common 9×9 size live inline; larger grids spill to the heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    region: usize,
    cells: SmallVec<[u8; 81]>,
}

/// The region side for a supported size, or `None` for a rejected one.
fn region_for(size: usize) -> Option<usize> {
    if size < MIN_SIZE || size > MAX_SIZE {
        return None;
    }
    let region = size.isqrt();
    if region * region == size {
        Some(region)
    } else {
        None
    }
}

impl Grid {
    /// Creates an empty grid of side `size`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSize`] if `size` is below 4, above
    /// [`MAX_SIZE`], or not a perfect square.
    pub fn new(size: usize) -> Result<Self, GridError> {
        let region = region_for(size).ok_or(GridError::InvalidSize(size))?;
        Ok(Self {
            size,
            region,
            cells: smallvec![0; size * size],
        })
    }

    /// Parses a grid of side `size` from its `N²`-character serialization.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSize`] for an unsupported size,
    /// [`GridError::BadLength`] for a wrong-length string and
    /// [`GridError::BadCharacter`] for a character outside the alphabet or
    /// above the grid size.
    pub fn parse(input: &str, size: usize) -> Result<Self, GridError> {
        let mut grid = Self::new(size)?;
        grid.load_str(input)?;
        Ok(grid)
    }

    /// Infers the side length a serialized grid of `length` characters must
    /// have.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::BadImportLength`] when `length` is not `N²` for
    /// any supported `N`.
    pub fn infer_size(length: usize) -> Result<usize, GridError> {
        let size = length.isqrt();
        if size * size == length && region_for(size).is_some() {
            Ok(size)
        } else {
            Err(GridError::BadImportLength(length))
        }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Side length of one region (`√N`); the grid has `√N`×`√N` regions.
    #[must_use]
    pub const fn region_size(&self) -> usize {
        self.region
    }

    /// Value of the cell at `(row, col)`; `0` means empty.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.size && col < self.size, "cell out of bounds");
        self.cells[row * self.size + col]
    }

    /// Sets the cell at `(row, col)` to `value`; `0` clears it.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds or `value` exceeds the grid
    /// size.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        assert!(row < self.size && col < self.size, "cell out of bounds");
        assert!(value as usize <= self.size, "cell value out of range");
        self.cells[row * self.size + col] = value;
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    /// Bulk-loads the grid from its `N²`-character serialization,
    /// overwriting every cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::BadLength`] or [`GridError::BadCharacter`]; the
    /// grid is left untouched on error.
    pub fn load_str(&mut self, input: &str) -> Result<(), GridError> {
        let chars = input.chars().collect_vec();
        if chars.len() != self.size * self.size {
            return Err(GridError::BadLength {
                expected: self.size * self.size,
                found: chars.len(),
            });
        }
        let mut cells: SmallVec<[u8; 81]> = SmallVec::with_capacity(chars.len());
        for (position, &character) in chars.iter().enumerate() {
            let value = if character == '.' {
                0
            } else {
                value_of_char(character)
                    .filter(|&value| value as usize <= self.size)
                    .ok_or(GridError::BadCharacter {
                        character,
                        position,
                    })?
            };
            cells.push(value);
        }
        self.cells = cells;
        Ok(())
    }

    /// Whether the grid is completely filled and every row, column and
    /// region holds each value exactly once.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let rows = (0..self.size).all(|row| {
            self.unit_is_permutation((0..self.size).map(|col| self.get(row, col)))
        });
        let cols = (0..self.size).all(|col| {
            self.unit_is_permutation((0..self.size).map(|row| self.get(row, col)))
        });
        let regions = (0..self.region)
            .cartesian_product(0..self.region)
            .all(|(band, stack)| {
                self.unit_is_permutation(
                    (0..self.region)
                        .cartesian_product(0..self.region)
                        .map(|(r, c)| self.get(band * self.region + r, stack * self.region + c)),
                )
            });
        rows && cols && regions
    }

    /// Whether every filled cell of `original` carries the same value here.
    #[must_use]
    pub fn preserves_givens(&self, original: &Self) -> bool {
        self.size == original.size
            && self
                .cells
                .iter()
                .zip(&original.cells)
                .all(|(&cell, &given)| given == 0 || cell == given)
    }

    fn unit_is_permutation(&self, values: impl Iterator<Item = u8>) -> bool {
        let mut seen = BitVec::from_elem(self.size, false);
        for value in values {
            if value == 0 || seen[value as usize - 1] {
                return false;
            }
            seen.set(value as usize - 1, true);
        }
        true
    }
}

impl Display for Grid {
    /// Serializes the grid to its `N²`-character form, the exact inverse of
    /// [`Grid::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells
            .iter()
            .try_for_each(|&cell| f.write_char(char_of_value(cell)))
    }
}

/// Character for a cell value: `'.'` for empty, `'1'..='9'`, then `'A'..`.
const fn char_of_value(value: u8) -> char {
    if value == 0 {
        '.'
    } else if value <= 9 {
        (b'0' + value) as char
    } else {
        (b'A' + value - 10) as char
    }
}

/// Value of an alphabet character, or `None` for anything else. `'.'` is
/// handled by the caller.
const fn value_of_char(character: char) -> Option<u8> {
    match character {
        '1'..='9' => Some(character as u8 - b'0'),
        'A'..='Z' => Some(character as u8 - b'A' + 10),
        _ => None,
    }
}
