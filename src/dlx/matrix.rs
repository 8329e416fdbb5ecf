#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::cast_possible_truncation)]

//! The toroidal doubly-linked sparse matrix at the heart of Dancing Links.
//!
//! Every node lives in one contiguous pool and the `L`/`R`/`U`/`D` links are
//! `u32` indices into that pool rather than pointers. This keeps the classic
//! O(1) cover/uncover splicing without fighting the borrow checker over a web
//! of mutable aliases, and it makes a matrix trivially cheap to rebuild.
//!
//! Pool layout:
//! - node `0` is the root sentinel whose horizontal ring threads the headers
//!   of all currently uncovered columns;
//! - nodes `1..=columns` are the column headers, one per constraint column,
//!   each anchoring a circular vertical list of its live body nodes;
//! - every further node is a body node; the (up to four, here always four)
//!   body nodes of one row form a circular horizontal list of their own.
//!
//! The pool is populated once at build time and sized exactly; the search
//! afterwards mutates only the linkage, never the pool.

/// Identifier of a constraint column, in `0..columns`.
pub type ColumnId = u32;

/// Identifier of a matrix row, assigned by the caller when the row is added.
pub type RowId = u32;

/// Index of a node in the pool.
pub(crate) type NodeId = u32;

/// The root sentinel always occupies slot zero of the pool.
pub(crate) const ROOT: NodeId = 0;

/// Row sentinel carried by the root and the column headers.
const NO_ROW: RowId = RowId::MAX;

/// One record of the pool. Headers and the root reuse the same layout with
/// `row` set to the sentinel; a header's `column` field points to itself.
#[derive(Debug, Clone, Copy)]
struct Node {
    left: NodeId,
    right: NodeId,
    up: NodeId,
    down: NodeId,
    column: NodeId,
    row: RowId,
}

/// A sparse exact-cover matrix over a contiguous node pool.
///
/// Build one with [`Matrix::with_capacity`] (or [`Matrix::new`]), describe
/// the instance through [`Matrix::add_row`], then run
/// [`crate::dlx::search::first_solution`] over it.
#[derive(Debug, Clone)]
pub struct Matrix {
    nodes: Vec<Node>,
    /// Live node count per column, indexed by the column's header node id.
    /// Slot zero belongs to the root and stays unused.
    sizes: Vec<u32>,
    columns: usize,
}

impl Matrix {
    /// Creates a matrix with `columns` constraint columns and no rows.
    ///
    /// The column headers are linked into a horizontal ring through the root
    /// in ascending column order; that order is what makes the
    /// minimum-size-column tie-break deterministic.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self::with_capacity(columns, 0)
    }

    /// Creates a matrix with `columns` constraint columns and pool capacity
    /// reserved for `cells` body nodes, so a fully described instance never
    /// reallocates.
    #[must_use]
    pub fn with_capacity(columns: usize, cells: usize) -> Self {
        let last = columns as NodeId;
        let mut nodes = Vec::with_capacity(1 + columns + cells);
        nodes.push(Node {
            left: last,
            right: if columns == 0 { ROOT } else { 1 },
            up: ROOT,
            down: ROOT,
            column: ROOT,
            row: NO_ROW,
        });
        for header in 1..=last {
            nodes.push(Node {
                left: header - 1,
                right: if header == last { ROOT } else { header + 1 },
                up: header,
                down: header,
                column: header,
                row: NO_ROW,
            });
        }
        Self {
            nodes,
            sizes: vec![0; columns + 1],
            columns,
        }
    }

    /// Number of constraint columns in the matrix.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns
    }

    /// Total number of pool nodes, headers and root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Adds a row covering the given columns.
    ///
    /// Each body node is spliced into the bottom of its column's vertical
    /// ring, so a column's top-to-bottom order equals row insertion order;
    /// the search leans on that for deterministic first solutions. The row's
    /// nodes are linked into a horizontal ring among themselves, in the
    /// order given.
    ///
    /// # Panics
    ///
    /// Panics if `columns` is empty or names a column `>= column_count()`.
    pub fn add_row(&mut self, row: RowId, columns: &[ColumnId]) {
        assert!(!columns.is_empty(), "a matrix row must cover some column");
        let first = self.nodes.len() as NodeId;
        for &column in columns {
            assert!(
                (column as usize) < self.columns,
                "column {column} out of range"
            );
            let header = column + 1;
            let node = self.nodes.len() as NodeId;
            let above = self.nodes[header as usize].up;
            self.nodes.push(Node {
                left: node,
                right: node,
                up: above,
                down: header,
                column: header,
                row,
            });
            self.nodes[above as usize].down = node;
            self.nodes[header as usize].up = node;
            self.sizes[header as usize] += 1;
            if node != first {
                let last = self.nodes[first as usize].left;
                self.nodes[node as usize].left = last;
                self.nodes[node as usize].right = first;
                self.nodes[last as usize].right = node;
                self.nodes[first as usize].left = node;
            }
        }
    }

    #[inline]
    pub(crate) fn left(&self, node: NodeId) -> NodeId {
        self.nodes[node as usize].left
    }

    #[inline]
    pub(crate) fn right(&self, node: NodeId) -> NodeId {
        self.nodes[node as usize].right
    }

    #[inline]
    pub(crate) fn down(&self, node: NodeId) -> NodeId {
        self.nodes[node as usize].down
    }

    #[inline]
    pub(crate) fn column_of(&self, node: NodeId) -> NodeId {
        self.nodes[node as usize].column
    }

    #[inline]
    pub(crate) fn row_of(&self, node: NodeId) -> RowId {
        self.nodes[node as usize].row
    }

    #[inline]
    pub(crate) fn size_of(&self, header: NodeId) -> u32 {
        self.sizes[header as usize]
    }

    /// Unlinks the column anchored at `header` from the header ring, then
    /// unlinks every row intersecting that column from all other columns.
    ///
    /// The removed nodes keep their own link fields intact; that residue is
    /// exactly what [`Matrix::uncover`] replays backwards.
    pub(crate) fn cover(&mut self, header: NodeId) {
        let left = self.nodes[header as usize].left;
        let right = self.nodes[header as usize].right;
        self.nodes[left as usize].right = right;
        self.nodes[right as usize].left = left;

        let mut i = self.nodes[header as usize].down;
        while i != header {
            let mut j = self.nodes[i as usize].right;
            while j != i {
                let up = self.nodes[j as usize].up;
                let down = self.nodes[j as usize].down;
                self.nodes[up as usize].down = down;
                self.nodes[down as usize].up = up;
                self.sizes[self.nodes[j as usize].column as usize] -= 1;
                j = self.nodes[j as usize].right;
            }
            i = self.nodes[i as usize].down;
        }
    }

    /// Exact inverse of [`Matrix::cover`].
    ///
    /// Rows are walked bottom-to-top and, within a row, right-to-left, so
    /// every link written points at a node that has itself already been
    /// restored. Reversing either direction corrupts the matrix.
    pub(crate) fn uncover(&mut self, header: NodeId) {
        let mut i = self.nodes[header as usize].up;
        while i != header {
            let mut j = self.nodes[i as usize].left;
            while j != i {
                self.sizes[self.nodes[j as usize].column as usize] += 1;
                let up = self.nodes[j as usize].up;
                let down = self.nodes[j as usize].down;
                self.nodes[up as usize].down = j;
                self.nodes[down as usize].up = j;
                j = self.nodes[j as usize].left;
            }
            i = self.nodes[i as usize].up;
        }
        let left = self.nodes[header as usize].left;
        let right = self.nodes[header as usize].right;
        self.nodes[left as usize].right = header;
        self.nodes[right as usize].left = header;
    }

    /// Header of the uncovered column with the fewest live nodes, or `None`
    /// when no column is left uncovered (i.e. the instance is covered).
    ///
    /// Ties go to the first column encountered walking right from the root,
    /// which by construction is the lowest-numbered one.
    pub(crate) fn min_size_column(&self) -> Option<NodeId> {
        let mut header = self.right(ROOT);
        if header == ROOT {
            return None;
        }
        let mut best = header;
        let mut best_size = self.size_of(header);
        header = self.right(header);
        while header != ROOT {
            let size = self.size_of(header);
            if size < best_size {
                best = header;
                best_size = size;
            }
            header = self.right(header);
        }
        Some(best)
    }

    /// Checks that the matrix carries exactly its post-build linkage: every
    /// link pair is mutually consistent, the header ring holds all columns
    /// in ascending order, and each column's recorded size matches a walk of
    /// its vertical ring.
    ///
    /// A search that balances every cover with an uncover leaves this true;
    /// anything else is an engine bug, so debug builds assert it after each
    /// solve and the tests call it directly.
    #[must_use]
    pub fn fully_restored(&self) -> bool {
        for (id, node) in self.nodes.iter().enumerate() {
            let id = id as NodeId;
            if self.nodes[node.left as usize].right != id
                || self.nodes[node.right as usize].left != id
                || self.nodes[node.up as usize].down != id
                || self.nodes[node.down as usize].up != id
            {
                return false;
            }
        }

        let mut expected = 1;
        let mut header = self.right(ROOT);
        while header != ROOT {
            if header != expected {
                return false;
            }
            let mut live = 0;
            let mut node = self.down(header);
            while node != header {
                if self.column_of(node) != header {
                    return false;
                }
                live += 1;
                node = self.down(node);
            }
            if live != self.size_of(header) {
                return false;
            }
            expected += 1;
            header = self.right(header);
        }
        expected == self.columns as NodeId + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matrix_header_ring() {
        let matrix = Matrix::new(3);
        assert_eq!(matrix.column_count(), 3);
        assert_eq!(matrix.node_count(), 4);
        assert_eq!(matrix.right(ROOT), 1);
        assert_eq!(matrix.right(1), 2);
        assert_eq!(matrix.right(3), ROOT);
        assert_eq!(matrix.left(ROOT), 3);
        assert!(matrix.fully_restored());
    }

    #[test]
    fn add_row_splices_bottom_and_counts() {
        let mut matrix = Matrix::new(2);
        matrix.add_row(7, &[0, 1]);
        matrix.add_row(8, &[0]);

        assert_eq!(matrix.node_count(), 1 + 2 + 3);
        assert_eq!(matrix.size_of(1), 2);
        assert_eq!(matrix.size_of(2), 1);

        // Column 0 top-to-bottom equals insertion order.
        let first = matrix.down(1);
        let second = matrix.down(first);
        assert_eq!(matrix.row_of(first), 7);
        assert_eq!(matrix.row_of(second), 8);
        assert_eq!(matrix.down(second), 1);

        // The two nodes of row 7 form their own horizontal ring.
        let partner = matrix.right(first);
        assert_eq!(matrix.row_of(partner), 7);
        assert_eq!(matrix.right(partner), first);

        assert!(matrix.fully_restored());
    }

    #[test]
    fn cover_then_uncover_is_identity() {
        let mut matrix = Matrix::new(3);
        matrix.add_row(0, &[0, 1]);
        matrix.add_row(1, &[1, 2]);
        matrix.add_row(2, &[0, 2]);

        matrix.cover(1);
        assert!(!matrix.fully_restored());
        assert_eq!(matrix.right(ROOT), 2);
        // Row 0 intersected the covered column, so column 1 lost it.
        assert_eq!(matrix.size_of(2), 1);

        matrix.uncover(1);
        assert!(matrix.fully_restored());
        assert_eq!(matrix.size_of(2), 2);
    }

    #[test]
    fn nested_cover_uncover_restores() {
        let mut matrix = Matrix::new(4);
        matrix.add_row(0, &[0, 1, 2]);
        matrix.add_row(1, &[1, 3]);
        matrix.add_row(2, &[2, 3]);
        matrix.add_row(3, &[0, 3]);

        matrix.cover(1);
        matrix.cover(3);
        matrix.uncover(3);
        matrix.uncover(1);
        assert!(matrix.fully_restored());
    }

    #[test]
    fn min_size_column_breaks_ties_leftward() {
        let mut matrix = Matrix::new(3);
        matrix.add_row(0, &[0, 1]);
        matrix.add_row(1, &[1, 2]);
        matrix.add_row(2, &[0, 2]);
        // All sizes equal: the first header wins.
        assert_eq!(matrix.min_size_column(), Some(1));

        matrix.add_row(3, &[0]);
        // Columns 1 and 2 now tie at two; header 2 comes first.
        assert_eq!(matrix.min_size_column(), Some(2));
    }

    #[test]
    fn min_size_column_empty_ring() {
        let matrix = Matrix::new(0);
        assert_eq!(matrix.min_size_column(), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn add_row_rejects_unknown_column() {
        let mut matrix = Matrix::new(2);
        matrix.add_row(0, &[2]);
    }
}
