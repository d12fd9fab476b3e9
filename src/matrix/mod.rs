//! Sparse boundary matrices over GF(2).
//!
//! Columns and rows are both indexed by filtration index. The builder turns
//! a filtration into its boundary matrix, the reducer runs the standard
//! persistence reduction on it.

pub mod builder;
pub mod column;
pub mod reduce;

pub use builder::build_boundary_matrix;
pub use column::{symmetric_difference, symmetric_difference_into, SparseColumn};
pub use reduce::{reduce, reduce_with_stats, PivotMap, ReduceStats};

use std::slice;

/// A sequence of sparse columns, one per filtration index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryMatrix {
    columns: Vec<SparseColumn>,
}

impl BoundaryMatrix {
    pub fn from_columns(columns: Vec<SparseColumn>) -> Self {
        Self { columns }
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[inline]
    pub fn column(&self, j: usize) -> &SparseColumn {
        &self.columns[j]
    }

    pub fn columns(&self) -> &[SparseColumn] {
        &self.columns
    }

    pub fn iter(&self) -> slice::Iter<'_, SparseColumn> {
        self.columns.iter()
    }

    pub fn into_columns(self) -> Vec<SparseColumn> {
        self.columns
    }

    /// Total number of nonzero entries.
    pub fn nnz(&self) -> usize {
        self.columns.iter().map(SparseColumn::len).sum()
    }

    /// One past the largest row index present, or 0 for an all-zero matrix.
    pub fn row_bound(&self) -> usize {
        self.columns
            .iter()
            .filter_map(SparseColumn::low)
            .max()
            .map_or(0, |low| low + 1)
    }

    /// Returns true when no two nonzero columns share a low.
    pub fn is_reduced(&self) -> bool {
        let mut owned = vec![false; self.row_bound()];
        for low in self.columns.iter().filter_map(SparseColumn::low) {
            if owned[low] {
                return false;
            }
            owned[low] = true;
        }
        true
    }
}

impl<'a> IntoIterator for &'a BoundaryMatrix {
    type Item = &'a SparseColumn;
    type IntoIter = slice::Iter<'a, SparseColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
