//! Standard persistence reduction over GF(2).
//!
//! Columns are processed left to right. While the low of column `j` is
//! already owned by an earlier column `i`, column `i` is added into column
//! `j`. Each addition cancels the shared low and leaves a strictly smaller
//! one (or an empty column), so the loop terminates. When it stops, a
//! nonempty column `j` takes ownership of its low.

use super::column::SparseColumn;
use super::BoundaryMatrix;
use std::fmt;

/// Marker for a row with no owning column.
const UNOWNED: usize = usize::MAX;

/// Row -> owning column, as a dense array over row indices.
///
/// At most one column owns any row.
#[derive(Debug, Clone)]
pub struct PivotMap {
    owners: Vec<usize>,
}

impl PivotMap {
    /// Create a map for rows `0..rows`, all unowned.
    pub fn new(rows: usize) -> Self {
        Self {
            owners: vec![UNOWNED; rows],
        }
    }

    /// Column owning `row`, if any.
    #[inline]
    pub fn owner(&self, row: usize) -> Option<usize> {
        match self.owners.get(row) {
            Some(&col) if col != UNOWNED => Some(col),
            _ => None,
        }
    }

    /// Record `column` as the owner of `row`.
    #[inline]
    pub fn claim(&mut self, row: usize, column: usize) {
        debug_assert_eq!(self.owners[row], UNOWNED, "row {} already owned", row);
        self.owners[row] = column;
    }

    /// Number of owned rows.
    pub fn len(&self) -> usize {
        self.owners.iter().filter(|&&col| col != UNOWNED).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counters from one reduction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReduceStats {
    pub columns: usize,
    pub column_additions: usize,
    pub pivots: usize,
}

impl fmt::Display for ReduceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Columns: {}, Additions: {}, Pivots: {}",
            self.columns, self.column_additions, self.pivots
        )
    }
}

/// Reduce a boundary matrix, returning the reduced matrix.
pub fn reduce(matrix: BoundaryMatrix) -> BoundaryMatrix {
    reduce_with_stats(matrix).0
}

/// Reduce a boundary matrix and report what the reduction did.
pub fn reduce_with_stats(matrix: BoundaryMatrix) -> (BoundaryMatrix, ReduceStats) {
    let mut pivots = PivotMap::new(matrix.row_bound());
    let mut columns = matrix.into_columns();
    let mut scratch = Vec::new();
    let mut stats = ReduceStats {
        columns: columns.len(),
        ..Default::default()
    };

    for j in 0..columns.len() {
        // Only columns left of j are read; they are final.
        let (reduced, rest) = columns.split_at_mut(j);
        let column: &mut SparseColumn = &mut rest[0];

        while let Some(low) = column.low() {
            let Some(i) = pivots.owner(low) else {
                break;
            };
            column.add_assign(&reduced[i], &mut scratch);
            stats.column_additions += 1;
        }

        if let Some(low) = column.low() {
            pivots.claim(low, j);
            stats.pivots += 1;
        }
    }

    (BoundaryMatrix::from_columns(columns), stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(columns: Vec<Vec<usize>>) -> BoundaryMatrix {
        BoundaryMatrix::from_columns(columns.into_iter().map(SparseColumn::from_sorted).collect())
    }

    fn filled_triangle() -> BoundaryMatrix {
        matrix(vec![
            vec![],
            vec![],
            vec![],
            vec![0, 1],
            vec![1, 2],
            vec![0, 2],
            vec![3, 4, 5],
        ])
    }

    #[test]
    fn test_pivot_map() {
        let mut pivots = PivotMap::new(4);
        assert!(pivots.is_empty());
        assert_eq!(pivots.owner(2), None);
        assert_eq!(pivots.owner(10), None);

        pivots.claim(2, 5);
        assert_eq!(pivots.owner(2), Some(5));
        assert_eq!(pivots.len(), 1);
    }

    #[test]
    fn test_reduce_filled_triangle() {
        let (reduced, stats) = reduce_with_stats(filled_triangle());

        assert_eq!(reduced.column(3).rows(), &[0, 1]);
        assert_eq!(reduced.column(4).rows(), &[1, 2]);
        // {0,2} + {1,2} = {0,1}, + {0,1} = empty
        assert!(reduced.column(5).is_empty());
        assert_eq!(reduced.column(6).rows(), &[3, 4, 5]);

        assert_eq!(stats.columns, 7);
        assert_eq!(stats.column_additions, 2);
        assert_eq!(stats.pivots, 3);
        assert!(reduced.is_reduced());
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let once = reduce(filled_triangle());
        let (twice, stats) = reduce_with_stats(once.clone());
        assert_eq!(once, twice);
        assert_eq!(stats.column_additions, 0);
    }

    #[test]
    fn test_reduce_empty() {
        let (reduced, stats) = reduce_with_stats(BoundaryMatrix::default());
        assert!(reduced.is_empty());
        assert_eq!(stats, ReduceStats::default());
    }

    #[test]
    fn test_reduce_preserves_shape() {
        let m = filled_triangle();
        let n = m.len();
        assert_eq!(reduce(m).len(), n);
    }
}
