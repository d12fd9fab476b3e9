//! Sparse GF(2) columns.
//!
//! A column is the set of rows holding a 1, stored as a strictly increasing
//! vector of filtration indices. Column addition over GF(2) is the symmetric
//! difference of the two sets, computed with a linear two-pointer merge.

/// Symmetric difference of two sorted, duplicate-free index slices.
///
/// Equal heads cancel (1 + 1 = 0), the smaller head is emitted. The output
/// is sorted, duplicate-free, and never longer than `a.len() + b.len()`.
pub fn symmetric_difference(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    symmetric_difference_into(a, b, &mut out);
    out
}

/// Symmetric difference written into a caller-provided buffer.
///
/// `out` is cleared first; its capacity is reused.
pub fn symmetric_difference_into(a: &[usize], b: &[usize], out: &mut Vec<usize>) {
    out.clear();
    out.reserve(a.len() + b.len());

    let (mut p, mut q) = (0, 0);
    while p < a.len() && q < b.len() {
        let (x, y) = (a[p], b[q]);
        if x == y {
            p += 1;
            q += 1;
        } else if x < y {
            out.push(x);
            p += 1;
        } else {
            out.push(y);
            q += 1;
        }
    }
    out.extend_from_slice(&a[p..]);
    out.extend_from_slice(&b[q..]);
}

/// One sparse column of a boundary matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparseColumn {
    rows: Vec<usize>,
}

impl SparseColumn {
    /// Create an empty column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a column from rows that are already strictly increasing.
    pub fn from_sorted(rows: Vec<usize>) -> Self {
        debug_assert!(
            rows.windows(2).all(|w| w[0] < w[1]),
            "column rows must be strictly increasing"
        );
        Self { rows }
    }

    /// Create a column from rows in any order.
    ///
    /// Rows are summed over GF(2): a row listed an even number of times
    /// cancels out, an odd number of times leaves a single entry.
    pub fn from_unsorted(mut rows: Vec<usize>) -> Self {
        rows.sort_unstable();

        let mut kept = 0;
        let mut i = 0;
        while i < rows.len() {
            let mut run = 1;
            while i + run < rows.len() && rows[i + run] == rows[i] {
                run += 1;
            }
            if run % 2 == 1 {
                rows[kept] = rows[i];
                kept += 1;
            }
            i += run;
        }
        rows.truncate(kept);

        Self { rows }
    }

    /// The column's low: its largest row index.
    #[inline]
    pub fn low(&self) -> Option<usize> {
        self.rows.last().copied()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Add `other` into this column over GF(2).
    ///
    /// The merge result is built in `scratch` and swapped in, so repeated
    /// additions reuse the same two allocations.
    #[inline]
    pub fn add_assign(&mut self, other: &SparseColumn, scratch: &mut Vec<usize>) {
        symmetric_difference_into(&self.rows, &other.rows, scratch);
        std::mem::swap(&mut self.rows, scratch);
    }

    pub fn into_rows(self) -> Vec<usize> {
        self.rows
    }
}
