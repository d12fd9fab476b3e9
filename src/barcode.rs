//! Barcode extraction from a reduced boundary matrix.
//!
//! A nonempty reduced column `j` with low `i` is a pair: the feature created
//! by simplex `i` is killed by simplex `j`. Every index that is neither such
//! a low nor such a column creates a feature that never dies.

use crate::filtration::Filtration;
use crate::matrix::BoundaryMatrix;
use std::fmt;
use std::slice;

/// A persistence pair in filtration indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistencePair {
    pub dimension: usize,
    pub birth: usize,
    /// None when the feature never dies.
    pub death: Option<usize>,
}

impl PersistencePair {
    /// Ordering key: dimension, then birth, then death with unpaired last.
    #[inline]
    fn sort_key(&self) -> (usize, usize, usize) {
        (self.dimension, self.birth, self.death.unwrap_or(usize::MAX))
    }

    #[inline]
    pub fn is_essential(&self) -> bool {
        self.death.is_none()
    }
}

/// One bar: a feature of some dimension alive on `[birth, death)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarcodeInterval {
    pub dimension: usize,
    pub birth: f64,
    /// `f64::INFINITY` for features that never die.
    pub death: f64,
}

impl BarcodeInterval {
    pub fn new(dimension: usize, birth: f64, death: f64) -> Self {
        Self {
            dimension,
            birth,
            death,
        }
    }

    /// Lifetime of the feature; infinite for essential features.
    pub fn persistence(&self) -> f64 {
        if self.is_essential() {
            f64::INFINITY
        } else {
            self.death - self.birth
        }
    }

    #[inline]
    pub fn is_essential(&self) -> bool {
        self.death == f64::INFINITY
    }
}

impl fmt::Display for BarcodeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_essential() {
            write!(f, "[{}, inf) dim {}", self.birth, self.dimension)
        } else {
            write!(f, "[{}, {}) dim {}", self.birth, self.death, self.dimension)
        }
    }
}

/// The sorted collection of bars of a filtration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Barcode {
    intervals: Vec<BarcodeInterval>,
}

impl Barcode {
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn intervals(&self) -> &[BarcodeInterval] {
        &self.intervals
    }

    pub fn iter(&self) -> slice::Iter<'_, BarcodeInterval> {
        self.intervals.iter()
    }

    /// Bars of dimension `d`.
    pub fn dimension(&self, d: usize) -> impl Iterator<Item = &BarcodeInterval> {
        self.intervals.iter().filter(move |bar| bar.dimension == d)
    }

    /// Number of bars that never die.
    pub fn essential_count(&self) -> usize {
        self.intervals.iter().filter(|bar| bar.is_essential()).count()
    }

    /// Betti numbers of the complete complex, indexed by dimension.
    ///
    /// Entry `d` counts the essential bars of dimension `d`. The vector runs
    /// up to the largest dimension with any bar.
    pub fn betti_numbers(&self) -> Vec<usize> {
        let Some(top) = self.intervals.iter().map(|bar| bar.dimension).max() else {
            return Vec::new();
        };
        let mut betti = vec![0; top + 1];
        for bar in self.intervals.iter().filter(|bar| bar.is_essential()) {
            betti[bar.dimension] += 1;
        }
        betti
    }

    pub fn into_intervals(self) -> Vec<BarcodeInterval> {
        self.intervals
    }
}

impl<'a> IntoIterator for &'a Barcode {
    type Item = &'a BarcodeInterval;
    type IntoIter = slice::Iter<'a, BarcodeInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

/// Pair births with deaths from a reduced matrix.
///
/// `reduced` must have one column per simplex of `filtration`. The result
/// is sorted by dimension, birth index, then death index with unpaired
/// features last.
pub fn persistence_pairs(reduced: &BoundaryMatrix, filtration: &Filtration) -> Vec<PersistencePair> {
    debug_assert_eq!(reduced.len(), filtration.len());

    let n = filtration.len();
    let mut paired = vec![false; n];
    let mut pairs = Vec::with_capacity(n);

    for (j, column) in reduced.iter().enumerate() {
        if let Some(low) = column.low() {
            pairs.push(PersistencePair {
                dimension: filtration.dimension(low),
                birth: low,
                death: Some(j),
            });
            paired[low] = true;
            paired[j] = true;
        }
    }

    for i in (0..n).filter(|&i| !paired[i]) {
        pairs.push(PersistencePair {
            dimension: filtration.dimension(i),
            birth: i,
            death: None,
        });
    }

    pairs.sort_unstable_by_key(PersistencePair::sort_key);
    pairs
}

/// Extract the barcode of a filtration from its reduced boundary matrix.
pub fn extract_barcodes(reduced: &BoundaryMatrix, filtration: &Filtration) -> Barcode {
    let intervals = persistence_pairs(reduced, filtration)
        .into_iter()
        .map(|pair| {
            let death = pair.death.map_or(f64::INFINITY, |d| filtration.time(d));
            BarcodeInterval::new(pair.dimension, filtration.time(pair.birth), death)
        })
        .collect();

    Barcode { intervals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{build_boundary_matrix, reduce};
    use crate::simplex::Simplex;

    fn hollow_triangle() -> Filtration {
        Filtration::from_simplices(vec![
            Simplex::from_vertices(0.0, vec![0]),
            Simplex::from_vertices(0.0, vec![1]),
            Simplex::from_vertices(0.0, vec![2]),
            Simplex::from_vertices(1.0, vec![0, 1]),
            Simplex::from_vertices(1.0, vec![1, 2]),
            Simplex::from_vertices(1.0, vec![0, 2]),
        ])
    }

    fn barcode_of(filtration: &Filtration) -> Barcode {
        let reduced = reduce(build_boundary_matrix(filtration));
        extract_barcodes(&reduced, filtration)
    }

    #[test]
    fn test_pairs_sorted_with_unpaired_last() {
        let f = hollow_triangle();
        let reduced = reduce(build_boundary_matrix(&f));
        let pairs = persistence_pairs(&reduced, &f);

        assert_eq!(
            pairs,
            vec![
                PersistencePair { dimension: 0, birth: 0, death: None },
                PersistencePair { dimension: 0, birth: 1, death: Some(3) },
                PersistencePair { dimension: 0, birth: 2, death: Some(4) },
                PersistencePair { dimension: 1, birth: 5, death: None },
            ]
        );
    }

    #[test]
    fn test_hollow_triangle_barcode() {
        let barcode = barcode_of(&hollow_triangle());

        assert_eq!(barcode.len(), 4);
        assert_eq!(barcode.essential_count(), 2);
        assert_eq!(barcode.betti_numbers(), vec![1, 1]);

        let loops: Vec<_> = barcode.dimension(1).collect();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].birth, 1.0);
        assert!(loops[0].is_essential());
    }

    #[test]
    fn test_interval_persistence() {
        assert_eq!(BarcodeInterval::new(0, 0.5, 2.0).persistence(), 1.5);
        assert_eq!(
            BarcodeInterval::new(1, 1.0, f64::INFINITY).persistence(),
            f64::INFINITY
        );
    }

    #[test]
    fn test_interval_display() {
        assert_eq!(BarcodeInterval::new(0, 0.0, 1.0).to_string(), "[0, 1) dim 0");
        assert_eq!(
            BarcodeInterval::new(1, 1.0, f64::INFINITY).to_string(),
            "[1, inf) dim 1"
        );
    }

    #[test]
    fn test_empty_barcode() {
        let barcode = barcode_of(&Filtration::new());
        assert!(barcode.is_empty());
        assert!(barcode.betti_numbers().is_empty());
    }
}
