//! Core simplex type for filtration cells.

use std::fmt;

/// Vertex label as it appears in a filtration file.
pub type Vertex = u32;

/// A simplex tagged with the filtration time at which it appears.
///
/// Vertices are kept strictly increasing, so two simplices are the same cell
/// exactly when their vertex slices are equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Simplex {
    pub time: f64,
    pub dimension: usize,
    pub vertices: Vec<Vertex>,
}

impl Simplex {
    /// Create a simplex with an explicit dimension.
    ///
    /// Vertices are sorted and deduplicated. The dimension is kept as given
    /// even when it disagrees with the vertex count; the loader decides
    /// whether that is acceptable.
    pub fn new(time: f64, dimension: usize, mut vertices: Vec<Vertex>) -> Self {
        vertices.sort_unstable();
        vertices.dedup();
        Self {
            time,
            dimension,
            vertices,
        }
    }

    /// Create a simplex whose dimension is derived from its vertex count.
    pub fn from_vertices(time: f64, vertices: Vec<Vertex>) -> Self {
        let mut simplex = Self::new(time, 0, vertices);
        simplex.dimension = simplex.vertices.len().saturating_sub(1);
        simplex
    }

    /// Returns true for 0-dimensional cells, which have no boundary.
    #[inline]
    pub fn is_vertex(&self) -> bool {
        self.dimension == 0
    }

    /// Number of codimension-1 faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        if self.vertices.len() > 1 {
            self.vertices.len()
        } else {
            0
        }
    }

    /// Write the face obtained by deleting vertex `k` into `face`.
    ///
    /// Faces come out in vertex-deletion order, which is not the order in
    /// which they sit in a filtration.
    #[inline]
    pub fn write_face(&self, k: usize, face: &mut Vec<Vertex>) {
        face.clear();
        face.extend_from_slice(&self.vertices[..k]);
        face.extend_from_slice(&self.vertices[k + 1..]);
    }
}

/// Formats in the filtration file layout: `time dimension v1 v2 ...`.
impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.time, self.dimension)?;
        for v in &self.vertices {
            write!(f, " {}", v)?;
        }
        Ok(())
    }
}
