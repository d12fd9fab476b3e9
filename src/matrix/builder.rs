//! Boundary matrix construction.

use super::column::SparseColumn;
use super::BoundaryMatrix;
use crate::filtration::Filtration;
use crate::simplex::Vertex;
use rustc_hash::FxHashMap;

/// Build the boundary matrix of a time-sorted filtration.
///
/// Column `j` lists the filtration indices of the codimension-1 faces of
/// simplex `j`, sorted ascending. Vertices get empty columns. A face that
/// is not in the filtration is left out of the column; a filtration where
/// every face precedes its cofaces never hits that case.
///
/// When the same vertex set appears more than once, lookups resolve to its
/// last occurrence.
pub fn build_boundary_matrix(filtration: &Filtration) -> BoundaryMatrix {
    let mut index_of: FxHashMap<&[Vertex], usize> = FxHashMap::default();
    index_of.reserve(filtration.len());
    for (i, simplex) in filtration.iter().enumerate() {
        index_of.insert(simplex.vertices.as_slice(), i);
    }

    let mut face = Vec::new();
    let columns = filtration
        .iter()
        .map(|simplex| {
            if simplex.is_vertex() {
                return SparseColumn::new();
            }
            let mut rows = Vec::with_capacity(simplex.face_count());
            for k in 0..simplex.face_count() {
                simplex.write_face(k, &mut face);
                if let Some(&i) = index_of.get(face.as_slice()) {
                    rows.push(i);
                }
            }
            // Deletion order follows the vertices, not the filtration
            SparseColumn::from_unsorted(rows)
        })
        .collect();

    BoundaryMatrix::from_columns(columns)
}
