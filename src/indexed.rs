//! Face records: faces re-expressed as ids into a [`VertexIndex`].

use crate::float_types::{PLACEHOLDER_NORMAL, Real};
use crate::mesh::{Mesh, Polygon};
use crate::number_format::NumberFormat;
use crate::vertex_index::VertexIndex;
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// A face that survived deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Vertex ids in the original winding order.
    pub indices: Vec<usize>,
    /// Unit normal, or [`PLACEHOLDER_NORMAL`] for collinear corners.
    pub normal: Vector3<Real>,
}

/// A deduplicated vertex table plus the faces that still have as many
/// distinct corners as they were given.
#[derive(Debug, Clone)]
pub struct IndexedMesh {
    pub vertices: VertexIndex,
    pub faces: Vec<Face>,
    /// Faces rejected because corners collapsed or fewer than three were given.
    pub dropped: usize,
}

impl IndexedMesh {
    pub fn new(format: NumberFormat) -> Self {
        IndexedMesh {
            vertices: VertexIndex::new(format),
            faces: Vec::new(),
            dropped: 0,
        }
    }

    /// Index every face of `mesh` in face order.
    pub fn from_mesh(mesh: &Mesh, format: NumberFormat) -> Self {
        let mut indexed = IndexedMesh::new(format);
        for polygon in &mesh.polygons {
            indexed.push_polygon(polygon);
        }
        if indexed.dropped > 0 {
            debug!(dropped = indexed.dropped, "skipped degenerate faces");
        }
        indexed
    }

    pub fn push_polygon(&mut self, polygon: &Polygon) -> Option<usize> {
        self.push_face(&polygon.vertices)
    }

    /// Register the corners of a face and keep the face if none collapsed.
    ///
    /// Corners are registered in the vertex table even when the face itself
    /// is dropped. Returns the position of the new face record, if any.
    pub fn push_face(&mut self, corners: &[Point3<Real>]) -> Option<usize> {
        let indices: Vec<usize> = corners.iter().map(|p| self.vertices.insert(p)).collect();

        let distinct: HashSet<usize> = indices.iter().copied().collect();
        if indices.len() < 3 || distinct.len() < indices.len() {
            self.dropped += 1;
            return None;
        }

        let normal = Polygon::new(corners.to_vec())
            .newell_normal()
            .try_normalize(0.0)
            .unwrap_or_else(placeholder_normal);
        self.faces.push(Face { indices, normal });
        Some(self.faces.len() - 1)
    }

    /// Positions of a face's corners, in winding order.
    pub fn corners<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = &'a Point3<Real>> {
        let points = self.vertices.points();
        face.indices.iter().map(move |&id| &points[id])
    }

    /// Canonical keys of a face's corners, in winding order.
    pub fn corner_keys<'a>(&'a self, face: &'a Face) -> impl Iterator<Item = &'a str> {
        let keys = self.vertices.keys();
        face.indices.iter().map(move |&id| keys[id].as_str())
    }
}

pub(crate) fn placeholder_normal() -> Vector3<Real> {
    Vector3::from(PLACEHOLDER_NORMAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapsed_face_is_dropped_but_its_points_are_kept() {
        let mut indexed = IndexedMesh::new(NumberFormat::default());
        let kept = indexed.push_face(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]);
        let dropped = indexed.push_face(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 5.0),
        ]);
        assert_eq!(kept, Some(0));
        assert_eq!(dropped, None);
        assert_eq!(indexed.faces.len(), 1);
        assert_eq!(indexed.dropped, 1);
        assert_eq!(indexed.vertices.len(), 4);
    }

    #[test]
    fn faces_with_too_few_corners_are_dropped() {
        let mut indexed = IndexedMesh::new(NumberFormat::default());
        assert_eq!(
            indexed.push_face(&[Point3::origin(), Point3::new(1.0, 0.0, 0.0)]),
            None
        );
        assert!(indexed.faces.is_empty());
    }

    #[test]
    fn normals_are_unit_or_placeholder() {
        let mut indexed = IndexedMesh::new(NumberFormat::default());
        indexed.push_face(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]);
        indexed.push_face(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]);
        assert_eq!(indexed.faces[0].normal, Vector3::z());
        assert_eq!(indexed.faces[1].normal, placeholder_normal());
    }

    #[test]
    fn corners_resolve_through_the_index() {
        let mesh = Mesh::from_faces([vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]]);
        let indexed = IndexedMesh::from_mesh(&mesh, NumberFormat::default());
        let face = &indexed.faces[0];
        assert_eq!(face.indices, vec![0, 1, 2, 3]);
        let keys: Vec<&str> = indexed.corner_keys(face).collect();
        assert_eq!(keys, vec!["0 0 0", "1 0 0", "1 1 0", "0 1 0"]);
        assert_eq!(indexed.corners(face).count(), 4);
    }
}
