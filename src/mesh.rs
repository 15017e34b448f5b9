//! `Mesh` and `Polygon`: the polygon soup handed over by the evaluator.
//!
//! Faces do not share vertex storage; every polygon carries its own copy of
//! its corner positions, in the order the producer emitted them.

use crate::float_types::Real;
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Point3, Vector3};

/// A planar face given as an ordered loop of corner positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point3<Real>>,
}

impl Polygon {
    pub const fn new(vertices: Vec<Point3<Real>>) -> Self {
        Polygon { vertices }
    }

    /// Un-normalized face normal computed with Newell's method.
    ///
    /// Zero for faces whose corners are all collinear or coincident.
    pub fn newell_normal(&self) -> Vector3<Real> {
        let mut normal = Vector3::zeros();
        let n = self.vertices.len();
        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % n];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal
    }

    /// Split this face into triangles covering the same area.
    ///
    /// Triangles keep the winding of the original loop. Faces with fewer than
    /// three corners yield nothing; triangles are returned unchanged.
    pub fn triangulate(&self) -> Vec<[Point3<Real>; 3]> {
        let n = self.vertices.len();
        if n < 3 {
            return Vec::new();
        }
        if n == 3 {
            return vec![[self.vertices[0], self.vertices[1], self.vertices[2]]];
        }

        let normal = self.newell_normal();
        let Some(unit) = normal.try_normalize(0.0) else {
            return self.fan();
        };

        // Ear clipping runs on the ring without repeated corners
        let ring = self.distinct_ring();
        if ring.len() < 3 {
            return self.fan();
        }
        if ring.len() == 3 {
            return vec![[
                self.vertices[ring[0]],
                self.vertices[ring[1]],
                self.vertices[ring[2]],
            ]];
        }
        let m = ring.len();
        let (u, v) = build_orthonormal_basis(unit);

        // Project onto the face plane and ear-clip in 2D
        let origin = self.vertices[ring[0]];
        let mut coords = Vec::with_capacity(m);
        for &i in &ring {
            let offset = self.vertices[i] - origin;
            let (x, y) = (offset.dot(&u), offset.dot(&v));
            if !x.is_finite() || !y.is_finite() {
                return self.fan();
            }
            coords.push(Coord { x, y });
        }
        let triangulation =
            GeoPolygon::new(LineString::new(coords), Vec::new()).earcut_triangles_raw();

        // The ring is closed by repeating the first coordinate, so index `m`
        // refers back to corner 0.
        let mut triangles = Vec::with_capacity(m - 2);
        for tri in triangulation.triangle_indices.chunks_exact(3) {
            let mut triangle = [
                self.vertices[ring[tri[0] % m]],
                self.vertices[ring[tri[1] % m]],
                self.vertices[ring[tri[2] % m]],
            ];
            let winding = (triangle[1] - triangle[0]).cross(&(triangle[2] - triangle[0]));
            if winding.dot(&normal) < 0.0 {
                triangle.swap(1, 2);
            }
            triangles.push(triangle);
        }

        if triangles.is_empty() {
            self.fan()
        } else {
            triangles
        }
    }

    /// Corner positions with consecutive repeats removed, including a last
    /// corner that repeats the first.
    fn distinct_ring(&self) -> Vec<usize> {
        let mut ring: Vec<usize> = Vec::with_capacity(self.vertices.len());
        for (i, p) in self.vertices.iter().enumerate() {
            if ring.last().is_none_or(|&last| self.vertices[last] != *p) {
                ring.push(i);
            }
        }
        while ring.len() > 1
            && ring
                .last()
                .is_some_and(|&last| self.vertices[last] == self.vertices[ring[0]])
        {
            ring.pop();
        }
        ring
    }

    /// Fan triangulation anchored at the first corner.
    fn fan(&self) -> Vec<[Point3<Real>; 3]> {
        (1..self.vertices.len() - 1)
            .map(|i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
            .collect()
    }
}

/// Two unit vectors spanning the plane perpendicular to `n`, oriented so
/// that `u x v` points along `n`.
pub fn build_orthonormal_basis(n: Vector3<Real>) -> (Vector3<Real>, Vector3<Real>) {
    let n = n.normalize();

    let other = if n.x.abs() < n.y.abs() && n.x.abs() < n.z.abs() {
        Vector3::x()
    } else if n.y.abs() < n.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    let v = n.cross(&other).normalize();
    let u = v.cross(&n).normalize();

    (u, v)
}

/// A polygon soup, possibly non-manifold, possibly with repeated points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub const fn new() -> Self {
        Mesh {
            polygons: Vec::new(),
        }
    }

    /// Build a Mesh from raw corner lists, one list per face.
    pub fn from_faces<I, F>(faces: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = Point3<Real>>,
    {
        Mesh {
            polygons: faces
                .into_iter()
                .map(|face| Polygon::new(face.into_iter().collect()))
                .collect(),
        }
    }

    /// True when every face already has exactly three corners.
    pub fn is_triangulated(&self) -> bool {
        self.polygons.iter().all(|p| p.vertices.len() == 3)
    }

    /// Triangulate each polygon in the Mesh returning a Mesh containing triangles
    pub fn triangulate(&self) -> Mesh {
        let polygons = self
            .polygons
            .iter()
            .flat_map(|poly| poly.triangulate())
            .map(|tri| Polygon::new(tri.to_vec()))
            .collect();
        Mesh { polygons }
    }
}
