//! The seam to an exact-arithmetic boundary-representation kernel.
//!
//! A [`Solid`] only needs to answer two questions: is its boundary a simple
//! closed 2-manifold, and what does that boundary look like as facet loops.
//! [`Polyhedron`] is both the conversion result and a usable `Solid` in its
//! own right for callers without an exact kernel.

use crate::errors::ConversionError;
use crate::float_types::Real;
use crate::mesh::{Mesh, Polygon};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

/// A point as handed out by a kernel.
///
/// Kernels with exact coordinates override the predicates so that
/// collinearity and normals are decided before rounding.
pub trait KernelPoint: Clone {
    /// Nearest finite-precision position.
    fn to_point(&self) -> Point3<Real>;

    /// True when the three points lie on one line.
    fn collinear(a: &Self, b: &Self, c: &Self) -> bool {
        let (a, b, c) = (a.to_point(), b.to_point(), c.to_point());
        (b - a).cross(&(c - a)) == Vector3::zeros()
    }

    /// Unit normal of the non-collinear triangle `a`, `b`, `c`.
    fn unit_normal(a: &Self, b: &Self, c: &Self) -> Vector3<Real> {
        let (a, b, c) = (a.to_point(), b.to_point(), c.to_point());
        (b - a).cross(&(c - a)).normalize()
    }
}

impl KernelPoint for Point3<Real> {
    fn to_point(&self) -> Point3<Real> {
        *self
    }
}

/// An exact solid produced by the boolean evaluator.
pub trait Solid {
    type Point: KernelPoint;

    /// Whether the boundary is a simple closed 2-manifold.
    fn is_simple(&self) -> bool;

    /// Native conversion to closed facet loops.
    ///
    /// Kernels report internal assertion failures as
    /// [`ConversionError::KernelAssertion`] instead of unwinding.
    fn to_polyhedron(&self) -> Result<Polyhedron<Self::Point>, ConversionError>;

    /// Robust conversion to a plain polygon mesh.
    ///
    /// Kernels with a dedicated polygon-set conversion override this; the
    /// default goes through [`Solid::to_polyhedron`].
    fn to_mesh(&self) -> Result<Mesh, ConversionError> {
        Ok(self.to_polyhedron()?.round_to_mesh())
    }
}

/// Boundary as a list of closed facet loops.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron<P = Point3<Real>> {
    pub facets: Vec<Vec<P>>,
}

impl<P: KernelPoint> Polyhedron<P> {
    pub const fn new(facets: Vec<Vec<P>>) -> Self {
        Polyhedron { facets }
    }

    /// Round every facet to finite precision.
    pub fn round_to_mesh(&self) -> Mesh {
        Mesh {
            polygons: self
                .facets
                .iter()
                .map(|facet| Polygon::new(facet.iter().map(KernelPoint::to_point).collect()))
                .collect(),
        }
    }

    /// Checks if the boundary is a closed, consistently oriented 2-manifold
    ///
    /// ### Returns
    /// Returns `true` if every directed edge appears exactly once and its
    /// reverse appears exactly once.
    ///
    /// ### Notes:
    /// - Uses a `QUANTIZATION_FACTOR` for `Real` coordinates
    pub fn is_manifold(&self) -> bool {
        const QUANTIZATION_FACTOR: Real = 1e7;

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        struct QuantizedPoint(i64, i64, i64);

        fn quantize_point(p: &Point3<Real>) -> QuantizedPoint {
            QuantizedPoint(
                (p.x * QUANTIZATION_FACTOR).round() as i64,
                (p.y * QUANTIZATION_FACTOR).round() as i64,
                (p.z * QUANTIZATION_FACTOR).round() as i64,
            )
        }

        let mut edge_counts: HashMap<(QuantizedPoint, QuantizedPoint), u32> = HashMap::new();

        for facet in &self.facets {
            if facet.len() < 3 {
                return false;
            }
            let ring: Vec<QuantizedPoint> =
                facet.iter().map(|p| quantize_point(&p.to_point())).collect();
            for (i, &start) in ring.iter().enumerate() {
                let end = ring[(i + 1) % ring.len()];
                if start == end {
                    return false;
                }
                *edge_counts.entry((start, end)).or_insert(0) += 1;
            }
        }

        edge_counts.iter().all(|(&(start, end), &count)| {
            count == 1 && edge_counts.get(&(end, start)) == Some(&1)
        })
    }
}

impl<P: KernelPoint> Solid for Polyhedron<P> {
    type Point = P;

    fn is_simple(&self) -> bool {
        self.is_manifold()
    }

    fn to_polyhedron(&self) -> Result<Polyhedron<P>, ConversionError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tetrahedron() -> Polyhedron {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let d = Point3::new(0.0, 0.0, 1.0);
        Polyhedron::new(vec![
            vec![a, c, b],
            vec![a, b, d],
            vec![b, c, d],
            vec![c, a, d],
        ])
    }

    #[test]
    fn closed_tetrahedron_is_simple() {
        assert!(tetrahedron().is_simple());
    }

    #[test]
    fn open_surface_is_not_simple() {
        let mut open = tetrahedron();
        open.facets.pop();
        assert!(!open.is_simple());
    }

    #[test]
    fn flipped_facet_is_not_simple() {
        let mut flipped = tetrahedron();
        flipped.facets[0].reverse();
        assert!(!flipped.is_simple());
    }

    #[test]
    fn default_mesh_conversion_rounds_facets() {
        let mesh = Solid::to_mesh(&tetrahedron()).expect("conversion of a plain polyhedron");
        assert_eq!(mesh.polygons.len(), 4);
        assert!(mesh.is_triangulated());
    }

    #[test]
    fn float_predicates() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 1.0, 1.0);
        let c = Point3::new(2.0, 2.0, 2.0);
        assert!(KernelPoint::collinear(&a, &b, &c));
        let x = Point3::new(1.0, 0.0, 0.0);
        let y = Point3::new(0.0, 1.0, 0.0);
        let n = KernelPoint::unit_normal(&a, &x, &y);
        assert_eq!(n, Vector3::z());
    }
}
