//! Test support library
//! Provides geometry builders, small kernels and log capture for tests.
#![allow(dead_code)]

use csgexport::{
    ConversionError, Mesh, Outline, OutlineSet, Polyhedron, Solid, boundary, float_types::Real,
};
use nalgebra::{Point2, Point3};
use std::io;
use std::sync::{Arc, Mutex};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn p3(x: Real, y: Real, z: Real) -> Point3<Real> {
    Point3::new(x, y, z)
}

/// Helper to make a mesh from plain coordinate arrays, one slice per face.
pub fn mesh_from_arrays(faces: &[&[[Real; 3]]]) -> Mesh {
    Mesh::from_faces(
        faces
            .iter()
            .map(|face| face.iter().map(|p| p3(p[0], p[1], p[2])).collect::<Vec<_>>()),
    )
}

/// Facet loops of the unit cube, counter-clockwise seen from outside.
pub fn unit_cube_facets() -> Vec<Vec<Point3<Real>>> {
    let v = |x, y, z| p3(x, y, z);
    vec![
        vec![v(0., 0., 0.), v(0., 1., 0.), v(1., 1., 0.), v(1., 0., 0.)],
        vec![v(0., 0., 1.), v(1., 0., 1.), v(1., 1., 1.), v(0., 1., 1.)],
        vec![v(0., 0., 0.), v(1., 0., 0.), v(1., 0., 1.), v(0., 0., 1.)],
        vec![v(0., 1., 0.), v(0., 1., 1.), v(1., 1., 1.), v(1., 1., 0.)],
        vec![v(0., 0., 0.), v(0., 0., 1.), v(0., 1., 1.), v(0., 1., 0.)],
        vec![v(1., 0., 0.), v(1., 1., 0.), v(1., 1., 1.), v(1., 0., 1.)],
    ]
}

/// Unit cube with six quad faces.
pub fn unit_cube_mesh() -> Mesh {
    Mesh::from_faces(unit_cube_facets())
}

/// Corner tetrahedron at the origin, outward oriented.
pub fn tetrahedron() -> Polyhedron {
    let (a, b, c, d) = (
        p3(0., 0., 0.),
        p3(1., 0., 0.),
        p3(0., 1., 0.),
        p3(0., 0., 1.),
    );
    Polyhedron::new(vec![
        vec![a, c, b],
        vec![a, b, d],
        vec![a, d, c],
        vec![b, c, d],
    ])
}

/// The tetrahedron with its slanted facet removed.
pub fn open_tetrahedron() -> Polyhedron {
    let mut solid = tetrahedron();
    solid.facets.pop();
    solid
}

/// Kernel whose every conversion trips an internal assertion.
#[derive(Debug)]
pub struct FailingSolid;

impl Solid for FailingSolid {
    type Point = Point3<Real>;

    fn is_simple(&self) -> bool {
        true
    }

    fn to_polyhedron(&self) -> Result<Polyhedron, ConversionError> {
        Err(ConversionError::KernelAssertion("facet cycle broken".into()))
    }
}

/// Wraps a solid whose kernel has no polygon-set conversion.
#[derive(Debug)]
pub struct NativeOnly<K>(pub K);

impl<K: Solid> Solid for NativeOnly<K> {
    type Point = K::Point;

    fn is_simple(&self) -> bool {
        self.0.is_simple()
    }

    fn to_polyhedron(&self) -> Result<Polyhedron<K::Point>, ConversionError> {
        self.0.to_polyhedron()
    }

    fn to_mesh(&self) -> Result<Mesh, ConversionError> {
        Err(boundary::unsupported("polygon set conversion"))
    }
}

pub fn square_outline(x: Real, y: Real, size: Real) -> Outline {
    Outline::new(vec![
        Point2::new(x, y),
        Point2::new(x + size, y),
        Point2::new(x + size, y + size),
        Point2::new(x, y + size),
    ])
}

pub fn outlines(list: Vec<Outline>) -> OutlineSet {
    OutlineSet::from_outlines(list)
}

/// Shared in-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records everything down to `DEBUG`.
pub fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let sink = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture.contents())
}
