//! Deduplication of vertex positions by their rendered text.
//!
//! Two points share an id exactly when their canonical keys (the text the
//! writers will print) are identical. There is no numeric tolerance: points
//! that differ only below the printed precision merge, points that print
//! differently stay apart.

use crate::float_types::Real;
use crate::number_format::NumberFormat;
use hashbrown::HashMap;
use nalgebra::Point3;

/// Maps canonical point keys to dense ids assigned in first-seen order.
#[derive(Debug, Clone)]
pub struct VertexIndex {
    format: NumberFormat,
    ids: HashMap<String, usize>,
    keys: Vec<String>,
    points: Vec<Point3<Real>>,
}

impl VertexIndex {
    /// Create an empty index whose keys are rendered with `format`.
    pub fn new(format: NumberFormat) -> Self {
        VertexIndex {
            format,
            ids: HashMap::new(),
            keys: Vec::new(),
            points: Vec::new(),
        }
    }

    /// Canonical key of `point`, whether or not it is registered.
    pub fn key(&self, point: &Point3<Real>) -> String {
        self.format.point3(point)
    }

    /// Register `point` and return its id.
    ///
    /// The first point with a given key gets the next sequential id; later
    /// points with the same key resolve to that id and are not stored again.
    pub fn insert(&mut self, point: &Point3<Real>) -> usize {
        let key = self.key(point);
        self.insert_keyed(key, point)
    }

    /// Register `point` under a key the caller already rendered.
    pub(crate) fn insert_keyed(&mut self, key: String, point: &Point3<Real>) -> usize {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        let id = self.keys.len();
        self.ids.insert(key.clone(), id);
        self.keys.push(key);
        self.points.push(*point);
        id
    }

    /// Id of an already registered key.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.ids.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Canonical keys in id order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// First-seen positions in id order.
    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }
}
