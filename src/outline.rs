//! 2D outline sets for the drawing formats.

use crate::float_types::Real;
use geo::{Coord, LineString, MultiPolygon, Polygon as GeoPolygon, Rect};
use nalgebra::Point2;

/// A closed polygonal outline. The edge back from the last vertex to the
/// first is implied, not stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub vertices: Vec<Point2<Real>>,
}

impl Outline {
    pub const fn new(vertices: Vec<Point2<Real>>) -> Self {
        Outline { vertices }
    }

    /// Edges of the outline including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (&Point2<Real>, &Point2<Real>)> {
        let n = self.vertices.len();
        self.vertices
            .iter()
            .enumerate()
            .map(move |(i, p)| (p, &self.vertices[(i + 1) % n]))
    }
}

impl From<&LineString<Real>> for Outline {
    /// A closed ring repeats its first coordinate at the end; that copy is dropped.
    fn from(ring: &LineString<Real>) -> Self {
        let mut coords: Vec<Coord<Real>> = ring.0.clone();
        if coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        Outline::new(coords.into_iter().map(|c| Point2::new(c.x, c.y)).collect())
    }
}

/// An ordered collection of outlines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutlineSet {
    pub outlines: Vec<Outline>,
}

impl OutlineSet {
    pub const fn new() -> Self {
        OutlineSet {
            outlines: Vec::new(),
        }
    }

    pub const fn from_outlines(outlines: Vec<Outline>) -> Self {
        OutlineSet { outlines }
    }

    /// Total number of vertices over all outlines.
    pub fn vertex_count(&self) -> usize {
        self.outlines.iter().map(|o| o.vertices.len()).sum()
    }

    /// Axis-aligned bounds of every vertex, `None` when there are none.
    pub fn bounding_box(&self) -> Option<Rect<Real>> {
        let mut points = self.outlines.iter().flat_map(|o| o.vertices.iter());
        let first = points.next()?;
        let (mut min, mut max) = (*first, *first);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Rect::new(
            Coord { x: min.x, y: min.y },
            Coord { x: max.x, y: max.y },
        ))
    }
}

impl From<&GeoPolygon<Real>> for OutlineSet {
    /// The exterior ring followed by each interior ring.
    fn from(polygon: &GeoPolygon<Real>) -> Self {
        let mut outlines = vec![Outline::from(polygon.exterior())];
        outlines.extend(polygon.interiors().iter().map(Outline::from));
        OutlineSet { outlines }
    }
}

impl From<&MultiPolygon<Real>> for OutlineSet {
    fn from(multi: &MultiPolygon<Real>) -> Self {
        OutlineSet {
            outlines: multi
                .0
                .iter()
                .flat_map(|polygon| OutlineSet::from(polygon).outlines)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, polygon};

    #[test]
    fn edges_close_the_loop() {
        let tri = Outline::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ]);
        let edges: Vec<_> = tri.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], (&Point2::new(0.0, 1.0), &Point2::new(0.0, 0.0)));
    }

    #[test]
    fn bounding_box_spans_all_outlines() {
        let set = OutlineSet::from_outlines(vec![
            Outline::new(vec![Point2::new(-1.0, 2.0), Point2::new(3.0, 4.0)]),
            Outline::new(vec![Point2::new(0.5, -7.0)]),
        ]);
        let bbox = set.bounding_box().expect("non-empty outline set");
        assert_eq!(bbox.min(), Coord { x: -1.0, y: -7.0 });
        assert_eq!(bbox.max(), Coord { x: 3.0, y: 4.0 });
        assert!(OutlineSet::new().bounding_box().is_none());
    }

    #[test]
    fn geo_polygon_rings_become_outlines() {
        let square = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 1.0, y: 2.0), (x: 2.0, y: 2.0)]]
        );
        let set = OutlineSet::from(&square);
        assert_eq!(set.outlines.len(), 2);
        assert_eq!(set.outlines[0].vertices.len(), 4);
        assert_eq!(set.outlines[1].vertices.len(), 3);

        let open = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert_eq!(Outline::from(&open).vertices.len(), 3);
    }
}
