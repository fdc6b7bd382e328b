//! Planar geometry model for map features.
//!
//! A closed tagged union over the three feature shapes a site map can carry
//! (survey points, transect lines, block/plot polygons), with the planar
//! predicates the classifier needs. All coordinates are lon/lat pairs treated
//! as a single planar frame; no reprojection and no geodesic correction.
//!
//! `contains` is DE-9IM containment (interior-requiring); `covers` is the
//! boundary-inclusive variant. Nesting checks use `contains || covers` so a
//! plot ring that touches its block boundary still nests despite
//! floating-point boundary noise.

use geo::{Area, EuclideanDistance, EuclideanLength, Intersects, Relate};
use geo_types::{LineString, Point, Polygon};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three feature shapes, as declared by the upstream map-file reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

/// A shape with too few coordinates to mean anything.
///
/// Raised at construction so degenerate shapes never reach the classifier;
/// callers skip the offending record and continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegenerateGeometryError {
    #[error("point feature has no coordinates")]
    EmptyPoint,
    #[error("line string has {0} point(s), at least 2 required")]
    ShortLine(usize),
    #[error("polygon ring has {0} point(s), at least 3 required")]
    ShortRing(usize),
}

/// A validated planar geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point<f64>),
    LineString(LineString<f64>),
    Polygon(Polygon<f64>),
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Point::new(x, y))
    }

    /// A line string from ≥ 2 ordered points.
    pub fn line(points: Vec<(f64, f64)>) -> Result<Self, DegenerateGeometryError> {
        if points.len() < 2 {
            return Err(DegenerateGeometryError::ShortLine(points.len()));
        }
        Ok(Geometry::LineString(LineString::from(points)))
    }

    /// A polygon from a ring of ≥ 3 ordered points. The ring is implicitly
    /// closed; an explicit closing point in the input is accepted as-is.
    pub fn polygon(ring: Vec<(f64, f64)>) -> Result<Self, DegenerateGeometryError> {
        if ring.len() < 3 {
            return Err(DegenerateGeometryError::ShortRing(ring.len()));
        }
        Ok(Geometry::Polygon(Polygon::new(LineString::from(ring), Vec::new())))
    }

    /// Build the geometry a record declares. Point records use their first
    /// coordinate pair; extra pairs are ignored.
    pub fn build(
        kind: GeometryKind,
        coordinates: Vec<(f64, f64)>,
    ) -> Result<Self, DegenerateGeometryError> {
        match kind {
            GeometryKind::Point => coordinates
                .first()
                .map(|&(x, y)| Geometry::point(x, y))
                .ok_or(DegenerateGeometryError::EmptyPoint),
            GeometryKind::LineString => Geometry::line(coordinates),
            GeometryKind::Polygon => Geometry::polygon(coordinates),
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// DE-9IM (contains, covers) flags from a single relate pass.
    fn nesting_flags(&self, other: &Geometry) -> (bool, bool) {
        use Geometry::*;
        let m = match (self, other) {
            (Point(a), Point(b)) => a.relate(b),
            (Point(a), LineString(b)) => a.relate(b),
            (Point(a), Polygon(b)) => a.relate(b),
            (LineString(a), Point(b)) => a.relate(b),
            (LineString(a), LineString(b)) => a.relate(b),
            (LineString(a), Polygon(b)) => a.relate(b),
            (Polygon(a), Point(b)) => a.relate(b),
            (Polygon(a), LineString(b)) => a.relate(b),
            (Polygon(a), Polygon(b)) => a.relate(b),
        };
        (m.is_contains(), m.is_covers())
    }

    /// Interior-requiring containment. A point on the boundary is NOT
    /// contained; use [`covers`](Self::covers) when touching counts.
    pub fn contains(&self, other: &Geometry) -> bool {
        self.nesting_flags(other).0
    }

    /// Boundary-inclusive containment.
    pub fn covers(&self, other: &Geometry) -> bool {
        self.nesting_flags(other).1
    }

    pub fn intersects(&self, other: &Geometry) -> bool {
        use Geometry::*;
        match (self, other) {
            (Point(a), Point(b)) => a.intersects(b),
            (Point(a), LineString(b)) => a.intersects(b),
            (Point(a), Polygon(b)) => a.intersects(b),
            (LineString(a), Point(b)) => a.intersects(b),
            (LineString(a), LineString(b)) => a.intersects(b),
            (LineString(a), Polygon(b)) => a.intersects(b),
            (Polygon(a), Point(b)) => a.intersects(b),
            (Polygon(a), LineString(b)) => a.intersects(b),
            (Polygon(a), Polygon(b)) => a.intersects(b),
        }
    }

    /// Minimum planar distance between the two shapes; 0.0 when they touch
    /// or overlap.
    pub fn distance(&self, other: &Geometry) -> f64 {
        use Geometry::*;
        match (self, other) {
            (Point(a), Point(b)) => a.euclidean_distance(b),
            (Point(a), LineString(b)) => a.euclidean_distance(b),
            (Point(a), Polygon(b)) => a.euclidean_distance(b),
            (LineString(a), Point(b)) => a.euclidean_distance(b),
            (LineString(a), LineString(b)) => a.euclidean_distance(b),
            (LineString(a), Polygon(b)) => a.euclidean_distance(b),
            (Polygon(a), Point(b)) => a.euclidean_distance(b),
            (Polygon(a), LineString(b)) => a.euclidean_distance(b),
            (Polygon(a), Polygon(b)) => a.euclidean_distance(b),
        }
    }

    /// Planar length: 0 for points, path length for lines, exterior
    /// perimeter for polygons.
    pub fn length(&self) -> f64 {
        match self {
            Geometry::Point(_) => 0.0,
            Geometry::LineString(ls) => ls.euclidean_length(),
            Geometry::Polygon(p) => p.exterior().euclidean_length(),
        }
    }

    /// Planar unsigned area: 0 for points and lines.
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Point(_) | Geometry::LineString(_) => 0.0,
            Geometry::Polygon(p) => p.unsigned_area(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square(x0: f64, y0: f64, size: f64) -> Geometry {
        Geometry::polygon(vec![
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ])
        .unwrap()
    }

    #[test]
    fn short_ring_and_line_are_rejected() {
        assert_eq!(
            Geometry::polygon(vec![(0.0, 0.0), (1.0, 1.0)]),
            Err(DegenerateGeometryError::ShortRing(2))
        );
        assert_eq!(
            Geometry::line(vec![(0.0, 0.0)]),
            Err(DegenerateGeometryError::ShortLine(1))
        );
        assert_eq!(
            Geometry::build(GeometryKind::Point, vec![]),
            Err(DegenerateGeometryError::EmptyPoint)
        );
    }

    #[test]
    fn nested_square_is_contained_and_covered() {
        let outer = unit_square(0.0, 0.0, 10.0);
        let inner = unit_square(4.0, 4.0, 2.0);
        assert!(outer.contains(&inner));
        assert!(outer.covers(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn boundary_point_is_covered_but_not_contained() {
        let square = unit_square(0.0, 0.0, 10.0);
        let on_edge = Geometry::point(0.0, 5.0);
        assert!(!square.contains(&on_edge));
        assert!(square.covers(&on_edge));

        let interior = Geometry::point(5.0, 5.0);
        assert!(square.contains(&interior));
    }

    #[test]
    fn line_crossing_polygon_intersects() {
        let square = unit_square(0.0, 0.0, 10.0);
        let crossing = Geometry::line(vec![(5.0, -1.0), (5.0, 11.0)]).unwrap();
        let outside = Geometry::line(vec![(20.0, 0.0), (20.0, 10.0)]).unwrap();
        assert!(square.intersects(&crossing));
        assert!(!square.intersects(&outside));
    }

    #[test]
    fn distance_between_disjoint_squares() {
        let a = unit_square(0.0, 0.0, 1.0);
        let b = unit_square(4.0, 0.0, 1.0);
        assert_relative_eq!(a.distance(&b), 3.0, epsilon = 1e-12);
        assert_relative_eq!(a.distance(&unit_square(0.5, 0.5, 0.2)), 0.0);
    }

    #[test]
    fn length_and_area_are_planar() {
        let square = unit_square(0.0, 0.0, 10.0);
        assert_relative_eq!(square.area(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(square.length(), 40.0, epsilon = 1e-9);

        let line = Geometry::line(vec![(0.0, 0.0), (3.0, 4.0)]).unwrap();
        assert_relative_eq!(line.length(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(line.area(), 0.0);
        assert_relative_eq!(Geometry::point(1.0, 1.0).length(), 0.0);
    }
}
