//! Geometric Primitives
//!
//! Plain-data payloads for the value kinds. These types carry no notion of
//! "undefined" themselves; that lives one level up in
//! [`GeoValue`](super::GeoValue). Planar algebra (lines, homogeneous
//! intersections) operates in the z = 0 plane; points and vectors carry a z
//! coordinate so polyhedron builders can work in space.

use serde::{Deserialize, Serialize};

use crate::numeric;

/// A point in space. Planar constructions leave z at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    /// A planar point at z = 0.
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// A point in space.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        numeric::distance((self.x, self.y, self.z), (other.x, other.y, other.z))
    }

    /// Displace by a vector.
    pub fn translated(&self, v: &Vector) -> Point {
        Point::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A free vector (displacement).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The displacement from `from` to `to`.
    pub fn between(from: &Point, to: &Point) -> Self {
        Self::new(to.x - from.x, to.y - from.y, to.z - from.z)
    }

    pub fn scaled(&self, s: f64) -> Vector {
        Vector::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A line in the z = 0 plane, stored as homogeneous coefficients of
/// `a·x + b·y + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// The line through two points, via the homogeneous cross product
    /// (p, q lifted to (x, y, 1)). Returns `None` when the points coincide,
    /// in which case no line is determined.
    pub fn through(p: &Point, q: &Point) -> Option<Line> {
        let a = p.y - q.y;
        let b = q.x - p.x;
        let c = p.x * q.y - p.y * q.x;
        if numeric::is_zero(a) && numeric::is_zero(b) {
            return None;
        }
        Some(Line::new(a, b, c))
    }

    /// Homogeneous intersection of two lines: the cross product of their
    /// coefficient triples. A w-coordinate near zero is a point at infinity
    /// (the lines are parallel).
    pub fn cross(&self, other: &Line) -> (f64, f64, f64) {
        (
            self.b * other.c - self.c * other.b,
            self.c * other.a - self.a * other.c,
            self.a * other.b - self.b * other.a,
        )
    }

    /// Finite intersection point, or `None` for parallel lines.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        let (x, y, w) = self.cross(other);
        if numeric::is_zero(w) {
            return None;
        }
        Some(Point::planar(x / w, y / w))
    }

    /// The foot of the perpendicular from `p` onto this line, or `None` for
    /// a degenerate coefficient pair.
    pub fn perpendicular_foot(&self, p: &Point) -> Option<Point> {
        let n2 = self.a * self.a + self.b * self.b;
        if numeric::is_zero(n2) {
            return None;
        }
        let t = (self.a * p.x + self.b * p.y + self.c) / n2;
        Some(Point::planar(p.x - t * self.a, p.y - t * self.b))
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

/// A bounded segment between two points, with its cached length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub length: f64,
}

impl Segment {
    /// Segment between two endpoints; length is derived, never stored stale.
    pub fn between(start: Point, end: Point) -> Self {
        let length = start.distance(&end);
        Self { start, end, length }
    }

    /// The carrier line through the endpoints, `None` for a zero-length
    /// segment.
    pub fn carrier(&self) -> Option<Line> {
        Line::through(&self.start, &self.end)
    }

    /// Distance from a planar point to the segment (projection clamped to
    /// the bound).
    pub fn distance_to(&self, p: &Point) -> f64 {
        self.closest_point(p).distance(p)
    }

    /// The closest point on the segment to `p`. For a zero-length segment
    /// this is the start point.
    pub fn closest_point(&self, p: &Point) -> Point {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len2 = dx * dx + dy * dy;
        if numeric::is_zero(len2) {
            return self.start;
        }
        let t = ((p.x - self.start.x) * dx + (p.y - self.start.y) * dy) / len2;
        let t = t.clamp(0.0, 1.0);
        Point::planar(self.start.x + t * dx, self.start.y + t * dy)
    }

    /// Whether `p` lies on the segment within the loose incidence tolerance.
    pub fn contains(&self, p: &Point) -> bool {
        self.distance_to(p) < numeric::MIN_PRECISION
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.length.is_finite()
    }
}

/// An ordered planar polygon, given by its vertex ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Mean of the vertex ring. `None` for an empty polygon.
    pub fn centroid(&self) -> Option<Point> {
        if self.vertices.is_empty() {
            return None;
        }
        let n = self.vertices.len() as f64;
        let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
        for v in &self.vertices {
            x += v.x;
            y += v.y;
            z += v.z;
        }
        Some(Point::new(x / n, y / n, z / n))
    }

    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(Point::is_finite)
    }
}

/// Whether a polyhedron was built as a prism or a pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolyhedronShape {
    Prism,
    Pyramid,
}

/// A polyhedron as a vertex list plus faces given by vertex indices.
///
/// The first face is always the base. The interior reference point is
/// maintained by the builder algorithms for downstream containment and
/// rendering queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyhedron {
    pub vertices: Vec<Point>,
    pub faces: Vec<Vec<usize>>,
    pub interior: Point,
    pub shape: PolyhedronShape,
}

impl Polyhedron {
    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(Point::is_finite) && self.interior.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::is_equal;

    #[test]
    fn line_through_distinct_points() {
        let l = Line::through(&Point::planar(0.0, 0.0), &Point::planar(1.0, 1.0)).unwrap();
        // y = x passes through (2, 2)
        assert!(is_equal(l.a * 2.0 + l.b * 2.0 + l.c, 0.0));
    }

    #[test]
    fn line_through_coincident_points_is_none() {
        let p = Point::planar(3.0, -2.0);
        assert!(Line::through(&p, &p).is_none());
    }

    #[test]
    fn parallel_lines_do_not_intersect() {
        let l1 = Line::new(0.0, 1.0, 0.0); // y = 0
        let l2 = Line::new(0.0, 1.0, -1.0); // y = 1
        assert!(l1.intersection(&l2).is_none());
    }

    #[test]
    fn perpendicular_lines_intersect() {
        let l1 = Line::new(0.0, 1.0, 0.0); // y = 0
        let l2 = Line::new(1.0, 0.0, -2.0); // x = 2
        let p = l1.intersection(&l2).unwrap();
        assert!(is_equal(p.x, 2.0));
        assert!(is_equal(p.y, 0.0));
    }

    #[test]
    fn foot_of_perpendicular() {
        let l = Line::new(0.0, 1.0, 0.0); // y = 0
        let foot = l.perpendicular_foot(&Point::planar(3.0, 5.0)).unwrap();
        assert!(is_equal(foot.x, 3.0));
        assert!(is_equal(foot.y, 0.0));
    }

    #[test]
    fn segment_clamps_projection() {
        let s = Segment::between(Point::planar(0.0, 0.0), Point::planar(1.0, 0.0));
        // Beyond the end: closest point is the endpoint.
        let c = s.closest_point(&Point::planar(5.0, 1.0));
        assert!(is_equal(c.x, 1.0));
        assert!(is_equal(c.y, 0.0));
        assert!(!s.contains(&Point::planar(2.0, 0.0)));
        assert!(s.contains(&Point::planar(0.5, 0.0)));
    }

    #[test]
    fn polygon_centroid() {
        let p = Polygon::new(vec![
            Point::planar(0.0, 0.0),
            Point::planar(2.0, 0.0),
            Point::planar(2.0, 2.0),
            Point::planar(0.0, 2.0),
        ]);
        let c = p.centroid().unwrap();
        assert!(is_equal(c.x, 1.0));
        assert!(is_equal(c.y, 1.0));
    }
}
