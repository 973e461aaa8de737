//! Geometric Values
//!
//! [`GeoValue`] is the payload of every object in a construction: one variant
//! per kind, each wrapping an `Option` of its primitive. `None` is the
//! undefined state, the designed representation of ill-posed geometry
//! (degenerate triangles, parallel intersections, points outside a bounded
//! path). Undefined is a value, never an error, and it propagates: any
//! computation fed an undefined input yields undefined outputs.
//!
//! # Contract
//!
//! - An object's kind is fixed for its lifetime; only the payload varies.
//! - `set_undefined` is idempotent and never fails.
//! - A defined value never carries a NaN or infinite coordinate:
//!   construction helpers and [`GeoValue::sanitize`] demote non-finite
//!   payloads to undefined rather than letting them masquerade as defined.

use serde::{Deserialize, Serialize};

use super::primitives::{Line, Point, Polygon, Polyhedron, Segment, Vector};

/// The semantic kind of an object, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoKind {
    Point,
    Vector,
    Line,
    Segment,
    Polygon,
    Polyhedron,
    Number,
}

/// The value of an object: a kind-specific payload or the undefined state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GeoValue {
    Point(Option<Point>),
    Vector(Option<Vector>),
    Line(Option<Line>),
    Segment(Option<Segment>),
    Polygon(Option<Polygon>),
    Polyhedron(Option<Polyhedron>),
    Number(Option<f64>),
}

impl GeoValue {
    /// The undefined value of the given kind.
    pub fn undefined(kind: GeoKind) -> Self {
        match kind {
            GeoKind::Point => GeoValue::Point(None),
            GeoKind::Vector => GeoValue::Vector(None),
            GeoKind::Line => GeoValue::Line(None),
            GeoKind::Segment => GeoValue::Segment(None),
            GeoKind::Polygon => GeoValue::Polygon(None),
            GeoKind::Polyhedron => GeoValue::Polyhedron(None),
            GeoKind::Number => GeoValue::Number(None),
        }
    }

    /// A defined planar point, demoted to undefined if any coordinate is
    /// non-finite.
    pub fn point(x: f64, y: f64) -> Self {
        Self::from_point(Point::planar(x, y))
    }

    pub fn from_point(p: Point) -> Self {
        GeoValue::Point(p.is_finite().then_some(p))
    }

    pub fn vector(v: Vector) -> Self {
        GeoValue::Vector(v.is_finite().then_some(v))
    }

    pub fn line(l: Line) -> Self {
        GeoValue::Line(l.is_finite().then_some(l))
    }

    pub fn segment(s: Segment) -> Self {
        GeoValue::Segment(s.is_finite().then_some(s))
    }

    pub fn polygon(p: Polygon) -> Self {
        GeoValue::Polygon(p.is_finite().then_some(p))
    }

    pub fn polyhedron(p: Polyhedron) -> Self {
        GeoValue::Polyhedron(p.is_finite().then_some(p))
    }

    pub fn number(n: f64) -> Self {
        GeoValue::Number(n.is_finite().then_some(n))
    }

    /// The kind of this value.
    pub fn kind(&self) -> GeoKind {
        match self {
            GeoValue::Point(_) => GeoKind::Point,
            GeoValue::Vector(_) => GeoKind::Vector,
            GeoValue::Line(_) => GeoKind::Line,
            GeoValue::Segment(_) => GeoKind::Segment,
            GeoValue::Polygon(_) => GeoKind::Polygon,
            GeoValue::Polyhedron(_) => GeoKind::Polyhedron,
            GeoValue::Number(_) => GeoKind::Number,
        }
    }

    /// Whether a valid payload is present.
    pub fn is_defined(&self) -> bool {
        match self {
            GeoValue::Point(v) => v.is_some(),
            GeoValue::Vector(v) => v.is_some(),
            GeoValue::Line(v) => v.is_some(),
            GeoValue::Segment(v) => v.is_some(),
            GeoValue::Polygon(v) => v.is_some(),
            GeoValue::Polyhedron(v) => v.is_some(),
            GeoValue::Number(v) => v.is_some(),
        }
    }

    /// Clear the payload. Idempotent; the kind is retained.
    pub fn set_undefined(&mut self) {
        *self = GeoValue::undefined(self.kind());
    }

    /// Demote to undefined if the payload carries any non-finite number.
    /// The single chokepoint that keeps NaN from leaking into a "defined"
    /// result.
    pub fn sanitize(&mut self) {
        let finite = match self {
            GeoValue::Point(Some(p)) => p.is_finite(),
            GeoValue::Vector(Some(v)) => v.is_finite(),
            GeoValue::Line(Some(l)) => l.is_finite(),
            GeoValue::Segment(Some(s)) => s.is_finite(),
            GeoValue::Polygon(Some(p)) => p.is_finite(),
            GeoValue::Polyhedron(Some(p)) => p.is_finite(),
            GeoValue::Number(Some(n)) => n.is_finite(),
            _ => return,
        };
        if !finite {
            self.set_undefined();
        }
    }

    pub fn as_point(&self) -> Option<&Point> {
        match self {
            GeoValue::Point(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            GeoValue::Vector(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            GeoValue::Line(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            GeoValue::Segment(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            GeoValue::Polygon(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_polyhedron(&self) -> Option<&Polyhedron> {
        match self {
            GeoValue::Polyhedron(v) => v.as_ref(),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            GeoValue::Number(v) => *v,
            _ => None,
        }
    }

    /// The carrier line of a path value (a line, or a segment's supporting
    /// line). `None` for undefined values, non-path kinds, and zero-length
    /// segments.
    pub fn carrier_line(&self) -> Option<Line> {
        match self {
            GeoValue::Line(Some(l)) => Some(*l),
            GeoValue::Segment(Some(s)) => s.carrier(),
            _ => None,
        }
    }
}
