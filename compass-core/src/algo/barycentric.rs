//! Triangle Centers
//!
//! Every classical triangle center here is a barycentric combination of the
//! three vertices: `(wA·A + wB·B + wC·C) / (wA + wB + wC)` with weights
//! derived from the opposite side lengths a = |BC|, b = |CA|, c = |AB|.
//! A weight sum that is NaN or numerically zero means the center does not
//! exist (degenerate triangle) and the output goes undefined.

use crate::geo::{GeoKind, GeoValue, Point};
use crate::numeric;

use super::{Algorithm, InputSlot, OutputPlan};

const THREE_POINTS: &[InputSlot] = &[
    InputSlot::Kind(GeoKind::Point),
    InputSlot::Kind(GeoKind::Point),
    InputSlot::Kind(GeoKind::Point),
];

const THREE_POINTS_AND_INDEX: &[InputSlot] = &[
    InputSlot::Kind(GeoKind::Point),
    InputSlot::Kind(GeoKind::Point),
    InputSlot::Kind(GeoKind::Point),
    InputSlot::Kind(GeoKind::Number),
];

fn point_plan() -> OutputPlan {
    let mut plan = OutputPlan::new();
    plan.push(GeoKind::Point);
    plan
}

/// The barycentric combination shared by all centers. NaN or zero weight sum
/// yields an undefined point.
fn set_barycentric(a: &Point, b: &Point, c: &Point, wa: f64, wb: f64, wc: f64, out: &mut GeoValue) {
    let w = wa + wb + wc;
    if w.is_nan() || numeric::is_zero(w) {
        out.set_undefined();
        return;
    }
    let p = Point::new(
        (wa * a.x + wb * b.x + wc * c.x) / w,
        (wa * a.y + wb * b.y + wc * c.y) / w,
        (wa * a.z + wb * b.z + wc * c.z) / w,
    );
    *out = GeoValue::from_point(p);
}

/// Opposite side lengths (a, b, c) for the triangle A, B, C.
fn side_lengths(a: &Point, b: &Point, c: &Point) -> (f64, f64, f64) {
    (b.distance(c), c.distance(a), a.distance(b))
}

fn vertices<'a>(inputs: &'a [GeoValue]) -> (&'a Point, &'a Point, &'a Point) {
    // The graph validated kinds and defined-ness before dispatch.
    (
        inputs[0].as_point().expect("validated point input"),
        inputs[1].as_point().expect("validated point input"),
        inputs[2].as_point().expect("validated point input"),
    )
}

/// Centroid of a triangle: equal weights 1:1:1.
///
/// Defined for every defined input, including collinear vertices; a
/// degenerate triangle still has a centroid.
#[derive(Debug, Default)]
pub struct Centroid;

impl Algorithm for Centroid {
    fn name(&self) -> &'static str {
        "Centroid"
    }

    fn signature(&self) -> &'static [InputSlot] {
        THREE_POINTS
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        point_plan()
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let (a, b, c) = vertices(inputs);
        set_barycentric(a, b, c, 1.0, 1.0, 1.0, &mut outputs[0]);
    }
}

/// Circumcenter of a triangle: weights `a²(a² − b² − c²)` cyclic.
///
/// Undefined for a degenerate (collinear) triangle.
#[derive(Debug, Default)]
pub struct Circumcenter;

impl Algorithm for Circumcenter {
    fn name(&self) -> &'static str {
        "Circumcenter"
    }

    fn signature(&self) -> &'static [InputSlot] {
        THREE_POINTS
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        point_plan()
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let (a, b, c) = vertices(inputs);
        let (la, lb, lc) = side_lengths(a, b, c);
        let (a2, b2, c2) = (la * la, lb * lb, lc * lc);

        let wa = a2 * (a2 - b2 - c2);
        let wb = b2 * (b2 - c2 - a2);
        let wc = c2 * (c2 - a2 - b2);
        set_barycentric(a, b, c, wa, wb, wc, &mut outputs[0]);
    }
}

/// Incenter of a triangle: weights equal to the opposite side lengths.
///
/// Undefined only when all three vertices coincide (zero side-length sum).
#[derive(Debug, Default)]
pub struct Incenter;

impl Algorithm for Incenter {
    fn name(&self) -> &'static str {
        "Incenter"
    }

    fn signature(&self) -> &'static [InputSlot] {
        THREE_POINTS
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        point_plan()
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let (a, b, c) = vertices(inputs);
        let (la, lb, lc) = side_lengths(a, b, c);
        set_barycentric(a, b, c, la, lb, lc, &mut outputs[0]);
    }
}

/// Orthocenter of a triangle: weights `−a⁴ + (b² − c²)²` cyclic.
///
/// Undefined for a degenerate (collinear) triangle.
#[derive(Debug, Default)]
pub struct Orthocenter;

impl Algorithm for Orthocenter {
    fn name(&self) -> &'static str {
        "Orthocenter"
    }

    fn signature(&self) -> &'static [InputSlot] {
        THREE_POINTS
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        point_plan()
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let (a, b, c) = vertices(inputs);
        let (la, lb, lc) = side_lengths(a, b, c);
        let (a2, b2, c2) = (la * la, lb * lb, lc * lc);
        let (a4, b4, c4) = (a2 * a2, b2 * b2, c2 * c2);

        let wa = -a4 + (b2 - c2) * (b2 - c2);
        let wb = -b4 + (c2 - a2) * (c2 - a2);
        let wc = -c4 + (a2 - b2) * (a2 - b2);
        set_barycentric(a, b, c, wa, wb, wc, &mut outputs[0]);
    }
}

/// Excenter of a triangle, selected by a numeric index input:
///
/// - index 1 (opposite A): weights (−a, b, c)
/// - index 2 (opposite B): weights (a, −b, c)
/// - index 3 (opposite C): weights (a, b, −c)
///
/// Any other index is undefined, as is a zero weight sum.
#[derive(Debug, Default)]
pub struct Excenter;

impl Algorithm for Excenter {
    fn name(&self) -> &'static str {
        "Excenter"
    }

    fn signature(&self) -> &'static [InputSlot] {
        THREE_POINTS_AND_INDEX
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        point_plan()
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let (a, b, c) = vertices(inputs);
        let index = inputs[3].as_number().expect("validated number input");
        let (la, lb, lc) = side_lengths(a, b, c);

        let (wa, wb, wc) = match index as i64 {
            1 => (-la, lb, lc),
            2 => (la, -lb, lc),
            3 => (la, lb, -lc),
            _ => {
                outputs[0].set_undefined();
                return;
            }
        };
        set_barycentric(a, b, c, wa, wb, wc, &mut outputs[0]);
    }
}
