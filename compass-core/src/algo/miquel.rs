//! Miquel Point
//!
//! Four lines in general position form a complete quadrilateral; the four
//! triangles obtained by omitting one line at a time have circumcircles that
//! meet in a single point, the Miquel point. Two of those circles suffice to
//! locate it: we build the triangles omitting line d and line c (both
//! contain the a∩b vertex) and take the second intersection of their
//! circumcircles.
//!
//! Undefined whenever the configuration degenerates: any parallel line pair
//! (pairwise intersection at infinity), a collinear triangle (no
//! circumcircle), concentric circumcircles, or a clearly negative
//! circle-intersection discriminant.

use crate::geo::{GeoKind, GeoValue, Line, Point};
use crate::numeric;

use super::{Algorithm, InputSlot, OutputPlan};

/// Miquel point of the complete quadrilateral spanned by four lines.
#[derive(Debug, Default)]
pub struct Miquel;

impl Algorithm for Miquel {
    fn name(&self) -> &'static str {
        "Miquel"
    }

    fn signature(&self) -> &'static [InputSlot] {
        &[
            InputSlot::Kind(GeoKind::Line),
            InputSlot::Kind(GeoKind::Line),
            InputSlot::Kind(GeoKind::Line),
            InputSlot::Kind(GeoKind::Line),
        ]
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        let mut plan = OutputPlan::new();
        plan.push(GeoKind::Point);
        plan
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let a = inputs[0].as_line().expect("validated line input");
        let b = inputs[1].as_line().expect("validated line input");
        let c = inputs[2].as_line().expect("validated line input");
        let d = inputs[3].as_line().expect("validated line input");

        match miquel_point(a, b, c, d) {
            Some(p) => outputs[0] = GeoValue::from_point(p),
            None => outputs[0].set_undefined(),
        }
    }
}

fn miquel_point(a: &Line, b: &Line, c: &Line, d: &Line) -> Option<Point> {
    // Six pairwise intersections; any at infinity means a parallel pair.
    let ab = finite_intersection(a, b)?;
    let ac = finite_intersection(a, c)?;
    let ad = finite_intersection(a, d)?;
    let bc = finite_intersection(b, c)?;
    let bd = finite_intersection(b, d)?;
    finite_intersection(c, d)?;

    // Triangle omitting d: (ab, ac, bc). Triangle omitting c: (ab, ad, bd).
    // Both share the vertex ab.
    if collinear(&ab, &ac, &bc) || collinear(&ab, &ad, &bd) {
        return None;
    }

    let c1 = circumcenter(&ab, &ac, &bc)?;
    let c2 = circumcenter(&ab, &ad, &bd)?;
    let r1 = c1.distance(&ab);
    let r2 = c2.distance(&ab);

    second_circle_intersection(&c1, r1, &c2, r2, &ab)
}

fn finite_intersection(l1: &Line, l2: &Line) -> Option<Point> {
    let (x, y, w) = l1.cross(l2);
    if numeric::is_zero(w) {
        return None;
    }
    Some(Point::planar(x / w, y / w))
}

fn collinear(p1: &Point, p2: &Point, p3: &Point) -> bool {
    let area = (p2.x - p1.x) * (p3.y - p1.y) - (p3.x - p1.x) * (p2.y - p1.y);
    numeric::is_zero(area)
}

fn circumcenter(p1: &Point, p2: &Point, p3: &Point) -> Option<Point> {
    let d = 2.0 * (p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y));
    if numeric::is_zero(d) {
        return None;
    }

    let n1 = p1.x * p1.x + p1.y * p1.y;
    let n2 = p2.x * p2.x + p2.y * p2.y;
    let n3 = p3.x * p3.x + p3.y * p3.y;

    let ux = (n1 * (p2.y - p3.y) + n2 * (p3.y - p1.y) + n3 * (p1.y - p2.y)) / d;
    let uy = (n1 * (p3.x - p2.x) + n2 * (p1.x - p3.x) + n3 * (p2.x - p1.x)) / d;
    Some(Point::planar(ux, uy))
}

/// Radical-line intersection of two circles that both pass through
/// `shared`. Of the two candidates, returns the one farther from `shared`.
/// When the circles are tangent at `shared` the candidates coincide and the
/// "second" point equals the shared one.
fn second_circle_intersection(
    c1: &Point,
    r1: f64,
    c2: &Point,
    r2: f64,
    shared: &Point,
) -> Option<Point> {
    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;
    let d = (dx * dx + dy * dy).sqrt();

    // Concentric circles never yield a second point.
    if numeric::is_zero(d) {
        return None;
    }

    let a = (d * d + r1 * r1 - r2 * r2) / (2.0 * d);
    let h2 = r1 * r1 - a * a;
    if h2 < -numeric::STANDARD_PRECISION {
        return None;
    }
    let h = h2.max(0.0).sqrt();

    let px = c1.x + a * dx / d;
    let py = c1.y + a * dy / d;

    let cand1 = Point::planar(px + h * dy / d, py - h * dx / d);
    let cand2 = Point::planar(px - h * dy / d, py + h * dx / d);

    if cand1.distance(shared) > cand2.distance(shared) {
        Some(cand1)
    } else {
        Some(cand2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::is_equal;

    fn run(inputs: &[GeoValue]) -> GeoValue {
        let mut out = vec![GeoValue::undefined(GeoKind::Point)];
        Miquel.compute(inputs, &mut out);
        out.pop().unwrap()
    }

    fn lines(coeffs: &[(f64, f64, f64)]) -> Vec<GeoValue> {
        coeffs
            .iter()
            .map(|&(a, b, c)| GeoValue::line(Line::new(a, b, c)))
            .collect()
    }

    #[test]
    fn parallel_pair_is_undefined() {
        // First and third lines both horizontal.
        let inputs = lines(&[
            (0.0, 1.0, 0.0),  // y = 0
            (1.0, 0.0, 0.0),  // x = 0
            (0.0, 1.0, -1.0), // y = 1
            (1.0, 1.0, -3.0),
        ]);
        assert!(!run(&inputs).is_defined());
    }

    #[test]
    fn generic_quadrilateral_has_a_miquel_point() {
        let inputs = lines(&[
            (0.0, 1.0, 0.0),  // y = 0
            (1.0, 0.0, 0.0),  // x = 0
            (1.0, 1.0, -2.0), // x + y = 2
            (1.0, -1.0, 0.5), // x - y = -0.5
        ]);
        let p = run(&inputs);
        assert!(p.is_defined());

        // The Miquel point lies on the circumcircle of the triangle
        // omitting line d: vertices (0,0), (2,0), (0,2).
        let p = p.as_point().unwrap();
        let center = Point::planar(1.0, 1.0);
        let r = center.distance(&Point::planar(0.0, 0.0));
        assert!((center.distance(p) - r).abs() < 1e-9);

        // And it is the second intersection, not the shared vertex (0, 0).
        assert!(p.distance(&Point::planar(0.0, 0.0)) > 0.1);
        assert!(is_equal(p.x, -6.0 / 17.0));
        assert!(is_equal(p.y, 10.0 / 17.0));
    }

    #[test]
    fn far_candidate_is_selected() {
        let c1 = Point::planar(0.0, 1.0);
        let c2 = Point::planar(0.0, -1.0);
        let shared = Point::planar(1.0, 0.0);
        let r = 2.0_f64.sqrt();
        let p = second_circle_intersection(&c1, r, &c2, r, &shared).unwrap();
        // The two circle intersections are (±1, 0); farther from (1, 0)
        // is (−1, 0).
        assert!(is_equal(p.x, -1.0));
        assert!(is_equal(p.y, 0.0));
    }

    #[test]
    fn concentric_circles_are_undefined() {
        let c = Point::planar(0.0, 0.0);
        assert!(second_circle_intersection(&c, 1.0, &c, 2.0, &Point::planar(1.0, 0.0)).is_none());
    }

    #[test]
    fn disjoint_circles_are_undefined() {
        let c1 = Point::planar(0.0, 0.0);
        let c2 = Point::planar(10.0, 0.0);
        assert!(second_circle_intersection(&c1, 1.0, &c2, 1.0, &Point::planar(1.0, 0.0)).is_none());
    }
}
