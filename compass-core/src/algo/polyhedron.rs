//! Prism and Pyramid Builders
//!
//! These are the library's structurally dynamic algorithms: their output
//! slot count follows the base polygon's vertex count, so editing the base
//! (adding or removing vertices) resizes the outputs through the graph's
//! slot-reconciliation machinery. Unchanged slots keep their identity across
//! a resize; downstream references to them stay valid.
//!
//! Face layout is fixed: the base face first, then one side face per base
//! edge (triangles for pyramids, quadrilaterals for prisms), and for prisms
//! a top face mirroring the base. Each builder also maintains the
//! polyhedron's interior reference point (the base centroid shifted by half
//! the extrusion for prisms, averaged with the apex for pyramids) for
//! downstream containment and rendering queries.
//!
//! A base with fewer than three vertices spans no solid; every output goes
//! undefined.

use crate::geo::{GeoKind, GeoValue, Point, Polygon, Polyhedron, PolyhedronShape, Vector};

use super::{Algorithm, InputSlot, OutputPlan};

const POLYGON_AND_POINT: &[InputSlot] = &[
    InputSlot::Kind(GeoKind::Polygon),
    InputSlot::Kind(GeoKind::Point),
];

const POLYGON_AND_NUMBER: &[InputSlot] = &[
    InputSlot::Kind(GeoKind::Polygon),
    InputSlot::Kind(GeoKind::Number),
];

/// Plan of one polyhedron slot followed by `extra_points` point slots.
fn polyhedron_plan(extra_points: usize) -> OutputPlan {
    let mut plan = OutputPlan::new();
    plan.push(GeoKind::Polyhedron);
    for _ in 0..extra_points {
        plan.push(GeoKind::Point);
    }
    plan
}

fn base_len(inputs: &[GeoValue]) -> usize {
    inputs[0].as_polygon().map_or(0, |p| p.vertices.len())
}

fn set_all_undefined(outputs: &mut [GeoValue]) {
    for out in outputs {
        out.set_undefined();
    }
}

/// Faces of a pyramid over an `n`-gon whose apex is vertex `n`.
fn pyramid_faces(n: usize) -> Vec<Vec<usize>> {
    let mut faces = Vec::with_capacity(n + 1);
    faces.push((0..n).collect());
    for i in 0..n {
        faces.push(vec![i, (i + 1) % n, n]);
    }
    faces
}

/// Faces of a prism over an `n`-gon whose top ring starts at vertex `n`.
fn prism_faces(n: usize) -> Vec<Vec<usize>> {
    let mut faces = Vec::with_capacity(n + 2);
    faces.push((0..n).collect());
    for i in 0..n {
        faces.push(vec![i, (i + 1) % n, n + (i + 1) % n, n + i]);
    }
    faces.push((n..2 * n).collect());
    faces
}

fn pyramid_value(base: &Polygon, apex: Point) -> Option<Polyhedron> {
    let n = base.vertices.len();
    if n < 3 {
        return None;
    }
    let mut vertices = base.vertices.clone();
    vertices.push(apex);

    // Interior reference: mean of base vertices and apex.
    let mut interior = base.centroid()?;
    let count = n as f64 + 1.0;
    interior = Point::new(
        (interior.x * n as f64 + apex.x) / count,
        (interior.y * n as f64 + apex.y) / count,
        (interior.z * n as f64 + apex.z) / count,
    );

    Some(Polyhedron {
        faces: pyramid_faces(n),
        vertices,
        interior,
        shape: PolyhedronShape::Pyramid,
    })
}

fn prism_value(base: &Polygon, translation: Vector) -> Option<Polyhedron> {
    let n = base.vertices.len();
    if n < 3 {
        return None;
    }
    let mut vertices = base.vertices.clone();
    vertices.extend(base.vertices.iter().map(|v| v.translated(&translation)));

    // Interior reference: base centroid shifted halfway up the extrusion.
    let interior = base.centroid()?.translated(&translation.scaled(0.5));

    Some(Polyhedron {
        faces: prism_faces(n),
        vertices,
        interior,
        shape: PolyhedronShape::Prism,
    })
}

/// Pyramid from a base polygon and an apex point.
#[derive(Debug, Default)]
pub struct PyramidFromApex;

impl Algorithm for PyramidFromApex {
    fn name(&self) -> &'static str {
        "PyramidFromApex"
    }

    fn signature(&self) -> &'static [InputSlot] {
        POLYGON_AND_POINT
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        polyhedron_plan(0)
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let base = inputs[0].as_polygon().expect("validated polygon input");
        let apex = inputs[1].as_point().expect("validated point input");

        match pyramid_value(base, *apex) {
            Some(p) => outputs[0] = GeoValue::polyhedron(p),
            None => set_all_undefined(outputs),
        }
    }
}

/// Pyramid from a base polygon and a height: the apex sits above the base
/// centroid, displaced along +z. The apex point is the second output slot.
#[derive(Debug, Default)]
pub struct PyramidWithHeight;

impl Algorithm for PyramidWithHeight {
    fn name(&self) -> &'static str {
        "PyramidWithHeight"
    }

    fn signature(&self) -> &'static [InputSlot] {
        POLYGON_AND_NUMBER
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        polyhedron_plan(1)
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let base = inputs[0].as_polygon().expect("validated polygon input");
        let height = inputs[1].as_number().expect("validated number input");

        let apex = base
            .centroid()
            .map(|c| c.translated(&Vector::new(0.0, 0.0, height)));

        match apex.and_then(|apex| pyramid_value(base, apex)) {
            Some(p) => {
                outputs[0] = GeoValue::polyhedron(p);
                outputs[1] = GeoValue::from_point(apex.expect("apex exists when pyramid does"));
            }
            None => set_all_undefined(outputs),
        }
    }
}

/// Prism from a base polygon and one translated vertex: the apex input is
/// where the first base vertex lands, defining the extrusion for all of
/// them. One top point per remaining base vertex is emitted as an output
/// slot, so the slot count follows the base vertex count.
#[derive(Debug, Default)]
pub struct PrismFromApex;

impl Algorithm for PrismFromApex {
    fn name(&self) -> &'static str {
        "PrismFromApex"
    }

    fn signature(&self) -> &'static [InputSlot] {
        POLYGON_AND_POINT
    }

    fn plan_outputs(&self, inputs: &[GeoValue]) -> OutputPlan {
        polyhedron_plan(base_len(inputs).saturating_sub(1))
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let base = inputs[0].as_polygon().expect("validated polygon input");
        let apex = inputs[1].as_point().expect("validated point input");

        if base.vertices.is_empty() {
            set_all_undefined(outputs);
            return;
        }
        let translation = Vector::between(&base.vertices[0], apex);

        match prism_value(base, translation) {
            Some(p) => {
                // Top ring vertices after the first (the apex input itself).
                let n = base.vertices.len();
                for (slot, vertex) in outputs[1..].iter_mut().zip(&p.vertices[n + 1..]) {
                    *slot = GeoValue::from_point(*vertex);
                }
                outputs[0] = GeoValue::polyhedron(p);
            }
            None => set_all_undefined(outputs),
        }
    }
}

/// Prism from a base polygon and a height, extruded along +z. Every top
/// vertex is emitted as an output slot.
#[derive(Debug, Default)]
pub struct PrismWithHeight;

impl Algorithm for PrismWithHeight {
    fn name(&self) -> &'static str {
        "PrismWithHeight"
    }

    fn signature(&self) -> &'static [InputSlot] {
        POLYGON_AND_NUMBER
    }

    fn plan_outputs(&self, inputs: &[GeoValue]) -> OutputPlan {
        polyhedron_plan(base_len(inputs))
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let base = inputs[0].as_polygon().expect("validated polygon input");
        let height = inputs[1].as_number().expect("validated number input");
        let translation = Vector::new(0.0, 0.0, height);

        match prism_value(base, translation) {
            Some(p) => {
                let n = base.vertices.len();
                for (slot, vertex) in outputs[1..].iter_mut().zip(&p.vertices[n..]) {
                    *slot = GeoValue::from_point(*vertex);
                }
                outputs[0] = GeoValue::polyhedron(p);
            }
            None => set_all_undefined(outputs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::is_equal;

    fn unit_square() -> GeoValue {
        GeoValue::polygon(Polygon::new(vec![
            Point::planar(0.0, 0.0),
            Point::planar(1.0, 0.0),
            Point::planar(1.0, 1.0),
            Point::planar(0.0, 1.0),
        ]))
    }

    fn run(algo: &dyn Algorithm, inputs: &[GeoValue]) -> Vec<GeoValue> {
        let plan = algo.plan_outputs(inputs);
        let mut out: Vec<GeoValue> = plan.iter().map(|&k| GeoValue::undefined(k)).collect();
        algo.compute(inputs, &mut out);
        out
    }

    #[test]
    fn pyramid_faces_are_base_plus_triangles() {
        let inputs = [unit_square(), GeoValue::from_point(Point::new(0.5, 0.5, 2.0))];
        let out = run(&PyramidFromApex, &inputs);
        let p = out[0].as_polyhedron().unwrap();

        assert_eq!(p.vertices.len(), 5);
        assert_eq!(p.faces.len(), 5); // base + 4 sides
        assert_eq!(p.faces[0], vec![0, 1, 2, 3]);
        assert_eq!(p.faces[1], vec![0, 1, 4]);
        assert_eq!(p.faces[4], vec![3, 0, 4]);
        assert_eq!(p.shape, PolyhedronShape::Pyramid);

        // Interior point is the mean of base and apex.
        assert!(is_equal(p.interior.x, (0.5 + 2.0) / 5.0 + 0.0));
        assert!(is_equal(p.interior.z, 2.0 / 5.0));
    }

    #[test]
    fn pyramid_with_height_emits_apex_slot() {
        let inputs = [unit_square(), GeoValue::number(3.0)];
        let out = run(&PyramidWithHeight, &inputs);
        assert_eq!(out.len(), 2);
        let apex = out[1].as_point().unwrap();
        assert!(is_equal(apex.x, 0.5));
        assert!(is_equal(apex.y, 0.5));
        assert!(is_equal(apex.z, 3.0));
    }

    #[test]
    fn prism_with_height_builds_full_face_set() {
        let inputs = [unit_square(), GeoValue::number(2.0)];
        let out = run(&PrismWithHeight, &inputs);
        assert_eq!(out.len(), 5); // polyhedron + 4 top points

        let p = out[0].as_polyhedron().unwrap();
        assert_eq!(p.vertices.len(), 8);
        assert_eq!(p.faces.len(), 6); // base + 4 sides + top
        assert_eq!(p.faces[0], vec![0, 1, 2, 3]);
        assert_eq!(p.faces[1], vec![0, 1, 5, 4]);
        assert_eq!(p.faces[5], vec![4, 5, 6, 7]);
        assert_eq!(p.shape, PolyhedronShape::Prism);

        // Interior halfway up the extrusion.
        assert!(is_equal(p.interior.z, 1.0));

        // Top points sit above the base ring.
        let top0 = out[1].as_point().unwrap();
        assert!(is_equal(top0.x, 0.0));
        assert!(is_equal(top0.z, 2.0));
    }

    #[test]
    fn prism_from_apex_translates_whole_base() {
        let apex = Point::new(0.5, 0.5, 1.0);
        let inputs = [unit_square(), GeoValue::from_point(apex)];
        let out = run(&PrismFromApex, &inputs);
        assert_eq!(out.len(), 4); // polyhedron + 3 remaining top points

        let p = out[0].as_polyhedron().unwrap();
        // Translation = apex − first base vertex = (0.5, 0.5, 1).
        let top1 = out[1].as_point().unwrap();
        assert!(is_equal(top1.x, 1.5));
        assert!(is_equal(top1.y, 0.5));
        assert!(is_equal(top1.z, 1.0));
        assert_eq!(p.vertices[4], apex);
    }

    #[test]
    fn degenerate_base_is_undefined() {
        let two_gon = GeoValue::polygon(Polygon::new(vec![
            Point::planar(0.0, 0.0),
            Point::planar(1.0, 0.0),
        ]));
        let out = run(&PrismWithHeight, &[two_gon.clone(), GeoValue::number(1.0)]);
        assert!(out.iter().all(|v| !v.is_defined()));

        let out = run(
            &PyramidFromApex,
            &[two_gon, GeoValue::from_point(Point::new(0.0, 0.0, 1.0))],
        );
        assert!(!out[0].is_defined());
    }

    #[test]
    fn plan_follows_base_vertex_count() {
        let inputs = [unit_square(), GeoValue::number(1.0)];
        assert_eq!(PrismWithHeight.plan_outputs(&inputs).len(), 5);

        let undefined = [
            GeoValue::undefined(GeoKind::Polygon),
            GeoValue::number(1.0),
        ];
        assert_eq!(PrismWithHeight.plan_outputs(&undefined).len(), 1);
    }
}
