//! Intersections and Altitudes
//!
//! Both algorithms here work on planar paths (lines or segments) through
//! their carrier lines, with segment targets additionally bound-checked
//! under the loose incidence tolerance.

use crate::geo::{GeoKind, GeoValue, Line, Segment};

use super::{Algorithm, InputSlot, OutputPlan};

/// Intersection of the line through two points with a target path, without
/// materializing the intermediate line as a construction object.
///
/// Undefined when the two points coincide (no line determined), when the
/// constructed line is parallel to the target (intersection at infinity),
/// or when the target is a segment and the raw intersection falls outside
/// its bound.
#[derive(Debug, Default)]
pub struct IntersectThrough;

impl Algorithm for IntersectThrough {
    fn name(&self) -> &'static str {
        "IntersectThrough"
    }

    fn signature(&self) -> &'static [InputSlot] {
        &[
            InputSlot::Kind(GeoKind::Point),
            InputSlot::Kind(GeoKind::Point),
            InputSlot::Path,
        ]
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        let mut plan = OutputPlan::new();
        plan.push(GeoKind::Point);
        plan
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let a = inputs[0].as_point().expect("validated point input");
        let b = inputs[1].as_point().expect("validated point input");

        let through = match Line::through(a, b) {
            Some(line) => line,
            None => {
                outputs[0].set_undefined();
                return;
            }
        };
        let carrier = match inputs[2].carrier_line() {
            Some(line) => line,
            None => {
                outputs[0].set_undefined();
                return;
            }
        };

        let hit = match through.intersection(&carrier) {
            Some(p) => p,
            None => {
                outputs[0].set_undefined();
                return;
            }
        };

        // A bounded target only accepts intersections on the bound itself.
        if let Some(segment) = inputs[2].as_segment() {
            if !segment.contains(&hit) {
                outputs[0].set_undefined();
                return;
            }
        }

        outputs[0] = GeoValue::from_point(hit);
    }
}

/// Perpendicular segment from a point to a path.
///
/// The foot is the closest point on the path (for segments, the projection
/// clamped to the bound). The output segment runs from the point to the
/// foot with its length derived from the endpoints. Undefined when the
/// path's carrier line is degenerate.
#[derive(Debug, Default)]
pub struct Altitude;

impl Algorithm for Altitude {
    fn name(&self) -> &'static str {
        "Altitude"
    }

    fn signature(&self) -> &'static [InputSlot] {
        &[InputSlot::Kind(GeoKind::Point), InputSlot::Path]
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        let mut plan = OutputPlan::new();
        plan.push(GeoKind::Segment);
        plan
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let p = inputs[0].as_point().expect("validated point input");

        let foot = match &inputs[1] {
            GeoValue::Segment(Some(segment)) => Some(segment.closest_point(p)),
            path => path
                .carrier_line()
                .and_then(|line| line.perpendicular_foot(p)),
        };

        match foot {
            Some(foot) => outputs[0] = GeoValue::segment(Segment::between(*p, foot)),
            None => outputs[0].set_undefined(),
        }
    }
}
