//! Elementary Transforms

use crate::geo::{GeoKind, GeoValue};

use super::{Algorithm, InputSlot, OutputPlan};

/// Translation of a point by a free vector.
#[derive(Debug, Default)]
pub struct Translate;

impl Algorithm for Translate {
    fn name(&self) -> &'static str {
        "Translate"
    }

    fn signature(&self) -> &'static [InputSlot] {
        &[
            InputSlot::Kind(GeoKind::Point),
            InputSlot::Kind(GeoKind::Vector),
        ]
    }

    fn plan_outputs(&self, _inputs: &[GeoValue]) -> OutputPlan {
        let mut plan = OutputPlan::new();
        plan.push(GeoKind::Point);
        plan
    }

    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]) {
        let p = inputs[0].as_point().expect("validated point input");
        let v = inputs[1].as_vector().expect("validated vector input");
        outputs[0] = GeoValue::from_point(p.translated(v));
    }
}
