//! Algorithm Nodes
//!
//! An algorithm node derives one or more output objects from a fixed list of
//! input objects. This module defines the common contract; the concrete
//! geometry lives in the submodules:
//!
//! - `barycentric`: triangle centers (centroid, circumcenter, incenter,
//!   orthocenter, excenters)
//! - `intersect`: line/path intersection and perpendicular altitudes
//! - `miquel`: the Miquel point of a complete quadrilateral
//! - `polyhedron`: prism and pyramid builders with resizable output slots
//! - `transform`: elementary transforms (translation)
//!
//! # Contract
//!
//! The construction graph depends only on this trait, never on concrete
//! algorithm types. A `compute` is a pure transition from an input value
//! snapshot to output values; it expresses numeric failure exclusively by
//! writing undefined outputs, never by panicking or returning an error. The
//! graph guarantees `compute` is only invoked when every input is defined;
//! undefined inputs short-circuit to undefined outputs uniformly, so
//! individual algorithms carry no defined-ness boilerplate.

mod barycentric;
mod intersect;
mod miquel;
mod polyhedron;
mod transform;

pub use barycentric::{Centroid, Circumcenter, Excenter, Incenter, Orthocenter};
pub use intersect::{Altitude, IntersectThrough};
pub use miquel::Miquel;
pub use polyhedron::{PrismFromApex, PrismWithHeight, PyramidFromApex, PyramidWithHeight};
pub use transform::Translate;

use smallvec::SmallVec;

use crate::geo::{GeoKind, GeoValue};

/// What an algorithm accepts at one input position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSlot {
    /// Exactly this kind.
    Kind(GeoKind),

    /// Any planar path: a line or a segment.
    Path,
}

impl InputSlot {
    /// Whether an object of `kind` may occupy this slot.
    pub fn matches(self, kind: GeoKind) -> bool {
        match self {
            InputSlot::Kind(k) => k == kind,
            InputSlot::Path => matches!(kind, GeoKind::Line | GeoKind::Segment),
        }
    }
}

/// The kinds an algorithm currently wants for its output slots.
pub type OutputPlan = SmallVec<[GeoKind; 4]>;

/// A unit of computation in the construction graph.
///
/// Implementations are registered with the graph via
/// [`Construction::add_algorithm`](crate::graph::Construction::add_algorithm)
/// and owned by it for the node's lifetime.
pub trait Algorithm: std::fmt::Debug {
    /// Stable name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Ordered input signature. Arity is fixed; kinds are validated before
    /// any edge is committed.
    fn signature(&self) -> &'static [InputSlot];

    /// The output slot kinds for the given input values.
    ///
    /// Re-evaluated on every recompute. Most algorithms return a constant
    /// plan; the polyhedron builders grow and shrink with the base vertex
    /// count. Must tolerate undefined inputs (returning the minimal plan),
    /// since it is also consulted at node-creation time.
    fn plan_outputs(&self, inputs: &[GeoValue]) -> OutputPlan;

    /// Pure transition from inputs to outputs.
    ///
    /// `outputs` has exactly the length of the current plan and arrives
    /// pre-set to undefined values of the planned kinds; a degenerate
    /// computation simply leaves (or sets) slots undefined. All inputs are
    /// defined when this is called.
    fn compute(&self, inputs: &[GeoValue], outputs: &mut [GeoValue]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_slot_accepts_lines_and_segments() {
        assert!(InputSlot::Path.matches(GeoKind::Line));
        assert!(InputSlot::Path.matches(GeoKind::Segment));
        assert!(!InputSlot::Path.matches(GeoKind::Point));
    }

    #[test]
    fn kind_slot_is_exact() {
        let slot = InputSlot::Kind(GeoKind::Point);
        assert!(slot.matches(GeoKind::Point));
        assert!(!slot.matches(GeoKind::Vector));
    }
}
