//! Graph Records
//!
//! This module defines the records that live in a construction's arenas:
//! geometric objects and the algorithm nodes that derive them. Edges are
//! stored as id lists on both sides: an object knows its one producing
//! node ("algorithm parent") and the nodes that read it ("algorithm
//! children"); a node knows its ordered inputs and output slots. Nothing
//! owns anything across an edge, so removal logic walks id lists instead of
//! chasing owning pointers.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::algo::Algorithm;
use crate::geo::{GeoKind, GeoValue};

/// Unique identifier for an object within one construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Unique identifier for an algorithm node within one construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlgoId(u64);

impl AlgoId {
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A named or anonymous geometric entity in the construction.
#[derive(Debug)]
pub struct GeoObject {
    id: ObjectId,
    label: Option<String>,
    value: GeoValue,

    /// The algorithm node that produces this object, if any. An object
    /// with no parent is *free*: its value is set directly by the caller.
    parent: Option<AlgoId>,

    /// Algorithm nodes that read this object. Insertion-ordered so
    /// recomputation and notification are deterministic.
    children: IndexSet<AlgoId>,
}

impl GeoObject {
    pub fn new(id: ObjectId, value: GeoValue, label: Option<String>) -> Self {
        Self {
            id,
            label,
            value,
            parent: None,
            children: IndexSet::new(),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub fn value(&self) -> &GeoValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut GeoValue {
        &mut self.value
    }

    /// The kind is fixed for the object's lifetime.
    pub fn kind(&self) -> GeoKind {
        self.value.kind()
    }

    pub fn is_defined(&self) -> bool {
        self.value.is_defined()
    }

    /// Whether this object is a free input (no algorithm parent).
    pub fn is_free(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent(&self) -> Option<AlgoId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<AlgoId>) {
        self.parent = parent;
    }

    pub fn add_child(&mut self, node: AlgoId) {
        self.children.insert(node);
    }

    pub fn remove_child(&mut self, node: AlgoId) {
        self.children.shift_remove(&node);
    }

    pub fn children(&self) -> &IndexSet<AlgoId> {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// An algorithm node: the compute unit deriving output objects from inputs.
pub struct AlgoNode {
    id: AlgoId,
    algorithm: Box<dyn Algorithm>,

    /// Ordered, non-owning input references.
    inputs: SmallVec<[ObjectId; 4]>,

    /// Ordered output slots. The list only ever grows: when an algorithm's
    /// plan shrinks, surplus slots are kept (undefined) so their identity
    /// survives a later re-grow and downstream references stay valid.
    outputs: SmallVec<[ObjectId; 4]>,

    /// How many leading output slots the last plan actually used.
    active_outputs: usize,

    /// Pass stamp of the last recomputation, for exactly-once dispatch
    /// within a pass.
    last_pass: u64,
}

impl AlgoNode {
    pub fn new(id: AlgoId, algorithm: Box<dyn Algorithm>, inputs: SmallVec<[ObjectId; 4]>) -> Self {
        Self {
            id,
            algorithm,
            inputs,
            outputs: SmallVec::new(),
            active_outputs: 0,
            last_pass: 0,
        }
    }

    pub fn id(&self) -> AlgoId {
        self.id
    }

    pub fn algorithm(&self) -> &dyn Algorithm {
        self.algorithm.as_ref()
    }

    pub fn inputs(&self) -> &[ObjectId] {
        &self.inputs
    }

    pub fn set_inputs(&mut self, inputs: SmallVec<[ObjectId; 4]>) {
        self.inputs = inputs;
    }

    pub fn outputs(&self) -> &[ObjectId] {
        &self.outputs
    }

    pub fn push_output(&mut self, id: ObjectId) {
        self.outputs.push(id);
    }

    pub fn active_outputs(&self) -> usize {
        self.active_outputs
    }

    pub fn set_active_outputs(&mut self, n: usize) {
        self.active_outputs = n;
    }

    pub fn last_pass(&self) -> u64 {
        self.last_pass
    }

    pub fn set_last_pass(&mut self, pass: u64) {
        self.last_pass = pass;
    }
}

impl std::fmt::Debug for AlgoNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgoNode")
            .field("id", &self.id)
            .field("algorithm", &self.algorithm.name())
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("active_outputs", &self.active_outputs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_object_has_no_parent() {
        let obj = GeoObject::new(ObjectId::from_raw(0), GeoValue::point(1.0, 2.0), None);
        assert!(obj.is_free());
        assert!(obj.is_defined());
        assert!(!obj.has_children());
    }

    #[test]
    fn child_edges_are_a_set() {
        let mut obj = GeoObject::new(ObjectId::from_raw(0), GeoValue::point(0.0, 0.0), None);
        let node = AlgoId::from_raw(7);

        obj.add_child(node);
        obj.add_child(node);
        assert_eq!(obj.children().len(), 1);

        obj.remove_child(node);
        assert!(!obj.has_children());
    }

    #[test]
    fn kind_tracks_value() {
        let obj = GeoObject::new(ObjectId::from_raw(1), GeoValue::number(4.0), None);
        assert_eq!(obj.kind(), crate::geo::GeoKind::Number);
    }
}
