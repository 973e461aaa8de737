//! Construction Graph
//!
//! A `Construction` owns every object and algorithm node of one open
//! document and drives incremental recomputation over them.
//!
//! # Algorithm
//!
//! On any triggering change (free-value edit, node creation, redefinition):
//!
//! 1. Collect the *dirty set*: every algorithm node reachable from the
//!    change by following child edges (BFS).
//! 2. Process the dirty set in topological order (Kahn's algorithm
//!    restricted to the set), so a node runs only after every dirty
//!    producer feeding it has run.
//! 3. Each node computes exactly once per pass, even when reachable along
//!    multiple paths (diamond dependencies), enforced by a pass stamp.
//! 4. Report the full touched-object list to the change notifier once, in
//!    recomputation order.
//!
//! # Atomicity
//!
//! Every structural operation validates completely before mutating
//! anything; a returned error means the graph is byte-for-byte unchanged.
//! Numeric degeneracy inside a `compute` is not an error; it marks the
//! node's outputs undefined and the pass continues.
//!
//! # Threading
//!
//! Strictly single-threaded: every mutating operation takes `&mut self`
//! and completes synchronously before returning. A host that wants
//! concurrent edits must serialize them upstream.

use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::algo::Algorithm;
use crate::error::GraphError;
use crate::geo::{GeoKind, GeoValue};
use crate::notify::{ChangeEvent, ChangeNotifier, NullNotifier};

use super::object::{AlgoId, AlgoNode, GeoObject, ObjectId};

/// The dependency graph of one open construction document.
pub struct Construction {
    objects: IndexMap<ObjectId, GeoObject>,
    nodes: IndexMap<AlgoId, AlgoNode>,
    labels: IndexMap<String, ObjectId>,
    notifier: Rc<dyn ChangeNotifier>,
    next_object: u64,
    next_node: u64,
    pass: u64,
}

impl Construction {
    /// An empty construction that discards notifications.
    pub fn new() -> Self {
        Self::with_notifier(Rc::new(NullNotifier))
    }

    /// An empty construction publishing to the given notifier.
    pub fn with_notifier(notifier: Rc<dyn ChangeNotifier>) -> Self {
        Self {
            objects: IndexMap::new(),
            nodes: IndexMap::new(),
            labels: IndexMap::new(),
            notifier,
            next_object: 0,
            next_node: 0,
            pass: 0,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// The current value of an object, if it is live.
    pub fn value(&self, id: ObjectId) -> Option<&GeoValue> {
        self.objects.get(&id).map(GeoObject::value)
    }

    pub fn kind(&self, id: ObjectId) -> Option<GeoKind> {
        self.objects.get(&id).map(GeoObject::kind)
    }

    pub fn is_defined(&self, id: ObjectId) -> bool {
        self.objects.get(&id).is_some_and(GeoObject::is_defined)
    }

    pub fn is_free(&self, id: ObjectId) -> bool {
        self.objects.get(&id).is_some_and(GeoObject::is_free)
    }

    /// Resolve a label to its object.
    pub fn lookup(&self, label: &str) -> Option<ObjectId> {
        self.labels.get(label).copied()
    }

    /// The output slots of a node, in slot order. Includes retired
    /// (undefined) slots beyond the active plan.
    pub fn node_outputs(&self, node: AlgoId) -> Option<&[ObjectId]> {
        self.nodes.get(&node).map(AlgoNode::outputs)
    }

    /// How many leading output slots the node's last plan used.
    pub fn active_outputs(&self, node: AlgoId) -> Option<usize> {
        self.nodes.get(&node).map(AlgoNode::active_outputs)
    }

    // ------------------------------------------------------------------
    // Structural operations
    // ------------------------------------------------------------------

    /// Create a free object holding `value`. Never fails structurally
    /// except for a duplicate label.
    pub fn add_free(
        &mut self,
        mut value: GeoValue,
        label: Option<&str>,
    ) -> Result<ObjectId, GraphError> {
        if let Some(label) = label {
            if self.labels.contains_key(label) {
                return Err(GraphError::DuplicateLabel(label.to_owned()));
            }
        }

        value.sanitize();
        let id = self.alloc_object_id();
        self.objects
            .insert(id, GeoObject::new(id, value, label.map(str::to_owned)));
        if let Some(label) = label {
            self.labels.insert(label.to_owned(), id);
        }

        debug!(object = id.raw(), label, "free object created");
        Ok(id)
    }

    /// Create an algorithm node over the given inputs, compute it once, and
    /// notify. The node's outputs are created as its exclusively owned
    /// objects.
    pub fn add_algorithm(
        &mut self,
        algorithm: Box<dyn Algorithm>,
        inputs: &[ObjectId],
    ) -> Result<AlgoId, GraphError> {
        self.validate_inputs(algorithm.as_ref(), inputs)?;

        let id = self.alloc_node_id();
        let node = AlgoNode::new(id, algorithm, SmallVec::from_slice(inputs));
        self.nodes.insert(id, node);
        for &input in inputs {
            self.objects
                .get_mut(&input)
                .expect("validated input is live")
                .add_child(id);
        }

        debug!(node = id.raw(), inputs = inputs.len(), "algorithm node created");
        self.run_pass(vec![id], Vec::new());
        Ok(id)
    }

    /// Relabel an object; `None` makes it anonymous. Purely structural, no
    /// recomputation.
    pub fn rename(&mut self, id: ObjectId, label: Option<&str>) -> Result<(), GraphError> {
        let object = self
            .objects
            .get(&id)
            .ok_or(GraphError::UnresolvedInput(id))?;
        if let Some(new) = label {
            if self.labels.get(new).is_some_and(|&other| other != id) {
                return Err(GraphError::DuplicateLabel(new.to_owned()));
            }
        }

        if let Some(old) = object.label().map(str::to_owned) {
            self.labels.swap_remove(&old);
        }
        if let Some(new) = label {
            self.labels.insert(new.to_owned(), id);
        }
        self.objects
            .get_mut(&id)
            .expect("resolved above")
            .set_label(label.map(str::to_owned));
        Ok(())
    }

    /// Directly edit a free object's value and propagate the change.
    pub fn set_free_value(&mut self, id: ObjectId, mut value: GeoValue) -> Result<(), GraphError> {
        let object = self
            .objects
            .get(&id)
            .ok_or(GraphError::UnresolvedInput(id))?;
        if !object.is_free() {
            return Err(GraphError::NotFree(id));
        }
        if object.kind() != value.kind() {
            return Err(GraphError::KindMismatch {
                expected: object.kind(),
                found: value.kind(),
            });
        }

        value.sanitize();
        let object = self.objects.get_mut(&id).expect("checked above");
        *object.value_mut() = value;

        self.notify_changed(id)
    }

    /// Entry point after an external edit: recompute everything downstream
    /// of `id` in one topological pass.
    pub fn notify_changed(&mut self, id: ObjectId) -> Result<(), GraphError> {
        let object = self
            .objects
            .get(&id)
            .ok_or(GraphError::UnresolvedInput(id))?;
        let seeds: Vec<AlgoId> = object.children().iter().copied().collect();
        let seed_events = vec![ChangeEvent {
            object: id,
            defined: object.is_defined(),
        }];

        self.run_pass(seeds, seed_events);
        Ok(())
    }

    /// Detach a node from its current inputs and attach it to new ones.
    ///
    /// The whole operation is validated first, including the no-cycle
    /// invariant, and rejected atomically, leaving the graph untouched.
    pub fn redefine(&mut self, node: AlgoId, new_inputs: &[ObjectId]) -> Result<(), GraphError> {
        let entry = self.nodes.get(&node).ok_or(GraphError::UnknownNode(node))?;
        self.validate_inputs(entry.algorithm(), new_inputs)?;

        // The node must not become its own transitive dependency: no
        // proposed input may be reachable from the node's outputs.
        let downstream = self.reachable_objects(entry.outputs());
        for &input in new_inputs {
            if downstream.contains(&input) {
                return Err(GraphError::CyclicDependency(input));
            }
        }

        let old_inputs: SmallVec<[ObjectId; 4]> =
            SmallVec::from_slice(self.nodes[&node].inputs());
        for &input in &old_inputs {
            if let Some(obj) = self.objects.get_mut(&input) {
                obj.remove_child(node);
            }
        }
        for &input in new_inputs {
            self.objects
                .get_mut(&input)
                .expect("validated input is live")
                .add_child(node);
        }
        self.nodes
            .get_mut(&node)
            .expect("resolved above")
            .set_inputs(SmallVec::from_slice(new_inputs));

        debug!(node = node.raw(), "node redefined");
        self.run_pass(vec![node], Vec::new());
        Ok(())
    }

    /// Remove an object from the construction.
    ///
    /// With `cascade` set, every dependent algorithm node and its outputs
    /// are removed first, dependents before the objects they read. Without
    /// it, any dependent blocks the removal. Removing a derived object
    /// removes its producing node together with all sibling outputs.
    pub fn remove(&mut self, id: ObjectId, cascade: bool) -> Result<(), GraphError> {
        let object = self
            .objects
            .get(&id)
            .ok_or(GraphError::UnresolvedInput(id))?;

        let roots: Vec<AlgoId> = match object.parent() {
            Some(parent) => vec![parent],
            None => object.children().iter().copied().collect(),
        };

        if !cascade {
            let blocked = match object.parent() {
                // A derived object takes its whole producing node with it,
                // so every sibling output must be dependent-free too.
                Some(parent) => self.nodes[&parent]
                    .outputs()
                    .iter()
                    .any(|out| self.objects[out].has_children()),
                None => object.has_children(),
            };
            if blocked {
                return Err(GraphError::HasDependents(id));
            }
        }

        // Close over everything downstream, then dismantle dependents-first.
        let doomed = self.reachable_nodes(&roots);
        let order = self.topological_order(&doomed);
        let mut removed = Vec::new();
        for &node in order.iter().rev() {
            self.remove_node(node, &mut removed);
        }

        if self.objects.contains_key(&id) {
            // A free object survives the node sweep; take it out last.
            self.drop_object(id, &mut removed);
        }

        debug!(object = id.raw(), removed = removed.len(), "removal finished");
        self.notifier.objects_removed(&removed);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    fn validate_inputs(
        &self,
        algorithm: &dyn Algorithm,
        inputs: &[ObjectId],
    ) -> Result<(), GraphError> {
        let signature = algorithm.signature();
        if signature.len() != inputs.len() {
            return Err(GraphError::ArityMismatch {
                algorithm: algorithm.name(),
                expected: signature.len(),
                found: inputs.len(),
            });
        }
        for (position, (&input, slot)) in inputs.iter().zip(signature).enumerate() {
            let object = self
                .objects
                .get(&input)
                .ok_or(GraphError::UnresolvedInput(input))?;
            if !slot.matches(object.kind()) {
                return Err(GraphError::InputKindMismatch {
                    algorithm: algorithm.name(),
                    position,
                    found: object.kind(),
                });
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// All objects reachable downstream from `starts` (inclusive), via
    /// child edges.
    fn reachable_objects(&self, starts: &[ObjectId]) -> IndexSet<ObjectId> {
        let mut seen: IndexSet<ObjectId> = starts.iter().copied().collect();
        let mut queue: Vec<ObjectId> = starts.to_vec();
        while let Some(id) = queue.pop() {
            let Some(object) = self.objects.get(&id) else {
                continue;
            };
            for &child in object.children() {
                for &out in self.nodes[&child].outputs() {
                    if seen.insert(out) {
                        queue.push(out);
                    }
                }
            }
        }
        seen
    }

    /// All algorithm nodes reachable downstream from `roots` (inclusive).
    fn reachable_nodes(&self, roots: &[AlgoId]) -> IndexSet<AlgoId> {
        let mut seen: IndexSet<AlgoId> = IndexSet::new();
        let mut queue: Vec<AlgoId> = Vec::new();
        for &root in roots {
            if seen.insert(root) {
                queue.push(root);
            }
        }
        while let Some(node) = queue.pop() {
            for &out in self.nodes[&node].outputs() {
                for &child in self.objects[&out].children() {
                    if seen.insert(child) {
                        queue.push(child);
                    }
                }
            }
        }
        seen
    }

    /// Kahn's algorithm over the node set: producers before consumers.
    /// Only edges internal to the set count toward in-degrees.
    fn topological_order(&self, set: &IndexSet<AlgoId>) -> Vec<AlgoId> {
        let mut in_degree: IndexMap<AlgoId, usize> = IndexMap::new();
        for &node in set {
            let producers = self.dirty_producers(node, set);
            in_degree.insert(node, producers.len());
        }

        let mut queue: Vec<AlgoId> = in_degree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&node, _)| node)
            .collect();
        let mut order = Vec::with_capacity(set.len());

        let mut head = 0;
        while head < queue.len() {
            let node = queue[head];
            head += 1;
            order.push(node);

            for consumer in self.consumers_of(node) {
                if let Some(degree) = in_degree.get_mut(&consumer) {
                    if set.contains(&consumer) {
                        *degree = degree.saturating_sub(1);
                        if *degree == 0 {
                            queue.push(consumer);
                        }
                    }
                }
            }
        }

        debug_assert_eq!(order.len(), set.len(), "committed graph must be acyclic");
        order
    }

    /// Distinct producer nodes within `set` that feed `node`'s inputs.
    fn dirty_producers(&self, node: AlgoId, set: &IndexSet<AlgoId>) -> IndexSet<AlgoId> {
        let mut producers = IndexSet::new();
        for input in self.nodes[&node].inputs() {
            if let Some(parent) = self.objects[input].parent() {
                if set.contains(&parent) {
                    producers.insert(parent);
                }
            }
        }
        producers
    }

    /// Distinct nodes reading any of `node`'s outputs.
    fn consumers_of(&self, node: AlgoId) -> IndexSet<AlgoId> {
        let mut consumers = IndexSet::new();
        for out in self.nodes[&node].outputs() {
            for &child in self.objects[out].children() {
                consumers.insert(child);
            }
        }
        consumers
    }

    // ------------------------------------------------------------------
    // Recomputation
    // ------------------------------------------------------------------

    /// One incremental pass: close over the dirty set from `seeds`, process
    /// it topologically, then notify once with all touched objects.
    fn run_pass(&mut self, seeds: Vec<AlgoId>, mut events: Vec<ChangeEvent>) {
        self.pass += 1;
        let dirty = self.reachable_nodes(&seeds);
        let order = self.topological_order(&dirty);
        trace!(pass = self.pass, dirty = dirty.len(), "recompute pass");

        for node in order {
            debug_assert_ne!(
                self.nodes[&node].last_pass(),
                self.pass,
                "node scheduled twice in one pass"
            );
            self.compute_node(node, &mut events);
        }

        self.notifier.construction_updated(&events);
    }

    /// Recompute one node: re-plan its output slots, reconcile them, run
    /// the algorithm, and write back sanitized values.
    fn compute_node(&mut self, node: AlgoId, events: &mut Vec<ChangeEvent>) {
        let pass = self.pass;

        // Snapshot inputs; undefined anywhere short-circuits the whole node.
        let entry = &self.nodes[&node];
        let mut inputs = Vec::with_capacity(entry.inputs().len());
        let mut all_defined = true;
        for input in entry.inputs() {
            let value = self.objects[input].value().clone();
            all_defined &= value.is_defined();
            inputs.push(value);
        }

        // Reconcile output slots against the current plan before anything
        // else, so a node created over an undefined input still owns its
        // declared outputs. The slot list only grows; surplus slots are
        // retired to undefined so their identity survives a later re-grow.
        let plan = self.nodes[&node].algorithm().plan_outputs(&inputs);
        let existing = self.nodes[&node].outputs().len();
        for &kind in plan.iter().skip(existing) {
            let slot = self.alloc_object_id();
            let mut object = GeoObject::new(slot, GeoValue::undefined(kind), None);
            object.set_parent(Some(node));
            self.objects.insert(slot, object);
            self.nodes.get_mut(&node).expect("live node").push_output(slot);
            trace!(node = node.raw(), slot = slot.raw(), "output slot created");
        }

        if !all_defined {
            trace!(node = node.raw(), "undefined input, outputs undefined");
            let outputs: SmallVec<[ObjectId; 4]> =
                SmallVec::from_slice(self.nodes[&node].outputs());
            for &out in &outputs {
                self.objects
                    .get_mut(&out)
                    .expect("output slot is live")
                    .value_mut()
                    .set_undefined();
                events.push(ChangeEvent {
                    object: out,
                    defined: false,
                });
            }
            let entry = self.nodes.get_mut(&node).expect("live node");
            entry.set_active_outputs(plan.len());
            entry.set_last_pass(pass);
            return;
        }

        let mut computed: Vec<GeoValue> =
            plan.iter().map(|&kind| GeoValue::undefined(kind)).collect();
        self.nodes[&node].algorithm().compute(&inputs, &mut computed);

        let outputs: SmallVec<[ObjectId; 4]> = SmallVec::from_slice(self.nodes[&node].outputs());
        for (index, &slot) in outputs.iter().enumerate() {
            let object = self.objects.get_mut(&slot).expect("output slot is live");
            match computed.get_mut(index) {
                Some(value) => {
                    value.sanitize();
                    debug_assert_eq!(object.kind(), value.kind(), "slot kind is fixed");
                    *object.value_mut() = value.clone();
                }
                // Retired slot beyond the active plan.
                None => object.value_mut().set_undefined(),
            }
            events.push(ChangeEvent {
                object: slot,
                defined: self.objects[&slot].is_defined(),
            });
        }

        let entry = self.nodes.get_mut(&node).expect("live node");
        entry.set_active_outputs(plan.len());
        entry.set_last_pass(pass);
    }

    // ------------------------------------------------------------------
    // Removal plumbing
    // ------------------------------------------------------------------

    fn remove_node(&mut self, node: AlgoId, removed: &mut Vec<ObjectId>) {
        let Some(entry) = self.nodes.swap_remove(&node) else {
            return;
        };
        for &input in entry.inputs() {
            if let Some(obj) = self.objects.get_mut(&input) {
                obj.remove_child(node);
            }
        }
        for &out in entry.outputs() {
            self.drop_object(out, removed);
        }
        trace!(node = node.raw(), "node removed");
    }

    fn drop_object(&mut self, id: ObjectId, removed: &mut Vec<ObjectId>) {
        if let Some(object) = self.objects.swap_remove(&id) {
            if let Some(label) = object.label() {
                self.labels.swap_remove(label);
            }
            removed.push(id);
        }
    }

    // ------------------------------------------------------------------
    // Id allocation
    // ------------------------------------------------------------------

    fn alloc_object_id(&mut self) -> ObjectId {
        let id = ObjectId::from_raw(self.next_object);
        self.next_object += 1;
        id
    }

    fn alloc_node_id(&mut self) -> AlgoId {
        let id = AlgoId::from_raw(self.next_node);
        self.next_node += 1;
        id
    }
}

impl Default for Construction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Construction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Construction")
            .field("objects", &self.objects.len())
            .field("nodes", &self.nodes.len())
            .field("pass", &self.pass)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{Centroid, Translate};
    use crate::geo::Vector;

    fn triangle(c: &mut Construction) -> [ObjectId; 3] {
        [
            c.add_free(GeoValue::point(0.0, 0.0), Some("A")).unwrap(),
            c.add_free(GeoValue::point(1.0, 0.0), Some("B")).unwrap(),
            c.add_free(GeoValue::point(0.0, 1.0), Some("C")).unwrap(),
        ]
    }

    #[test]
    fn free_objects_resolve_by_label() {
        let mut c = Construction::new();
        let [a, _, _] = triangle(&mut c);
        assert_eq!(c.lookup("A"), Some(a));
        assert_eq!(c.lookup("Z"), None);
        assert_eq!(c.object_count(), 3);
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let mut c = Construction::new();
        c.add_free(GeoValue::point(0.0, 0.0), Some("A")).unwrap();
        let err = c.add_free(GeoValue::point(1.0, 1.0), Some("A")).unwrap_err();
        assert_eq!(err, GraphError::DuplicateLabel("A".into()));
        assert_eq!(c.object_count(), 1);
    }

    #[test]
    fn rename_moves_the_label_registry_entry() {
        let mut c = Construction::new();
        let [a, b, _] = triangle(&mut c);

        c.rename(a, Some("A'")).unwrap();
        assert_eq!(c.lookup("A"), None);
        assert_eq!(c.lookup("A'"), Some(a));

        // Renaming onto a taken label is rejected; onto your own is a no-op.
        assert_eq!(
            c.rename(b, Some("A'")).unwrap_err(),
            GraphError::DuplicateLabel("A'".into())
        );
        c.rename(a, Some("A'")).unwrap();
        assert_eq!(c.lookup("A'"), Some(a));

        c.rename(a, None).unwrap();
        assert_eq!(c.lookup("A'"), None);
    }

    #[test]
    fn algorithm_node_computes_on_creation() {
        let mut c = Construction::new();
        let [a, b, t] = triangle(&mut c);
        let node = c.add_algorithm(Box::new(Centroid), &[a, b, t]).unwrap();

        let out = c.node_outputs(node).unwrap()[0];
        let p = c.value(out).unwrap().as_point().unwrap();
        assert!((p.x - 1.0 / 3.0).abs() < 1e-12);
        assert!((p.y - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn node_over_undefined_input_still_owns_outputs() {
        let mut c = Construction::new();
        let a = c.add_free(GeoValue::undefined(GeoKind::Point), None).unwrap();
        let b = c.add_free(GeoValue::point(1.0, 0.0), None).unwrap();
        let t = c.add_free(GeoValue::point(0.0, 1.0), None).unwrap();

        // Output slots exist from creation, just undefined.
        let node = c.add_algorithm(Box::new(Centroid), &[a, b, t]).unwrap();
        let outputs = c.node_outputs(node).unwrap();
        assert_eq!(outputs.len(), 1);
        let out = outputs[0];
        assert_eq!(c.kind(out), Some(GeoKind::Point));
        assert!(!c.is_defined(out));
        assert_eq!(c.active_outputs(node), Some(1));

        // Defining the input brings the same slot to life.
        c.set_free_value(a, GeoValue::point(0.0, 0.0)).unwrap();
        assert_eq!(c.node_outputs(node).unwrap()[0], out);
        assert!(c.is_defined(out));
    }

    #[test]
    fn unresolved_input_leaves_graph_unchanged() {
        let mut c = Construction::new();
        let [a, b, _] = triangle(&mut c);
        let ghost = ObjectId::from_raw(999);

        let err = c.add_algorithm(Box::new(Centroid), &[a, b, ghost]).unwrap_err();
        assert_eq!(err, GraphError::UnresolvedInput(ghost));
        assert_eq!(c.node_count(), 0);
        // No child edges were committed either.
        assert!(!c.objects[&a].has_children());
    }

    #[test]
    fn arity_and_kind_are_validated() {
        let mut c = Construction::new();
        let [a, b, t] = triangle(&mut c);
        let n = c.add_free(GeoValue::number(2.0), None).unwrap();

        assert!(matches!(
            c.add_algorithm(Box::new(Centroid), &[a, b]).unwrap_err(),
            GraphError::ArityMismatch { expected: 3, found: 2, .. }
        ));
        assert!(matches!(
            c.add_algorithm(Box::new(Centroid), &[a, b, n]).unwrap_err(),
            GraphError::InputKindMismatch { position: 2, .. }
        ));
        let _ = t;
        assert_eq!(c.node_count(), 0);
    }

    #[test]
    fn set_free_value_propagates() {
        let mut c = Construction::new();
        let [a, b, t] = triangle(&mut c);
        let node = c.add_algorithm(Box::new(Centroid), &[a, b, t]).unwrap();
        let out = c.node_outputs(node).unwrap()[0];

        c.set_free_value(a, GeoValue::point(3.0, 0.0)).unwrap();
        let p = c.value(out).unwrap().as_point().unwrap();
        assert!((p.x - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn derived_objects_reject_direct_edits() {
        let mut c = Construction::new();
        let [a, b, t] = triangle(&mut c);
        let node = c.add_algorithm(Box::new(Centroid), &[a, b, t]).unwrap();
        let out = c.node_outputs(node).unwrap()[0];

        let err = c.set_free_value(out, GeoValue::point(9.0, 9.0)).unwrap_err();
        assert_eq!(err, GraphError::NotFree(out));
    }

    #[test]
    fn kind_is_fixed_across_edits() {
        let mut c = Construction::new();
        let a = c.add_free(GeoValue::point(0.0, 0.0), None).unwrap();
        let err = c.set_free_value(a, GeoValue::number(1.0)).unwrap_err();
        assert_eq!(
            err,
            GraphError::KindMismatch {
                expected: GeoKind::Point,
                found: GeoKind::Number,
            }
        );
    }

    #[test]
    fn redefining_to_own_output_is_cyclic() {
        let mut c = Construction::new();
        let p = c.add_free(GeoValue::point(0.0, 0.0), None).unwrap();
        let v = c
            .add_free(GeoValue::vector(Vector::new(1.0, 0.0, 0.0)), None)
            .unwrap();
        let node = c.add_algorithm(Box::new(Translate), &[p, v]).unwrap();
        let out = c.node_outputs(node).unwrap()[0];

        let err = c.redefine(node, &[out, v]).unwrap_err();
        assert_eq!(err, GraphError::CyclicDependency(out));
        // Old edges intact: editing p still recomputes.
        c.set_free_value(p, GeoValue::point(5.0, 5.0)).unwrap();
        let moved = c.value(out).unwrap().as_point().unwrap();
        assert!((moved.x - 6.0).abs() < 1e-12);
    }

    #[test]
    fn removal_without_cascade_is_blocked_by_dependents() {
        let mut c = Construction::new();
        let [a, b, t] = triangle(&mut c);
        c.add_algorithm(Box::new(Centroid), &[a, b, t]).unwrap();

        let err = c.remove(a, false).unwrap_err();
        assert_eq!(err, GraphError::HasDependents(a));
        assert_eq!(c.object_count(), 4);
        assert_eq!(c.node_count(), 1);
    }

    #[test]
    fn cascading_removal_takes_descendants_first() {
        let mut c = Construction::new();
        let [a, b, t] = triangle(&mut c);
        let centroid = c.add_algorithm(Box::new(Centroid), &[a, b, t]).unwrap();
        let mid = c.node_outputs(centroid).unwrap()[0];
        let v = c
            .add_free(GeoValue::vector(Vector::new(0.0, 1.0, 0.0)), None)
            .unwrap();
        let shifted = c.add_algorithm(Box::new(Translate), &[mid, v]).unwrap();
        let shifted_out = c.node_outputs(shifted).unwrap()[0];

        c.remove(a, true).unwrap();

        assert!(!c.contains(a));
        assert!(!c.contains(mid));
        assert!(!c.contains(shifted_out));
        assert_eq!(c.node_count(), 0);
        // Unrelated objects survive and are detached.
        assert!(c.contains(b));
        assert!(!c.objects[&b].has_children());
        assert!(c.contains(v));
    }

    #[test]
    fn removing_a_derived_object_removes_its_producer() {
        let mut c = Construction::new();
        let [a, b, t] = triangle(&mut c);
        let node = c.add_algorithm(Box::new(Centroid), &[a, b, t]).unwrap();
        let out = c.node_outputs(node).unwrap()[0];

        c.remove(out, false).unwrap();
        assert!(!c.contains(out));
        assert_eq!(c.node_count(), 0);
        assert!(c.contains(a));
        assert!(!c.objects[&a].has_children());
    }
}
