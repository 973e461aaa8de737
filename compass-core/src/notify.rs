//! Change Notification
//!
//! The view layer (rendering, panels, outside this crate) learns about
//! recomputation through a [`ChangeNotifier`] capability handed to the
//! construction at creation time. The construction calls it at most once per
//! triggering operation, after the whole topological pass has finished, with
//! the touched objects in the order they were recomputed.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use crate::graph::ObjectId;

/// One touched object: its id and whether it ended the pass defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub object: ObjectId,
    pub defined: bool,
}

/// Capability invoked by the construction after each pass.
///
/// Implementations live outside the kernel; the two below cover the default
/// case and tests.
pub trait ChangeNotifier {
    /// One recompute pass finished. `events` lists every touched object in
    /// recomputation order, each exactly once.
    fn construction_updated(&self, events: &[ChangeEvent]);

    /// Objects were removed from the construction (user delete, possibly
    /// cascading). Default: ignore.
    fn objects_removed(&self, _ids: &[ObjectId]) {}
}

/// Discards all notifications. The default for a fresh construction.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn construction_updated(&self, _events: &[ChangeEvent]) {}
}

/// Records every pass for later inspection. The construction is
/// single-threaded, so interior mutability via `RefCell` suffices.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    passes: RefCell<Vec<Vec<ChangeEvent>>>,
    removed: RefCell<Vec<ObjectId>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded passes, oldest first.
    pub fn passes(&self) -> Vec<Vec<ChangeEvent>> {
        self.passes.borrow().clone()
    }

    /// The most recent pass, if any.
    pub fn last_pass(&self) -> Option<Vec<ChangeEvent>> {
        self.passes.borrow().last().cloned()
    }

    /// Ids removed so far, in removal order.
    pub fn removed(&self) -> Vec<ObjectId> {
        self.removed.borrow().clone()
    }

    pub fn pass_count(&self) -> usize {
        self.passes.borrow().len()
    }
}

impl ChangeNotifier for RecordingNotifier {
    fn construction_updated(&self, events: &[ChangeEvent]) {
        self.passes.borrow_mut().push(events.to_vec());
    }

    fn objects_removed(&self, ids: &[ObjectId]) {
        self.removed.borrow_mut().extend_from_slice(ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_passes_in_order() {
        let n = RecordingNotifier::new();
        let a = ChangeEvent {
            object: ObjectId::from_raw(1),
            defined: true,
        };
        let b = ChangeEvent {
            object: ObjectId::from_raw(2),
            defined: false,
        };

        n.construction_updated(&[a]);
        n.construction_updated(&[a, b]);

        let passes = n.passes();
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0], vec![a]);
        assert_eq!(passes[1], vec![a, b]);
        assert_eq!(n.last_pass().unwrap(), vec![a, b]);
    }

    #[test]
    fn recording_notifier_collects_removals() {
        let n = RecordingNotifier::new();
        n.objects_removed(&[ObjectId::from_raw(7), ObjectId::from_raw(8)]);
        assert_eq!(
            n.removed(),
            vec![ObjectId::from_raw(7), ObjectId::from_raw(8)]
        );
    }
}
