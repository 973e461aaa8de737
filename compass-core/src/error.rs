//! Error Taxonomy
//!
//! Structural errors surfaced by the construction graph. Every variant is
//! recoverable: a failed operation leaves the graph exactly as it was before
//! the call. Numerically degenerate results are *not* errors: they are
//! represented by the undefined state of a [`GeoValue`](crate::geo::GeoValue)
//! and propagate silently through dependent nodes.

use thiserror::Error;

use crate::geo::GeoKind;
use crate::graph::{AlgoId, ObjectId};

/// Errors returned by the structural operations on a construction.
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    /// An input reference does not resolve to a live object.
    #[error("input reference {0:?} does not resolve to a live object")]
    UnresolvedInput(ObjectId),

    /// The requested redefinition would make a node its own transitive
    /// dependency.
    #[error("redefinition would create a dependency cycle through {0:?}")]
    CyclicDependency(ObjectId),

    /// A node reference does not resolve to a live algorithm node.
    #[error("algorithm node {0:?} does not exist")]
    UnknownNode(AlgoId),

    /// A non-cascading removal was blocked by dependent algorithm nodes.
    #[error("object {0:?} still has dependent algorithm nodes")]
    HasDependents(ObjectId),

    /// The supplied inputs do not match the algorithm's signature.
    #[error("algorithm {algorithm} expects {expected} inputs, got {found}")]
    ArityMismatch {
        algorithm: &'static str,
        expected: usize,
        found: usize,
    },

    /// An input object has the wrong kind for its position.
    #[error("input {position} of {algorithm} cannot accept a {found:?}")]
    InputKindMismatch {
        algorithm: &'static str,
        position: usize,
        found: GeoKind,
    },

    /// A direct value edit targeted an object owned by an algorithm node.
    #[error("object {0:?} is derived; edit its inputs instead")]
    NotFree(ObjectId),

    /// A value edit attempted to change an object's kind.
    #[error("object is a {expected:?}, cannot assign a {found:?}")]
    KindMismatch { expected: GeoKind, found: GeoKind },

    /// The label is already bound to another object.
    #[error("label {0:?} is already in use")]
    DuplicateLabel(String),
}
