//! Construction Dependency Graph
//!
//! This module implements the dependency graph that tracks relationships
//! between geometric objects and the algorithms that compute them.
//!
//! # Overview
//!
//! The graph is a directed acyclic bipartite structure:
//!
//! - Object vertices hold geometric values (points, lines, polyhedra, ...)
//! - Algorithm vertices consume input objects and own their output objects
//! - Edges run from each input object to the algorithms that read it, and
//!   from each algorithm to the objects it produces
//!
//! When a free object changes, we traverse the graph to find every affected
//! algorithm, order the dirty set topologically, and recompute each node
//! exactly once per pass.
//!
//! # Design Decisions
//!
//! 1. We use a centralized graph rather than per-object observer lists because:
//!    - It enables efficient topological ordering for batch updates
//!    - It simplifies cycle detection during redefinition
//!    - It gives removal a single place to compute the doomed closure
//!
//! 2. Objects and algorithm nodes are indexed by ID for O(1) lookups.
//!
//! 3. Output objects keep a stable identity across recomputation: when an
//!    algorithm's output plan shrinks, surplus slots are retired to the
//!    undefined state instead of being destroyed, so downstream consumers
//!    stay attached.

mod construction;
mod object;

pub use construction::Construction;
pub use object::{AlgoId, AlgoNode, GeoObject, ObjectId};
