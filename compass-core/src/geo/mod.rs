//! Geometric Value Types
//!
//! This module defines the payloads that live inside construction objects.
//!
//! # Overview
//!
//! A construction object pairs a fixed [`GeoKind`] with a mutable
//! [`GeoValue`]. The value is either a concrete primitive (point, line,
//! segment, polygon, polyhedron, vector, number) or undefined. Undefined is
//! the normal terminal state of numerically degenerate computations and is
//! never signalled as an error.
//!
//! All tolerance decisions route through [`crate::numeric`] so that every
//! algorithm in the library judges degeneracy identically.

mod primitives;
mod value;

pub use primitives::{Line, Point, Polygon, Polyhedron, PolyhedronShape, Segment, Vector};
pub use value::{GeoKind, GeoValue};
