//! Compass Core
//!
//! This crate provides the core construction engine for the Compass dynamic
//! geometry toolkit. It implements:
//!
//! - Geometric value types (points, lines, segments, polygons, polyhedra)
//! - A library of construction algorithms (triangle centers, intersections,
//!   the Miquel point, prisms and pyramids)
//! - A dependency graph with incremental recomputation
//! - Change notification for embedding hosts
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `geo`: Geometric primitives and the tagged value type
//! - `algo`: Construction algorithms and the `Algorithm` trait
//! - `graph`: The construction dependency graph and update scheduling
//! - `notify`: Change notification hooks
//! - `numeric`: Tolerance-based floating point comparison
//! - `error`: The error taxonomy for structural graph operations
//!
//! # Example
//!
//! ```rust,ignore
//! use compass_core::algo::Circumcenter;
//! use compass_core::geo::GeoValue;
//! use compass_core::graph::Construction;
//!
//! let mut c = Construction::new();
//!
//! // Three free points
//! let a = c.add_free(GeoValue::point(0.0, 0.0), Some("A")).unwrap();
//! let b = c.add_free(GeoValue::point(1.0, 0.0), Some("B")).unwrap();
//! let p = c.add_free(GeoValue::point(0.0, 1.0), Some("C")).unwrap();
//!
//! // A derived point that recomputes whenever a vertex moves
//! let node = c.add_algorithm(Box::new(Circumcenter), &[a, b, p]).unwrap();
//! let center = c.node_outputs(node).unwrap()[0];
//!
//! c.set_free_value(a, GeoValue::point(0.5, 0.5)).unwrap();
//! println!("{:?}", c.value(center));
//! ```

pub mod algo;
pub mod error;
pub mod geo;
pub mod graph;
pub mod notify;
pub mod numeric;
