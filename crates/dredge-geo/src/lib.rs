//! DredgeMap Geo - Containment tests and polygon helpers
//!
//! This crate holds the geometry kernel: the ray-casting containment test used
//! for every selection, plus bounds, area and validity helpers built on the
//! `geo` crate.

pub mod models;
pub mod spatial;
pub mod validation;

pub use spatial::{contained_in_any, point_in_polygon, Bounds};
