//! Advisory checks for boundary vertex lists.
//!
//! Nothing here blocks an edit: a boundary with problems is still stored and
//! still used for containment. The results feed warnings shown to the user.

use crate::models::to_geo_coord;
use dredge_core::models::{GeoPoint, Polygon};
use geo::algorithm::intersects::Intersects;

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }
}

/// Validate a boundary vertex list
pub fn validate_boundary(vertices: &[GeoPoint]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if vertices.len() < Polygon::MIN_VERTICES {
        result.add_error(
            "Boundary".to_string(),
            format!(
                "Boundary needs at least {} vertices to select points, found {}",
                Polygon::MIN_VERTICES,
                vertices.len()
            ),
        );
    }

    for (i, vertex) in vertices.iter().enumerate() {
        if !vertex.is_finite() {
            result.add_error(format!("P{}", i + 1), "Coordinates must be finite".to_string());
            continue;
        }
        if !(-90.0..=90.0).contains(&vertex.lat) {
            result.add_error(
                format!("P{}", i + 1),
                format!("Latitude {} is outside [-90, 90]", vertex.lat),
            );
        }
        if !(-180.0..=180.0).contains(&vertex.lng) {
            result.add_error(
                format!("P{}", i + 1),
                format!("Longitude {} is outside [-180, 180]", vertex.lng),
            );
        }
    }

    if result.is_valid {
        if let Some(((a1, a2), (b1, b2))) = first_crossing_edges(vertices) {
            result.add_error(
                "Boundary".to_string(),
                format!(
                    "Edge P{}-P{} crosses edge P{}-P{}; containment may be unexpected",
                    a1 + 1,
                    a2 + 1,
                    b1 + 1,
                    b2 + 1
                ),
            );
        }
    }

    result
}

type Edge = (usize, usize);

/// First pair of non-adjacent ring edges that intersect, as vertex index pairs.
///
/// Repeated consecutive vertices are collapsed first so a double click does
/// not show up as a crossing.
fn first_crossing_edges(vertices: &[GeoPoint]) -> Option<(Edge, Edge)> {
    let mut ring: Vec<(usize, GeoPoint)> = Vec::with_capacity(vertices.len());
    for (i, vertex) in vertices.iter().enumerate() {
        if ring.last().map(|(_, last)| last) != Some(vertex) {
            ring.push((i, *vertex));
        }
    }
    while ring.len() > 1 && ring.first().map(|(_, v)| v) == ring.last().map(|(_, v)| v) {
        ring.pop();
    }

    let n = ring.len();
    if n < 4 {
        return None;
    }

    let edge = |i: usize| {
        geo::Line::new(to_geo_coord(&ring[i].1), to_geo_coord(&ring[(i + 1) % n].1))
    };
    let indices = |i: usize| (ring[i].0, ring[(i + 1) % n].0);

    for a in 0..n {
        for b in (a + 2)..n {
            // The closing edge is adjacent to the first one
            if a == 0 && b == n - 1 {
                continue;
            }
            if edge(a).intersects(&edge(b)) {
                return Some((indices(a), indices(b)));
            }
        }
    }
    None
}
