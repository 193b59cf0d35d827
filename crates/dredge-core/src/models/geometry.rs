//! Canonical geometry types used across all dredgemap crates.
//!
//! Coordinates are stored as `{lat, lng}` pairs. GeoJSON and the `geo` crate
//! both use `[x, y] = [lng, lat]`, so every conversion out of this module has
//! to swap the axes explicitly.

use serde::{Deserialize, Serialize};

use crate::error::DredgeError;

/// A geographic coordinate in WGS 84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Position in GeoJSON axis order
    pub fn to_lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub fn from_lng_lat(position: [f64; 2]) -> Self {
        Self { lat: position[1], lng: position[0] }
    }
}

/// Closed polygon with at least three vertices.
///
/// The ring is implicit: the last vertex connects back to the first, so the
/// closing vertex is never stored. Vertex order is the insertion order of the
/// boundary editor or drawing surface and is kept as-is (no deduplication).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GeoPoint>", into = "Vec<GeoPoint>")]
pub struct Polygon {
    vertices: Vec<GeoPoint>,
}

impl Polygon {
    pub const MIN_VERTICES: usize = 3;

    /// Build a polygon, or `None` when fewer than three vertices are given
    pub fn new(vertices: Vec<GeoPoint>) -> Option<Self> {
        if vertices.len() < Self::MIN_VERTICES {
            return None;
        }
        Some(Self { vertices })
    }

    /// Build a polygon from a slice of vertices
    pub fn from_vertices(vertices: &[GeoPoint]) -> Option<Self> {
        Self::new(vertices.to_vec())
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Exterior ring in GeoJSON order, closed by repeating the first vertex
    pub fn closed_ring_lng_lat(&self) -> Vec<[f64; 2]> {
        let mut ring: Vec<[f64; 2]> = self.vertices.iter().map(GeoPoint::to_lng_lat).collect();
        if let (Some(first), Some(last)) = (self.vertices.first(), self.vertices.last()) {
            if first != last {
                ring.push(first.to_lng_lat());
            }
        }
        ring
    }
}

impl TryFrom<Vec<GeoPoint>> for Polygon {
    type Error = DredgeError;

    fn try_from(vertices: Vec<GeoPoint>) -> Result<Self, Self::Error> {
        let found = vertices.len();
        Polygon::new(vertices).ok_or(DredgeError::DegeneratePolygon { found })
    }
}

impl From<Polygon> for Vec<GeoPoint> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

/// Inclusive depth filter in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: f64,
    pub max: f64,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self { min: Self::DEFAULT_MIN, max: Self::DEFAULT_MAX }
    }
}

impl DepthRange {
    pub const DEFAULT_MIN: f64 = 0.0;
    pub const DEFAULT_MAX: f64 = 30.0;

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `min <= depth <= max`
    pub fn contains(&self, depth: f64) -> bool {
        depth >= self.min && depth <= self.max
    }

    /// Range spanned by observed depths, widened to whole meters.
    ///
    /// Returns the default `[0, 30]` when there are no depths at all.
    pub fn observed<I>(depths: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut bounds: Option<(f64, f64)> = None;
        for depth in depths {
            bounds = Some(match bounds {
                None => (depth, depth),
                Some((lo, hi)) => (lo.min(depth), hi.max(depth)),
            });
        }

        match bounds {
            Some((lo, hi)) => Self::new(lo.floor(), hi.ceil()),
            None => Self::default(),
        }
    }

    /// Pull each bound back inside `observed` if it currently falls outside.
    ///
    /// A bound already inside the observed range is left untouched.
    pub fn clamp_to(&self, observed: &DepthRange) -> Self {
        let mut clamped = *self;
        if clamped.min < observed.min {
            clamped.min = observed.min;
        }
        if clamped.max > observed.max {
            clamped.max = observed.max;
        }
        clamped
    }
}
