//! Conversions between dredgemap geometry and `geo` crate types.
//!
//! `geo` uses `x = longitude, y = latitude`, the reverse of [`GeoPoint`].

use dredge_core::models::{GeoPoint, Polygon};

pub fn to_geo_coord(point: &GeoPoint) -> geo::Coord {
    geo::Coord { x: point.lng, y: point.lat }
}

pub fn to_geo_point(point: &GeoPoint) -> geo::Point {
    geo::Point::new(point.lng, point.lat)
}

pub fn from_geo_coord(coord: &geo::Coord) -> GeoPoint {
    GeoPoint::new(coord.y, coord.x)
}

/// Convert a vertex list to a `geo::Polygon`; the ring is closed by `geo`
pub fn to_geo_polygon(vertices: &[GeoPoint]) -> geo::Polygon {
    let coords: Vec<geo::Coord> = vertices.iter().map(to_geo_coord).collect();
    geo::Polygon::new(geo::LineString::new(coords), vec![])
}

/// Convert the exterior ring of a `geo::Polygon` back to a polygon.
///
/// The closing coordinate is dropped. Returns `None` for rings with fewer
/// than three distinct positions.
pub fn from_geo_polygon(polygon: &geo::Polygon) -> Option<Polygon> {
    let mut vertices: Vec<GeoPoint> = polygon.exterior().coords().map(from_geo_coord).collect();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    Polygon::new(vertices)
}

/// Extension trait for Polygon with geo-crate operations
pub trait PolygonExt {
    /// Convert to geo::Polygon
    fn to_geo(&self) -> geo::Polygon;

    /// Get the centroid as a GeoPoint
    fn centroid(&self) -> Option<GeoPoint>;
}

impl PolygonExt for Polygon {
    fn to_geo(&self) -> geo::Polygon {
        to_geo_polygon(self.vertices())
    }

    fn centroid(&self) -> Option<GeoPoint> {
        use geo::algorithm::centroid::Centroid;
        self.to_geo().centroid().map(|p| GeoPoint::new(p.y(), p.x()))
    }
}
