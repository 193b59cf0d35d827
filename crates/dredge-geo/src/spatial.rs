use crate::models::{to_geo_point, to_geo_polygon};
use dredge_core::models::{GeoPoint, Polygon};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::{Distance, GeodesicArea, Haversine};
use serde::Serialize;

/// Crossing-number containment test.
///
/// A horizontal ray is cast from `point` along its latitude and the inclusion
/// flag is toggled for every edge it crosses, including the closing edge from
/// the last vertex back to the first. Vertex lists with fewer than three
/// vertices never contain anything.
///
/// Points lying exactly on an edge get whatever answer the edge-crossing
/// comparisons produce; callers must not rely on either outcome.
pub fn point_in_polygon(point: GeoPoint, vertices: &[GeoPoint]) -> bool {
    if vertices.len() < Polygon::MIN_VERTICES {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];

        if (vi.lng > point.lng) != (vj.lng > point.lng)
            && point.lat < (vj.lat - vi.lat) * (point.lng - vi.lng) / (vj.lng - vi.lng) + vi.lat
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// True if `point` is inside at least one of `polygons`
pub fn contained_in_any<'a, I>(point: GeoPoint, polygons: I) -> bool
where
    I: IntoIterator<Item = &'a Polygon>,
{
    polygons.into_iter().any(|polygon| point_in_polygon(point, polygon.vertices()))
}

/// Axis-aligned extent of a vertex list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    /// South-west corner
    pub min: GeoPoint,
    /// North-east corner
    pub max: GeoPoint,
}

impl Bounds {
    /// Inclusive bounding-box check
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.min.lat
            && point.lat <= self.max.lat
            && point.lng >= self.min.lng
            && point.lng <= self.max.lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.min.lat + self.max.lat) / 2.0, (self.min.lng + self.max.lng) / 2.0)
    }
}

/// Bounding box of any non-empty vertex list
pub fn polygon_bounds(vertices: &[GeoPoint]) -> Option<Bounds> {
    let rect = to_geo_polygon(vertices).bounding_rect()?;
    Some(Bounds {
        min: GeoPoint::new(rect.min().y, rect.min().x),
        max: GeoPoint::new(rect.max().y, rect.max().x),
    })
}

/// Geodesic area enclosed by the polygon in square meters
pub fn polygon_area_m2(polygon: &Polygon) -> f64 {
    to_geo_polygon(polygon.vertices()).geodesic_area_unsigned()
}

/// Length of the closed ring in meters (haversine)
pub fn polygon_perimeter_m(polygon: &Polygon) -> f64 {
    let vertices = polygon.vertices();
    let mut total = 0.0;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        total += Haversine.distance(to_geo_point(&vertices[j]), to_geo_point(&vertices[i]));
        j = i;
    }
    total
}
