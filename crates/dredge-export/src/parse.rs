//! Reading drawn selection polygons from GeoJSON text.

use dredge_core::models::{GeoPoint, Polygon};
use dredge_core::{DredgeError, Result};
use geojson::{GeoJson, Geometry, Value};

/// Parse the first polygon found in a GeoJSON document.
///
/// Accepts a bare `Polygon` geometry, a `Feature` holding one, or a
/// `FeatureCollection` (first polygon feature wins). Only the exterior ring is
/// used and its closing position is dropped.
pub fn polygon_from_geojson(text: &str) -> Result<Polygon> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| DredgeError::Serialization(e.to_string()))?;

    let geometry = match &geojson {
        GeoJson::Geometry(geometry) => Some(geometry),
        GeoJson::Feature(feature) => feature.geometry.as_ref(),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .find(|geometry| matches!(geometry.value, Value::Polygon(_))),
    };

    geometry.map(polygon_from_geometry).unwrap_or_else(|| {
        Err(DredgeError::Serialization("No Polygon geometry found in GeoJSON".to_string()))
    })
}

fn polygon_from_geometry(geometry: &Geometry) -> Result<Polygon> {
    let Value::Polygon(rings) = &geometry.value else {
        return Err(DredgeError::Serialization("Expected a Polygon geometry".to_string()));
    };
    let exterior = rings.first().ok_or(DredgeError::DegeneratePolygon { found: 0 })?;

    let mut vertices = exterior
        .iter()
        .map(|position| match position.as_slice() {
            [lng, lat, ..] => Ok(GeoPoint::new(*lat, *lng)),
            _ => Err(DredgeError::Serialization(format!(
                "Position needs two coordinates, found {}",
                position.len()
            ))),
        })
        .collect::<Result<Vec<GeoPoint>>>()?;

    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    Polygon::try_from(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"{
        "type": "Polygon",
        "coordinates": [[[-46.33, -23.96], [-46.32, -23.96], [-46.32, -23.95], [-46.33, -23.95], [-46.33, -23.96]]]
    }"#;

    #[test]
    fn test_bare_polygon() {
        let polygon = polygon_from_geojson(SQUARE).unwrap();
        assert_eq!(polygon.len(), 4);
        assert_eq!(polygon.vertices()[0], GeoPoint::new(-23.96, -46.33));
    }

    #[test]
    fn test_feature_collection_skips_points() {
        let text = format!(
            r#"{{
                "type": "FeatureCollection",
                "features": [
                    {{"type": "Feature", "properties": {{}}, "geometry": {{"type": "Point", "coordinates": [0.0, 0.0]}}}},
                    {{"type": "Feature", "properties": {{"name": "cava 2"}}, "geometry": {}}}
                ]
            }}"#,
            SQUARE
        );
        assert_eq!(polygon_from_geojson(&text).unwrap().len(), 4);
    }

    #[test]
    fn test_point_feature_is_rejected() {
        let text = r#"{"type": "Feature", "properties": null, "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}}"#;
        assert!(matches!(polygon_from_geojson(text), Err(DredgeError::Serialization(_))));
    }

    #[test]
    fn test_degenerate_ring() {
        let text = r#"{"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}"#;
        assert!(matches!(
            polygon_from_geojson(text),
            Err(DredgeError::DegeneratePolygon { found: 2 })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(polygon_from_geojson("not geojson").is_err());
    }
}
