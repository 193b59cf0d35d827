//! Selection to GeoJSON `FeatureCollection`.
//!
//! Output coordinates are `[lng, lat]` and polygon rings are closed by
//! repeating the first vertex, as RFC 7946 requires.

use chrono::{DateTime, Utc};
use dredge_core::models::{DredgeRecord, SelectionStats};
use dredge_core::{DredgeError, Result};
use dredge_select::{ActivePolygonSet, MapSession};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use tracing::info;

/// Build the export document.
///
/// One polygon feature per active polygon comes first, labelled with its role
/// and carrying the selection volume and average depth. One point feature
/// per selected record follows, carrying every record field.
pub fn export_selection(
    active: &ActivePolygonSet,
    selected: &[&DredgeRecord],
    stats: &SelectionStats,
) -> Result<FeatureCollection> {
    let mut features = Vec::with_capacity(active.len() + selected.len());

    for (role, polygon) in active.iter() {
        let ring: Vec<Vec<f64>> =
            polygon.closed_ring_lng_lat().into_iter().map(|position| position.to_vec()).collect();

        let mut properties = JsonObject::new();
        properties.insert("type".to_string(), JsonValue::from(role.label()));
        properties.insert("calc_volume".to_string(), JsonValue::from(stats.volume));
        properties.insert("avg_depth".to_string(), JsonValue::from(round2(stats.avg_depth)));

        features.push(Feature {
            geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
            properties: Some(properties),
            id: None,
            bbox: None,
            foreign_members: None,
        });
    }

    for record in selected {
        let properties = match serde_json::to_value(record)? {
            JsonValue::Object(map) => map,
            other => {
                return Err(DredgeError::Serialization(format!(
                    "record {} serialized to {} instead of an object",
                    record.id, other
                )))
            }
        };

        features.push(Feature {
            geometry: Some(Geometry::new(Value::Point(vec![record.lng, record.lat]))),
            properties: Some(properties),
            id: None,
            bbox: None,
            foreign_members: None,
        });
    }

    Ok(FeatureCollection { features, bbox: None, foreign_members: None })
}

/// Export whatever the session currently selects.
///
/// Fails with [`DredgeError::NoSelection`] when no stats can be computed.
pub fn export_session(session: &MapSession) -> Result<FeatureCollection> {
    let stats = session.stats().ok_or(DredgeError::NoSelection)?;
    let active = session.active_polygons();
    let selected = session.selection();

    let collection = export_selection(&active, &selected, &stats)?;
    info!(polygons = active.len(), points = selected.len(), "Selection exported");
    Ok(collection)
}

/// Pretty-printed JSON text of the document
pub fn to_json_string(collection: &FeatureCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// `dredge_selection_<unix millis>.geojson`
pub fn suggested_filename(now: DateTime<Utc>) -> String {
    format!("dredge_selection_{}.geojson", now.timestamp_millis())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
