//! Exported documents parse back with the expected feature layout

use chrono::{TimeZone, Utc};
use dredge_core::models::{DepthRange, DredgeRecord, GeoPoint, Material, ProjectId, RecordId};
use dredge_export::{
    export_session, polygon_from_geojson, suggested_filename, to_json_string, ExportSink,
    FileExportSink,
};
use dredge_select::MapSession;
use geojson::{GeoJson, Value};
use tempfile::TempDir;

fn record(lat: f64, lng: f64, depth: f64, volume: f64, material: Material) -> DredgeRecord {
    DredgeRecord {
        id: RecordId::new(),
        project_id: ProjectId::new(),
        timestamp: Utc.with_ymd_and_hms(2024, 7, 2, 15, 45, 0).unwrap(),
        lat,
        lng,
        depth,
        volume,
        material,
        vessel_name: "Draga Itapoá".to_string(),
        notes: None,
        photo: None,
    }
}

fn session() -> MapSession {
    let records = vec![
        record(-23.955, -46.325, 8.0, 300.0, Material::Sand),
        record(-23.952, -46.322, 11.0, 120.0, Material::Silt),
        // outside every polygon
        record(-23.900, -46.300, 9.0, 999.0, Material::Rock),
    ];
    let boundary = vec![
        GeoPoint::new(-23.96, -46.33),
        GeoPoint::new(-23.96, -46.32),
        GeoPoint::new(-23.95, -46.32),
        GeoPoint::new(-23.95, -46.33),
    ];
    let mut session = MapSession::new(records, boundary, DepthRange::default());

    let drawn = r#"{"type": "Polygon", "coordinates": [[[-46.324, -23.954], [-46.321, -23.954], [-46.321, -23.951], [-46.324, -23.951], [-46.324, -23.954]]]}"#;
    session.set_adhoc(polygon_from_geojson(drawn).unwrap());
    session
}

#[test]
fn test_export_has_polygon_then_point_features() {
    let session = session();
    let stats = session.stats().unwrap();
    assert_eq!(stats.count, 2);

    let text = to_json_string(&export_session(&session).unwrap()).unwrap();
    let GeoJson::FeatureCollection(parsed) = text.parse::<GeoJson>().unwrap() else {
        panic!("expected a feature collection");
    };

    let active = session.active_polygons();
    assert_eq!(parsed.features.len(), active.len() + stats.count);

    let (polygons, points) = parsed.features.split_at(active.len());
    for feature in polygons {
        assert!(matches!(feature.geometry.as_ref().unwrap().value, Value::Polygon(_)));
    }

    let selected = session.selection();
    for (feature, record) in points.iter().zip(selected) {
        assert_eq!(
            feature.geometry.as_ref().unwrap().value,
            Value::Point(vec![record.lng, record.lat])
        );
        assert_eq!(
            feature.property("id").and_then(|v| v.as_str()),
            Some(record.id.to_string().as_str())
        );
    }
}

#[test]
fn test_export_written_to_disk() {
    let dir = TempDir::new().unwrap();
    let session = session();
    let mut sink = FileExportSink::new(dir.path());

    let filename = suggested_filename(Utc::now());
    let document = to_json_string(&export_session(&session).unwrap()).unwrap();
    sink.deliver(&filename, &document).unwrap();

    let written = std::fs::read_to_string(sink.path_for(&filename)).unwrap();
    assert!(written.contains("Manual Selection"));
    assert!(written.contains("Official Area"));
}
