//! End-to-end selection through a map session backed by a project store

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{TimeZone, Utc};
use dredge_core::models::{
    DepthRange, DredgeRecord, GeoPoint, Material, Polygon, Project, ProjectDraft, ProjectId,
    RecordId,
};
use dredge_core::ports::ProjectStore;
use dredge_core::{DredgeError, Result};
use dredge_select::{MapSession, StoreBoundarySink};

/// Minimal project store that only keeps boundaries
#[derive(Clone, Default)]
struct BoundaryOnlyStore {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl ProjectStore for BoundaryOnlyStore {
    fn insert_project(&self, project: Project) -> Result<()> {
        self.projects.write().unwrap().insert(project.id, project);
        Ok(())
    }

    fn get_project(&self, id: ProjectId) -> Result<Option<Project>> {
        Ok(self.projects.read().unwrap().get(&id).cloned())
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.read().unwrap().values().cloned().collect())
    }

    fn delete_project(&self, id: ProjectId) -> Result<()> {
        self.projects.write().unwrap().remove(&id);
        Ok(())
    }

    fn save_boundary(&self, id: ProjectId, boundary: Option<Vec<GeoPoint>>) -> Result<()> {
        let mut projects = self.projects.write().unwrap();
        let project = projects
            .get_mut(&id)
            .ok_or_else(|| DredgeError::ProjectNotFound { id: id.to_string() })?;
        project.boundary = boundary;
        Ok(())
    }
}

fn record(project_id: ProjectId, lat: f64, lng: f64, depth: f64, volume: f64) -> DredgeRecord {
    DredgeRecord {
        id: RecordId::new(),
        project_id,
        timestamp: Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap(),
        lat,
        lng,
        depth,
        volume,
        material: Material::Sand,
        vessel_name: "Draga Santos".to_string(),
        notes: None,
        photo: None,
    }
}

fn setup() -> (BoundaryOnlyStore, ProjectId) {
    let store = BoundaryOnlyStore::default();
    let project = Project::from_draft(ProjectDraft {
        name: "Canal de Piaçaguera".to_string(),
        client: "Porto de Santos".to_string(),
        location: "Santos, SP".to_string(),
        description: None,
    })
    .unwrap();
    let id = project.id;
    store.insert_project(project).unwrap();
    (store, id)
}

#[test]
fn test_boundary_edits_reach_the_store() {
    let (store, project_id) = setup();
    let mut session = MapSession::new(Vec::new(), Vec::new(), DepthRange::default())
        .with_boundary_sink(StoreBoundarySink::new(store.clone(), project_id));

    let a = GeoPoint::new(0.0, 0.0);
    let b = GeoPoint::new(0.0, 1.0);
    let c = GeoPoint::new(1.0, 1.0);
    for vertex in [a, b, c] {
        session.append_vertex(vertex).unwrap();
    }

    session.remove_vertex_at(1).unwrap();
    assert_eq!(session.boundary(), &[a, c]);
    session.remove_vertex_at(1).unwrap();
    assert_eq!(session.boundary(), &[a]);

    let stored = store.get_project(project_id).unwrap().unwrap();
    assert_eq!(stored.boundary, Some(vec![a]));

    session.clear_boundary().unwrap();
    let stored = store.get_project(project_id).unwrap().unwrap();
    assert_eq!(stored.boundary, None);
}

#[test]
fn test_overlap_and_depth_filter() {
    let (store, project_id) = setup();
    let records = vec![
        // inside both polygons
        record(project_id, 4.0, 4.0, 10.0, 100.0),
        // inside the boundary but too deep
        record(project_id, 1.0, 1.0, 35.0, 900.0),
        // inside the drawn polygon only
        record(project_id, 7.0, 7.0, 12.0, 50.0),
    ];
    let boundary = vec![
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(0.0, 5.0),
        GeoPoint::new(5.0, 5.0),
        GeoPoint::new(5.0, 0.0),
    ];
    let mut session = MapSession::new(records, boundary, DepthRange::new(0.0, 30.0))
        .with_boundary_sink(StoreBoundarySink::new(store, project_id));

    // Observed depths are [10, 35]; only the lower bound moves
    assert_eq!(session.depth_range(), DepthRange::new(10.0, 30.0));

    session.set_adhoc(
        Polygon::new(vec![
            GeoPoint::new(3.0, 3.0),
            GeoPoint::new(3.0, 8.0),
            GeoPoint::new(8.0, 8.0),
            GeoPoint::new(8.0, 3.0),
        ])
        .unwrap(),
    );

    let stats = session.stats().unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.volume, 150.0);
    assert_eq!(stats.avg_depth, 11.0);
    assert!(!stats.is_official_boundary);
}

#[test]
fn test_capture_mode_drives_boundary() {
    let (store, project_id) = setup();
    let mut session = MapSession::default()
        .with_boundary_sink(StoreBoundarySink::new(store.clone(), project_id));

    assert!(!session.capture_click(GeoPoint::new(0.0, 0.0)).unwrap());
    session.set_capture(true);
    for (lat, lng) in [(0.0, 0.0), (0.0, 2.0), (2.0, 2.0)] {
        assert!(session.capture_click(GeoPoint::new(lat, lng)).unwrap());
    }

    assert!(session.active_polygons().is_official_boundary());
    assert_eq!(store.get_project(project_id).unwrap().unwrap().boundary_len(), 3);
}
