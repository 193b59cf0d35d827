//! In-memory storage for projects, records and the audit trail.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state.

use dredge_core::error::{DredgeError, Result};
use dredge_core::models::{AuditEntry, DredgeRecord, GeoPoint, Project, ProjectId, RecordId};
use dredge_core::ports::{AuditStore, ProjectStore, RecordStore};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Full contents of a store at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Creation order
    pub projects: Vec<Project>,
    /// Newest first
    pub records: Vec<DredgeRecord>,
    /// Newest first
    pub audit: Vec<AuditEntry>,
}

/// In-memory implementation of all storage ports.
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: Arc<RwLock<Vec<Project>>>,
    records: Arc<RwLock<Vec<DredgeRecord>>>,
    audit: Arc<RwLock<Vec<AuditEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            projects: Arc::new(RwLock::new(snapshot.projects)),
            records: Arc::new(RwLock::new(snapshot.records)),
            audit: Arc::new(RwLock::new(snapshot.audit)),
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            projects: self.projects.read().unwrap().clone(),
            records: self.records.read().unwrap().clone(),
            audit: self.audit.read().unwrap().clone(),
        }
    }

    pub(crate) fn projects(&self) -> Vec<Project> {
        self.projects.read().unwrap().clone()
    }

    pub(crate) fn records(&self) -> Vec<DredgeRecord> {
        self.records.read().unwrap().clone()
    }

    pub(crate) fn audit(&self) -> Vec<AuditEntry> {
        self.audit.read().unwrap().clone()
    }

    fn ensure_project(&self, id: ProjectId) -> Result<()> {
        let projects = self.projects.read().unwrap();
        if projects.iter().any(|project| project.id == id) {
            Ok(())
        } else {
            Err(DredgeError::ProjectNotFound { id: id.to_string() })
        }
    }
}

impl ProjectStore for MemoryStore {
    fn insert_project(&self, project: Project) -> Result<()> {
        self.projects.write().unwrap().push(project);
        Ok(())
    }

    fn get_project(&self, id: ProjectId) -> Result<Option<Project>> {
        let projects = self.projects.read().unwrap();
        Ok(projects.iter().find(|project| project.id == id).cloned())
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects())
    }

    fn delete_project(&self, id: ProjectId) -> Result<()> {
        let mut projects = self.projects.write().unwrap();
        let before = projects.len();
        projects.retain(|project| project.id != id);
        if projects.len() == before {
            return Err(DredgeError::ProjectNotFound { id: id.to_string() });
        }

        self.records.write().unwrap().retain(|record| record.project_id != id);
        self.audit.write().unwrap().retain(|entry| entry.project_id != Some(id));
        Ok(())
    }

    fn save_boundary(&self, id: ProjectId, boundary: Option<Vec<GeoPoint>>) -> Result<()> {
        let mut projects = self.projects.write().unwrap();
        let project = projects
            .iter_mut()
            .find(|project| project.id == id)
            .ok_or_else(|| DredgeError::ProjectNotFound { id: id.to_string() })?;
        project.boundary = boundary;
        Ok(())
    }
}

impl RecordStore for MemoryStore {
    fn insert_record(&self, record: DredgeRecord) -> Result<()> {
        self.ensure_project(record.project_id)?;
        self.records.write().unwrap().insert(0, record);
        Ok(())
    }

    fn replace_record(&self, record: DredgeRecord) -> Result<DredgeRecord> {
        let mut records = self.records.write().unwrap();
        let slot = records
            .iter_mut()
            .find(|stored| stored.id == record.id)
            .ok_or_else(|| DredgeError::RecordNotFound { id: record.id.to_string() })?;
        Ok(std::mem::replace(slot, record))
    }

    fn remove_record(&self, id: RecordId) -> Result<DredgeRecord> {
        let mut records = self.records.write().unwrap();
        let index = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| DredgeError::RecordNotFound { id: id.to_string() })?;
        Ok(records.remove(index))
    }

    fn get_record(&self, id: RecordId) -> Result<Option<DredgeRecord>> {
        let records = self.records.read().unwrap();
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    fn records_for_project(&self, project: ProjectId) -> Result<Vec<DredgeRecord>> {
        self.ensure_project(project)?;
        let records = self.records.read().unwrap();
        Ok(records.iter().filter(|record| record.project_id == project).cloned().collect())
    }
}

impl AuditStore for MemoryStore {
    fn append_audit(&self, entry: AuditEntry) -> Result<()> {
        self.audit.write().unwrap().insert(0, entry);
        Ok(())
    }

    fn audit_for_project(&self, project: ProjectId) -> Result<Vec<AuditEntry>> {
        let audit = self.audit.read().unwrap();
        Ok(audit.iter().filter(|entry| entry.project_id == Some(project)).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dredge_core::models::{AuditAction, Material, ProjectDraft};

    fn project(name: &str) -> Project {
        Project::from_draft(ProjectDraft { name: name.to_string(), ..Default::default() }).unwrap()
    }

    fn record(project_id: ProjectId, volume: f64) -> DredgeRecord {
        DredgeRecord {
            id: RecordId::new(),
            project_id,
            timestamp: Utc::now(),
            lat: -23.96,
            lng: -46.33,
            depth: 10.0,
            volume,
            material: Material::Sand,
            vessel_name: "Draga I".to_string(),
            notes: None,
            photo: None,
        }
    }

    #[test]
    fn test_project_crud() {
        let store = MemoryStore::new();
        let first = project("Canal Norte");
        let second = project("Canal Sul");
        store.insert_project(first.clone()).unwrap();
        store.insert_project(second.clone()).unwrap();

        let names: Vec<String> =
            store.list_projects().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Canal Norte", "Canal Sul"]);
        assert_eq!(store.get_project(first.id).unwrap(), Some(first));

        store.delete_project(second.id).unwrap();
        assert!(store.get_project(second.id).unwrap().is_none());
        assert!(matches!(
            store.delete_project(second.id),
            Err(DredgeError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn test_records_newest_first() {
        let store = MemoryStore::new();
        let p = project("Canal Norte");
        store.insert_project(p.clone()).unwrap();

        store.insert_record(record(p.id, 1.0)).unwrap();
        store.insert_record(record(p.id, 2.0)).unwrap();

        let volumes: Vec<f64> =
            store.records_for_project(p.id).unwrap().iter().map(|r| r.volume).collect();
        assert_eq!(volumes, vec![2.0, 1.0]);
    }

    #[test]
    fn test_record_requires_project() {
        let store = MemoryStore::new();
        let result = store.insert_record(record(ProjectId::new(), 1.0));
        assert!(matches!(result, Err(DredgeError::ProjectNotFound { .. })));
    }

    #[test]
    fn test_replace_and_remove() {
        let store = MemoryStore::new();
        let p = project("Canal Norte");
        store.insert_project(p.clone()).unwrap();
        let original = record(p.id, 5.0);
        store.insert_record(original.clone()).unwrap();

        let mut edited = original.clone();
        edited.volume = 7.5;
        let previous = store.replace_record(edited.clone()).unwrap();
        assert_eq!(previous.volume, 5.0);
        assert_eq!(store.get_record(original.id).unwrap(), Some(edited));

        store.remove_record(original.id).unwrap();
        assert!(matches!(
            store.remove_record(original.id),
            Err(DredgeError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_project_cascades() {
        let store = MemoryStore::new();
        let kept = project("Kept");
        let dropped = project("Dropped");
        store.insert_project(kept.clone()).unwrap();
        store.insert_project(dropped.clone()).unwrap();

        let kept_record = record(kept.id, 1.0);
        let dropped_record = record(dropped.id, 2.0);
        store.insert_record(kept_record.clone()).unwrap();
        store.insert_record(dropped_record.clone()).unwrap();
        store
            .append_audit(AuditEntry::for_record(AuditAction::Create, &kept_record, "op", "a"))
            .unwrap();
        store
            .append_audit(AuditEntry::for_record(AuditAction::Create, &dropped_record, "op", "b"))
            .unwrap();

        store.delete_project(dropped.id).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.records, vec![kept_record]);
        assert_eq!(snapshot.audit.len(), 1);
        assert_eq!(snapshot.audit[0].details, "a");
    }

    #[test]
    fn test_save_boundary() {
        let store = MemoryStore::new();
        let p = project("Canal Norte");
        store.insert_project(p.clone()).unwrap();

        let boundary = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)];
        store.save_boundary(p.id, Some(boundary.clone())).unwrap();
        assert_eq!(store.get_project(p.id).unwrap().unwrap().boundary, Some(boundary));

        store.save_boundary(p.id, None).unwrap();
        assert_eq!(store.get_project(p.id).unwrap().unwrap().boundary, None);

        assert!(store.save_boundary(ProjectId::new(), None).is_err());
    }

    #[test]
    fn test_clones_share_data() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.insert_project(project("Shared")).unwrap();
        assert_eq!(store.list_projects().unwrap().len(), 1);
    }
}
