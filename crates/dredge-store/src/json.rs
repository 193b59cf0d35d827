//! JSON-file storage under a workspace directory.
//!
//! Data is held in a [`MemoryStore`] and every successful mutation rewrites
//! the affected file, so the files always match the last completed call.

use std::fs;
use std::path::{Path, PathBuf};

use dredge_core::error::Result;
use dredge_core::models::{AuditEntry, DredgeRecord, GeoPoint, Project, ProjectId, RecordId};
use dredge_core::ports::{AuditStore, ProjectStore, RecordStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::memory::{MemoryStore, StoreSnapshot};

const PROJECTS_FILE: &str = "projects.json";
const RECORDS_FILE: &str = "records.json";
const AUDIT_FILE: &str = "audit.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    memory: MemoryStore,
}

impl JsonFileStore {
    /// Create the data files in `dir`, keeping any that already exist
    pub fn init(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        for file in [PROJECTS_FILE, RECORDS_FILE, AUDIT_FILE] {
            let path = dir.join(file);
            if !path.exists() {
                fs::write(&path, "[]")?;
            }
        }
        info!(dir = %dir.display(), "Data files initialized");
        Self::open(dir)
    }

    /// Load the data files from `dir`. Missing files count as empty.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let snapshot = StoreSnapshot {
            projects: read_list(&dir.join(PROJECTS_FILE))?,
            records: read_list(&dir.join(RECORDS_FILE))?,
            audit: read_list(&dir.join(AUDIT_FILE))?,
        };
        debug!(
            dir = %dir.display(),
            projects = snapshot.projects.len(),
            records = snapshot.records.len(),
            audit = snapshot.audit.len(),
            "Store loaded"
        );
        Ok(Self { dir, memory: MemoryStore::from_snapshot(snapshot) })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.memory.snapshot()
    }

    fn flush_projects(&self) -> Result<()> {
        write_list(&self.dir.join(PROJECTS_FILE), &self.memory.projects())
    }

    fn flush_records(&self) -> Result<()> {
        write_list(&self.dir.join(RECORDS_FILE), &self.memory.records())
    }

    fn flush_audit(&self) -> Result<()> {
        write_list(&self.dir.join(AUDIT_FILE), &self.memory.audit())
    }
}

fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_list<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let content = serde_json::to_string_pretty(items)?;
    fs::write(path, content)?;
    debug!(path = %path.display(), items = items.len(), "Store file written");
    Ok(())
}

impl ProjectStore for JsonFileStore {
    fn insert_project(&self, project: Project) -> Result<()> {
        self.memory.insert_project(project)?;
        self.flush_projects()
    }

    fn get_project(&self, id: ProjectId) -> Result<Option<Project>> {
        self.memory.get_project(id)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        self.memory.list_projects()
    }

    fn delete_project(&self, id: ProjectId) -> Result<()> {
        self.memory.delete_project(id)?;
        self.flush_projects()?;
        self.flush_records()?;
        self.flush_audit()
    }

    fn save_boundary(&self, id: ProjectId, boundary: Option<Vec<GeoPoint>>) -> Result<()> {
        let vertices = boundary.as_ref().map_or(0, Vec::len);
        self.memory.save_boundary(id, boundary)?;
        self.flush_projects()?;
        info!(project = %id, vertices, "Boundary saved");
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn insert_record(&self, record: DredgeRecord) -> Result<()> {
        self.memory.insert_record(record)?;
        self.flush_records()
    }

    fn replace_record(&self, record: DredgeRecord) -> Result<DredgeRecord> {
        let previous = self.memory.replace_record(record)?;
        self.flush_records()?;
        Ok(previous)
    }

    fn remove_record(&self, id: RecordId) -> Result<DredgeRecord> {
        let removed = self.memory.remove_record(id)?;
        self.flush_records()?;
        Ok(removed)
    }

    fn get_record(&self, id: RecordId) -> Result<Option<DredgeRecord>> {
        self.memory.get_record(id)
    }

    fn records_for_project(&self, project: ProjectId) -> Result<Vec<DredgeRecord>> {
        self.memory.records_for_project(project)
    }
}

impl AuditStore for JsonFileStore {
    fn append_audit(&self, entry: AuditEntry) -> Result<()> {
        self.memory.append_audit(entry)?;
        self.flush_audit()
    }

    fn audit_for_project(&self, project: ProjectId) -> Result<Vec<AuditEntry>> {
        self.memory.audit_for_project(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dredge_core::models::ProjectDraft;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_empty_files() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::init(dir.path().join(".dredge")).unwrap();

        for file in [PROJECTS_FILE, RECORDS_FILE, AUDIT_FILE] {
            assert_eq!(fs::read_to_string(store.dir().join(file)).unwrap(), "[]");
        }
        assert_eq!(store.snapshot(), StoreSnapshot::default());
    }

    #[test]
    fn test_open_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(dir.path().join("nothing-here")).unwrap();
        assert!(store.list_projects().unwrap().is_empty());
    }

    #[test]
    fn test_boundary_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::init(dir.path()).unwrap();
        let project = Project::from_draft(ProjectDraft {
            name: "Bacia de Evolução".to_string(),
            ..Default::default()
        })
        .unwrap();
        let id = project.id;
        store.insert_project(project).unwrap();

        let boundary = vec![GeoPoint::new(-23.9, -46.3), GeoPoint::new(-23.9, -46.2)];
        store.save_boundary(id, Some(boundary.clone())).unwrap();

        let reopened = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get_project(id).unwrap().unwrap().boundary, Some(boundary));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(RECORDS_FILE), "{ not json").unwrap();
        assert!(JsonFileStore::open(dir.path()).is_err());
    }
}
