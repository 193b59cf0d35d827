use crate::error::Result;
use crate::models::{AuditEntry, DredgeRecord, GeoPoint, Project, ProjectId, RecordId};

/// Port for project storage, including the persisted boundary
pub trait ProjectStore {
    /// Store a new project
    fn insert_project(&self, project: Project) -> Result<()>;

    /// Retrieve a project by ID
    fn get_project(&self, id: ProjectId) -> Result<Option<Project>>;

    /// List all projects in creation order
    fn list_projects(&self) -> Result<Vec<Project>>;

    /// Delete a project together with its records and audit entries
    fn delete_project(&self, id: ProjectId) -> Result<()>;

    /// Persist the boundary vertex list, `None` when the boundary is empty
    fn save_boundary(&self, id: ProjectId, boundary: Option<Vec<GeoPoint>>) -> Result<()>;
}

/// Port for dredge record storage
pub trait RecordStore {
    /// Store a new record, newest first
    fn insert_record(&self, record: DredgeRecord) -> Result<()>;

    /// Replace a stored record wholesale and return the previous version
    fn replace_record(&self, record: DredgeRecord) -> Result<DredgeRecord>;

    /// Remove a record and return it
    fn remove_record(&self, id: RecordId) -> Result<DredgeRecord>;

    /// Retrieve a record by ID
    fn get_record(&self, id: RecordId) -> Result<Option<DredgeRecord>>;

    /// Records belonging to a project, newest first
    fn records_for_project(&self, project: ProjectId) -> Result<Vec<DredgeRecord>>;
}

/// Port for the audit trail
pub trait AuditStore {
    /// Prepend an entry to the trail
    fn append_audit(&self, entry: AuditEntry) -> Result<()>;

    /// Entries for a project, newest first
    fn audit_for_project(&self, project: ProjectId) -> Result<Vec<AuditEntry>>;
}
