use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::project::ProjectId;
use super::record::{DredgeRecord, RecordId};

/// Kind of change recorded in the audit trail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

/// One entry of a project's audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    pub target_id: RecordId,
    pub vessel_name: String,
    pub user: String,
    pub details: String,
}

impl AuditEntry {
    /// Audit entry describing `action` on `record`
    pub fn for_record(
        action: AuditAction,
        record: &DredgeRecord,
        user: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id: Some(record.project_id),
            timestamp: Utc::now(),
            action,
            target_id: record.id,
            vessel_name: record.vessel_name.clone(),
            user: user.into(),
            details: details.into(),
        }
    }
}
