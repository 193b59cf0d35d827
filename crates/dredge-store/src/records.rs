//! Record edits that leave an audit trail.
//!
//! Each successful create, update or delete writes exactly one audit entry
//! attributed to `operator`.

use dredge_core::error::Result;
use dredge_core::models::{AuditAction, AuditEntry, DredgeRecord, ProjectId, RecordDraft, RecordId};
use dredge_core::ports::{AuditStore, RecordStore};
use dredge_core::DredgeError;
use tracing::info;

pub fn create_record<S>(
    store: &S,
    project_id: ProjectId,
    draft: RecordDraft,
    operator: &str,
) -> Result<DredgeRecord>
where
    S: RecordStore + AuditStore,
{
    let record = DredgeRecord::from_draft(project_id, draft)?;
    store.insert_record(record.clone())?;

    let details = format!(
        "New record: {} ({} m³) on {}",
        record.material, record.volume, record.vessel_name
    );
    store.append_audit(AuditEntry::for_record(AuditAction::Create, &record, operator, details))?;

    info!(record = %record.id, project = %project_id, "Record created");
    Ok(record)
}

/// Replace every field of an existing record with `draft`
pub fn update_record<S>(
    store: &S,
    id: RecordId,
    draft: RecordDraft,
    operator: &str,
) -> Result<DredgeRecord>
where
    S: RecordStore + AuditStore,
{
    let existing =
        store.get_record(id)?.ok_or_else(|| DredgeError::RecordNotFound { id: id.to_string() })?;

    let mut updated = DredgeRecord::from_draft(existing.project_id, draft)?;
    updated.id = id;
    let previous = store.replace_record(updated.clone())?;

    let details = format!(
        "Record changed: {} -> {}, Vol: {} -> {} m³",
        previous.material, updated.material, previous.volume, updated.volume
    );
    store.append_audit(AuditEntry::for_record(AuditAction::Update, &updated, operator, details))?;

    info!(record = %id, "Record updated");
    Ok(updated)
}

pub fn delete_record<S>(store: &S, id: RecordId, operator: &str) -> Result<DredgeRecord>
where
    S: RecordStore + AuditStore,
{
    let removed = store.remove_record(id)?;

    let details = format!("Record deleted: {}", removed.vessel_name);
    store.append_audit(AuditEntry::for_record(AuditAction::Delete, &removed, operator, details))?;

    info!(record = %id, "Record deleted");
    Ok(removed)
}

/// Project records matching `term`, newest first. An empty term matches all.
pub fn search_records<S>(store: &S, project_id: ProjectId, term: &str) -> Result<Vec<DredgeRecord>>
where
    S: RecordStore,
{
    Ok(store
        .records_for_project(project_id)?
        .into_iter()
        .filter(|record| record.matches_search(term))
        .collect())
}
