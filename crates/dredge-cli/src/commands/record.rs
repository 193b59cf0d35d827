//! Record commands

use std::path::Path;

use crate::cli::{AddRecordArgs, ListRecordsArgs, RecordArgs, RecordCommand, UpdateRecordArgs};
use crate::output::OutputWriter;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use dredge_core::models::{DredgeRecord, RecordDraft, RecordId};
use dredge_core::ports::{AuditStore, RecordStore};
use dredge_core::DredgeError;
use dredge_store::{create_record, delete_record, search_records, update_record};
use tabled::Tabled;

pub fn execute(args: RecordArgs, output: &OutputWriter, workspace: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(workspace)?;

    match args.command {
        RecordCommand::Add(args) => add(&workspace, args, output),
        RecordCommand::Update(args) => update(&workspace, args, output),
        RecordCommand::Delete { id } => {
            let removed = delete_record(&workspace.store, id.parse()?, workspace.operator())?;
            if output.is_json() {
                output.result(removed)
            } else {
                output.success(format!(
                    "Deleted record {} ({} on {})",
                    removed.id, removed.material, removed.vessel_name
                ));
                Ok(())
            }
        }
        RecordCommand::List(args) => list(&workspace, args, output),
        RecordCommand::Audit => audit(&workspace, output),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw).with_context(|| {
        format!("Invalid timestamp '{}'. Use RFC 3339, e.g. 2024-06-01T08:30:00Z", raw)
    })?;
    Ok(parsed.with_timezone(&Utc))
}

fn add(workspace: &Workspace, args: AddRecordArgs, output: &OutputWriter) -> Result<()> {
    let project = workspace.active_project()?;
    let timestamp = match args.timestamp.as_deref() {
        Some(raw) => parse_timestamp(raw)?,
        None => Utc::now(),
    };

    let draft = RecordDraft {
        timestamp,
        lat: args.lat,
        lng: args.lng,
        depth: args.depth,
        volume: args.volume,
        material: args.material.parse()?,
        vessel_name: args.vessel,
        notes: args.notes,
        photo: args.photo,
    };

    let record = create_record(&workspace.store, project.id, draft, workspace.operator())?;

    if output.is_json() {
        output.result(record)
    } else {
        output.success(format!(
            "Recorded {} m³ of {} at {} m on {}",
            record.volume, record.material, record.depth, record.vessel_name
        ));
        output.kv("ID", record.id);
        Ok(())
    }
}

fn update(workspace: &Workspace, args: UpdateRecordArgs, output: &OutputWriter) -> Result<()> {
    let id: RecordId = args.id.parse()?;
    let existing = workspace
        .store
        .get_record(id)?
        .ok_or_else(|| DredgeError::RecordNotFound { id: id.to_string() })?;

    let mut draft = existing.to_draft();
    if let Some(raw) = args.timestamp.as_deref() {
        draft.timestamp = parse_timestamp(raw)?;
    }
    if let Some(lat) = args.lat {
        draft.lat = lat;
    }
    if let Some(lng) = args.lng {
        draft.lng = lng;
    }
    if let Some(depth) = args.depth {
        draft.depth = depth;
    }
    if let Some(volume) = args.volume {
        draft.volume = volume;
    }
    if let Some(material) = args.material.as_deref() {
        draft.material = material.parse()?;
    }
    if let Some(vessel) = args.vessel {
        draft.vessel_name = vessel;
    }
    if args.notes.is_some() {
        draft.notes = args.notes;
    }
    if args.photo.is_some() {
        draft.photo = args.photo;
    }

    let updated = update_record(&workspace.store, id, draft, workspace.operator())?;

    if output.is_json() {
        output.result(updated)
    } else {
        output.success(format!("Updated record {}", updated.id));
        Ok(())
    }
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Vessel")]
    vessel: String,
    #[tabled(rename = "Material")]
    material: String,
    #[tabled(rename = "Depth (m)")]
    depth: String,
    #[tabled(rename = "Volume (m³)")]
    volume: String,
    #[tabled(rename = "Position")]
    position: String,
}

impl From<&DredgeRecord> for RecordRow {
    fn from(record: &DredgeRecord) -> Self {
        Self {
            id: record.id.to_string(),
            time: record.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            vessel: record.vessel_name.clone(),
            material: record.material.to_string(),
            depth: format!("{:.1}", record.depth),
            volume: format!("{:.1}", record.volume),
            position: format!("{:.5}, {:.5}", record.lat, record.lng),
        }
    }
}

fn list(workspace: &Workspace, args: ListRecordsArgs, output: &OutputWriter) -> Result<()> {
    let project = workspace.active_project()?;
    let mut records = search_records(
        &workspace.store,
        project.id,
        args.search.as_deref().unwrap_or_default(),
    )?;

    let threshold = args.shallow_threshold.unwrap_or(workspace.config.shallow_threshold.value);
    if args.shallow {
        records.retain(|record| record.depth < threshold);
    }

    if output.is_json() {
        return output.result(records);
    }

    let shallow = records.iter().filter(|record| record.depth < threshold).count();

    output.section(format!("{} - records ({})", project.name, records.len()));
    output.table(records.iter().map(RecordRow::from).collect::<Vec<_>>());
    if shallow > 0 && !args.shallow {
        output.warning(format!("{} record(s) shallower than {} m", shallow, threshold));
    }
    Ok(())
}

#[derive(Tabled)]
struct AuditRow {
    #[tabled(rename = "Time (UTC)")]
    time: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "User")]
    user: String,
    #[tabled(rename = "Vessel")]
    vessel: String,
    #[tabled(rename = "Details")]
    details: String,
}

fn audit(workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let project = workspace.active_project()?;
    let entries = workspace.store.audit_for_project(project.id)?;

    if output.is_json() {
        return output.result(entries);
    }

    output.section(format!("{} - audit trail ({})", project.name, entries.len()));
    let rows = entries
        .into_iter()
        .map(|entry| AuditRow {
            time: entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            action: format!("{:?}", entry.action).to_uppercase(),
            user: entry.user,
            vessel: entry.vessel_name,
            details: entry.details,
        })
        .collect::<Vec<_>>();
    output.table(rows);
    Ok(())
}
