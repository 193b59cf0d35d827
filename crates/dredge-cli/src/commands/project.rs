//! Project commands

use std::path::Path;

use crate::cli::{CreateProjectArgs, ProjectArgs, ProjectCommand};
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::output::OutputWriter;
use crate::output_types::ProjectOutput;
use crate::workspace::Workspace;
use anyhow::Result;
use dredge_core::models::{Project, ProjectDraft, ProjectId};
use dredge_core::ports::{AuditStore, ProjectStore, RecordStore};
use tabled::Tabled;

pub fn execute(
    args: ProjectArgs,
    output: &OutputWriter,
    workspace: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let workspace = Workspace::open(workspace)?;

    match args.command {
        ProjectCommand::Create(args) => create(&workspace, args, output),
        ProjectCommand::List => list(&workspace, output),
        ProjectCommand::Show { id } => {
            let project = match id {
                Some(id) => workspace.project(id.parse()?)?,
                None => workspace.active_project()?,
            };
            show(&workspace, &project, output)
        }
        ProjectCommand::Delete { id } => delete(&workspace, id.parse()?, output, dry_run),
        ProjectCommand::Use { id } => {
            let project = workspace.project(id.parse()?)?;
            workspace.set_active_project(Some(project.id))?;
            if output.is_json() {
                output.result(describe(&workspace, &project)?)
            } else {
                output.success(format!("Active project: {} ({})", project.name, project.id));
                Ok(())
            }
        }
    }
}

fn create(workspace: &Workspace, args: CreateProjectArgs, output: &OutputWriter) -> Result<()> {
    let project = Project::from_draft(ProjectDraft {
        name: args.name,
        client: args.client,
        location: args.location,
        description: args.description,
    })?;

    workspace.store.insert_project(project.clone())?;
    workspace.set_active_project(Some(project.id))?;
    tracing::info!(project = %project.id, "Project created");

    if output.is_json() {
        output.result(ProjectOutput::new(&project, 0, true))
    } else {
        output.success(format!("Created project {}", project.name));
        output.kv("ID", project.id);
        output.info("This is now the active project");
        Ok(())
    }
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "")]
    active: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Records")]
    records: usize,
    #[tabled(rename = "Boundary")]
    boundary: String,
}

fn list(workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let projects = workspace
        .store
        .list_projects()?
        .iter()
        .map(|project| describe(workspace, project))
        .collect::<Result<Vec<_>>>()?;

    if output.is_json() {
        return output.result(projects);
    }

    output.section(format!("Projects ({})", projects.len()));
    let rows = projects
        .into_iter()
        .map(|project| ProjectRow {
            active: if project.active { "*" } else { "" },
            id: project.id,
            name: project.name,
            client: project.client,
            location: project.location,
            records: project.record_count,
            boundary: match project.boundary_vertices {
                0 => "-".to_string(),
                n => format!("{} vertices", n),
            },
        })
        .collect();
    output.table::<ProjectRow>(rows);
    Ok(())
}

fn show(workspace: &Workspace, project: &Project, output: &OutputWriter) -> Result<()> {
    let described = describe(workspace, project)?;
    if output.is_json() {
        return output.result(described);
    }

    output.section(&project.name);
    output.kv("ID", &described.id);
    output.kv("Client", &described.client);
    output.kv("Location", &described.location);
    if let Some(description) = &described.description {
        output.kv("Description", description);
    }
    output.kv("Status", format!("{:?}", described.status));
    output.kv("Created", described.created_at.format("%Y-%m-%d %H:%M UTC"));
    output.kv("Records", described.record_count);
    output.kv("Boundary vertices", described.boundary_vertices);
    output.kv("Active", if described.active { "yes" } else { "no" });
    Ok(())
}

fn delete(
    workspace: &Workspace,
    id: ProjectId,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let project = workspace.project(id)?;

    if dry_run {
        let records = workspace.store.records_for_project(id)?.len();
        let audit = workspace.store.audit_for_project(id)?.len();
        let actions = vec![PlannedAction::new(
            ActionType::DeleteData,
            format!("Delete project {} ({})", project.name, project.id),
        )
        .with_detail(format!("Records: {}", records))
        .with_detail(format!("Audit entries: {}", audit))
        .with_detail(format!("Boundary vertices: {}", project.boundary_len()))];
        display_planned_actions(output, &actions);
        return Ok(());
    }

    workspace.store.delete_project(id)?;
    if workspace.active_project_id()? == Some(id) {
        workspace.set_active_project(None)?;
    }
    tracing::info!(project = %id, "Project deleted");

    if output.is_json() {
        output.result(serde_json::json!({ "deleted": id.to_string() }))
    } else {
        output.success(format!("Deleted project {}", project.name));
        Ok(())
    }
}

fn describe(workspace: &Workspace, project: &Project) -> Result<ProjectOutput> {
    let record_count = workspace.store.records_for_project(project.id)?.len();
    let active = workspace.active_project_id()? == Some(project.id);
    Ok(ProjectOutput::new(project, record_count, active))
}
