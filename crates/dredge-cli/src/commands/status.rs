//! Status command implementation

use std::path::Path;

use crate::cli::StatusArgs;
use crate::output::OutputWriter;
use crate::output_types::{ConfigEntry, ProjectOutput, StatusOutput};
use crate::workspace::Workspace;
use anyhow::Result;
use dredge_core::ports::{ProjectStore, RecordStore};
use tabled::Tabled;

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(args: StatusArgs, output: &OutputWriter, workspace: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(workspace)?;
    let projects = workspace.store.list_projects()?;

    let active_project = match workspace.active_project_id()? {
        Some(id) => match projects.iter().find(|project| project.id == id) {
            Some(project) => {
                let record_count = workspace.store.records_for_project(id)?.len();
                Some(ProjectOutput::new(project, record_count, true))
            }
            None => {
                output.warning(format!("Active project {} no longer exists", id));
                None
            }
        },
        None => None,
    };

    let config = args.verbose.then(|| {
        workspace
            .config
            .to_inspection_map()
            .into_iter()
            .map(|(key, (value, source))| ConfigEntry {
                key,
                value,
                source: format!("{:?}", source),
            })
            .collect::<Vec<_>>()
    });

    let status = StatusOutput {
        workspace_root: workspace.root().display().to_string(),
        project_count: projects.len(),
        active_project,
        config,
    };

    if output.is_json() {
        return output.result(status);
    }

    output.section("Workspace");
    output.kv("Root", &status.workspace_root);
    output.kv("Projects", status.project_count);

    output.section("Active project");
    match &status.active_project {
        Some(project) => {
            output.kv("Name", &project.name);
            output.kv("ID", &project.id);
            output.kv("Records", project.record_count);
            output.kv("Boundary vertices", project.boundary_vertices);
        }
        None => output.info("None. Run: dredge project create <NAME>"),
    }

    if let Some(entries) = status.config {
        output.section("Configuration");
        output.table(
            entries
                .into_iter()
                .map(|entry| ConfigRow { key: entry.key, value: entry.value, source: entry.source })
                .collect::<Vec<_>>(),
        );
    }
    Ok(())
}
