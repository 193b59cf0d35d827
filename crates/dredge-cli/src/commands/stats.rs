//! Selection statistics
//!
//! Builds a [`MapSession`] over the active project and reports what the
//! active polygons and depth filter select.

use std::fs;
use std::path::Path;

use crate::cli::SelectionArgs;
use crate::output::OutputWriter;
use crate::output_types::StatsOutput;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use dredge_core::config::CliConfigOverrides;
use dredge_core::models::Project;
use dredge_core::ports::RecordStore;
use dredge_core::DredgeError;
use dredge_export::polygon_from_geojson;
use dredge_select::MapSession;
use tabled::Tabled;

impl SelectionArgs {
    pub fn config_overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            depth_min: self.min,
            depth_max: self.max,
            show_official_boundary: self.hide_boundary.then_some(false),
            ..Default::default()
        }
    }
}

/// Session for the active project with the selection options applied.
///
/// The configured depth range is narrowed to the recorded depths. Bounds
/// given explicitly on the command line are used as-is.
pub fn build_session(
    workspace: &Workspace,
    project: &Project,
    args: &SelectionArgs,
) -> Result<MapSession> {
    let records = workspace.store.records_for_project(project.id)?;
    let mut session = MapSession::new(
        records,
        project.boundary.clone().unwrap_or_default(),
        workspace.config.depth_range(),
    );

    if args.min.is_some() || args.max.is_some() {
        let mut range = session.depth_range();
        if let Some(min) = args.min {
            range.min = min;
        }
        if let Some(max) = args.max {
            range.max = max;
        }
        session.set_depth_range(range);
    }

    session.set_show_boundary(workspace.config.show_official_boundary.value);

    if let Some(path) = &args.adhoc {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read selection polygon {}", path.display()))?;
        let polygon = polygon_from_geojson(&text)
            .with_context(|| format!("Invalid selection polygon in {}", path.display()))?;
        session.set_adhoc(polygon);
    }

    Ok(session)
}

#[derive(Tabled)]
struct MaterialRow {
    #[tabled(rename = "Material")]
    material: String,
    #[tabled(rename = "Volume (m³)")]
    volume: String,
    #[tabled(rename = "Share")]
    share: String,
}

pub fn execute(args: SelectionArgs, output: &OutputWriter, workspace: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open_with_overrides(workspace, args.config_overrides())?;
    let project = workspace.active_project()?;
    let session = build_session(&workspace, &project, &args)?;

    let stats = session.stats().ok_or(DredgeError::NoSelection)?;
    let active = session.active_polygons();
    let shallow = session.shallow_records(workspace.config.shallow_threshold.value).len();

    if output.is_json() {
        return output.result(StatsOutput {
            project_id: project.id.to_string(),
            polygons: active.iter().map(|(role, _)| role.label().to_string()).collect(),
            depth_range: session.depth_range(),
            observed_depth_range: session.observed_depth_range(),
            shallow_records: shallow,
            stats,
        });
    }

    let scope = if stats.is_official_boundary { "official area" } else { "manual selection" };
    output.section(format!("{} - {}", project.name, scope));
    let range = session.depth_range();
    output.kv("Depth filter", format!("{} - {} m", range.min, range.max));
    output.kv("Records", stats.count);
    output.kv("Volume", format!("{:.2} m³", stats.volume));
    output.kv("Average depth", format!("{:.2} m", stats.avg_depth));

    let rows = stats
        .material_distribution
        .iter()
        .map(|entry| MaterialRow {
            material: entry.material.to_string(),
            volume: format!("{:.2}", entry.volume),
            share: if stats.volume > 0.0 {
                format!("{:.1}%", entry.volume / stats.volume * 100.0)
            } else {
                "-".to_string()
            },
        })
        .collect::<Vec<_>>();
    output.section("Materials");
    output.table(rows);

    if shallow > 0 {
        output.warning(format!(
            "{} record(s) in the project are shallower than {} m",
            shallow, workspace.config.shallow_threshold.value
        ));
    }
    Ok(())
}
