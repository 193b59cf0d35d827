//! Boundary editing commands
//!
//! Each invocation loads the stored boundary into a [`BoundaryEditor`] whose
//! sink writes back to the project, so every edit is saved as it happens.

use std::path::Path;

use crate::cli::{BoundaryArgs, BoundaryCommand};
use crate::output::OutputWriter;
use crate::output_types::BoundaryOutput;
use crate::workspace::Workspace;
use anyhow::Result;
use dredge_core::models::{GeoPoint, Polygon, ProjectId};
use dredge_core::DredgeError;
use dredge_geo::spatial::{polygon_area_m2, polygon_perimeter_m};
use dredge_geo::validation::validate_boundary;
use dredge_select::{BoundaryEditor, StoreBoundarySink};
use tabled::Tabled;

pub fn execute(args: BoundaryArgs, output: &OutputWriter, workspace: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(workspace)?;
    let project = workspace.active_project()?;

    let mut editor = BoundaryEditor::from_vertices(project.boundary.clone().unwrap_or_default())
        .with_sink(StoreBoundarySink::new(workspace.store.clone(), project.id));

    let message = match args.command {
        BoundaryCommand::Add { lat, lng } => {
            editor.append_vertex(GeoPoint::new(lat, lng))?;
            Some(format!("Added P{} ({}, {})", editor.len(), lat, lng))
        }
        BoundaryCommand::Undo => {
            let removed = editor.undo_last()?;
            Some(format!("Removed P{} ({}, {})", editor.len() + 1, removed.lat, removed.lng))
        }
        BoundaryCommand::Remove { position } => {
            let index = position
                .checked_sub(1)
                .ok_or(DredgeError::IndexOutOfRange { index: 0, len: editor.len() })?;
            let removed = editor.remove_vertex_at(index)?;
            Some(format!("Removed P{} ({}, {})", position, removed.lat, removed.lng))
        }
        BoundaryCommand::Clear => {
            let count = editor.len();
            editor.clear()?;
            Some(format!("Cleared {} vertices", count))
        }
        BoundaryCommand::List => None,
    };

    let report = boundary_report(project.id, editor.vertices());

    if output.is_json() {
        return output.result(report);
    }

    if let Some(message) = message {
        output.success(message);
    }
    display_report(&project.name, &report, output);
    Ok(())
}

/// Vertices, size and validation warnings for a boundary
pub fn boundary_report(project: ProjectId, vertices: &[GeoPoint]) -> BoundaryOutput {
    let polygon = Polygon::from_vertices(vertices);
    let validation = validate_boundary(vertices);

    BoundaryOutput {
        project_id: project.to_string(),
        vertices: vertices.to_vec(),
        is_polygon: polygon.is_some(),
        area_m2: polygon.as_ref().map(polygon_area_m2),
        perimeter_m: polygon.as_ref().map(polygon_perimeter_m),
        warnings: validation
            .errors
            .into_iter()
            .map(|error| format!("{}: {}", error.location, error.reason))
            .collect(),
    }
}

#[derive(Tabled)]
struct VertexRow {
    #[tabled(rename = "Vertex")]
    label: String,
    #[tabled(rename = "Latitude")]
    lat: String,
    #[tabled(rename = "Longitude")]
    lng: String,
}

fn display_report(project_name: &str, report: &BoundaryOutput, output: &OutputWriter) {
    output.section(format!("{} - boundary ({} vertices)", project_name, report.vertices.len()));

    let rows = report
        .vertices
        .iter()
        .enumerate()
        .map(|(i, vertex)| VertexRow {
            label: format!("P{}", i + 1),
            lat: format!("{:.6}", vertex.lat),
            lng: format!("{:.6}", vertex.lng),
        })
        .collect::<Vec<_>>();
    output.table(rows);

    match (report.area_m2, report.perimeter_m) {
        (Some(area), Some(perimeter)) => {
            output.kv("Area", format!("{:.2} ha", area / 10_000.0));
            output.kv("Perimeter", format!("{:.0} m", perimeter));
        }
        _ => output.info(format!(
            "Add {} more vertex(es) to close the boundary",
            Polygon::MIN_VERTICES.saturating_sub(report.vertices.len())
        )),
    }

    for warning in &report.warnings {
        output.warning(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_open_boundary() {
        let report = boundary_report(
            ProjectId::new(),
            &[GeoPoint::new(-23.9, -46.3), GeoPoint::new(-23.9, -46.2)],
        );
        assert!(!report.is_polygon);
        assert!(report.area_m2.is_none());
        assert_eq!(report.vertices.len(), 2);
    }

    #[test]
    fn test_report_flags_crossing_edges() {
        let bow_tie = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ];
        let report = boundary_report(ProjectId::new(), &bow_tie);
        assert!(report.is_polygon);
        assert!(report.area_m2.is_some());
        assert!(!report.warnings.is_empty());
    }
}
