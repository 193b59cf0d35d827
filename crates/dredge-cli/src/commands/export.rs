//! GeoJSON export of the current selection

use std::path::Path;

use crate::cli::ExportArgs;
use crate::commands::stats::build_session;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::output::OutputWriter;
use crate::output_types::ExportOutput;
use crate::workspace::Workspace;
use anyhow::Result;
use chrono::Utc;
use dredge_export::{export_session, suggested_filename, to_json_string, ExportSink, FileExportSink};

pub fn execute(
    args: ExportArgs,
    output: &OutputWriter,
    workspace: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let workspace = Workspace::open_with_overrides(workspace, args.selection.config_overrides())?;
    let project = workspace.active_project()?;
    let session = build_session(&workspace, &project, &args.selection)?;

    let collection = export_session(&session)?;
    let polygon_features = session.active_polygons().len();
    let point_features = collection.features.len() - polygon_features;
    let document = to_json_string(&collection)?;

    if args.stdout {
        println!("{}", document);
        return Ok(());
    }

    let dir = match &args.output {
        Some(dir) => dir.clone(),
        None => workspace.resolve(&workspace.config.export_dir.value),
    };
    let filename = suggested_filename(Utc::now());
    let mut sink = FileExportSink::new(dir);
    let path = sink.path_for(&filename);

    if dry_run {
        let actions = vec![PlannedAction::new(
            ActionType::WriteFile,
            format!("Write {}", path.display()),
        )
        .with_detail(format!("Polygon features: {}", polygon_features))
        .with_detail(format!("Point features: {}", point_features))];
        display_planned_actions(output, &actions);
        return Ok(());
    }

    sink.deliver(&filename, &document)?;

    if output.is_json() {
        output.result(ExportOutput {
            filename,
            path: path.display().to_string(),
            polygon_features,
            point_features,
        })
    } else {
        output.success(format!("Exported selection to {}", path.display()));
        output.kv("Polygons", polygon_features);
        output.kv("Points", point_features);
        Ok(())
    }
}
