//! Project totals and monthly production

use std::path::Path;

use crate::output::OutputWriter;
use crate::output_types::SummaryOutput;
use crate::workspace::Workspace;
use anyhow::Result;
use dredge_core::ports::RecordStore;
use dredge_select::{average_monthly_volume, monthly_trends, peak_month, project_summary};
use tabled::Tabled;

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Records")]
    count: usize,
    #[tabled(rename = "Volume (m³)")]
    volume: String,
    #[tabled(rename = "Cumulative (m³)")]
    cumulative: String,
    #[tabled(rename = "Avg depth (m)")]
    avg_depth: String,
}

pub fn execute(output: &OutputWriter, workspace: Option<&Path>) -> Result<()> {
    let workspace = Workspace::open(workspace)?;
    let project = workspace.active_project()?;
    let records = workspace.store.records_for_project(project.id)?;

    let summary = project_summary(&records);
    let monthly = monthly_trends(&records);
    let peak = peak_month(&monthly).map(|trend| trend.month.clone());
    let average = average_monthly_volume(&monthly);

    if output.is_json() {
        return output.result(SummaryOutput {
            project_id: project.id.to_string(),
            summary,
            monthly,
            peak_month: peak,
            average_monthly_volume: average,
        });
    }

    output.section(format!("{} - summary", project.name));
    output.kv("Records", summary.record_count);
    output.kv("Vessels", summary.vessel_count);
    output.kv("Total volume", format!("{:.2} m³", summary.total_volume));
    output.kv("Average depth", format!("{:.2} m", summary.avg_depth));
    for entry in &summary.material_distribution {
        output.kv(format!("  {}", entry.material), format!("{:.2} m³", entry.volume));
    }

    output.section("Monthly production");
    let rows = monthly
        .iter()
        .map(|trend| MonthRow {
            month: trend.month.clone(),
            count: trend.count,
            volume: format!("{:.2}", trend.volume),
            cumulative: format!("{:.2}", trend.cumulative_volume),
            avg_depth: format!("{:.2}", trend.avg_depth),
        })
        .collect::<Vec<_>>();
    output.table(rows);

    if let Some(peak) = peak {
        output.kv("Peak month", peak);
        output.kv("Monthly average", format!("{:.2} m³", average));
    }
    Ok(())
}
