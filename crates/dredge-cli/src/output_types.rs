use chrono::{DateTime, Utc};
use dredge_core::models::{DepthRange, GeoPoint, Project, ProjectStatus, SelectionStats};
use dredge_select::{MonthlyTrend, ProjectSummary};
use serde::Serialize;

/// Output for init command
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub workspace_path: String,
    pub config_path: String,
    pub operator: String,
}

/// One project, as listed or shown
#[derive(Debug, Serialize)]
pub struct ProjectOutput {
    pub id: String,
    pub name: String,
    pub client: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub boundary_vertices: usize,
    pub record_count: usize,
    pub active: bool,
}

impl ProjectOutput {
    pub fn new(project: &Project, record_count: usize, active: bool) -> Self {
        Self {
            id: project.id.to_string(),
            name: project.name.clone(),
            client: project.client.clone(),
            location: project.location.clone(),
            description: project.description.clone(),
            status: project.status,
            created_at: project.created_at,
            boundary_vertices: project.boundary_len(),
            record_count,
            active,
        }
    }
}

/// Boundary state after an edit or listing
#[derive(Debug, Serialize)]
pub struct BoundaryOutput {
    pub project_id: String,
    pub vertices: Vec<GeoPoint>,
    pub is_polygon: bool,
    pub area_m2: Option<f64>,
    pub perimeter_m: Option<f64>,
    pub warnings: Vec<String>,
}

/// Output for stats command
#[derive(Debug, Serialize)]
pub struct StatsOutput {
    pub project_id: String,
    pub polygons: Vec<String>,
    pub depth_range: DepthRange,
    pub observed_depth_range: DepthRange,
    /// Project records shallower than the shallow threshold
    pub shallow_records: usize,
    pub stats: SelectionStats,
}

/// Output for export command
#[derive(Debug, Serialize)]
pub struct ExportOutput {
    pub filename: String,
    pub path: String,
    pub polygon_features: usize,
    pub point_features: usize,
}

/// Output for summary command
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub project_id: String,
    pub summary: ProjectSummary,
    pub monthly: Vec<MonthlyTrend>,
    pub peak_month: Option<String>,
    pub average_monthly_volume: f64,
}

/// Output for status command
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub workspace_root: String,
    pub project_count: usize,
    pub active_project: Option<ProjectOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Vec<ConfigEntry>>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}
