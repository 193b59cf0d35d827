//! Boundary editing and geofenced selection over dredge records.

pub mod active;
pub mod aggregate;
pub mod boundary;
pub mod session;
pub mod summary;

pub use active::{ActivePolygonSet, PolygonRole};
pub use aggregate::{compute_stats, is_selected, select_records};
pub use boundary::{BoundaryEditor, BoundarySink, StoreBoundarySink};
pub use session::{MapSession, SharedSession};
pub use summary::{
    average_monthly_volume, monthly_trends, peak_month, project_summary, MonthlyTrend,
    ProjectSummary,
};
