pub mod audit;
pub mod geometry;
pub mod project;
pub mod record;
pub mod stats;

pub use audit::{AuditAction, AuditEntry};
pub use geometry::{DepthRange, GeoPoint, Polygon};
pub use project::{Project, ProjectDraft, ProjectId, ProjectStatus};
pub use record::{DredgeRecord, Material, RecordDraft, RecordId};
pub use stats::{MaterialTally, MaterialVolume, SelectionStats};
