//! Error types for DredgeMap

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DredgeError {
    // Boundary editing errors
    #[error("Vertex index {index} out of range for boundary with {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Boundary has no vertices to undo")]
    EmptyBoundary,

    #[error("Invalid coordinate ({lat}, {lng}): latitude and longitude must be finite")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("Polygon needs at least 3 vertices, found {found}")]
    DegeneratePolygon { found: usize },

    // Record errors
    #[error("Invalid record {field}: {reason}")]
    InvalidRecord { field: String, reason: String },

    #[error("Record not found: {id}")]
    RecordNotFound { id: String },

    // Project errors
    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    // Selection errors
    #[error("No active selection. Draw a polygon or define the project boundary first")]
    NoSelection,

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DredgeError {
    fn from(err: serde_json::Error) -> Self {
        DredgeError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DredgeError>;
