use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::geometry::{GeoPoint, Polygon};
use crate::error::{DredgeError, Result};

/// Unique identifier for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub Uuid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = DredgeError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(ProjectId)
            .map_err(|_| DredgeError::ProjectNotFound { id: s.to_string() })
    }
}

/// Lifecycle status of a dredging project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Suspended,
}

/// A dredging project grouping field records and an optional boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    /// Official boundary vertices. May hold 1-2 vertices while being captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Vec<GeoPoint>>,
}

impl Project {
    pub fn from_draft(draft: ProjectDraft) -> Result<Self> {
        if draft.name.trim().is_empty() {
            return Err(DredgeError::ConfigInvalid {
                key: "name".to_string(),
                reason: "Project name is required".to_string(),
            });
        }

        Ok(Self {
            id: ProjectId::new(),
            name: draft.name,
            client: draft.client,
            location: draft.location,
            description: draft.description,
            status: ProjectStatus::Active,
            created_at: Utc::now(),
            boundary: None,
        })
    }

    /// Boundary as a containable polygon, if it has enough vertices
    pub fn boundary_polygon(&self) -> Option<Polygon> {
        self.boundary.as_deref().and_then(Polygon::from_vertices)
    }

    pub fn boundary_len(&self) -> usize {
        self.boundary.as_ref().map_or(0, Vec::len)
    }
}

/// User-entered fields of a new project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub client: String,
    pub location: String,
    pub description: Option<String>,
}
