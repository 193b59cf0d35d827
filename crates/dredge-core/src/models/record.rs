use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::geometry::GeoPoint;
use super::project::ProjectId;
use crate::error::{DredgeError, Result};

/// Unique identifier for a dredge record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = DredgeError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(RecordId)
            .map_err(|_| DredgeError::RecordNotFound { id: s.to_string() })
    }
}

/// Dredged material classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Sand,
    Clay,
    Silt,
    Rock,
    Other,
}

impl Material {
    pub const ALL: [Material; 5] =
        [Material::Sand, Material::Clay, Material::Silt, Material::Rock, Material::Other];

    pub fn name(&self) -> &'static str {
        match self {
            Material::Sand => "Sand",
            Material::Clay => "Clay",
            Material::Silt => "Silt",
            Material::Rock => "Rock",
            Material::Other => "Other",
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Material {
    type Err = DredgeError;

    fn from_str(s: &str) -> Result<Self> {
        Material::ALL
            .into_iter()
            .find(|material| material.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DredgeError::InvalidRecord {
                field: "material".to_string(),
                reason: format!("Unknown material '{}'. Use sand, clay, silt, rock, or other", s),
            })
    }
}

/// A single geotagged dredging measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DredgeRecord {
    pub id: RecordId,
    pub project_id: ProjectId,
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    /// Depth in meters
    pub depth: f64,
    /// Volume in cubic meters
    pub volume: f64,
    pub material: Material,
    pub vessel_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Base64 payload or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl DredgeRecord {
    /// Build a record for `project_id` from a validated draft
    pub fn from_draft(project_id: ProjectId, draft: RecordDraft) -> Result<Self> {
        draft.validate()?;
        Ok(Self {
            id: RecordId::new(),
            project_id,
            timestamp: draft.timestamp,
            lat: draft.lat,
            lng: draft.lng,
            depth: draft.depth,
            volume: draft.volume,
            material: draft.material,
            vessel_name: draft.vessel_name,
            notes: draft.notes,
            photo: draft.photo,
        })
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Case-insensitive match against vessel name, material or notes
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.vessel_name.to_lowercase().contains(&term)
            || self.material.name().to_lowercase().contains(&term)
            || self.notes.as_ref().is_some_and(|notes| notes.to_lowercase().contains(&term))
    }

    /// Field values without the identity fields, for full replacement edits
    pub fn to_draft(&self) -> RecordDraft {
        RecordDraft {
            timestamp: self.timestamp,
            lat: self.lat,
            lng: self.lng,
            depth: self.depth,
            volume: self.volume,
            material: self.material,
            vessel_name: self.vessel_name.clone(),
            notes: self.notes.clone(),
            photo: self.photo.clone(),
        }
    }
}

/// Field entry for a record that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
    pub depth: f64,
    pub volume: f64,
    pub material: Material,
    pub vessel_name: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

impl RecordDraft {
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(DredgeError::InvalidCoordinate { lat: self.lat, lng: self.lng });
        }
        check_non_negative("depth", self.depth)?;
        check_non_negative("volume", self.volume)?;
        if self.vessel_name.trim().is_empty() {
            return Err(DredgeError::InvalidRecord {
                field: "vessel_name".to_string(),
                reason: "Vessel name is required".to_string(),
            });
        }
        Ok(())
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DredgeError::InvalidRecord {
            field: field.to_string(),
            reason: format!("Expected a finite value >= 0, got {}", value),
        });
    }
    Ok(())
}
