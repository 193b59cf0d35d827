//! Aggregate statistics over a set of dredge records.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::record::Material;

/// Summed volume for one material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialVolume {
    pub material: Material,
    pub volume: f64,
}

/// Per-material volume accumulator that remembers first-appearance order.
///
/// Sorting the output is stable, so materials with equal volume keep the
/// order in which they were first seen. Results never depend on hashing.
#[derive(Debug, Clone, Default)]
pub struct MaterialTally {
    entries: Vec<MaterialVolume>,
}

impl MaterialTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, material: Material, volume: f64) {
        match self.entries.iter_mut().find(|entry| entry.material == material) {
            Some(entry) => entry.volume += volume,
            None => self.entries.push(MaterialVolume { material, volume }),
        }
    }

    /// Entries in first-appearance order
    pub fn entries(&self) -> &[MaterialVolume] {
        &self.entries
    }

    /// Volume for a single material, 0 if never seen
    pub fn volume_of(&self, material: Material) -> f64 {
        self.entries
            .iter()
            .find(|entry| entry.material == material)
            .map_or(0.0, |entry| entry.volume)
    }

    /// Entries sorted by volume, largest first
    pub fn into_sorted(self) -> Vec<MaterialVolume> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.volume.partial_cmp(&a.volume).unwrap_or(Ordering::Equal));
        entries
    }
}

/// Statistics over the records selected by the active polygons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionStats {
    /// Total volume in cubic meters
    pub volume: f64,
    pub count: usize,
    /// Mean depth in meters, 0 when nothing is selected
    pub avg_depth: f64,
    pub material_distribution: Vec<MaterialVolume>,
    /// Selection comes from the official boundary alone
    pub is_official_boundary: bool,
}
