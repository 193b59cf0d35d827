use crate::error::{DredgeError, Result};
use crate::models::DepthRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

/// Default depth below which a record is flagged as critical
pub const DEFAULT_SHALLOW_THRESHOLD: f64 = 12.0;

/// Default operator name written to the audit trail
pub const DEFAULT_OPERATOR: &str = "Eng. Supervisor";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for DredgeMap
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub depth_min: ConfigValue<f64>,
    pub depth_max: ConfigValue<f64>,
    pub shallow_threshold: ConfigValue<f64>,
    pub show_official_boundary: ConfigValue<bool>,
    pub export_dir: ConfigValue<String>,
    pub operator: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            depth_min: ConfigValue::new(DepthRange::DEFAULT_MIN, ConfigSource::Default),
            depth_max: ConfigValue::new(DepthRange::DEFAULT_MAX, ConfigSource::Default),
            shallow_threshold: ConfigValue::new(DEFAULT_SHALLOW_THRESHOLD, ConfigSource::Default),
            show_official_boundary: ConfigValue::new(true, ConfigSource::Default),
            export_dir: ConfigValue::new(".".to_string(), ConfigSource::Default),
            operator: ConfigValue::new(DEFAULT_OPERATOR.to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| DredgeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| DredgeError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(depth_min) = file_config.depth_min {
            self.depth_min.update(depth_min, ConfigSource::File);
        }

        if let Some(depth_max) = file_config.depth_max {
            self.depth_max.update(depth_max, ConfigSource::File);
        }

        if let Some(threshold) = file_config.shallow_threshold {
            self.shallow_threshold.update(threshold, ConfigSource::File);
        }

        if let Some(show) = file_config.show_official_boundary {
            self.show_official_boundary.update(show, ConfigSource::File);
        }

        if let Some(export_dir) = file_config.export_dir {
            self.export_dir.update(export_dir, ConfigSource::File);
        }

        if let Some(operator) = file_config.operator {
            self.operator.update(operator, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // DREDGE_DEPTH_MIN
        if let Ok(raw) = env::var("DREDGE_DEPTH_MIN") {
            match parse_depth(&raw, "depth_min") {
                Ok(depth) => self.depth_min.update(depth, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DREDGE_DEPTH_MIN value '{}': expected a non-negative number",
                    raw
                ),
            }
        }

        // DREDGE_DEPTH_MAX
        if let Ok(raw) = env::var("DREDGE_DEPTH_MAX") {
            match parse_depth(&raw, "depth_max") {
                Ok(depth) => self.depth_max.update(depth, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DREDGE_DEPTH_MAX value '{}': expected a non-negative number",
                    raw
                ),
            }
        }

        // DREDGE_SHALLOW_THRESHOLD
        if let Ok(raw) = env::var("DREDGE_SHALLOW_THRESHOLD") {
            match parse_depth(&raw, "shallow_threshold") {
                Ok(depth) => self.shallow_threshold.update(depth, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DREDGE_SHALLOW_THRESHOLD value '{}': expected a non-negative number",
                    raw
                ),
            }
        }

        // DREDGE_SHOW_BOUNDARY
        if let Ok(raw) = env::var("DREDGE_SHOW_BOUNDARY") {
            match parse_bool(&raw, "show_official_boundary") {
                Ok(show) => self.show_official_boundary.update(show, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid DREDGE_SHOW_BOUNDARY value '{}': expected true or false",
                    raw
                ),
            }
        }

        // DREDGE_EXPORT_DIR
        if let Ok(export_dir) = env::var("DREDGE_EXPORT_DIR") {
            self.export_dir.update(export_dir, ConfigSource::Environment);
        }

        // DREDGE_OPERATOR
        if let Ok(operator) = env::var("DREDGE_OPERATOR") {
            self.operator.update(operator, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(depth_min) = overrides.depth_min {
            self.depth_min.update(depth_min, ConfigSource::Cli);
        }

        if let Some(depth_max) = overrides.depth_max {
            self.depth_max.update(depth_max, ConfigSource::Cli);
        }

        if let Some(threshold) = overrides.shallow_threshold {
            self.shallow_threshold.update(threshold, ConfigSource::Cli);
        }

        if let Some(show) = overrides.show_official_boundary {
            self.show_official_boundary.update(show, ConfigSource::Cli);
        }

        if let Some(export_dir) = overrides.export_dir {
            self.export_dir.update(export_dir, ConfigSource::Cli);
        }

        if let Some(operator) = overrides.operator {
            self.operator.update(operator, ConfigSource::Cli);
        }
    }

    /// Initial depth filter built from the configured bounds
    pub fn depth_range(&self) -> DepthRange {
        DepthRange::new(self.depth_min.value, self.depth_max.value)
    }

    /// Check cross-field constraints after all layers are applied
    pub fn validate(&self) -> Result<()> {
        if self.depth_min.value > self.depth_max.value {
            return Err(DredgeError::ConfigInvalid {
                key: "depth_min".to_string(),
                reason: format!(
                    "depth_min ({}) must not exceed depth_max ({})",
                    self.depth_min.value, self.depth_max.value
                ),
            });
        }
        Ok(())
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut map = BTreeMap::new();

        map.insert(
            "depth_min".to_string(),
            (format!("{} m", self.depth_min.value), self.depth_min.source),
        );

        map.insert(
            "depth_max".to_string(),
            (format!("{} m", self.depth_max.value), self.depth_max.source),
        );

        map.insert(
            "shallow_threshold".to_string(),
            (format!("{} m", self.shallow_threshold.value), self.shallow_threshold.source),
        );

        map.insert(
            "show_official_boundary".to_string(),
            (self.show_official_boundary.value.to_string(), self.show_official_boundary.source),
        );

        map.insert(
            "export_dir".to_string(),
            (self.export_dir.value.clone(), self.export_dir.source),
        );

        map.insert("operator".to_string(), (self.operator.value.clone(), self.operator.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    pub depth_min: Option<f64>,
    pub depth_max: Option<f64>,
    pub shallow_threshold: Option<f64>,
    pub show_official_boundary: Option<bool>,
    pub export_dir: Option<String>,
    pub operator: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub depth_min: Option<f64>,
    pub depth_max: Option<f64>,
    pub shallow_threshold: Option<f64>,
    pub show_official_boundary: Option<bool>,
    pub export_dir: Option<String>,
    pub operator: Option<String>,
}

/// Parse a depth value in meters
pub fn parse_depth(s: &str, key: &str) -> Result<f64> {
    match s.trim().parse::<f64>() {
        Ok(depth) if depth.is_finite() && depth >= 0.0 => Ok(depth),
        _ => Err(DredgeError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid depth: {}. Use a non-negative number of meters", s),
        }),
    }
}

/// Parse a boolean flag
pub fn parse_bool(s: &str, key: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(DredgeError::ConfigInvalid {
            key: key.to_string(),
            reason: format!("Invalid flag: {}. Use true or false", s),
        }),
    }
}
