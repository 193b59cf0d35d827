//! Configuration loading utilities for CLI commands

use anyhow::{Context, Result};
use dredge_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::Path;

use crate::workspace::DATA_DIR;

pub const CONFIG_FILE: &str = "config.toml";

/// Defaults, then `.dredge/config.toml` when present, then `DREDGE_*` variables
pub fn load_workspace_config(workspace_root: &Path) -> Result<LayeredConfig> {
    let config_path = workspace_root.join(DATA_DIR).join(CONFIG_FILE);

    let mut config = LayeredConfig::with_defaults();
    if config_path.exists() {
        config = config
            .load_from_file(&config_path)
            .context("Failed to load configuration file")?;
    }

    Ok(config.load_from_env())
}

/// Layered configuration with CLI overrides applied last, validated
pub fn load_workspace_config_with_overrides(
    workspace_root: &Path,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_workspace_config(workspace_root)?;
    config.update_from_cli(overrides);
    config.validate()?;
    Ok(config)
}

/// Commented `config.toml` written by `dredge init`
pub fn config_template(operator: &str) -> String {
    format!(
        r#"# DredgeMap Workspace Configuration

# Initial depth filter in meters (inclusive). It is narrowed to the depths
# actually recorded in the project when statistics are computed.
depth_min = 0.0
depth_max = 30.0

# Records shallower than this are flagged by `dredge record list --shallow`
shallow_threshold = 12.0

# Include the project boundary in selections
show_official_boundary = true

# Directory for GeoJSON exports, relative to the workspace root
export_dir = "exports"

# Name written to the audit trail
operator = "{}"
"#,
        operator.replace('"', "'")
    )
}
