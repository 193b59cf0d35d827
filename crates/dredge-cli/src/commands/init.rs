//! Init command implementation

use crate::cli::InitArgs;
use crate::config::{config_template, CONFIG_FILE};
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::output::OutputWriter;
use crate::output_types::InitOutput;
use crate::workspace::DATA_DIR;
use anyhow::{bail, Context, Result};
use dredge_core::config::DEFAULT_OPERATOR;
use dredge_store::JsonFileStore;
use std::fs;

pub fn execute(args: InitArgs, output: &OutputWriter, dry_run: bool) -> Result<()> {
    let data_dir = args.path.join(DATA_DIR);
    if data_dir.exists() && !args.force {
        bail!(
            "Workspace already exists at {}. Use --force to rewrite config.toml",
            args.path.display()
        );
    }

    let operator = args.operator.as_deref().unwrap_or(DEFAULT_OPERATOR);
    let config_path = data_dir.join(CONFIG_FILE);

    if dry_run {
        let actions = vec![
            PlannedAction::new(
                ActionType::CreateDirectory,
                format!("Create {} directory at {}", DATA_DIR, args.path.display()),
            ),
            PlannedAction::new(ActionType::CreateFile, "Create config.toml")
                .with_detail("Depth filter: 0 - 30 m")
                .with_detail(format!("Operator: {}", operator)),
            PlannedAction::new(
                ActionType::CreateFile,
                "Create projects.json, records.json and audit.json (empty, existing files kept)",
            ),
        ];

        display_planned_actions(output, &actions);
        return Ok(());
    }

    JsonFileStore::init(&data_dir).context("Failed to create data files")?;
    fs::write(&config_path, config_template(operator)).context("Failed to write config.toml")?;

    if output.is_json() {
        output.result(InitOutput {
            workspace_path: args.path.display().to_string(),
            config_path: config_path.display().to_string(),
            operator: operator.to_string(),
        })?;
    } else {
        output.success(format!("Initialized DredgeMap workspace at {}", args.path.display()));

        output.section("Configuration");
        output.kv("Config", config_path.display());
        output.kv("Operator", operator);
        output.info("Next: dredge project create <NAME>");
    }

    Ok(())
}
