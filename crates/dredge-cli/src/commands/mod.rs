//! Command implementations

mod boundary;
mod export;
mod init;
mod project;
mod record;
mod stats;
mod status;
mod summary;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let workspace = cli.workspace.as_deref();

    match cli.command {
        Commands::Init(args) => init::execute(args, &output, cli.dry_run),
        Commands::Project(args) => project::execute(args, &output, workspace, cli.dry_run),
        Commands::Record(args) => record::execute(args, &output, workspace),
        Commands::Boundary(args) => boundary::execute(args, &output, workspace),
        Commands::Stats(args) => stats::execute(args, &output, workspace),
        Commands::Export(args) => export::execute(args, &output, workspace, cli.dry_run),
        Commands::Summary => summary::execute(&output, workspace),
        Commands::Status(args) => status::execute(args, &output, workspace),
    }
}
