//! DredgeMap CLI - Command-line interface
//!
//! Drives the selection engine against a `.dredge` workspace directory.

mod cli;
mod commands;
mod config;
mod dry_run;
mod errors;
mod output;
mod output_types;
mod workspace;

use clap::Parser;
use cli::Cli;

fn main() {
    // Logs go to stderr so `--json` output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(error) = commands::execute(cli) {
        errors::from_anyhow(error).display();
        std::process::exit(1);
    }
}
