//! Docsync — assemble per-package documentation into a publishable tree.
//!
//! # Usage
//!
//! ```text
//! docsync sync --source <dir> --destination <dir> [--watch] [--dry-run]
//!              [--json] [--namespace <ns>] [--repo <owner/name> --branch <name>]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::sync::SyncArgs;

#[derive(Parser, Debug)]
#[command(
    name = "docsync",
    version,
    about = "Assemble per-package documentation into a publishable site tree",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the documentation tree, optionally watching for changes.
    Sync(SyncArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
    }
}
