//! `docsync sync` — run the pipeline once or stay resident in watch mode.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use docsync_core::{FileSet, SourceInfo, SyncOptions, WatchOptions};
use docsync_engine::assemble;

/// Arguments for `docsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Source tree of modules to document.
    #[arg(long)]
    pub source: PathBuf,

    /// Destination tree for the generated site files.
    #[arg(long)]
    pub destination: PathBuf,

    /// Re-run the pipeline when source files change (until ctrl-c).
    #[arg(long)]
    pub watch: bool,

    /// Show what would be written without touching the destination.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the generated destination paths as a JSON array.
    #[arg(long, conflicts_with = "watch")]
    pub json: bool,

    /// Key under which per-file metadata is stored.
    #[arg(long, default_value = "data")]
    pub namespace: String,

    /// Repository (owner/name) recorded in each file's provenance fields.
    #[arg(long, requires = "branch")]
    pub repo: Option<String>,

    /// Branch recorded in each file's provenance fields.
    #[arg(long, requires = "repo")]
    pub branch: Option<String>,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let mut options = SyncOptions::new(&self.source, &self.destination);
        options.meta.namespace = self.namespace.clone();
        options.dry_run = self.dry_run;
        if let (Some(repo), Some(branch)) = (self.repo.clone(), self.branch.clone()) {
            options.source_info = Some(SourceInfo { repo, branch });
        }

        if self.watch {
            options.watch = Some(WatchOptions::default());
            return docsync_watch::run_blocking(&options).context("watch mode failed");
        }

        let started = Instant::now();
        let files = assemble::build(&options).context("sync failed")?;

        if self.json {
            let paths: Vec<&String> = files.paths().collect();
            println!("{}", serde_json::to_string_pretty(&paths)?);
            return Ok(());
        }

        print_summary(&files, self.dry_run, started.elapsed());
        Ok(())
    }
}

fn print_summary(files: &FileSet, dry_run: bool, elapsed: Duration) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    if files.is_empty() {
        println!("{prefix}✓ nothing to sync");
        return;
    }

    println!(
        "{prefix}✓ synced {} files in {}ms",
        files.len(),
        elapsed.as_millis()
    );
    let glyph = if dry_run { "~" } else { "✎" };
    for path in files.paths() {
        println!("  {glyph}  {path}");
    }
}
