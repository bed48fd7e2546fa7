//! # docsync-watch
//!
//! Watch-mode runtime and the public sync facade.
//!
//! [`sync`] runs the initial build and, when configured, attaches a
//! [`WatchHandle`] that keeps the destination fresh as source files change.
//! [`run_blocking`] is the process entrypoint used by the CLI: it owns the
//! Tokio runtime and stays resident until ctrl-c.

mod controller;
mod debounce;
mod error;

use std::sync::Arc;

use docsync_core::{FileSet, RunContext, SyncOptions};
use docsync_engine::{assemble, BuildRun, SyncError};

pub use controller::{WatchHandle, WatchState};
pub use error::WatchError;

use error::io_err;

/// Result of the sync facade: the initial build's captured file-set, plus
/// the watcher handle when watch mode is on.
///
/// Watch-mode rebuilds after this point are visible only through logs and on
/// disk, never through this value.
#[derive(Debug)]
pub struct Synced {
    pub files: FileSet,
    pub watcher: Option<WatchHandle>,
}

/// Validate configuration, run the initial build, and attach the watch
/// controller if requested.
///
/// Resolves exactly once: with the captured file-set of the initial build,
/// or with its first error. With `watch` off no filesystem subscription is
/// ever created.
pub async fn sync(options: &SyncOptions) -> Result<Synced, WatchError> {
    let pipeline = Arc::new(assemble::pipeline(options)?);
    let ctx = Arc::new(RunContext::from_options(options));

    let files = BuildRun::spawn(pipeline.clone(), ctx.clone())
        .join()
        .await
        .map_err(SyncError::from)?;

    let watcher = match &options.watch {
        Some(watch) => Some(controller::spawn(
            pipeline,
            ctx,
            watch,
            options.ignore.clone(),
        )?),
        None => None,
    };

    Ok(Synced { files, watcher })
}

/// Run the facade on a fresh runtime and stay resident until ctrl-c.
pub fn run_blocking(options: &SyncOptions) -> Result<(), WatchError> {
    init_tracing();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| io_err("tokio-runtime", e))?;

    runtime.block_on(async {
        let synced = sync(options).await?;
        tracing::info!(files = synced.files.len(), "initial build complete");

        if let Some(watcher) = synced.watcher {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("received ctrl-c, shutting down watcher"),
                Err(err) => tracing::warn!(error = %err, "ctrl-c handler failed"),
            }
            watcher.shutdown().await;
        }
        Ok(())
    })
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
