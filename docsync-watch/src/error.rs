//! Error surface for the watch runtime.

use std::path::PathBuf;

use thiserror::Error;

use docsync_engine::SyncError;

#[derive(Debug, Error)]
pub enum WatchError {
    /// Configuration or pipeline failure from the underlying build.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Filesystem watcher failure.
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> WatchError {
    WatchError::Io {
        path: path.into(),
        source,
    }
}
