//! Error types for docsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors a pipeline stage can signal.
///
/// A stage failure aborts the current build run; the engine attaches the
/// failing stage's identity when it propagates one of these.
#[derive(Debug, Error)]
pub enum StageError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Front-matter YAML parse or serialization error for a record.
    #[error("front-matter error in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON error for a package manifest or the generated index.
    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StageError {
    /// Convenience constructor for [`StageError::Io`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Invalid or missing configuration, detected before any stage runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured source root does not exist or is not a directory.
    #[error("source root not found or not a directory: {path}")]
    SourceNotFound { path: PathBuf },

    /// The destination lies inside the source root, which would make every
    /// successful run retrigger the watcher.
    #[error("destination {destination} is inside source root {source_root}")]
    DestinationInsideSource {
        source_root: PathBuf,
        destination: PathBuf,
    },

    /// The metadata namespace key is empty.
    #[error("metadata namespace must not be empty")]
    EmptyNamespace,

    /// No file-selection patterns were supplied.
    #[error("at least one selection pattern is required")]
    NoPatterns,

    /// The package index destination path is empty.
    #[error("package index path must not be empty")]
    EmptyIndexPath,

    /// The ignore-list file name is empty.
    #[error("ignore-list file name must not be empty")]
    EmptyIgnoreFile,

    /// The watch debounce window is zero.
    #[error("watch debounce window must be greater than zero")]
    ZeroDebounce,
}
