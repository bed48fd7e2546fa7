//! Error types for docsync-engine.

use thiserror::Error;

use docsync_core::{ConfigError, Guarantee, StageError};

/// All errors that can arise from one pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage signalled failure; carries the stage identity for diagnosis.
    #[error("stage '{stage}' (position {index}) failed: {source}")]
    Stage {
        stage: &'static str,
        index: usize,
        #[source]
        source: StageError,
    },

    /// The stage order violates a declared dependency; rejected at
    /// construction, before anything runs.
    #[error("stage '{stage}' (position {index}) requires {missing} earlier in the order")]
    OrderViolation {
        stage: &'static str,
        index: usize,
        missing: Guarantee,
    },

    /// Every stage completed but no capture stage stored a snapshot.
    #[error("pipeline completed without a captured snapshot")]
    SnapshotMissing,

    /// The blocking build task could not be joined.
    #[error("build runtime error: {0}")]
    Runtime(String),
}

/// Facade-level error: configuration or pipeline.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
