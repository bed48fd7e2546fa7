//! Docsync core library — file-set model, stage contract, configuration, errors.
//!
//! Public API surface:
//! - [`types`] — [`FileRecord`] and [`FileSet`], the shared pipeline state
//! - [`stage`] — the [`Stage`] contract with typed ordering guarantees
//! - [`config`] — [`SyncOptions`] and its sub-options, plus the [`Logger`] sink
//! - [`manifest`] — package-manifest model and the shared package cache
//! - [`error`] — [`ConfigError`] and [`StageError`]

pub mod config;
pub mod error;
pub mod manifest;
pub mod stage;
pub mod types;

pub use config::{
    IgnoreFileOptions, Logger, MetaOptions, SourceInfo, SyncOptions, WatchOptions,
};
pub use error::{ConfigError, StageError};
pub use manifest::{PackageCache, PackageIndexEntry, PackageManifest, SharedPackages};
pub use stage::{Guarantee, RunContext, Stage};
pub use types::{FileRecord, FileSet, MetaMap};
