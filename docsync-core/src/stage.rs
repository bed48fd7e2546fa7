//! The stage contract: one ordered unit of the pipeline.
//!
//! Stages execute strictly in sequence against the same [`FileSet`]; a stage
//! signals completion by returning `Ok(())` and failure by returning a
//! [`StageError`], which aborts the run. Ordering constraints are declared as
//! typed [`Guarantee`]s so an invalid order is rejected when the pipeline is
//! constructed, not discovered mid-run.

use std::fmt;
use std::path::PathBuf;

use crate::config::{Logger, SyncOptions};
use crate::error::StageError;
use crate::types::FileSet;

/// A postcondition one stage establishes and later stages may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guarantee {
    /// Candidate files have been read from the source tree.
    Selected,
    /// Package manifests have been parsed into the shared cache.
    PackagesExtracted,
    /// Embedded doc blocks have been promoted to standard front-matter.
    FrontmatterExtracted,
    /// Front-matter has been parsed into each record's metadata namespace.
    FrontmatterParsed,
    /// Records lacking the required metadata key have been dropped.
    PathRequired,
    /// The aggregate package index record exists.
    PackagesIndexed,
    /// Provenance fields have been added to each record.
    SourceAnnotated,
    /// Manifest fields have been merged into each record.
    ManifestEnriched,
    /// Records sit under their metadata-derived destination keys.
    Renamed,
    /// The result snapshot has been captured for the caller.
    Captured,
    /// Metadata has been re-serialized into each record's contents.
    MetadataSerialized,
    /// Records have been written to the destination tree.
    Persisted,
}

impl fmt::Display for Guarantee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Guarantee::Selected => "selected files",
            Guarantee::PackagesExtracted => "extracted packages",
            Guarantee::FrontmatterExtracted => "extracted front-matter",
            Guarantee::FrontmatterParsed => "parsed front-matter",
            Guarantee::PathRequired => "path-filtered records",
            Guarantee::PackagesIndexed => "a package index",
            Guarantee::SourceAnnotated => "source annotations",
            Guarantee::ManifestEnriched => "manifest enrichment",
            Guarantee::Renamed => "renamed records",
            Guarantee::Captured => "a captured snapshot",
            Guarantee::MetadataSerialized => "serialized metadata",
            Guarantee::Persisted => "persisted records",
        };
        f.write_str(name)
    }
}

/// Read-only configuration visible to every stage for one build run.
///
/// Stage-specific options are bound into stage structs at assembly time;
/// this carries only what every stage may need.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Root of the source tree being documented.
    pub source: PathBuf,
    /// Root of the generated site tree.
    pub destination: PathBuf,
    /// Key under which per-file metadata is stored and read.
    pub namespace: String,
    /// User-facing diagnostic sink.
    pub log: Logger,
    /// Terminal stages report writes instead of performing them.
    pub dry_run: bool,
}

impl RunContext {
    pub fn from_options(options: &SyncOptions) -> Self {
        RunContext {
            source: options.source.clone(),
            destination: options.destination.clone(),
            namespace: options.meta.namespace.clone(),
            log: options.log.clone(),
            dry_run: options.dry_run,
        }
    }
}

/// One ordered unit of work over the shared file-set.
pub trait Stage: Send + Sync {
    /// Identity used in error reporting and logs.
    fn name(&self) -> &'static str;

    /// Guarantees that must be established by earlier stages.
    fn requires(&self) -> &[Guarantee] {
        &[]
    }

    /// Guarantees this stage establishes for later stages.
    fn provides(&self) -> &[Guarantee] {
        &[]
    }

    /// Transform the file-set. The engine holds the only reference, so the
    /// stage has exclusive access for the duration of the call.
    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError>;
}
