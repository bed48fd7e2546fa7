//! Destination persistence — write every record to the destination tree.

use docsync_core::{FileSet, Guarantee, RunContext, Stage, StageError};

use crate::writer::{write_if_changed, WriteOutcome};

/// Writes each record to `<destination>/<key>` with hash-gated atomic
/// writes. Runs after metadata serialization; together with the ignore-sync
/// stage it is the only place the pipeline touches persistent storage.
pub struct WriteFiles;

impl Stage for WriteFiles {
    fn name(&self) -> &'static str {
        "write-files"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::MetadataSerialized]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::Persisted]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        let mut written = 0usize;
        let mut unchanged = 0usize;
        for (key, record) in files.iter() {
            let path = ctx.destination.join(key);
            match write_if_changed(&path, &record.contents, ctx.dry_run)? {
                WriteOutcome::Written | WriteOutcome::WouldWrite => written += 1,
                WriteOutcome::Unchanged => unchanged += 1,
            }
        }
        tracing::info!(
            "persisted {} records ({} written, {} unchanged)",
            files.len(),
            written,
            unchanged
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
