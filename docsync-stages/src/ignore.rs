//! Ignore-list synchronization — keep the generated-file list current.

use docsync_core::{FileSet, Guarantee, IgnoreFileOptions, RunContext, Stage, StageError};

use crate::writer::write_if_changed;

/// Fully regenerates the ignore-list artifact in the destination root: the
/// configured header line, then one line per current record key in sorted
/// order. Regeneration (never patching) means removed records can leave no
/// stale entries behind.
pub struct SyncIgnoreFile {
    file: String,
    header: String,
}

impl SyncIgnoreFile {
    pub fn new(options: IgnoreFileOptions) -> Self {
        SyncIgnoreFile {
            file: options.file,
            header: options.header,
        }
    }
}

impl Stage for SyncIgnoreFile {
    fn name(&self) -> &'static str {
        "ignore-sync"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::Persisted]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        let mut content = String::with_capacity(self.header.len() + 16 * files.len());
        content.push_str(&self.header);
        content.push('\n');
        for key in files.paths() {
            content.push_str(key);
            content.push('\n');
        }
        write_if_changed(&ctx.destination.join(&self.file), &content, ctx.dry_run)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
