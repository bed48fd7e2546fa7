//! Hash-gated atomic file writer shared by the terminal stages.
//!
//! ## Write protocol
//!
//! 1. Normalise line endings to LF.
//! 2. SHA-256 hash the content.
//! 3. Compare with the hash of the current file on disk → skip if identical.
//! 4. Write to `<path>.docsync.tmp`.
//! 5. Rename to the final path (atomic on POSIX).
//!
//! An unchanged file is never rewritten, so its mtime is stable across
//! no-op runs.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use docsync_core::StageError;

/// Outcome of an individual file write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was written (content changed or did not previously exist).
    Written,
    /// File was skipped — content matches what is on disk.
    Unchanged,
    /// Dry-run mode: the file *would* have been written.
    WouldWrite,
}

/// Atomically write `content` to `path` unless the file already matches.
pub fn write_if_changed(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteOutcome, StageError> {
    let normalized = content.replace("\r\n", "\n");
    let content = normalized.as_str();
    let digest = sha256_hex(content);

    if let Ok(existing) = std::fs::read_to_string(path) {
        if sha256_hex(&existing.replace("\r\n", "\n")) == digest {
            tracing::debug!("unchanged: {}", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteOutcome::WouldWrite);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| StageError::io(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.docsync.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| StageError::io(&tmp, e))?;

    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(StageError::io(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteOutcome::Written)
}

fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
