//! Renaming — move each record under its metadata-derived destination key.

use docsync_core::{FileSet, Guarantee, RunContext, Stage, StageError};

/// Re-keys every record whose metadata carries a `path` to `<path>.md`.
/// Records without one (generated records such as the package index) keep
/// their key. A collision overwrites deterministically and is reported
/// through the run logger.
pub struct RenameByPath;

impl Stage for RenameByPath {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::PathRequired]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::Renamed]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        let moves: Vec<(String, String)> = files
            .iter()
            .filter_map(|(key, record)| {
                record
                    .meta_str(&ctx.namespace, "path")
                    .map(|path| (key.clone(), format!("{path}.md")))
            })
            .filter(|(from, to)| from != to)
            .collect();

        for (from, to) in moves {
            if files.contains(&to) {
                ctx.log
                    .log(&format!("rename collision: {from} -> {to} replaces an existing record"));
            }
            if let Some(record) = files.remove(&from) {
                files.insert(to, record);
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
