//! File selection — populate the file-set from the source tree.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use docsync_core::{FileRecord, FileSet, Guarantee, RunContext, Stage, StageError};

use crate::patterns;

/// Walks the source tree and reads every file matching the configured
/// patterns into the set, keyed by its source-relative path. Directories
/// whose relative path contains an ignore substring are never entered.
pub struct SelectFiles {
    patterns: Vec<String>,
    ignore: Vec<String>,
}

impl SelectFiles {
    pub fn new(patterns: Vec<String>, ignore: Vec<String>) -> Self {
        SelectFiles { patterns, ignore }
    }

    fn ignored(&self, rel: &str) -> bool {
        self.ignore.iter().any(|needle| rel.contains(needle.as_str()))
    }
}

impl Stage for SelectFiles {
    fn name(&self) -> &'static str {
        "select"
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::Selected]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        let mut selected = 0usize;
        for path in walk_files(&ctx.source, |rel| self.ignored(rel))? {
            let Some(rel) = relative_key(&ctx.source, &path) else {
                tracing::debug!("skipping non-unicode path: {}", path.display());
                continue;
            };
            if self.ignored(&rel) || !patterns::matches_any(&self.patterns, &rel) {
                continue;
            }
            let contents =
                std::fs::read_to_string(&path).map_err(|e| StageError::io(&path, e))?;
            files.insert(rel.clone(), FileRecord::with_source(contents, rel));
            selected += 1;
        }
        tracing::debug!("selected {} files under {}", selected, ctx.source.display());
        Ok(())
    }
}

/// Collect all regular files under `root` in sorted order, skipping any
/// directory whose root-relative path the predicate rejects.
fn walk_files(
    root: &Path,
    skip_dir: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>, StageError> {
    let mut dirs = vec![root.to_path_buf()];
    let mut out = Vec::new();
    let mut cursor = 0;
    while cursor < dirs.len() {
        let current = dirs[cursor].clone();
        cursor += 1;
        let entries = match std::fs::read_dir(&current) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => return Err(StageError::io(&current, err)),
        };
        for entry in entries {
            let entry = entry.map_err(|e| StageError::io(&current, e))?;
            let ty = entry.file_type().map_err(|e| StageError::io(entry.path(), e))?;
            if ty.is_dir() {
                let dir = entry.path();
                match relative_key(root, &dir) {
                    Some(rel) if skip_dir(&rel) => continue,
                    _ => dirs.push(dir),
                }
            } else if ty.is_file() {
                out.push(entry.path());
            }
        }
    }
    out.sort();
    Ok(out)
}

/// Root-relative path with forward slashes, or `None` for non-unicode names.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut segments = Vec::new();
    for component in rel.components() {
        segments.push(component.as_os_str().to_str()?);
    }
    Some(segments.join("/"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_core::{Logger, SyncOptions};
    use std::fs;
    use tempfile::TempDir;

    fn ctx_for(source: &Path) -> RunContext {
        let mut options = SyncOptions::new(source, "/unused");
        options.log = Logger::silent();
        RunContext::from_options(&options)
    }

    fn stage() -> SelectFiles {
        let options = SyncOptions::new("/unused", "/unused");
        SelectFiles::new(options.patterns, options.ignore)
    }

    #[test]
    fn selects_matching_files_with_relative_keys() {
        let source = TempDir::new().expect("source");
        fs::create_dir_all(source.path().join("foo/docs")).expect("dirs");
        fs::write(source.path().join("foo/README.md"), "# foo").expect("write");
        fs::write(source.path().join("foo/docs/guide.md"), "# guide").expect("write");
        fs::write(source.path().join("foo/package.json"), "{}").expect("write");
        fs::write(source.path().join("foo/notes.txt"), "skip").expect("write");
        fs::write(source.path().join("top-level.md"), "skip").expect("write");

        let mut files = FileSet::new();
        stage().run(&mut files, &ctx_for(source.path())).expect("run");

        let keys: Vec<_> = files.paths().cloned().collect();
        assert_eq!(
            keys,
            vec!["foo/README.md", "foo/docs/guide.md", "foo/package.json"]
        );
        let readme = files.get("foo/README.md").expect("record");
        assert_eq!(readme.contents, "# foo");
        assert_eq!(readme.source.as_deref(), Some("foo/README.md"));
    }

    #[test]
    fn ignore_substrings_prune_whole_directories() {
        let source = TempDir::new().expect("source");
        fs::create_dir_all(source.path().join("foo/node_modules/dep")).expect("dirs");
        fs::write(source.path().join("foo/README.md"), "# foo").expect("write");
        fs::write(
            source.path().join("foo/node_modules/dep/README.md"),
            "# dep",
        )
        .expect("write");

        let mut files = FileSet::new();
        stage().run(&mut files, &ctx_for(source.path())).expect("run");

        assert_eq!(files.len(), 1);
        assert!(files.contains("foo/README.md"));
    }

    #[test]
    fn empty_source_tree_selects_nothing() {
        let source = TempDir::new().expect("source");
        let mut files = FileSet::new();
        stage().run(&mut files, &ctx_for(source.path())).expect("run");
        assert!(files.is_empty());
    }
}
