//! Source annotation — record where each file came from.

use serde_json::Value;

use docsync_core::{FileSet, Guarantee, RunContext, Stage, StageError};

/// Adds `repo`, `branch`, and `source` provenance fields to every record
/// that originated in the source tree. Generated records have no origin and
/// are left alone.
pub struct AnnotateSource {
    repo: String,
    branch: String,
}

impl AnnotateSource {
    pub fn new(repo: impl Into<String>, branch: impl Into<String>) -> Self {
        AnnotateSource {
            repo: repo.into(),
            branch: branch.into(),
        }
    }
}

impl Stage for AnnotateSource {
    fn name(&self) -> &'static str {
        "add-source"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::FrontmatterParsed]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::SourceAnnotated]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        for (_, record) in files.iter_mut() {
            let Some(source) = record.source.clone() else {
                continue;
            };
            let meta = record.meta_mut(&ctx.namespace);
            meta.insert("repo".to_string(), Value::String(self.repo.clone()));
            meta.insert("branch".to_string(), Value::String(self.branch.clone()));
            meta.insert("source".to_string(), Value::String(source));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
