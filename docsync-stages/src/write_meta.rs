//! Metadata serialization — write the namespace map back into each body.

use docsync_core::{FileSet, Guarantee, Logger, RunContext, Stage, StageError};

/// Re-serializes each record's metadata namespace as YAML front-matter at
/// the top of its contents. Runs after the result snapshot is captured, so
/// callers observe bodies without the serialized block.
pub struct WriteFrontMatter {
    log: Logger,
}

impl WriteFrontMatter {
    pub fn new(log: Logger) -> Self {
        WriteFrontMatter { log }
    }
}

impl Stage for WriteFrontMatter {
    fn name(&self) -> &'static str {
        "write-meta"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::FrontmatterParsed, Guarantee::Captured]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::MetadataSerialized]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        for (key, record) in files.iter_mut() {
            let yaml = {
                let Some(meta) = record.meta(&ctx.namespace) else {
                    continue;
                };
                if meta.is_empty() {
                    continue;
                }
                match serde_yaml::to_string(meta) {
                    Ok(yaml) => yaml,
                    Err(err) => {
                        self.log
                            .log(&format!("front-matter serialization failed for {key}: {err}"));
                        return Err(StageError::Yaml {
                            path: key.clone(),
                            source: err,
                        });
                    }
                }
            };
            let serialized = format!("---\n{yaml}---\n\n{}", record.contents);
            record.contents = serialized;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
