//! Front-matter parsing — move leading `---` blocks into record metadata.

use docsync_core::{FileSet, Guarantee, Logger, MetaMap, RunContext, Stage, StageError};

/// Parses each record's leading front-matter into its metadata namespace and
/// strips it from the contents. A YAML error fails the run; non-mapping
/// front-matter is reported and left in place.
pub struct ParseFrontMatter {
    log: Logger,
}

impl ParseFrontMatter {
    pub fn new(log: Logger) -> Self {
        ParseFrontMatter { log }
    }
}

impl Stage for ParseFrontMatter {
    fn name(&self) -> &'static str {
        "front-matter"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::FrontmatterExtracted]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::FrontmatterParsed]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        for (key, record) in files.iter_mut() {
            let Some((block, body)) = split_front_matter(&record.contents) else {
                continue;
            };
            if block.trim().is_empty() {
                let body = body.to_string();
                record.contents = body;
                continue;
            }
            let parsed: serde_json::Value = match serde_yaml::from_str(block) {
                Ok(value) => value,
                Err(err) => {
                    self.log
                        .log(&format!("front-matter parse failed for {key}: {err}"));
                    return Err(StageError::Yaml {
                        path: key.clone(),
                        source: err,
                    });
                }
            };
            let Some(map) = parsed.as_object() else {
                self.log
                    .log(&format!("{key}: front-matter is not a mapping, ignored"));
                continue;
            };
            let map: MetaMap = map.clone();
            let body = body.to_string();
            *record.meta_mut(&ctx.namespace) = map;
            record.contents = body;
        }
        Ok(())
    }
}

/// Split `contents` into (front-matter block, body). The block starts with a
/// `---` line at the very top and ends at the next `---` line; one blank line
/// after the closing delimiter is swallowed.
pub(crate) fn split_front_matter(contents: &str) -> Option<(&str, &str)> {
    let rest = contents.strip_prefix("---\n")?;
    if let Some(after) = rest.strip_prefix("---\n") {
        return Some(("", after.strip_prefix('\n').unwrap_or(after)));
    }
    if let Some(idx) = rest.find("\n---\n") {
        let after = &rest[idx + 5..];
        return Some((&rest[..idx + 1], after.strip_prefix('\n').unwrap_or(after)));
    }
    if let Some(block) = rest.strip_suffix("\n---") {
        return Some((block, ""));
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_core::{FileRecord, SyncOptions};

    fn run_stage(contents: &str) -> Result<FileSet, StageError> {
        let mut files = FileSet::new();
        files.insert("bar/docs/usage.md", FileRecord::new(contents));
        let ctx = RunContext::from_options(&SyncOptions::new("/src", "/dest"));
        ParseFrontMatter::new(Logger::silent()).run(&mut files, &ctx)?;
        Ok(files)
    }

    #[test]
    fn parses_front_matter_into_the_namespace() {
        let files = run_stage("---\npath: usage\ntitle: Usage\n---\n\n# Usage\n").expect("run");
        let record = files.get("bar/docs/usage.md").expect("record");
        assert_eq!(record.meta_str("data", "path"), Some("usage"));
        assert_eq!(record.meta_str("data", "title"), Some("Usage"));
        assert_eq!(record.contents, "# Usage\n");
    }

    #[test]
    fn records_without_front_matter_are_untouched() {
        let files = run_stage("# Plain document\n").expect("run");
        let record = files.get("bar/docs/usage.md").expect("record");
        assert!(record.meta("data").is_none());
        assert_eq!(record.contents, "# Plain document\n");
    }

    #[test]
    fn empty_front_matter_is_stripped_without_metadata() {
        let files = run_stage("---\n---\n\n# Body\n").expect("run");
        let record = files.get("bar/docs/usage.md").expect("record");
        assert!(record.meta("data").is_none());
        assert_eq!(record.contents, "# Body\n");
    }

    #[test]
    fn invalid_yaml_fails_the_stage() {
        let err = run_stage("---\npath: [unclosed\n---\n\nbody\n").expect_err("yaml error");
        assert!(matches!(err, StageError::Yaml { ref path, .. } if path == "bar/docs/usage.md"));
    }

    #[test]
    fn non_mapping_front_matter_is_ignored() {
        let input = "---\njust a string\n---\n\nbody\n";
        let files = run_stage(input).expect("run");
        let record = files.get("bar/docs/usage.md").expect("record");
        assert!(record.meta("data").is_none());
        assert_eq!(record.contents, input);
    }

    #[test]
    fn split_handles_a_block_ending_at_eof() {
        let (block, body) = split_front_matter("---\npath: x\n---").expect("split");
        assert_eq!(block, "path: x");
        assert_eq!(body, "");
    }
}
