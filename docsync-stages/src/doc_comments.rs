//! Doc-comment extraction — promote delimited doc blocks to front-matter.
//!
//! Readmes embed their publishable section between `<!-- %docs … -->` and
//! `<!-- %enddocs -->`; the YAML inside the opening comment becomes standard
//! front-matter and the delimited text becomes the record body. Files without
//! a `%docs` marker pass through untouched, so plain front-matter documents
//! coexist with doc-comment ones.

use docsync_core::{FileSet, Guarantee, Logger, RunContext, Stage, StageError};

const DOCS_OPEN: &str = "<!-- %docs";
const COMMENT_CLOSE: &str = "-->";
const DOCS_END: &str = "<!-- %enddocs -->";

pub struct ExtractDocComments {
    log: Logger,
}

impl ExtractDocComments {
    pub fn new(log: Logger) -> Self {
        ExtractDocComments { log }
    }
}

impl Stage for ExtractDocComments {
    fn name(&self) -> &'static str {
        "doc-comments"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::Selected]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::FrontmatterExtracted]
    }

    fn run(&self, files: &mut FileSet, _ctx: &RunContext) -> Result<(), StageError> {
        for (key, record) in files.iter_mut() {
            match promote_block(&record.contents) {
                Ok(Some(rewritten)) => record.contents = rewritten,
                Ok(None) => {}
                Err(reason) => self.log.log(&format!("{key}: {reason}")),
            }
        }
        Ok(())
    }
}

/// Rewrite a doc-comment block as front-matter, `Ok(None)` when the file has
/// no block, `Err` with a reason when the block is malformed (the record is
/// then passed through unchanged).
fn promote_block(contents: &str) -> Result<Option<String>, String> {
    let Some(open) = contents.find(DOCS_OPEN) else {
        return Ok(None);
    };
    let after_open = &contents[open + DOCS_OPEN.len()..];
    let Some(close) = after_open.find(COMMENT_CLOSE) else {
        return Err("unterminated %docs block".to_string());
    };
    let yaml = after_open[..close].trim();
    let after_close = &after_open[close + COMMENT_CLOSE.len()..];
    let Some(end) = after_close.find(DOCS_END) else {
        return Err("missing %enddocs marker".to_string());
    };
    let body = after_close[..end].trim_matches('\n');
    Ok(Some(format!("---\n{yaml}\n---\n\n{body}\n")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
