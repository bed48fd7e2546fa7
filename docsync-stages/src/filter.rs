//! Predicate filtering — drop records lacking a required metadata key.
//!
//! Dropped records are not an error: a readme without a publishable `path`
//! simply stays out of the site. Each dropped key is reported at debug level
//! so the policy can be audited.

use docsync_core::{FileSet, Guarantee, RunContext, Stage, StageError};

pub struct FilterByMeta {
    key: String,
}

impl FilterByMeta {
    /// Keep only records whose namespace metadata has a string value at `key`.
    pub fn require_key(key: impl Into<String>) -> Self {
        FilterByMeta { key: key.into() }
    }
}

impl Stage for FilterByMeta {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::FrontmatterParsed]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::PathRequired]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        let dropped: Vec<String> = files
            .iter()
            .filter(|(_, record)| record.meta_str(&ctx.namespace, &self.key).is_none())
            .map(|(key, _)| key.clone())
            .collect();
        for key in dropped {
            files.remove(&key);
            tracing::debug!("dropped {}: no '{}' in front-matter", key, self.key);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
