//! Manifest enrichment — copy package fields into each record's metadata.

use docsync_core::{FileSet, Guarantee, RunContext, SharedPackages, Stage, StageError};

/// Copies the configured manifest fields from each record's nearest owning
/// package into its metadata namespace. Explicit front-matter values win;
/// the manifest only fills gaps.
pub struct AddPackageMeta {
    packages: SharedPackages,
    fields: Vec<String>,
}

impl AddPackageMeta {
    pub fn new(packages: SharedPackages, fields: Vec<String>) -> Self {
        AddPackageMeta { packages, fields }
    }
}

impl Stage for AddPackageMeta {
    fn name(&self) -> &'static str {
        "package-meta"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::PackagesExtracted, Guarantee::FrontmatterParsed]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::ManifestEnriched]
    }

    fn run(&self, files: &mut FileSet, ctx: &RunContext) -> Result<(), StageError> {
        let cache = self.packages.lock();
        for (_, record) in files.iter_mut() {
            let Some(source) = record.source.clone() else {
                continue;
            };
            let Some(manifest) = cache.nearest(&source) else {
                continue;
            };
            let meta = record.meta_mut(&ctx.namespace);
            for field in &self.fields {
                if meta.contains_key(field) {
                    continue;
                }
                if let Some(value) = manifest.field(field) {
                    meta.insert(field.clone(), value.clone());
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
