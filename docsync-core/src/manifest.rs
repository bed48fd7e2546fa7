//! Package-manifest model and the cache shared across stages.
//!
//! Manifests are extracted from the file-set early (and removed from it),
//! then consulted twice later: once to build the aggregate index record and
//! once to enrich each record with fields from its nearest owning package.
//! The cache is cleared at the start of every run so a long-lived pipeline
//! never leaks state between builds.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::types::MetaMap;

/// One parsed `package.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageManifest {
    fields: MetaMap,
}

impl PackageManifest {
    /// Parse manifest text; the top level must be a JSON object.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let fields: MetaMap = serde_json::from_str(text)?;
        Ok(PackageManifest { fields })
    }

    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    /// String-valued field, or `None` if absent or not a string.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.as_str()
    }

    /// Row for the aggregate package index.
    pub fn index_entry(&self) -> PackageIndexEntry {
        PackageIndexEntry {
            name: self.text_field("name").unwrap_or_default().to_string(),
            description: self.text_field("description").map(str::to_string),
            version: self.text_field("version").map(str::to_string),
        }
    }
}

/// One row of the generated package index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageIndexEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Module directory → manifest, keyed by source-relative directory path.
#[derive(Debug, Default)]
pub struct PackageCache {
    by_dir: BTreeMap<String, PackageManifest>,
}

impl PackageCache {
    pub fn clear(&mut self) {
        self.by_dir.clear();
    }

    pub fn insert(&mut self, dir: impl Into<String>, manifest: PackageManifest) {
        self.by_dir.insert(dir.into(), manifest);
    }

    pub fn len(&self) -> usize {
        self.by_dir.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_dir.is_empty()
    }

    /// Manifests in directory order.
    pub fn manifests(&self) -> impl Iterator<Item = &PackageManifest> {
        self.by_dir.values()
    }

    /// The manifest of the nearest directory containing `source_path`,
    /// walking up one path segment at a time.
    pub fn nearest(&self, source_path: &str) -> Option<&PackageManifest> {
        let mut dir = parent(source_path);
        loop {
            if let Some(manifest) = self.by_dir.get(dir) {
                return Some(manifest);
            }
            if dir.is_empty() {
                return None;
            }
            dir = parent(dir);
        }
    }
}

fn parent(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

/// The cache handle shared between the extraction, index, and enrichment
/// stages of one pipeline.
#[derive(Debug, Clone, Default)]
pub struct SharedPackages(Arc<Mutex<PackageCache>>);

impl SharedPackages {
    pub fn lock(&self) -> MutexGuard<'_, PackageCache> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
