//! The in-memory file-set the pipeline threads through its stages.
//!
//! A [`FileSet`] maps relative destination paths to [`FileRecord`]s. Keys use
//! forward slashes regardless of platform. Iteration order is the sorted key
//! order, so two runs over the same inputs produce identical output.

use std::collections::BTreeMap;

/// Metadata fields under one namespace key.
pub type MetaMap = serde_json::Map<String, serde_json::Value>;

/// One logical file moving through the pipeline.
///
/// A record has no identity beyond its current key in the [`FileSet`];
/// renaming is remove-old-key, insert-new-key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRecord {
    /// Text payload; stages may rewrite it.
    pub contents: String,
    /// Source-root-relative origin path, stable across renames.
    pub source: Option<String>,
    /// Namespace key → metadata fields. No key is privileged by the engine.
    meta: BTreeMap<String, MetaMap>,
}

impl FileRecord {
    /// A record with contents only, e.g. one generated mid-pipeline.
    pub fn new(contents: impl Into<String>) -> Self {
        FileRecord {
            contents: contents.into(),
            source: None,
            meta: BTreeMap::new(),
        }
    }

    /// A record read from the source tree.
    pub fn with_source(contents: impl Into<String>, source: impl Into<String>) -> Self {
        FileRecord {
            contents: contents.into(),
            source: Some(source.into()),
            meta: BTreeMap::new(),
        }
    }

    /// Metadata under `namespace`, if any has been set.
    pub fn meta(&self, namespace: &str) -> Option<&MetaMap> {
        self.meta.get(namespace)
    }

    /// Mutable metadata under `namespace`, created empty on first access.
    pub fn meta_mut(&mut self, namespace: &str) -> &mut MetaMap {
        self.meta.entry(namespace.to_string()).or_default()
    }

    /// String-valued metadata field, or `None` if absent or not a string.
    pub fn meta_str(&self, namespace: &str, key: &str) -> Option<&str> {
        self.meta.get(namespace)?.get(key)?.as_str()
    }
}

/// Relative destination path → record, in sorted key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileSet {
    files: BTreeMap<String, FileRecord>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.files.get(path)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut FileRecord> {
        self.files.get_mut(path)
    }

    /// Insert or replace the record at `path`, returning any previous record.
    pub fn insert(&mut self, path: impl Into<String>, record: FileRecord) -> Option<FileRecord> {
        self.files.insert(path.into(), record)
    }

    pub fn remove(&mut self, path: &str) -> Option<FileRecord> {
        self.files.remove(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileRecord)> {
        self.files.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut FileRecord)> {
        self.files.iter_mut()
    }

    /// Current keys in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.files.keys()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn paths_iterate_in_sorted_order() {
        let mut files = FileSet::new();
        files.insert("usage.md", FileRecord::new("u"));
        files.insert("intro.md", FileRecord::new("i"));
        files.insert("packages.json", FileRecord::new("[]"));

        let paths: Vec<_> = files.paths().cloned().collect();
        assert_eq!(paths, vec!["intro.md", "packages.json", "usage.md"]);
    }

    #[test]
    fn remove_and_reinsert_models_a_rename() {
        let mut files = FileSet::new();
        files.insert("foo/README.md", FileRecord::with_source("body", "foo/README.md"));

        let record = files.remove("foo/README.md").expect("record");
        files.insert("intro.md", record.clone());

        assert!(!files.contains("foo/README.md"));
        assert_eq!(files.get("intro.md"), Some(&record));
        assert_eq!(record.source.as_deref(), Some("foo/README.md"));
    }

    #[test]
    fn meta_mut_creates_the_namespace_on_first_access() {
        let mut record = FileRecord::new("");
        assert!(record.meta("data").is_none());

        record
            .meta_mut("data")
            .insert("path".to_string(), Value::String("intro".to_string()));

        assert_eq!(record.meta_str("data", "path"), Some("intro"));
        assert_eq!(record.meta_str("data", "missing"), None);
        assert_eq!(record.meta_str("other", "path"), None);
    }

    #[test]
    fn meta_str_ignores_non_string_values() {
        let mut record = FileRecord::new("");
        record
            .meta_mut("data")
            .insert("version".to_string(), Value::from(3));
        assert_eq!(record.meta_str("data", "version"), None);
    }

    #[test]
    fn insert_replaces_and_returns_previous_record() {
        let mut files = FileSet::new();
        files.insert("intro.md", FileRecord::new("old"));
        let previous = files.insert("intro.md", FileRecord::new("new"));
        assert_eq!(previous, Some(FileRecord::new("old")));
        assert_eq!(files.get("intro.md").map(|r| r.contents.as_str()), Some("new"));
    }
}
