//! Package manifests — extraction into the shared cache and the aggregate
//! index record.
//!
//! `ExtractPackages` runs right after selection: manifests are data for the
//! pipeline, not site pages, so they leave the file-set here. `PackageIndex`
//! runs after filtering and inserts one generated record listing every cached
//! package; the two stages bracket the metadata stages the same way the
//! cache's consumers expect.

use docsync_core::{
    FileRecord, FileSet, Guarantee, PackageIndexEntry, PackageManifest, RunContext,
    SharedPackages, Stage, StageError,
};

pub struct ExtractPackages {
    packages: SharedPackages,
}

impl ExtractPackages {
    pub fn new(packages: SharedPackages) -> Self {
        ExtractPackages { packages }
    }
}

impl Stage for ExtractPackages {
    fn name(&self) -> &'static str {
        "extract-packages"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::Selected]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::PackagesExtracted]
    }

    fn run(&self, files: &mut FileSet, _ctx: &RunContext) -> Result<(), StageError> {
        let manifest_keys: Vec<String> = files
            .paths()
            .filter(|key| is_manifest_key(key))
            .cloned()
            .collect();

        let mut cache = self.packages.lock();
        cache.clear();
        for key in manifest_keys {
            let Some(record) = files.remove(&key) else {
                continue;
            };
            let manifest = PackageManifest::parse(&record.contents).map_err(|e| {
                StageError::Json {
                    path: key.clone(),
                    source: e,
                }
            })?;
            cache.insert(package_dir(&key), manifest);
        }
        tracing::debug!("extracted {} package manifests", cache.len());
        Ok(())
    }
}

/// Inserts the aggregate index record at the configured destination key,
/// listing every cached package sorted by name.
pub struct PackageIndex {
    packages: SharedPackages,
    path: String,
}

impl PackageIndex {
    pub fn new(packages: SharedPackages, path: impl Into<String>) -> Self {
        PackageIndex {
            packages,
            path: path.into(),
        }
    }
}

impl Stage for PackageIndex {
    fn name(&self) -> &'static str {
        "package-index"
    }

    fn requires(&self) -> &[Guarantee] {
        &[Guarantee::PackagesExtracted, Guarantee::PathRequired]
    }

    fn provides(&self) -> &[Guarantee] {
        &[Guarantee::PackagesIndexed]
    }

    fn run(&self, files: &mut FileSet, _ctx: &RunContext) -> Result<(), StageError> {
        let mut entries: Vec<PackageIndexEntry> = {
            let cache = self.packages.lock();
            cache.manifests().map(|m| m.index_entry()).collect()
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut json =
            serde_json::to_string_pretty(&entries).map_err(|e| StageError::Json {
                path: self.path.clone(),
                source: e,
            })?;
        json.push('\n');
        files.insert(self.path.clone(), FileRecord::new(json));
        Ok(())
    }
}

fn is_manifest_key(key: &str) -> bool {
    key == "package.json" || key.ends_with("/package.json")
}

fn package_dir(key: &str) -> String {
    key.strip_suffix("package.json")
        .map(|dir| dir.trim_end_matches('/'))
        .unwrap_or("")
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_core::SyncOptions;

    fn ctx() -> RunContext {
        RunContext::from_options(&SyncOptions::new("/src", "/dest"))
    }

    fn manifest_set() -> FileSet {
        let mut files = FileSet::new();
        files.insert(
            "foo/package.json",
            FileRecord::new(r#"{"name": "foo", "description": "Foo module", "version": "1.2.3"}"#),
        );
        files.insert(
            "bar/package.json",
            FileRecord::new(r#"{"name": "bar", "description": "Bar module", "version": "0.4.0"}"#),
        );
        files.insert("foo/README.md", FileRecord::new("# foo"));
        files
    }

    #[test]
    fn extraction_removes_manifests_and_fills_the_cache() {
        let packages = SharedPackages::default();
        let mut files = manifest_set();

        ExtractPackages::new(packages.clone())
            .run(&mut files, &ctx())
            .expect("run");

        let keys: Vec<_> = files.paths().cloned().collect();
        assert_eq!(keys, vec!["foo/README.md"]);

        let cache = packages.lock();
        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache.nearest("foo/README.md").and_then(|m| m.text_field("name")),
            Some("foo")
        );
    }

    #[test]
    fn extraction_clears_stale_cache_entries_from_a_previous_run() {
        let packages = SharedPackages::default();
        packages.lock().insert(
            "stale",
            PackageManifest::parse(r#"{"name": "stale"}"#).expect("manifest"),
        );

        let mut files = FileSet::new();
        ExtractPackages::new(packages.clone())
            .run(&mut files, &ctx())
            .expect("run");
        assert!(packages.lock().is_empty());
    }

    #[test]
    fn invalid_manifest_json_fails_the_stage() {
        let packages = SharedPackages::default();
        let mut files = FileSet::new();
        files.insert("foo/package.json", FileRecord::new("not json"));

        let err = ExtractPackages::new(packages)
            .run(&mut files, &ctx())
            .expect_err("parse error");
        assert!(matches!(err, StageError::Json { ref path, .. } if path == "foo/package.json"));
    }

    #[test]
    fn index_record_lists_packages_sorted_by_name() {
        let packages = SharedPackages::default();
        let mut files = manifest_set();
        ExtractPackages::new(packages.clone())
            .run(&mut files, &ctx())
            .expect("extract");

        PackageIndex::new(packages, "packages.json")
            .run(&mut files, &ctx())
            .expect("index");

        let record = files.get("packages.json").expect("index record");
        let parsed: Vec<serde_json::Value> =
            serde_json::from_str(&record.contents).expect("valid json");
        let names: Vec<_> = parsed
            .iter()
            .map(|entry| entry["name"].as_str().expect("name"))
            .collect();
        assert_eq!(names, vec!["bar", "foo"]);
        assert_eq!(parsed[1]["version"], "1.2.3");
        assert!(record.contents.ends_with('\n'));
    }

    #[test]
    fn index_is_written_even_when_no_packages_exist() {
        let packages = SharedPackages::default();
        let mut files = FileSet::new();
        PackageIndex::new(packages, "packages.json")
            .run(&mut files, &ctx())
            .expect("index");
        assert_eq!(
            files.get("packages.json").expect("record").contents,
            "[]\n"
        );
    }
}
