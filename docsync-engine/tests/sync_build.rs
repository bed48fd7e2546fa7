//! End-to-end pipeline runs over a real module tree.

use std::fs;
use std::path::Path;

use docsync_core::{Logger, SourceInfo, SyncOptions};
use docsync_engine::assemble;
use tempfile::TempDir;

/// Two documented modules, one undocumented file, one ignored dependency
/// tree.
fn write_fixture(source: &Path) {
    fs::create_dir_all(source.join("foo")).expect("foo");
    fs::write(
        source.join("foo/README.md"),
        "# Foo\n\n<!-- %docs\npath: intro\n-->\n# Intro docs\n\nGetting started with foo.\n<!-- %enddocs -->\nInternal notes.\n",
    )
    .expect("foo readme");
    fs::write(
        source.join("foo/package.json"),
        r#"{"name": "foo", "description": "Foo module", "version": "1.2.3"}"#,
    )
    .expect("foo manifest");

    fs::create_dir_all(source.join("bar/docs")).expect("bar");
    fs::write(
        source.join("bar/docs/usage.md"),
        "---\npath: usage\n---\n\n# Usage\n",
    )
    .expect("bar usage");
    fs::write(
        source.join("bar/package.json"),
        r#"{"name": "bar", "description": "Bar module", "version": "0.4.0"}"#,
    )
    .expect("bar manifest");

    fs::create_dir_all(source.join("baz/docs")).expect("baz");
    fs::write(source.join("baz/docs/notes.md"), "# No path here\n").expect("baz notes");

    fs::create_dir_all(source.join("foo/node_modules/dep")).expect("dep");
    fs::write(source.join("foo/node_modules/dep/README.md"), "# dep\n").expect("dep readme");
}

fn options_for(source: &TempDir, dest: &TempDir) -> SyncOptions {
    let mut options = SyncOptions::new(source.path(), dest.path());
    options.log = Logger::silent();
    options
}

#[test]
fn scenario_two_modules_produce_three_records() {
    let source = TempDir::new().expect("source");
    let dest = TempDir::new().expect("dest");
    write_fixture(source.path());

    let files = assemble::build(&options_for(&source, &dest)).expect("build");

    let keys: Vec<_> = files.paths().cloned().collect();
    assert_eq!(keys, vec!["intro.md", "packages.json", "usage.md"]);

    let intro = files.get("intro.md").expect("intro");
    assert_eq!(intro.meta_str("data", "name"), Some("foo"));
    assert_eq!(intro.meta_str("data", "description"), Some("Foo module"));
    assert_eq!(intro.meta_str("data", "version"), Some("1.2.3"));
    // Captured before serialization: body only, no front-matter block.
    assert_eq!(intro.contents, "# Intro docs\n\nGetting started with foo.\n");

    let usage = files.get("usage.md").expect("usage");
    assert_eq!(usage.meta_str("data", "name"), Some("bar"));
    assert_eq!(usage.meta_str("data", "version"), Some("0.4.0"));

    let index: Vec<serde_json::Value> =
        serde_json::from_str(&files.get("packages.json").expect("index").contents)
            .expect("index json");
    let names: Vec<_> = index.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["bar", "foo"]);
}

#[test]
fn destination_tree_and_ignore_list_match_the_captured_set() {
    let source = TempDir::new().expect("source");
    let dest = TempDir::new().expect("dest");
    write_fixture(source.path());

    assemble::build(&options_for(&source, &dest)).expect("build");

    let intro = fs::read_to_string(dest.path().join("intro.md")).expect("intro on disk");
    assert!(
        intro.starts_with("---\n"),
        "persisted file should carry serialized front-matter: {intro}"
    );
    assert!(intro.contains("name: foo"));
    assert!(intro.contains("path: intro"));
    assert!(intro.ends_with("# Intro docs\n\nGetting started with foo.\n"));

    assert!(dest.path().join("usage.md").exists());
    assert!(dest.path().join("packages.json").exists());

    let ignore = fs::read_to_string(dest.path().join(".gitignore")).expect("ignore list");
    assert_eq!(
        ignore,
        "# DO NOT EDIT: automatically generated by docsync\nintro.md\npackages.json\nusage.md\n"
    );
}

#[test]
fn runs_are_deterministic_over_an_unchanged_tree() {
    let source = TempDir::new().expect("source");
    let dest = TempDir::new().expect("dest");
    write_fixture(source.path());
    let options = options_for(&source, &dest);

    let first = assemble::build(&options).expect("first build");
    let second = assemble::build(&options).expect("second build");
    assert_eq!(first, second);
}

#[test]
fn records_without_a_path_are_dropped_silently() {
    let source = TempDir::new().expect("source");
    let dest = TempDir::new().expect("dest");
    write_fixture(source.path());

    let files = assemble::build(&options_for(&source, &dest)).expect("build");
    assert!(!files.paths().any(|key| key.contains("notes")));
}

#[test]
fn source_annotation_adds_provenance_fields() {
    let source = TempDir::new().expect("source");
    let dest = TempDir::new().expect("dest");
    write_fixture(source.path());

    let mut options = options_for(&source, &dest);
    options.source_info = Some(SourceInfo {
        repo: "acme/modules".to_string(),
        branch: "main".to_string(),
    });

    let files = assemble::build(&options).expect("build");
    let intro = files.get("intro.md").expect("intro");
    assert_eq!(intro.meta_str("data", "repo"), Some("acme/modules"));
    assert_eq!(intro.meta_str("data", "branch"), Some("main"));
    assert_eq!(intro.meta_str("data", "source"), Some("foo/README.md"));
}

#[test]
fn dry_run_captures_but_writes_nothing() {
    let source = TempDir::new().expect("source");
    let dest = TempDir::new().expect("dest");
    write_fixture(source.path());

    let mut options = options_for(&source, &dest);
    options.dry_run = true;

    let files = assemble::build(&options).expect("build");
    assert_eq!(files.len(), 3);

    let mut entries = fs::read_dir(dest.path()).expect("read dest");
    assert!(entries.next().is_none(), "dry-run must not create files");
}

#[test]
fn a_removed_module_leaves_no_stale_ignore_entries() {
    let source = TempDir::new().expect("source");
    let dest = TempDir::new().expect("dest");
    write_fixture(source.path());
    let options = options_for(&source, &dest);

    assemble::build(&options).expect("first build");
    fs::remove_dir_all(source.path().join("foo")).expect("remove foo");
    assemble::build(&options).expect("second build");

    let ignore = fs::read_to_string(dest.path().join(".gitignore")).expect("ignore list");
    assert_eq!(
        ignore,
        "# DO NOT EDIT: automatically generated by docsync\npackages.json\nusage.md\n"
    );
}
