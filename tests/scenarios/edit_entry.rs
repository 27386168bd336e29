//! Scenario: the developer edits the main package's imports.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use golive::infrastructure::GoSourceParser;
use golive::{CollectOptions, Collector, GoliveError};

use crate::common::{GoProject, MapResolver, RecordingSink};

fn set(dirs: &[&PathBuf]) -> BTreeSet<PathBuf> {
    dirs.iter().map(|d| (*d).clone()).collect()
}

#[test]
fn scenario_dropping_an_import_unwatches_its_subtree() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &["fmt", "x/a", "x/b"]);

    let resolver = MapResolver::new(project.root());
    resolver.add_std("fmt");
    let a = resolver.add("x/a", "a", &["x/c"]);
    let b = resolver.add("x/b", "b", &[]);
    let c = resolver.add("x/c", "c", &["strings"]);
    resolver.add_std("strings");

    let sink = Arc::new(RecordingSink::default());
    let mut collector = Collector::new(
        project.root(),
        &[main.clone()],
        &CollectOptions::default(),
        resolver,
        GoSourceParser,
        sink,
    )
    .unwrap();

    let root = project.root();
    assert_eq!(collector.watch_dirs(), set(&[&root, &a, &b, &c]));

    project.write_main("main.go", &["fmt", "x/b"]);
    let delta = collector.update(&[main]).unwrap();

    assert!(delta.added.is_empty());
    assert_eq!(delta.removed, vec![a, c]);
    assert_eq!(collector.watch_dirs(), set(&[&root, &b]));
}

#[test]
fn scenario_adding_an_import_watches_it_one_level_deep() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &[]);

    let resolver = MapResolver::new(project.root());
    let a = resolver.add("x/a", "a", &["x/c"]);
    resolver.add("x/c", "c", &[]);

    let mut collector = Collector::new(
        project.root(),
        &[main.clone()],
        &CollectOptions::default(),
        resolver.clone(),
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();
    assert_eq!(collector.watch_dirs().len(), 1);

    project.write_main("main.go", &["x/a"]);
    let delta = collector.update(&[main]).unwrap();

    assert_eq!(delta.added, vec![a]);
    assert!(delta.removed.is_empty());
    assert!(!resolver.calls().contains(&"x/c".to_string()));
}

#[test]
fn scenario_vendored_and_external_packages_are_never_watched() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &["x/app/vendor/y/z", "other.org/lib", "x/a"]);

    let resolver = MapResolver::new(project.root());
    resolver.add("x/app/vendor/y/z", "vendor/y/z", &[]);
    resolver.add_at("other.org/lib", PathBuf::from("/go/pkg/mod/other.org/lib"), &[]);
    let a = resolver.add("x/a", "a", &[]);

    let collector = Collector::new(
        project.root(),
        &[main],
        &CollectOptions::default(),
        resolver,
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();

    assert_eq!(collector.watch_dirs(), set(&[&project.root(), &a]));
    assert_eq!(collector.cache().rejected_len(), 2);
}

#[test]
fn scenario_vendored_packages_watched_when_enabled() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &["x/app/vendor/y/z"]);

    let resolver = MapResolver::new(project.root());
    let vendored = resolver.add("x/app/vendor/y/z", "vendor/y/z", &[]);

    let options = CollectOptions {
        ignore_vendor: false,
        ..CollectOptions::default()
    };
    let collector = Collector::new(
        project.root(),
        &[main],
        &options,
        resolver,
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();

    assert!(collector.watch_dirs().contains(&vendored));
}

#[test]
fn scenario_broken_edit_keeps_previous_graph() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &["x/a"]);

    let resolver = MapResolver::new(project.root());
    let a = resolver.add("x/a", "a", &[]);

    let mut collector = Collector::new(
        project.root(),
        &[main.clone()],
        &CollectOptions::default(),
        resolver,
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();
    let before = collector.watch_dirs();

    // typo in the import path: the resolver cannot find it
    project.write_main("main.go", &["x/aa"]);
    assert!(matches!(
        collector.update(&[main.clone()]),
        Err(GoliveError::Resolve { .. })
    ));
    assert_eq!(collector.watch_dirs(), before);
    assert!(collector.watch_dirs().contains(&a));

    // fixing the typo recovers without losing anything
    project.write_main("main.go", &["x/a"]);
    let delta = collector.update(&[main]).unwrap();
    assert!(delta.is_empty());
}

#[test]
fn scenario_multiple_entry_files_merge_imports() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &["x/a"]);
    let server = project.write("server.go", "package main\n\nimport \"x/b\"\n");

    let resolver = MapResolver::new(project.root());
    let a = resolver.add("x/a", "a", &[]);
    let b = resolver.add("x/b", "b", &[]);

    let collector = Collector::new(
        project.root(),
        &[main, server],
        &CollectOptions::default(),
        resolver,
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();

    assert_eq!(collector.watch_dirs(), set(&[&project.root(), &a, &b]));
}

#[test]
fn scenario_library_file_is_not_runnable() {
    let project = GoProject::new();
    let lib = project.write("lib.go", "package lib\n");

    let result = Collector::new(
        project.root(),
        &[lib],
        &CollectOptions::default(),
        MapResolver::new(project.root()),
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    );
    assert!(matches!(result, Err(GoliveError::NotEntryPackage { package, .. }) if package == "lib"));
}
