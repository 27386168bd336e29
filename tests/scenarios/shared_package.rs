//! Scenario: two packages share a dependency.

use std::sync::Arc;

use golive::infrastructure::GoSourceParser;
use golive::{CollectOptions, Collector};

use crate::common::{GoProject, MapResolver, RecordingSink};

#[test]
fn scenario_shared_package_survives_one_importer_dropping_it() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &["x/p", "x/q"]);

    let resolver = MapResolver::new(project.root());
    let p = resolver.add("x/p", "p", &["x/shared"]);
    resolver.add("x/q", "q", &["x/shared"]);
    let shared = resolver.add("x/shared", "shared", &[]);

    let mut collector = Collector::new(
        project.root(),
        &[main],
        &CollectOptions::default(),
        resolver.clone(),
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();

    assert_eq!(
        resolver.calls().iter().filter(|c| *c == "x/shared").count(),
        1
    );
    assert_eq!(collector.cache().get("x/shared").unwrap().reference_count, 1);

    resolver.set_imports("x/p", &[]);
    let delta = collector.update(&[p.join("p.go")]).unwrap();

    assert!(delta.is_empty());
    assert!(collector.watch_dirs().contains(&shared));
    assert_eq!(collector.cache().get("x/shared").unwrap().reference_count, 0);
}

#[test]
fn scenario_shared_package_removed_once_last_importer_drops_it() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &["x/p", "x/q"]);

    let resolver = MapResolver::new(project.root());
    let p = resolver.add("x/p", "p", &["x/shared"]);
    let q = resolver.add("x/q", "q", &["x/shared"]);
    let shared = resolver.add("x/shared", "shared", &[]);

    let mut collector = Collector::new(
        project.root(),
        &[main],
        &CollectOptions::default(),
        resolver.clone(),
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();

    resolver.set_imports("x/p", &[]);
    resolver.set_imports("x/q", &[]);
    let delta = collector
        .update(&[p.join("p.go"), q.join("q.go")])
        .unwrap();

    assert_eq!(delta.removed, vec![shared]);
    assert!(collector.cache().get("x/shared").is_none());
}

#[test]
fn scenario_dropping_importer_keeps_shared_grandchild() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &["x/p", "x/q"]);

    let resolver = MapResolver::new(project.root());
    let p = resolver.add("x/p", "p", &["x/shared"]);
    resolver.add("x/q", "q", &["x/shared"]);
    let shared = resolver.add("x/shared", "shared", &[]);

    let mut collector = Collector::new(
        project.root(),
        &[main.clone()],
        &CollectOptions::default(),
        resolver,
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();

    project.write_main("main.go", &["x/q"]);
    let delta = collector.update(&[main]).unwrap();

    assert_eq!(delta.removed, vec![p]);
    assert!(collector.watch_dirs().contains(&shared));
}
