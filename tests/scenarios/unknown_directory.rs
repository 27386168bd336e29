//! Scenario: a file changes in a directory nothing imports yet.

use std::sync::Arc;

use golive::infrastructure::GoSourceParser;
use golive::{CollectOptions, Collector, WatchEvent};

use crate::common::{GoProject, MapResolver, RecordingSink};

#[test]
fn scenario_change_in_unindexed_directory_is_ignored() {
    let project = GoProject::new();
    let main = project.write_main("main.go", &[]);
    let stray = project.write("tools/gen.go", "package tools\n");

    let sink = Arc::new(RecordingSink::default());
    let mut collector = Collector::new(
        project.root(),
        &[main],
        &CollectOptions::default(),
        MapResolver::new(project.root()),
        GoSourceParser,
        sink.clone(),
    )
    .unwrap();
    let before = collector.watch_dirs();

    let delta = collector.update(&[stray]).unwrap();

    assert!(delta.added.is_empty());
    assert!(delta.removed.is_empty());
    assert_eq!(collector.watch_dirs(), before);
    assert_eq!(
        sink.count(|e| matches!(e, WatchEvent::UnknownDirectory { dir } if *dir == project.path("tools"))),
        1
    );
}
