//! Property tests for graph sharing and cascading removal.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use proptest::prelude::*;

use golive::domain::graph::ENTRY_KEY;
use golive::infrastructure::GoSourceParser;
use golive::{CollectOptions, Collector};

use crate::common::{GoProject, MapResolver, RecordingSink};

/// Random DAG: package `i` may only import packages `j > i`
fn dag() -> impl Strategy<Value = (usize, Vec<Vec<bool>>, Vec<bool>)> {
    (2usize..8).prop_flat_map(|n| {
        (
            Just(n),
            proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n),
            proptest::collection::vec(any::<bool>(), n),
        )
    })
}

fn import_path(i: usize) -> String {
    format!("x/p{i}")
}

fn edges(n: usize, matrix: &[Vec<bool>]) -> Vec<Vec<usize>> {
    (0..n)
        .map(|i| (i + 1..n).filter(|&j| matrix[i][j]).collect())
        .collect()
}

fn reachable(roots: &[usize], edges: &[Vec<usize>]) -> BTreeSet<usize> {
    let mut seen = BTreeSet::new();
    let mut stack: Vec<usize> = roots.to_vec();
    while let Some(i) = stack.pop() {
        if seen.insert(i) {
            stack.extend(edges[i].iter().copied());
        }
    }
    seen
}

struct Fixture {
    project: GoProject,
    collector: Collector<MapResolver, GoSourceParser>,
    resolver: MapResolver,
    dirs: Vec<PathBuf>,
    edges: Vec<Vec<usize>>,
    main: PathBuf,
}

fn build(n: usize, matrix: &[Vec<bool>], roots: &[usize]) -> Fixture {
    let project = GoProject::new();
    let edges = edges(n, matrix);

    let resolver = MapResolver::new(project.root());
    let dirs: Vec<PathBuf> = (0..n)
        .map(|i| {
            let imports: Vec<String> = edges[i].iter().map(|&j| import_path(j)).collect();
            let imports: Vec<&str> = imports.iter().map(String::as_str).collect();
            resolver.add(&import_path(i), &format!("p{i}"), &imports)
        })
        .collect();

    let root_imports: Vec<String> = roots.iter().map(|&i| import_path(i)).collect();
    let root_imports: Vec<&str> = root_imports.iter().map(String::as_str).collect();
    let main = project.write_main("cmd/main.go", &root_imports);

    let collector = Collector::new(
        project.root(),
        &[main.clone()],
        &CollectOptions::default(),
        resolver.clone(),
        GoSourceParser,
        Arc::new(RecordingSink::default()),
    )
    .unwrap();

    Fixture {
        project,
        collector,
        resolver,
        dirs,
        edges,
        main,
    }
}

fn expected_dirs(fixture: &Fixture, roots: &[usize]) -> BTreeSet<PathBuf> {
    let mut dirs: BTreeSet<PathBuf> = reachable(roots, &fixture.edges)
        .into_iter()
        .map(|i| fixture.dirs[i].clone())
        .collect();
    dirs.insert(fixture.project.path("cmd"));
    dirs
}

/// Every node's count equals its in-graph importers minus one
fn assert_reference_counts(fixture: &Fixture) {
    let cache = fixture.collector.cache();
    let mut importers: HashMap<&str, usize> = HashMap::new();
    for (_, node) in cache.packages() {
        for dep in &node.dependencies {
            *importers.entry(dep.as_str()).or_default() += 1;
        }
    }
    for (key, node) in cache.packages() {
        if key == ENTRY_KEY {
            continue;
        }
        let parents = importers.get(key).copied().unwrap_or(0);
        assert!(parents >= 1, "{key} is orphaned");
        assert_eq!(node.reference_count, parents - 1, "reference count of {key}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The initial watch set is exactly the reachable packages,
    /// each resolved once.
    #[test]
    fn property_build_watches_reachable_packages((n, matrix, picks) in dag()) {
        let roots: Vec<usize> = (0..n).filter(|&i| picks[i]).collect();
        let fixture = build(n, &matrix, &roots);

        prop_assert_eq!(fixture.collector.watch_dirs(), expected_dirs(&fixture, &roots));

        let calls = fixture.resolver.calls();
        let distinct: BTreeSet<&String> = calls.iter().collect();
        prop_assert_eq!(calls.len(), distinct.len());

        assert_reference_counts(&fixture);
    }

    /// PROPERTY: Dropping entry imports removes exactly what became
    /// unreachable and never a still-shared package.
    #[test]
    fn property_removal_cascades_to_reachability(
        (n, matrix, picks) in dag(),
        keep in proptest::collection::vec(any::<bool>(), 8),
    ) {
        let roots: Vec<usize> = (0..n).filter(|&i| picks[i]).collect();
        let mut fixture = build(n, &matrix, &roots);
        let before = fixture.collector.watch_dirs();

        let kept: Vec<usize> = roots.iter().copied().filter(|&i| keep[i]).collect();
        let kept_imports: Vec<String> = kept.iter().map(|&i| import_path(i)).collect();
        let kept_imports: Vec<&str> = kept_imports.iter().map(String::as_str).collect();
        fixture.project.write_main("cmd/main.go", &kept_imports);

        let main = fixture.main.clone();
        let delta = fixture.collector.update(&[main]).unwrap();
        let after = expected_dirs(&fixture, &kept);

        prop_assert_eq!(fixture.collector.watch_dirs(), after.clone());
        prop_assert!(delta.added.is_empty());
        let removed: BTreeSet<PathBuf> = delta.removed.into_iter().collect();
        let expected_removed: BTreeSet<PathBuf> = before.difference(&after).cloned().collect();
        prop_assert_eq!(removed, expected_removed);

        assert_reference_counts(&fixture);
    }

    /// PROPERTY: Every watched directory maps back to exactly one package.
    #[test]
    fn property_directory_index_is_consistent((n, matrix, picks) in dag()) {
        let roots: Vec<usize> = (0..n).filter(|&i| picks[i]).collect();
        let fixture = build(n, &matrix, &roots);
        let cache = fixture.collector.cache();

        for dir in fixture.collector.watch_dirs() {
            let (key, node) = cache.lookup_by_dir(&dir).expect("indexed dir has a node");
            prop_assert_eq!(node.dir(), dir.as_path());
            prop_assert!(cache.is_resolved(key));
        }
        prop_assert_eq!(fixture.collector.watch_dirs().len(), cache.len());
    }
}
