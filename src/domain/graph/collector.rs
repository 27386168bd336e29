//! Collector - builds the dependency graph and keeps it current
//!
//! The initial build walks every import of the entry files recursively.
//! Later updates re-resolve only the packages whose directories changed,
//! one level deep, and cascade removals as far as reachability allows.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::ports::{ImportResolver, SourceParser, WatchEvent, WatchEventSink};
use crate::error::{GoliveError, GoliveResult};

use super::cache::ResolutionCache;
use super::filter::PackageFilter;
use super::package::{PackageNode, ENTRY_KEY, ENTRY_PACKAGE};

/// Options for dependency collection
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Skip packages vendored under `vendor_dir`
    pub ignore_vendor: bool,
    /// Name of the vendor directory
    pub vendor_dir: String,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            ignore_vendor: true,
            vendor_dir: "vendor".to_string(),
        }
    }
}

/// Directories to start and stop watching after an update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchDelta {
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

impl WatchDelta {
    /// Set difference between two watch sets
    pub fn between(before: &BTreeSet<PathBuf>, after: &BTreeSet<PathBuf>) -> Self {
        Self {
            added: after.difference(before).cloned().collect(),
            removed: before.difference(after).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Dependency collector and updater
pub struct Collector<R, P>
where
    R: ImportResolver,
    P: SourceParser,
{
    root: PathBuf,
    entry_files: Vec<PathBuf>,
    filter: PackageFilter,
    cache: ResolutionCache,
    resolver: R,
    parser: P,
    sink: Arc<dyn WatchEventSink>,
}

impl<R, P> Collector<R, P>
where
    R: ImportResolver,
    P: SourceParser,
{
    /// Validate the entry files and build the initial graph.
    ///
    /// `root` must be absolute; relative entry files are taken relative to it.
    pub fn new(
        root: PathBuf,
        entry_files: &[PathBuf],
        options: &CollectOptions,
        resolver: R,
        parser: P,
        sink: Arc<dyn WatchEventSink>,
    ) -> GoliveResult<Self> {
        if !root.is_absolute() {
            return Err(GoliveError::RelativeRoot { path: root });
        }

        let entry_files = normalize_entry_files(&root, entry_files)?;
        let filter = PackageFilter::for_root(&root, options.ignore_vendor, &options.vendor_dir);

        let mut collector = Self {
            root,
            entry_files,
            filter,
            cache: ResolutionCache::new(),
            resolver,
            parser,
            sink,
        };
        collector.build_graph()?;
        Ok(collector)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_files(&self) -> &[PathBuf] {
        &self.entry_files
    }

    /// Read-only view of the resolution cache
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn entry(&self) -> Option<&PackageNode> {
        self.cache.get(ENTRY_KEY)
    }

    /// Every resolved package except the entry, ordered by import path
    pub fn dependencies(&self) -> Vec<&PackageNode> {
        let mut packages: Vec<&PackageNode> = self
            .cache
            .packages()
            .filter(|(key, _)| *key != ENTRY_KEY)
            .map(|(_, node)| node)
            .collect();
        packages.sort_by(|a, b| a.import_path.cmp(&b.import_path));
        packages
    }

    /// Directories that currently need watching, sorted
    pub fn watch_dirs(&self) -> BTreeSet<PathBuf> {
        self.cache.dirs().map(Path::to_path_buf).collect()
    }

    /// Re-resolve the packages owning `changed_files` and report the watch delta.
    ///
    /// Either the whole batch is applied or, on the first error, the graph
    /// is left exactly as it was before the call.
    pub fn update(&mut self, changed_files: &[PathBuf]) -> GoliveResult<WatchDelta> {
        let before = self.watch_dirs();
        let checkpoint = self.cache.clone();

        if let Err(err) = self.apply_changes(changed_files) {
            self.cache = checkpoint;
            return Err(err);
        }

        Ok(WatchDelta::between(&before, &self.watch_dirs()))
    }

    fn build_graph(&mut self) -> GoliveResult<()> {
        let imports = self.parse_entry_imports()?;
        let entry_dir = match self.entry_files.first().and_then(|f| f.parent()) {
            Some(dir) => dir.to_path_buf(),
            None => return Err(GoliveError::NoSourceFiles),
        };

        self.cache.resolve(ENTRY_KEY, PackageNode::entry(entry_dir));
        self.resolve_imports(ENTRY_KEY, &imports, true)?;
        if let Some(entry) = self.cache.get_mut(ENTRY_KEY) {
            entry.imports = imports;
        }

        self.sink.on_event(WatchEvent::GraphBuilt {
            packages: self.cache.len(),
            dirs: self.cache.dirs().count(),
        });
        Ok(())
    }

    /// Union of the imports of every entry file, deduplicated
    fn parse_entry_imports(&self) -> GoliveResult<Vec<String>> {
        let mut imports = Vec::new();
        for file in &self.entry_files {
            let parsed = self.parser.parse_imports(file)?;
            if parsed.package != ENTRY_PACKAGE {
                return Err(GoliveError::NotEntryPackage {
                    file: file.clone(),
                    package: parsed.package,
                });
            }
            imports.extend(parsed.imports);
        }
        Ok(dedup(imports))
    }

    fn apply_changes(&mut self, changed_files: &[PathBuf]) -> GoliveResult<()> {
        let mut seen: HashSet<&Path> = HashSet::new();

        for file in changed_files {
            let Some(dir) = file.parent() else {
                continue;
            };
            // One re-resolution per directory, so the entry package's files
            // are merged at most once per call.
            if !seen.insert(dir) {
                continue;
            }

            let key = match self.cache.lookup_by_dir(dir) {
                Some((key, _)) => key.to_string(),
                None => {
                    self.sink.on_event(WatchEvent::UnknownDirectory {
                        dir: dir.to_path_buf(),
                    });
                    continue;
                }
            };

            let imports = if key == ENTRY_KEY {
                self.parse_entry_imports()?
            } else {
                self.reimport(&key)?
            };
            self.reconcile(&key, imports)?;
        }

        Ok(())
    }

    /// Ask the resolver again for a package's current import list
    fn reimport(&self, key: &str) -> GoliveResult<Vec<String>> {
        let Some(node) = self.cache.get(key) else {
            return Ok(Vec::new());
        };
        let package = self.resolver.resolve(&node.import_path, &node.dir)?;
        Ok(package.imports)
    }

    /// Attach new imports one level deep, detach dropped ones, store the list.
    fn reconcile(&mut self, key: &str, imports: Vec<String>) -> GoliveResult<()> {
        self.resolve_imports(key, &imports, false)?;

        let imports = dedup(imports);
        let current: HashSet<&str> = imports.iter().map(String::as_str).collect();
        let stale: Vec<String> = match self.cache.get(key) {
            Some(node) => node
                .imports
                .iter()
                .filter(|import| !current.contains(import.as_str()))
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        for import in &stale {
            self.remove_import(key, import);
        }

        if let Some(node) = self.cache.get_mut(key) {
            node.imports = imports;
        }
        Ok(())
    }

    fn resolve_imports(
        &mut self,
        parent_key: &str,
        imports: &[String],
        recurse: bool,
    ) -> GoliveResult<()> {
        let parent_dir = match self.cache.get(parent_key) {
            Some(parent) => parent.dir.clone(),
            None => return Ok(()),
        };

        for import in imports {
            if self.cache.is_rejected(import) {
                continue;
            }

            if self
                .cache
                .get(parent_key)
                .is_some_and(|parent| parent.depends_on(import))
            {
                continue;
            }

            // Shared sub-graph: already walked through its first importer.
            if let Some(existing) = self.cache.get_mut(import) {
                existing.reference_count += 1;
                self.attach(parent_key, import);
                continue;
            }

            let package = self.resolver.resolve(import, &parent_dir)?;
            if !self.filter.accepts(&package) {
                self.sink.on_event(WatchEvent::ImportRejected {
                    import_path: import.clone(),
                    dir: package.dir.clone(),
                });
                self.cache.reject(import, package.dir);
                continue;
            }

            let node = PackageNode::from_resolved(package);
            let child_imports = node.imports.clone();
            self.sink.on_event(WatchEvent::PackageResolved {
                import_path: import.clone(),
                dir: node.dir.clone(),
            });
            self.cache.resolve(import, node);
            self.attach(parent_key, import);

            if recurse {
                self.resolve_imports(import, &child_imports, recurse)?;
            }
        }

        Ok(())
    }

    fn attach(&mut self, parent_key: &str, import: &str) {
        if let Some(parent) = self.cache.get_mut(parent_key) {
            parent.dependencies.insert(import.to_string());
        }
    }

    /// Drop the edge `parent_key → import` and release the dependency.
    fn remove_import(&mut self, parent_key: &str, import: &str) {
        let detached = self
            .cache
            .get_mut(parent_key)
            .is_some_and(|parent| parent.dependencies.remove(import));
        if detached {
            self.release(import);
        }
    }

    /// One importer fewer: decrement, or delete the node and cascade.
    fn release(&mut self, key: &str) {
        if key == ENTRY_KEY {
            return;
        }
        let Some(node) = self.cache.get_mut(key) else {
            return;
        };
        if node.reference_count > 0 {
            node.reference_count -= 1;
            return;
        }

        if let Some(node) = self.cache.remove(key) {
            self.sink.on_event(WatchEvent::PackageRemoved {
                import_path: key.to_string(),
                dir: node.dir.clone(),
            });
            for child in &node.dependencies {
                self.release(child);
            }
        }
    }
}

/// Make entry files absolute and require a single shared directory.
fn normalize_entry_files(root: &Path, files: &[PathBuf]) -> GoliveResult<Vec<PathBuf>> {
    if files.is_empty() {
        return Err(GoliveError::NoSourceFiles);
    }

    let mut normalized = Vec::with_capacity(files.len());
    let mut dir: Option<PathBuf> = None;
    for file in files {
        let full = if file.is_absolute() {
            file.clone()
        } else {
            root.join(file)
        };
        let parent = full.parent().map(Path::to_path_buf).unwrap_or_default();
        match &dir {
            None => dir = Some(parent),
            Some(first) if *first != parent => {
                return Err(GoliveError::MixedDirectories {
                    first: first.clone(),
                    second: parent,
                });
            }
            Some(_) => {}
        }
        normalized.push(full);
    }
    Ok(normalized)
}

/// Drop repeated entries, keeping first occurrences in order
fn dedup(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
