//! Resolution cache - the arena holding every package node
//!
//! Three indexes over the graph: resolved imports, rejected imports and
//! directory → package. No operation performs I/O.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::package::PackageNode;

/// Process-lifetime graph state owned by one collector
#[derive(Debug, Clone, Default)]
pub struct ResolutionCache {
    /// import path → node
    resolved: HashMap<String, PackageNode>,
    /// import path → directory of an excluded package
    rejected: HashMap<String, PathBuf>,
    /// directory → key of the node whose re-resolution a change there triggers
    dir_index: HashMap<PathBuf, String>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a resolved node.
    ///
    /// The directory index keeps its first writer: a later package in an
    /// already indexed directory does not take the entry over.
    pub fn resolve(&mut self, import_path: &str, node: PackageNode) {
        self.dir_index
            .entry(node.dir.clone())
            .or_insert_with(|| import_path.to_string());
        self.resolved.insert(import_path.to_string(), node);
    }

    pub fn is_resolved(&self, import_path: &str) -> bool {
        self.resolved.contains_key(import_path)
    }

    pub fn get(&self, import_path: &str) -> Option<&PackageNode> {
        self.resolved.get(import_path)
    }

    pub fn get_mut(&mut self, import_path: &str) -> Option<&mut PackageNode> {
        self.resolved.get_mut(import_path)
    }

    pub fn reject(&mut self, import_path: &str, dir: PathBuf) {
        self.rejected.insert(import_path.to_string(), dir);
    }

    pub fn is_rejected(&self, import_path: &str) -> bool {
        self.rejected.contains_key(import_path)
    }

    /// Remove a node and the directory index entry pointing at it.
    pub fn remove(&mut self, import_path: &str) -> Option<PackageNode> {
        let node = self.resolved.remove(import_path)?;
        if self
            .dir_index
            .get(&node.dir)
            .is_some_and(|owner| owner == import_path)
        {
            self.dir_index.remove(&node.dir);
        }
        Some(node)
    }

    /// Key and node of the package indexed under `dir`
    pub fn lookup_by_dir(&self, dir: &Path) -> Option<(&str, &PackageNode)> {
        let key = self.dir_index.get(dir)?;
        self.resolved.get(key).map(|node| (key.as_str(), node))
    }

    /// Every indexed directory, i.e. the watch set
    pub fn dirs(&self) -> impl Iterator<Item = &Path> {
        self.dir_index.keys().map(PathBuf::as_path)
    }

    pub fn packages(&self) -> impl Iterator<Item = (&str, &PackageNode)> {
        self.resolved.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    pub fn rejected_len(&self) -> usize {
        self.rejected.len()
    }
}
