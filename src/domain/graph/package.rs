//! Package node - one resolved package in the dependency graph

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::ports::ResolvedPackage;

/// Cache key of the synthetic entry package
pub const ENTRY_KEY: &str = "main";

/// Package name every entry file must declare
pub const ENTRY_PACKAGE: &str = "main";

/// A node in the dependency graph
///
/// Edges are cache keys, never owned references, so diamond-shaped graphs
/// share one node and removal is decided by `reference_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageNode {
    /// Package clause name
    pub name: String,
    /// Canonical import path reported by the resolver
    pub import_path: String,
    /// Absolute source directory
    pub dir: PathBuf,
    /// Most recently observed import list (deduplicated after an update)
    pub imports: Vec<String>,
    /// Keys of direct dependencies in the resolution cache
    pub dependencies: BTreeSet<String>,
    /// Parents pointing at this node beyond the first
    pub reference_count: usize,
}

impl PackageNode {
    /// Node for a package the resolver just reported
    pub fn from_resolved(package: ResolvedPackage) -> Self {
        Self {
            name: package.name,
            import_path: package.import_path,
            dir: package.dir,
            imports: package.imports,
            dependencies: BTreeSet::new(),
            reference_count: 0,
        }
    }

    /// Synthetic entry package living in `dir`
    pub fn entry(dir: PathBuf) -> Self {
        Self {
            name: ENTRY_PACKAGE.to_string(),
            import_path: ENTRY_KEY.to_string(),
            dir,
            imports: Vec::new(),
            dependencies: BTreeSet::new(),
            reference_count: 0,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_entry(&self) -> bool {
        self.import_path == ENTRY_KEY
    }

    pub fn depends_on(&self, key: &str) -> bool {
        self.dependencies.contains(key)
    }
}
