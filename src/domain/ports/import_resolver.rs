//! Import resolver port - the toolchain's view of a package
//!
//! Turns an import path plus the directory it was imported from into
//! package metadata. The graph engine never caches resolver output beyond
//! what the resolution cache stores.

use std::path::{Path, PathBuf};

use crate::error::GoliveResult;

/// Package metadata reported by the toolchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    /// Package clause name (`http`, `main`, ...)
    pub name: String,
    /// Canonical import path as reported by the toolchain
    pub import_path: String,
    /// Absolute source directory
    pub dir: PathBuf,
    /// Imports declared by the package's non-test files
    pub imports: Vec<String>,
    /// Part of the standard distribution (never watched, never walked)
    pub is_standard: bool,
}

/// Resolves import paths to package metadata
///
/// Implementations:
/// - `GoListResolver` - shells out to `go list -json`
/// - in-memory fakes in tests
pub trait ImportResolver {
    /// Resolve `import_path` as seen from a file in `base_dir`
    fn resolve(&self, import_path: &str, base_dir: &Path) -> GoliveResult<ResolvedPackage>;
}

impl<R: ImportResolver + ?Sized> ImportResolver for Box<R> {
    fn resolve(&self, import_path: &str, base_dir: &Path) -> GoliveResult<ResolvedPackage> {
        (**self).resolve(import_path, base_dir)
    }
}
