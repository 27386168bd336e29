//! Package filter - decides which resolved packages become watched nodes

use std::path::{Path, PathBuf};

use crate::domain::ports::ResolvedPackage;

/// One exclusion rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterRule {
    /// Drop packages vendored under a directory with this name.
    ///
    /// Only a whole segment of the import path's parent matches, so a
    /// package under `x/vendored/y` is kept.
    SkipVendor(String),
    /// Drop packages whose directory is not below this root
    WithinRoot(PathBuf),
}

impl FilterRule {
    fn accepts(&self, package: &ResolvedPackage) -> bool {
        match self {
            FilterRule::SkipVendor(marker) => !is_vendored(&package.import_path, marker),
            FilterRule::WithinRoot(root) => package.dir.starts_with(root),
        }
    }
}

/// Conjunction of filter rules
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    rules: Vec<FilterRule>,
}

impl PackageFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard filter for a run rooted at `root`
    pub fn for_root(root: &Path, ignore_vendor: bool, vendor_dir: &str) -> Self {
        let filter = Self::new();
        let filter = if ignore_vendor {
            filter.with_rule(FilterRule::SkipVendor(vendor_dir.to_string()))
        } else {
            filter
        };
        filter.with_rule(FilterRule::WithinRoot(root.to_path_buf()))
    }

    pub fn with_rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// True when every rule accepts the package.
    ///
    /// Standard library packages are never accepted regardless of rules.
    pub fn accepts(&self, package: &ResolvedPackage) -> bool {
        !package.is_standard && self.rules.iter().all(|rule| rule.accepts(package))
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }
}

/// Any component of the import path's parent equals the vendor marker.
fn is_vendored(import_path: &str, marker: &str) -> bool {
    match import_path.rsplit_once('/') {
        Some((parent, _)) => parent.split('/').any(|segment| segment == marker),
        None => false,
    }
}
