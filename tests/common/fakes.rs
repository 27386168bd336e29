//! In-memory collaborators

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use golive::domain::ports::{ImportResolver, ResolvedPackage, WatchEvent, WatchEventSink};
use golive::{GoliveError, GoliveResult};

/// `go list` replacement: import path → package, directories under `root`
#[derive(Clone)]
pub struct MapResolver {
    root: PathBuf,
    packages: Arc<Mutex<HashMap<String, ResolvedPackage>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MapResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            packages: Arc::default(),
            calls: Arc::default(),
        }
    }

    /// Register a package living in `<root>/<rel_dir>`
    pub fn add(&self, import_path: &str, rel_dir: &str, imports: &[&str]) -> PathBuf {
        let dir = self.root.join(rel_dir);
        self.add_at(import_path, dir.clone(), imports);
        dir
    }

    /// Register a package at an arbitrary absolute directory
    pub fn add_at(&self, import_path: &str, dir: PathBuf, imports: &[&str]) {
        let name = import_path
            .rsplit('/')
            .next()
            .unwrap_or(import_path)
            .to_string();
        self.packages.lock().unwrap().insert(
            import_path.to_string(),
            ResolvedPackage {
                name,
                import_path: import_path.to_string(),
                dir,
                imports: imports.iter().map(|s| s.to_string()).collect(),
                is_standard: false,
            },
        );
    }

    pub fn add_std(&self, import_path: &str) {
        self.packages.lock().unwrap().insert(
            import_path.to_string(),
            ResolvedPackage {
                name: import_path.to_string(),
                import_path: import_path.to_string(),
                dir: PathBuf::from("/usr/local/go/src").join(import_path),
                imports: Vec::new(),
                is_standard: true,
            },
        );
    }

    pub fn set_imports(&self, import_path: &str, imports: &[&str]) {
        let mut packages = self.packages.lock().unwrap();
        if let Some(package) = packages.get_mut(import_path) {
            package.imports = imports.iter().map(|s| s.to_string()).collect();
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ImportResolver for MapResolver {
    fn resolve(&self, import_path: &str, _base_dir: &Path) -> GoliveResult<ResolvedPackage> {
        self.calls.lock().unwrap().push(import_path.to_string());
        self.packages
            .lock()
            .unwrap()
            .get(import_path)
            .cloned()
            .ok_or_else(|| GoliveError::Resolve {
                import_path: import_path.to_string(),
                message: format!("cannot find package \"{import_path}\""),
            })
    }
}

/// Captures every event for later inspection
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<WatchEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<WatchEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&WatchEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl WatchEventSink for RecordingSink {
    fn on_event(&self, event: WatchEvent) {
        self.events.lock().unwrap().push(event);
    }
}
