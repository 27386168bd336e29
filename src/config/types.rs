//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::graph::CollectOptions;
use crate::error::GoliveResult;
use crate::watcher::{WatchOptions, DEBOUNCE_MS, DEFAULT_EXTENSIONS, DEFAULT_IGNORE_PATTERNS};

use super::loader::{self, ConfigWarning};

/// Change aggregation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period in milliseconds before a batch of changes is processed
    pub debounce_ms: u64,
    /// Source file extensions that trigger a rebuild
    pub extensions: Vec<String>,
    /// File name regexes to ignore (editor swap and backup files)
    pub ignore: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignore: DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Dependency graph settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub ignore_vendor: bool,
    pub vendor_dir: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            ignore_vendor: true,
            vendor_dir: "vendor".to_string(),
        }
    }
}

/// How the program is started
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Go toolchain binary, used for both `go list` and running the program
    pub go: String,
    /// Toolchain arguments placed before the user's arguments
    pub subcommand: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            go: "go".to_string(),
            subcommand: vec!["run".to_string()],
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub watch: WatchConfig,
    pub graph: GraphConfig,
    pub run: RunConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> GoliveResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> GoliveResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Discover and load the config for `root`, then apply env overrides
    pub fn discover(
        explicit: Option<&Path>,
        root: &Path,
    ) -> GoliveResult<(Self, Option<PathBuf>, Vec<ConfigWarning>)> {
        loader::discover(explicit, root)
    }

    /// Apply environment variable overrides (GOLIVE_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            debounce: Duration::from_millis(self.watch.debounce_ms),
            extensions: self.watch.extensions.clone(),
            ignore_patterns: self.watch.ignore.clone(),
        }
    }

    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            ignore_vendor: self.graph.ignore_vendor,
            vendor_dir: self.graph.vendor_dir.clone(),
        }
    }

    /// Arguments passed to the toolchain binary to start the program
    pub fn run_args(&self, user_args: &[String]) -> Vec<String> {
        self.run
            .subcommand
            .iter()
            .chain(user_args)
            .cloned()
            .collect()
    }
}
