//! Command handlers for the golive binary

pub mod deps;
pub mod run;

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use golive::config::Config;
use golive::domain::ports::WatchEventSink;
use golive::infrastructure::{GoListResolver, GoSourceParser};
use golive::{Collector, GoliveError};

use crate::cli::Cli;

pub type GoCollector = Collector<GoListResolver, GoSourceParser>;

/// Everything resolved from the command line, environment and config files
pub struct Invocation {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
    pub program_args: Vec<String>,
    pub config: Config,
}

impl Invocation {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let root = match &cli.entry {
            Some(dir) => absolutize(&cwd, dir),
            None => cwd.clone(),
        };
        let files: Vec<PathBuf> = cli
            .source_files()
            .iter()
            .map(|file| absolutize(&cwd, file))
            .collect();
        if files.is_empty() {
            return Err(GoliveError::NoSourceFiles.into());
        }

        let (mut config, source, warnings) = Config::discover(cli.config.as_deref(), &root)?;
        if let Some(source) = &source {
            debug!("loaded configuration from {}", source.display());
        }
        for warning in &warnings {
            let location = match warning.line {
                Some(line) => format!("{}:{}", warning.file.display(), line),
                None => warning.file.display().to_string(),
            };
            match &warning.suggestion {
                Some(suggestion) => warn!(
                    "unknown config key '{}' at {} (did you mean '{}'?)",
                    warning.key, location, suggestion
                ),
                None => warn!("unknown config key '{}' at {}", warning.key, location),
            }
        }

        if let Some(delay) = cli.delay {
            config.watch.debounce_ms = delay;
        }
        if let Some(ignore_vendor) = cli.ignore_vendor {
            config.graph.ignore_vendor = ignore_vendor;
        }

        Ok(Self {
            root,
            files,
            program_args: cli.args.clone(),
            config,
        })
    }

    /// Build the initial dependency graph
    pub fn collect(&self, sink: Arc<dyn WatchEventSink>) -> Result<GoCollector> {
        Collector::new(
            self.root.clone(),
            &self.files,
            &self.config.collect_options(),
            GoListResolver::new(self.config.run.go.clone()),
            GoSourceParser,
            sink,
        )
        .with_context(|| {
            let files: Vec<String> = self.files.iter().map(|f| f.display().to_string()).collect();
            format!("failed to collect dependencies for {}", files.join(" "))
        })
    }
}

/// Make `path` absolute against `base` and drop `.`/`..` lexically
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
