//! Watch options, raw event classification and the debounce state

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::event::{EventKind, ModifyKind};
use regex::Regex;

use crate::error::{GoliveError, GoliveResult};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 500;

/// Source file extensions watched by default
pub const DEFAULT_EXTENSIONS: &[&str] = &["go"];

/// Editor swap and backup files, matched against the file name
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    r"^\.#.*\.go$",
    r"^\..*\.go\.sw[a-p]$",
    r"\.go~$",
    r"\.tmp$",
];

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Quiet period before a batch is flushed
    pub debounce: Duration,
    /// Extensions (without dot) that count as source files
    pub extensions: Vec<String>,
    /// File name regexes to ignore
    pub ignore_patterns: Vec<String>,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignore_patterns: DEFAULT_IGNORE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl WatchOptions {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

/// What happened to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Create,
    Write,
    Remove,
    Rename,
    Chmod,
    Other,
}

impl From<&EventKind> for FsOp {
    fn from(kind: &EventKind) -> Self {
        match kind {
            EventKind::Create(_) => FsOp::Create,
            EventKind::Modify(ModifyKind::Metadata(_)) => FsOp::Chmod,
            EventKind::Modify(ModifyKind::Name(_)) => FsOp::Rename,
            // backends that cannot tell what changed report Any
            EventKind::Modify(_) | EventKind::Any => FsOp::Write,
            EventKind::Remove(_) => FsOp::Remove,
            _ => FsOp::Other,
        }
    }
}

/// One path touched by a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    pub path: PathBuf,
    pub op: FsOp,
}

impl FsEvent {
    pub fn new(path: impl Into<PathBuf>, op: FsOp) -> Self {
        Self {
            path: path.into(),
            op,
        }
    }

    /// Split a notify event into one `FsEvent` per path
    pub fn from_notify(event: notify::Event) -> Vec<FsEvent> {
        let op = FsOp::from(&event.kind);
        event
            .paths
            .into_iter()
            .map(|path| FsEvent { path, op })
            .collect()
    }

    /// Creation and permission changes say nothing about content
    pub fn has_content_change(&self) -> bool {
        !matches!(self.op, FsOp::Create | FsOp::Chmod | FsOp::Other)
    }
}

/// Discards events that cannot change the program
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    extensions: Vec<String>,
    ignore: Vec<Regex>,
}

impl ChangeFilter {
    pub fn new(extensions: &[String], ignore_patterns: &[String]) -> GoliveResult<Self> {
        let ignore = ignore_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| GoliveError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<GoliveResult<Vec<_>>>()?;

        Ok(Self {
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            ignore,
        })
    }

    pub fn from_options(options: &WatchOptions) -> GoliveResult<Self> {
        Self::new(&options.extensions, &options.ignore_patterns)
    }

    pub fn accepts(&self, event: &FsEvent) -> bool {
        event.has_content_change() && self.is_source(&event.path) && !self.is_ignored(&event.path)
    }

    fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return true;
        };
        self.ignore.iter().any(|re| re.is_match(name))
    }
}

/// Pending changes plus a single re-armable deadline
pub(crate) struct PendingBatch {
    pub(crate) pending_changes: Vec<PathBuf>,
    pub(crate) deadline: Option<Instant>,
    delay: Duration,
}

impl PendingBatch {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            pending_changes: Vec::new(),
            deadline: None,
            delay,
        }
    }

    /// Queue a path and push the deadline out by a full delay.
    ///
    /// A path equal to the last queued one is not queued again.
    pub(crate) fn add_change(&mut self, path: PathBuf, now: Instant) {
        if self.pending_changes.last() != Some(&path) {
            self.pending_changes.push(path);
        }
        self.deadline = Some(now + self.delay);
    }

    pub(crate) fn should_flush(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Drain the batch, deduplicated in first-seen order, and disarm the timer
    pub(crate) fn take_changes(&mut self) -> Vec<PathBuf> {
        self.deadline = None;
        let mut seen = HashSet::new();
        self.pending_changes
            .drain(..)
            .filter(|path| seen.insert(path.clone()))
            .collect()
    }
}
