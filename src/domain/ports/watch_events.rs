//! Watch Event Port
//!
//! Every component reports what it is doing through an injected
//! `WatchEventSink` instead of a process-wide verbose switch.

use std::path::PathBuf;

use serde::Serialize;

/// Event emitted by the graph engine, the watcher or the runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Initial dependency graph built
    GraphBuilt { packages: usize, dirs: usize },

    /// Import resolved to a new package node
    PackageResolved { import_path: String, dir: PathBuf },

    /// Import excluded by the filter or part of the standard library
    ImportRejected { import_path: String, dir: PathBuf },

    /// Package dropped from the graph
    PackageRemoved { import_path: String, dir: PathBuf },

    /// Change in a directory no known package lives in
    UnknownDirectory { dir: PathBuf },

    /// Watch session started with the initial subscriptions
    WatchStarted { dirs: usize },

    /// Coalesced batch of changed files
    FilesChanged { files: Vec<PathBuf> },

    /// Directory subscribed
    Subscribed { dir: PathBuf },

    /// Directory unsubscribed
    Unsubscribed { dir: PathBuf },

    /// Unsubscribing failed (ignored)
    UnsubscribeFailed { dir: PathBuf, message: String },

    /// Graph update aborted; previous graph kept
    UpdateFailed { message: String },

    /// Error reported by the notification backend
    WatcherError { message: String },

    /// Program started
    ProcessStarted { command: String, pid: u32 },

    /// Program's process group terminated
    ProcessKilled { pid: u32 },

    /// Spawn or kill failed
    ProcessError { message: String },

    /// Watch session stopped
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Trait for receiving watch events
///
/// Implementations:
/// - `TracingEventSink`: human-readable log lines
/// - `JsonEventSink`: NDJSON event stream
/// - `NoopEventSink`: silent operation
pub trait WatchEventSink: Send + Sync {
    /// Handle an event
    fn on_event(&self, event: WatchEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl WatchEventSink for NoopEventSink {
    fn on_event(&self, _event: WatchEvent) {}
}
