//! Tracing Event Sink
//!
//! Renders watch events as log lines through `tracing`; the installed
//! subscriber's filter decides which levels reach the terminal.

use tracing::{debug, error, info, warn};

use crate::domain::ports::{WatchEvent, WatchEventSink};

/// Event sink that logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl WatchEventSink for TracingEventSink {
    fn on_event(&self, event: WatchEvent) {
        match event {
            WatchEvent::GraphBuilt { packages, dirs } => {
                info!("resolved {} packages in {} directories", packages, dirs);
            }
            WatchEvent::PackageResolved { import_path, dir } => {
                debug!("resolved {} ({})", import_path, dir.display());
            }
            WatchEvent::ImportRejected { import_path, dir } => {
                debug!("ignoring {} ({})", import_path, dir.display());
            }
            WatchEvent::PackageRemoved { import_path, dir } => {
                debug!("dropped {} ({})", import_path, dir.display());
            }
            WatchEvent::UnknownDirectory { dir } => {
                warn!("unknown update for {}", dir.display());
            }
            WatchEvent::WatchStarted { dirs } => {
                info!("watching {} directories", dirs);
            }
            WatchEvent::FilesChanged { files } => {
                let files: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
                info!("change: {}", files.join(", "));
            }
            WatchEvent::Subscribed { dir } => {
                info!("watching: {}", dir.display());
            }
            WatchEvent::Unsubscribed { dir } => {
                info!("stop watching: {}", dir.display());
            }
            WatchEvent::UnsubscribeFailed { dir, message } => {
                warn!("failed to stop watching {}: {}", dir.display(), message);
            }
            WatchEvent::UpdateFailed { message } => {
                warn!("failed to update dependencies: {}", message);
            }
            WatchEvent::WatcherError { message } => {
                warn!("watcher: {}", message);
            }
            WatchEvent::ProcessStarted { command, pid } => {
                info!("running: `{}` (pid {})", command, pid);
            }
            WatchEvent::ProcessKilled { pid } => {
                debug!("killed process group of {}", pid);
            }
            WatchEvent::ProcessError { message } => {
                error!("{}", message);
            }
            WatchEvent::Shutdown => {
                info!("shutting down");
            }
        }
    }
}
