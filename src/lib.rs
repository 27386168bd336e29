//! golive - live-reload runner for Go programs
//!
//! golive resolves the packages a Go program imports, watches only their
//! directories, and restarts the program when one of their source files
//! changes. Standard-library, vendored and out-of-tree packages are never
//! watched.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod runner;
pub mod watcher;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use domain::graph::{CollectOptions, Collector, PackageNode, ResolutionCache, WatchDelta};
pub use domain::ports::{WatchEvent, WatchEventSink};
pub use error::{GoliveError, GoliveResult};
pub use runner::Runner;
pub use watcher::{WatchHandle, WatchOptions, WatchSession};
