//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `go_list` - Import resolver backed by the Go toolchain
//! - `go_source` - Imports-only Go source parser
//! - `events/` - Event sinks (tracing, NDJSON)

pub mod events;
pub mod go_list;
pub mod go_source;

// Re-export for convenience
pub use events::{JsonEventSink, TracingEventSink};
pub use go_list::GoListResolver;
pub use go_source::{parse_imports_str, GoSourceParser};
