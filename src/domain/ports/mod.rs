//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod import_resolver;
pub mod source_parser;
pub mod watch_events;

pub use import_resolver::{ImportResolver, ResolvedPackage};
pub use source_parser::{SourceImports, SourceParser};
pub use watch_events::{NoopEventSink, WatchEvent, WatchEventSink};
