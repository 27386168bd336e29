//! Event Sink Implementations
//!
//! Provides concrete implementations of WatchEventSink:
//! - TracingEventSink: human-readable log lines
//! - JsonEventSink: NDJSON output for tooling

mod console;
mod json;

pub use console::TracingEventSink;
pub use json::JsonEventSink;
