//! Domain Layer
//!
//! The dependency graph engine and the ports it talks through.
//!
//! ## Structure
//!
//! - `graph/` - Resolution cache, package nodes, filter and collector
//! - `ports/` - Interface definitions for infrastructure (resolver, parser, event sink)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or toolchain directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod graph;
pub mod ports;
