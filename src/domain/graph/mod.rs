//! Dependency graph engine
//!
//! - `ResolutionCache` - arena of package nodes plus rejected and directory indexes
//! - `PackageNode` - a resolved package and its outgoing edges
//! - `PackageFilter` - which packages are worth watching
//! - `Collector` - initial build and incremental updates

mod cache;
mod collector;
mod filter;
mod package;


pub use cache::ResolutionCache;
pub use collector::{CollectOptions, Collector, WatchDelta};
pub use filter::{FilterRule, PackageFilter};
pub use package::{PackageNode, ENTRY_KEY, ENTRY_PACKAGE};
