//! Change aggregation for watched package directories
//!
//! - Non-recursive subscriptions, one per package directory
//! - Extension and ignore-pattern filtering of raw notifications
//! - Debouncing with a re-armable deadline (500ms by default)
//! - Subscription deltas applied after each graph update
//! - `restart_on_update` ties graph updates to program restarts

mod event;
mod restart;
mod sync;

pub use event::{
    ChangeFilter, FsEvent, FsOp, WatchOptions, DEBOUNCE_MS, DEFAULT_EXTENSIONS,
    DEFAULT_IGNORE_PATTERNS,
};
pub use restart::restart_on_update;
pub use sync::{DirSubscriber, NotifySubscriber, RawEvents, WatchHandle, WatchSession};
