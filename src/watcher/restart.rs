//! Update-then-restart step run for every coalesced batch

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::graph::{Collector, WatchDelta};
use crate::domain::ports::{ImportResolver, SourceParser, WatchEvent, WatchEventSink};
use crate::runner::Runner;

/// Build the updater a `WatchSession` drives.
///
/// A batch that updates the graph restarts the program and hands back the
/// watch delta. A failed update emits `UpdateFailed` and leaves both the
/// subscriptions and the running program alone.
pub fn restart_on_update<R, P>(
    mut collector: Collector<R, P>,
    runner: Arc<Runner>,
    sink: Arc<dyn WatchEventSink>,
) -> impl FnMut(&[PathBuf]) -> Option<WatchDelta> + Send + 'static
where
    R: ImportResolver + Send + 'static,
    P: SourceParser + Send + 'static,
{
    move |files: &[PathBuf]| match collector.update(files) {
        Ok(delta) => {
            // spawn and kill failures surface as events
            let _ = runner.restart();
            Some(delta)
        }
        Err(err) => {
            sink.on_event(WatchEvent::UpdateFailed {
                message: err.to_string(),
            });
            None
        }
    }
}
