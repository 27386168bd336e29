use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use golive::domain::ports::WatchEventSink;
use golive::watcher::{restart_on_update, NotifySubscriber, WatchSession};
use golive::Runner;

use super::Invocation;

/// Run the program and restart it whenever a watched package changes
pub fn cmd_run(invocation: Invocation, sink: Arc<dyn WatchEventSink>) -> Result<()> {
    let collector = invocation.collect(sink.clone())?;
    let dirs: Vec<PathBuf> = collector.watch_dirs().into_iter().collect();

    let config = &invocation.config;
    let runner = Arc::new(Runner::new(
        config.run.go.clone(),
        config.run_args(&invocation.program_args),
        sink.clone(),
    ));

    let updater = restart_on_update(collector, runner.clone(), sink.clone());

    let (subscriber, events) = NotifySubscriber::new()?;
    let session = WatchSession::start(
        &dirs,
        subscriber,
        events,
        &config.watch_options(),
        updater,
        sink,
    )
    .context("failed to watch files")?;

    {
        let handle = session.handle();
        let runner = runner.clone();
        ctrlc::set_handler(move || {
            handle.stop();
            let _ = runner.kill();
        })
        .context("failed to set Ctrl+C handler")?;
    }

    // spawn and kill failures are reported through the sink and never end the session
    let _ = runner.run();

    let result = session.wait();
    let _ = runner.kill();
    result?;
    Ok(())
}
