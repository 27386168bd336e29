//! Watch session: live subscriptions, event draining and debounced flushing

use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::graph::WatchDelta;
use crate::domain::ports::{WatchEvent, WatchEventSink};
use crate::error::{GoliveError, GoliveResult};

use super::event::{ChangeFilter, FsEvent, PendingBatch, WatchOptions};

/// How often the drain thread checks whether it should stop
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Raw notification stream as delivered by `notify`
pub type RawEvents = Receiver<notify::Result<Event>>;

/// Per-directory subscriptions to file system notifications
pub trait DirSubscriber: Send {
    fn subscribe(&mut self, dir: &Path) -> GoliveResult<()>;
    fn unsubscribe(&mut self, dir: &Path) -> GoliveResult<()>;
}

/// `DirSubscriber` backed by the platform's recommended notify watcher
pub struct NotifySubscriber {
    watcher: RecommendedWatcher,
}

impl NotifySubscriber {
    /// Create the watcher and the channel its events arrive on
    pub fn new() -> GoliveResult<(Self, RawEvents)> {
        let (tx, rx) = channel();
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        Ok((Self { watcher }, rx))
    }
}

impl DirSubscriber for NotifySubscriber {
    fn subscribe(&mut self, dir: &Path) -> GoliveResult<()> {
        self.watcher.watch(dir, RecursiveMode::NonRecursive)?;
        Ok(())
    }

    fn unsubscribe(&mut self, dir: &Path) -> GoliveResult<()> {
        self.watcher.unwatch(dir)?;
        Ok(())
    }
}

struct Shared {
    batch: Mutex<PendingBatch>,
    wake: Condvar,
    running: AtomicBool,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, PendingBatch> {
        self.batch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn add_change(&self, path: PathBuf) {
        self.lock().add_change(path, Instant::now());
        self.wake.notify_all();
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        let _guard = self.lock();
        self.wake.notify_all();
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Block until the deadline passes with no new change, then drain.
    ///
    /// Returns `None` once the session is stopped.
    fn wait_for_batch(&self) -> Option<Vec<PathBuf>> {
        let mut batch = self.lock();
        loop {
            if !self.is_running() {
                return None;
            }
            let now = Instant::now();
            if batch.should_flush(now) {
                return Some(batch.take_changes());
            }
            batch = match batch.deadline {
                Some(deadline) => {
                    self.wake
                        .wait_timeout(batch, deadline.saturating_duration_since(now))
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
                None => self.wake.wait(batch).unwrap_or_else(PoisonError::into_inner),
            };
        }
    }
}

/// Cloneable handle used to stop a running session
#[derive(Clone)]
pub struct WatchHandle {
    shared: Arc<Shared>,
}

impl WatchHandle {
    pub fn stop(&self) {
        self.shared.stop();
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }
}

/// A running watch session
///
/// The drain thread filters raw events into the pending batch; the flush
/// thread owns the subscriber and the updater, so graph updates never run
/// concurrently with each other.
pub struct WatchSession {
    handle: WatchHandle,
    drain: Option<JoinHandle<()>>,
    flush: Option<JoinHandle<GoliveResult<()>>>,
}

impl WatchSession {
    /// Subscribe to `initial_dirs` and start the background threads.
    ///
    /// `updater` receives every coalesced batch and returns the watch delta
    /// to apply, or `None` when the update failed and nothing should change.
    pub fn start<S, U>(
        initial_dirs: &[PathBuf],
        mut subscriber: S,
        events: RawEvents,
        options: &WatchOptions,
        updater: U,
        sink: Arc<dyn WatchEventSink>,
    ) -> GoliveResult<Self>
    where
        S: DirSubscriber + 'static,
        U: FnMut(&[PathBuf]) -> Option<WatchDelta> + Send + 'static,
    {
        let filter = ChangeFilter::from_options(options)?;

        for dir in initial_dirs {
            subscriber.subscribe(dir)?;
            sink.on_event(WatchEvent::Subscribed { dir: dir.clone() });
        }
        sink.on_event(WatchEvent::WatchStarted {
            dirs: initial_dirs.len(),
        });

        let shared = Arc::new(Shared {
            batch: Mutex::new(PendingBatch::new(options.debounce)),
            wake: Condvar::new(),
            running: AtomicBool::new(true),
        });

        let drain = {
            let shared = shared.clone();
            let sink = sink.clone();
            thread::spawn(move || drain_events(events, filter, &shared, sink.as_ref()))
        };
        let flush = {
            let shared = shared.clone();
            thread::spawn(move || flush_batches(subscriber, updater, &shared, sink.as_ref()))
        };

        Ok(Self {
            handle: WatchHandle { shared },
            drain: Some(drain),
            flush: Some(flush),
        })
    }

    pub fn handle(&self) -> WatchHandle {
        self.handle.clone()
    }

    /// Block until the session stops; returns the error that ended it, if any
    pub fn wait(mut self) -> GoliveResult<()> {
        self.join()
    }

    fn join(&mut self) -> GoliveResult<()> {
        let result = match self.flush.take() {
            Some(flush) => flush.join().unwrap_or_else(|payload| {
                Err(GoliveError::SessionPanicked {
                    message: panic_message(payload.as_ref()),
                })
            }),
            None => Ok(()),
        };
        // flush exits first and stops the session on its way out
        self.handle.stop();
        if let Some(drain) = self.drain.take() {
            let _ = drain.join();
        }
        result
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.handle.stop();
        let _ = self.join();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn drain_events(
    events: RawEvents,
    filter: ChangeFilter,
    shared: &Shared,
    sink: &dyn WatchEventSink,
) {
    while shared.is_running() {
        match events.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(event)) => {
                for change in FsEvent::from_notify(event) {
                    if filter.accepts(&change) {
                        shared.add_change(change.path);
                    }
                }
            }
            Ok(Err(err)) => sink.on_event(WatchEvent::WatcherError {
                message: err.to_string(),
            }),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn flush_batches<S, U>(
    mut subscriber: S,
    mut updater: U,
    shared: &Shared,
    sink: &dyn WatchEventSink,
) -> GoliveResult<()>
where
    S: DirSubscriber,
    U: FnMut(&[PathBuf]) -> Option<WatchDelta>,
{
    let result = loop {
        let Some(files) = shared.wait_for_batch() else {
            break Ok(());
        };
        if files.is_empty() {
            continue;
        }

        sink.on_event(WatchEvent::FilesChanged {
            files: files.clone(),
        });
        if let Some(delta) = updater(&files) {
            if let Err(err) = apply_delta(&mut subscriber, &delta, sink) {
                break Err(err);
            }
        }
    };

    shared.stop();
    sink.on_event(WatchEvent::Shutdown);
    result
}

/// Subscribe added directories (fatal on failure), unsubscribe removed ones
/// (failures only reported).
pub(crate) fn apply_delta<S: DirSubscriber + ?Sized>(
    subscriber: &mut S,
    delta: &WatchDelta,
    sink: &dyn WatchEventSink,
) -> GoliveResult<()> {
    for dir in &delta.added {
        subscriber.subscribe(dir)?;
        sink.on_event(WatchEvent::Subscribed { dir: dir.clone() });
    }

    for dir in &delta.removed {
        match subscriber.unsubscribe(dir) {
            Ok(()) => sink.on_event(WatchEvent::Unsubscribed { dir: dir.clone() }),
            Err(err) => sink.on_event(WatchEvent::UnsubscribeFailed {
                dir: dir.clone(),
                message: err.to_string(),
            }),
        }
    }

    Ok(())
}
