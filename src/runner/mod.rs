//! Supervision of the program under development
//!
//! The child runs in its own process group with inherited stdio. Killing it
//! takes down anything it spawned (`go run` compiles and execs a second
//! binary, so killing the direct child alone would leak the real program).

mod terminate;

use std::process::{Child, Command};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::domain::ports::{WatchEvent, WatchEventSink};
use crate::error::GoliveResult;

use terminate::{isolate, terminate_tree};

/// Signals a process tree given its leader's pid
type Terminator = fn(u32) -> GoliveResult<()>;

/// Owns at most one running child process
pub struct Runner {
    program: String,
    args: Vec<String>,
    child: Mutex<Option<Child>>,
    terminator: Terminator,
    sink: Arc<dyn WatchEventSink>,
}

impl Runner {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        sink: Arc<dyn WatchEventSink>,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            child: Mutex::new(None),
            terminator: terminate_tree,
            sink,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Command line as shown in events
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn lock(&self) -> MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawn the program without waiting for it.
    ///
    /// A child still held from an earlier `run` is killed first; a failed
    /// kill is reported through the sink and does not stop the spawn.
    pub fn run(&self) -> GoliveResult<u32> {
        let mut slot = self.lock();
        if let Some(previous) = slot.take() {
            let _ = self.terminate(previous);
        }

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        isolate(&mut command);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(err) => {
                self.sink.on_event(WatchEvent::ProcessError {
                    message: format!("failed to start {}: {err}", self.program),
                });
                return Err(err.into());
            }
        };

        let pid = child.id();
        *slot = Some(child);
        self.sink.on_event(WatchEvent::ProcessStarted {
            command: self.command_line(),
            pid,
        });
        Ok(pid)
    }

    /// Kill the current process tree, if any.
    ///
    /// Returns once the signal is sent; the exit is reaped in the background.
    /// The handle is released even when signalling fails, so the error is
    /// advisory: it has already been reported as a `ProcessError` event.
    pub fn kill(&self) -> GoliveResult<()> {
        let child = self.lock().take();
        match child {
            Some(child) => self.terminate(child),
            None => Ok(()),
        }
    }

    /// `kill` then `run`; the old tree may still be exiting when the new one starts
    pub fn restart(&self) -> GoliveResult<u32> {
        let _ = self.kill();
        self.run()
    }

    /// Pid of the held child, if one was started and not killed
    pub fn pid(&self) -> Option<u32> {
        self.lock().as_ref().map(Child::id)
    }

    /// Signal the whole tree, then reap the leader off-thread.
    ///
    /// The group is signalled even when the leader has already exited, since
    /// processes it started may still be running in it.
    fn terminate(&self, mut child: Child) -> GoliveResult<()> {
        let pid = child.id();
        let result = (self.terminator)(pid);

        if !matches!(child.try_wait(), Ok(Some(_))) {
            thread::spawn(move || {
                let _ = child.wait();
            });
        }

        match result {
            Ok(()) => {
                self.sink.on_event(WatchEvent::ProcessKilled { pid });
                Ok(())
            }
            Err(err) => {
                self.sink.on_event(WatchEvent::ProcessError {
                    message: format!("failed to kill process {pid}: {err}"),
                });
                Err(err)
            }
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        let _ = self.kill();
    }
}
