use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use golive::infrastructure::TracingEventSink;

use super::Invocation;

/// Print the initial watch set, one directory per line
pub fn cmd_print_deps(invocation: &Invocation) -> Result<()> {
    // stdout carries only the directory list
    let collector = invocation.collect(Arc::new(TracingEventSink))?;

    for package in collector.dependencies() {
        debug!("{} -> {}", package.import_path, package.dir.display());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for dir in collector.watch_dirs() {
        writeln!(out, "{}", dir.display())?;
    }
    out.flush()?;
    Ok(())
}
