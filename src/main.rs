//! golive CLI - live-reload runner for Go programs
//!
//! Usage: golive [OPTIONS] gofiles... [arguments...]

mod cli;
mod commands;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use golive::domain::ports::WatchEventSink;
use golive::infrastructure::{JsonEventSink, TracingEventSink};
use golive::logger;

use crate::cli::Cli;
use crate::commands::{deps, run, Invocation};

fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init_logger(
        cli.verbose,
        cli.quiet,
        cli.no_color || !logger::should_use_colors(),
    );

    let invocation = Invocation::from_cli(&cli)?;

    if cli.print_deps {
        return deps::cmd_print_deps(&invocation);
    }

    let sink: Arc<dyn WatchEventSink> = if cli.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TracingEventSink)
    };
    run::cmd_run(invocation, sink)
}
