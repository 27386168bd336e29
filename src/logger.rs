//! Logging setup for the golive binary
//!
//! Diagnostics go to stderr through `tracing`, so the supervised program
//! keeps stdout to itself.

use is_terminal::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither flags nor `RUST_LOG` say otherwise
pub const DEFAULT_FILTER: &str = "golive=info";

/// Pick the filter directive for the given flags.
///
/// `-q` wins over `-v`; without either, `RUST_LOG` is honored when set.
pub fn filter_directive(verbosity: u8, quiet: bool) -> Option<&'static str> {
    if quiet {
        return Some("golive=error");
    }
    match verbosity {
        0 => None,
        1 => Some("golive=debug"),
        _ => Some("golive=trace"),
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called once, before anything logs.
pub fn init_logger(verbosity: u8, quiet: bool, no_color: bool) {
    let filter = match filter_directive(verbosity, quiet) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Whether stderr should get ANSI colors
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    std::io::stderr().is_terminal()
}
