//! Configuration for golive
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (GOLIVE_*)
//! 3. `--config <file>`, else `<root>/golive.toml`, else the user config
//!    (`~/.config/golive/config.toml` on Linux)
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{parse_with_warnings, user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{Config, GraphConfig, RunConfig, WatchConfig};
