//! Error types for golive
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for golive operations
pub type GoliveResult<T> = Result<T, GoliveError>;

/// Main error type for golive operations
#[derive(Error, Debug)]
pub enum GoliveError {
    /// No `.go` files were named on the command line
    #[error("no go files listed")]
    NoSourceFiles,

    /// The watch root must be an absolute directory
    #[error("root directory '{path}' is not absolute")]
    RelativeRoot { path: PathBuf },

    /// Entry files span more than one directory
    #[error("named files must all be in one directory; have {first} and {second}")]
    MixedDirectories { first: PathBuf, second: PathBuf },

    /// An entry file declares a package other than `main`
    #[error("cannot run non-main package '{package}' ({file})")]
    NotEntryPackage { file: PathBuf, package: String },

    /// Import block of a source file could not be read
    #[error("failed to parse imports of {file}: {message}")]
    Parse { file: PathBuf, message: String },

    /// The toolchain could not resolve an import
    #[error("failed to resolve import '{import_path}': {message}")]
    Resolve {
        import_path: String,
        message: String,
    },

    /// An ignore pattern is not a valid regular expression
    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// A watch session thread panicked instead of returning
    #[error("watch session crashed: {message}")]
    SessionPanicked { message: String },

    /// File system notification error
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GoliveError {
    /// Whether this error stems from how golive was invoked or configured.
    ///
    /// Configuration errors are fatal at startup and never retried.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GoliveError::NoSourceFiles
                | GoliveError::RelativeRoot { .. }
                | GoliveError::MixedDirectories { .. }
                | GoliveError::NotEntryPackage { .. }
                | GoliveError::InvalidPattern { .. }
                | GoliveError::Config { .. }
        )
    }
}
