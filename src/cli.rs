use std::path::PathBuf;

use clap::Parser;

/// golive - restart a Go program whenever a package it imports changes
#[derive(Parser, Debug)]
#[command(name = "golive")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Everything from the first .go file on is passed to `go run` unchanged.\nExample: golive -e . main.go -port=8080"
)]
pub struct Cli {
    /// Root directory; packages outside it are not watched [default: current directory]
    #[arg(short, long, value_name = "DIR")]
    pub entry: Option<PathBuf>,

    /// Skip vendored packages (true/false)
    #[arg(long, value_name = "BOOL")]
    pub ignore_vendor: Option<bool>,

    /// Print the directories that would be watched and exit
    #[arg(long)]
    pub print_deps: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Emit watch events as NDJSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file [default: <entry>/golive.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debounce delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay: Option<u64>,

    /// Go files of the main package, followed by program arguments
    #[arg(
        value_name = "GOFILES_AND_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// Arguments naming Go source files
    pub fn source_files(&self) -> Vec<PathBuf> {
        self.args
            .iter()
            .filter(|arg| arg.ends_with(".go"))
            .map(PathBuf::from)
            .collect()
    }
}
