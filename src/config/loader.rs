//! Configuration discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GoliveError, GoliveResult};

use super::types::Config;

/// Project config file name, looked up in the watch root
pub const PROJECT_CONFIG_FILE: &str = "golive.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> GoliveResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

/// Parse TOML `content` as if read from `path`
pub fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> GoliveResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| GoliveError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Explicit file, then `<root>/golive.toml`, then the user config, then
/// defaults; env overrides are applied to whichever wins.
///
/// Returns the file that was loaded, if any.
pub fn discover(
    explicit: Option<&Path>,
    root: &Path,
) -> GoliveResult<(Config, Option<PathBuf>, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = root.join(PROJECT_CONFIG_FILE);
            let user = user_config_path().filter(|p| p.is_file());
            if project.is_file() {
                Some(project)
            } else {
                user
            }
        }
    };

    match candidate {
        Some(path) => {
            let (config, warnings) = load_with_warnings(&path)?;
            Ok((with_env_overrides(config), Some(path), warnings))
        }
        None => Ok((with_env_overrides(Config::default()), None, Vec::new())),
    }
}

/// Apply environment variable overrides (GOLIVE_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

pub(crate) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // GOLIVE_DEBOUNCE_MS
    if let Some(value) = var("GOLIVE_DEBOUNCE_MS") {
        match value.trim().parse() {
            Ok(ms) => config.watch.debounce_ms = ms,
            Err(_) => tracing::warn!("ignoring GOLIVE_DEBOUNCE_MS={value}: not a number"),
        }
    }

    // GOLIVE_GO
    if let Some(go) = var("GOLIVE_GO").filter(|go| !go.trim().is_empty()) {
        config.run.go = go;
    }

    // GOLIVE_IGNORE_VENDOR
    if let Some(value) = var("GOLIVE_IGNORE_VENDOR") {
        config.graph.ignore_vendor = value.to_lowercase() != "false" && value != "0";
    }

    config
}

/// `<user config dir>/golive/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("golive").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "watch",
        "debounce_ms",
        "extensions",
        "ignore",
        "graph",
        "ignore_vendor",
        "vendor_dir",
        "run",
        "go",
        "subcommand",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
