//! Import resolver backed by `go list -json`

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use crate::domain::ports::{ImportResolver, ResolvedPackage};
use crate::error::{GoliveError, GoliveResult};

/// Subset of the `go list -json` package object we rely on
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GoListPackage {
    #[serde(default)]
    name: String,
    import_path: String,
    #[serde(default)]
    dir: PathBuf,
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    goroot: bool,
    #[serde(default)]
    standard: bool,
}

impl From<GoListPackage> for ResolvedPackage {
    fn from(package: GoListPackage) -> Self {
        Self {
            name: package.name,
            import_path: package.import_path,
            dir: package.dir,
            imports: package.imports,
            is_standard: package.goroot || package.standard,
        }
    }
}

/// Resolves imports by asking the Go toolchain
#[derive(Debug, Clone)]
pub struct GoListResolver {
    go: String,
}

impl GoListResolver {
    /// `go` is the toolchain binary, usually just `"go"`
    pub fn new(go: impl Into<String>) -> Self {
        Self { go: go.into() }
    }

    pub fn go(&self) -> &str {
        &self.go
    }
}

impl Default for GoListResolver {
    fn default() -> Self {
        Self::new("go")
    }
}

impl ImportResolver for GoListResolver {
    fn resolve(&self, import_path: &str, base_dir: &Path) -> GoliveResult<ResolvedPackage> {
        let output = Command::new(&self.go)
            .args(["list", "-json", import_path])
            .current_dir(base_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| GoliveError::Resolve {
                import_path: import_path.to_string(),
                message: format!("failed to run {}: {}", self.go, e),
            })?;

        if !output.status.success() {
            return Err(GoliveError::Resolve {
                import_path: import_path.to_string(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_go_list(import_path, &output.stdout)
    }
}

fn parse_go_list(import_path: &str, stdout: &[u8]) -> GoliveResult<ResolvedPackage> {
    serde_json::from_slice::<GoListPackage>(stdout)
        .map(ResolvedPackage::from)
        .map_err(|e| GoliveError::Resolve {
            import_path: import_path.to_string(),
            message: format!("unexpected go list output: {}", e),
        })
}
