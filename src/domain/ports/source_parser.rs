//! Source parser port - reads the package clause and import block of one file

use std::path::Path;

use crate::error::GoliveResult;

/// Package clause and imports of a single source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceImports {
    /// Declared package name
    pub package: String,
    /// Import paths in declaration order (duplicates preserved)
    pub imports: Vec<String>,
}

/// Extracts imports from a source file without type-checking it
pub trait SourceParser {
    /// Parse only as much of `file` as needed to read its imports
    fn parse_imports(&self, file: &Path) -> GoliveResult<SourceImports>;
}

impl<P: SourceParser + ?Sized> SourceParser for Box<P> {
    fn parse_imports(&self, file: &Path) -> GoliveResult<SourceImports> {
        (**self).parse_imports(file)
    }
}
