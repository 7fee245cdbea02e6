//! Specification file discovery.
//!
//! Specification files live directly in the input directory and share one
//! extension. Discovery is not recursive; results are sorted by path.

use crate::error::{CliResult, ScanError};
use std::path::PathBuf;

/// Scanner for discovering specification files.
#[derive(Debug)]
pub struct SpecScanner {
    /// Directory to scan.
    root: PathBuf,

    /// Specification extension, including the dot.
    extension: String,
}

impl SpecScanner {
    /// Create a new scanner for the given directory and extension.
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Glob pattern matching specification files.
    pub fn pattern(&self) -> String {
        format!(
            "{}/*{}",
            glob::Pattern::escape(&self.root.to_string_lossy()),
            glob::Pattern::escape(&self.extension)
        )
    }

    /// Scan the directory and return all specification files.
    ///
    /// A directory without specification files is not an error.
    pub fn scan(&self) -> CliResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(ScanError::not_found(self.root.clone()).into());
        }

        let pattern = self.pattern();
        let entries =
            glob::glob(&pattern).map_err(|e| ScanError::invalid_pattern(&pattern, e.to_string()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(ScanError::Glob)?;

            // Skip directories that happen to match
            if !path.is_file() {
                continue;
            }

            files.push(path);
        }
        files.sort();

        tracing::debug!(
            root = %self.root.display(),
            count = files.len(),
            "Discovered specification files"
        );

        Ok(files)
    }
}
