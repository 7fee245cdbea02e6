//! Package name resolution.
//!
//! Generated files must declare the same package as the code they live next
//! to. The name is either configured explicitly or inferred from the first
//! `package` declaration found in a source file of the source directory.
//! Candidates are visited in sorted path order so inference is stable.

use crate::config::PackageConfig;
use crate::error::{CliResult, ConfigError, ScanError};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Resolves the package name for a run.
#[derive(Debug)]
pub struct PackageResolver {
    /// Directory holding candidate source files.
    dir: PathBuf,

    /// Extension of candidate source files.
    extension: String,

    /// Declaration keyword.
    keyword: String,

    /// Explicit package name; skips inference.
    explicit: Option<String>,
}

impl PackageResolver {
    /// Create a resolver for the given directory and settings.
    pub fn new(dir: impl Into<PathBuf>, config: &PackageConfig) -> Self {
        Self {
            dir: dir.into(),
            extension: config.source_extension.clone(),
            keyword: config.keyword.clone(),
            explicit: config.name.clone(),
        }
    }

    /// Resolve the package name.
    pub fn resolve(&self) -> CliResult<String> {
        if let Some(name) = &self.explicit {
            tracing::debug!(package = %name, "Using configured package name");
            return Ok(name.clone());
        }

        let mut found: Option<(String, PathBuf)> = None;

        for path in self.candidates()? {
            let Some(name) = read_package_name(&path, &self.keyword) else {
                continue;
            };

            match &found {
                None => {
                    tracing::debug!(package = %name, path = %path.display(), "Found package declaration");
                    found = Some((name, path));
                }
                Some((first, first_path)) if *first != name => {
                    tracing::warn!(
                        package = %first,
                        path = %first_path.display(),
                        conflicting = %name,
                        conflicting_path = %path.display(),
                        "Source files declare different packages, using the first"
                    );
                }
                Some(_) => {}
            }
        }

        found.map(|(name, _)| name).ok_or_else(|| {
            ConfigError::PackageNotFound {
                dir: self.dir.clone(),
                keyword: self.keyword.clone(),
                extension: self.extension.clone(),
            }
            .into()
        })
    }

    /// Candidate source files in sorted order.
    fn candidates(&self) -> CliResult<Vec<PathBuf>> {
        let pattern = format!(
            "{}/*{}",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            self.extension
        );
        let entries =
            glob::glob(&pattern).map_err(|e| ScanError::invalid_pattern(&pattern, e.to_string()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(ScanError::Glob)?;
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        Ok(paths)
    }
}

/// Read the package name declared in `path`.
///
/// Returns the second field of the first line starting with `keyword` that
/// has one. Unreadable files yield `None`.
pub fn read_package_name(path: &Path, keyword: &str) -> Option<String> {
    let file = std::fs::File::open(path).ok()?;
    parse_package_name(BufReader::new(file), keyword)
}

fn parse_package_name(reader: impl BufRead, keyword: &str) -> Option<String> {
    reader
        .lines()
        .map_while(Result::ok)
        .filter(|line| line.starts_with(keyword))
        .find_map(|line| {
            let mut fields = line.split_whitespace();
            if fields.next() != Some(keyword) {
                return None;
            }
            fields.next().map(str::to_string)
        })
}
