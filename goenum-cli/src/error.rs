//! Error types for the CLI.
//!
//! Errors are grouped by pipeline stage. Setup failures (configuration,
//! package resolution, template loading) abort a run; everything raised while
//! processing a single specification file is contained to that file.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error during specification file discovery.
    #[error("Failed to scan directory: {0}")]
    Scan(#[from] ScanError),

    /// Error reading a specification file.
    #[error("Failed to parse specification: {0}")]
    Parse(#[from] ParseError),

    /// Error building a render context.
    #[error("Failed to build render context: {0}")]
    Context(#[from] ContextError),

    /// Error compiling or rendering the template.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Error preparing a generation run.
    #[error("Failed to generate: {0}")]
    Generate(#[from] GenerateError),

    /// Error loading configuration or resolving the package name.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Refusing to overwrite an existing file without `--force`.
    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    /// Validation failed (generated files out of date).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during specification file discovery.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Directory does not exist.
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Invalid glob pattern built from the configured directory and extension.
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Error while iterating glob results.
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Error reading a specification file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// IO error reading file.
    #[error("Failed to read {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File name has no usable base name.
    #[error("Cannot derive a type name from {file}")]
    InvalidFileName { file: PathBuf },
}

/// Error building a render context from a parsed specification.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The specification produced no members.
    #[error("Empty member list for enum '{type_name}'")]
    EmptyMembers { type_name: String },
}

/// Error from the template engine.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template source failed to compile.
    #[error("Template parse error: {message}")]
    Compile { message: String },

    /// Rendering a context failed.
    #[error("Template render error for '{type_name}': {message}")]
    Render { type_name: String, message: String },
}

/// Error preparing a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Template file missing or unreadable.
    #[error("Failed to load template {path}: {source}")]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No candidate source file declares a package.
    #[error("Package name not found in {dir} (no '{keyword}' declaration in *{extension} files)")]
    PackageNotFound {
        dir: PathBuf,
        keyword: String,
        extension: String,
    },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to move the temporary file into place.
    #[error("Failed to persist file {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another specification already produced this output in the same run.
    #[error("Output {path} was already generated from {first}")]
    OutputCollision { path: PathBuf, first: PathBuf },
}

impl ScanError {
    /// Create a directory not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::DirectoryNotFound { path }
    }

    /// Create an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl TemplateError {
    /// Create a compile error from an engine diagnostic.
    pub fn compile(message: impl Into<String>) -> Self {
        Self::Compile {
            message: message.into(),
        }
    }

    /// Create a render error for the given enum type.
    pub fn render(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
