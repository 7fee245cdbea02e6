//! # goenum-cli
//!
//! CLI library for generating Go enum source files from plain-text enum
//! descriptions and a template.
//!
//! Every `*.goenum` file in the input directory describes one enum, one member
//! per line. Each file is rendered through the same template into
//! `enum<lowercase type name>.go`.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`scanner`] - Specification file discovery
//! - [`package`] - Go package name resolution
//! - [`parser`] - Specification parsing into enum members
//! - [`context`] - Render context construction
//! - [`renderer`] - Template compilation and rendering
//! - [`generator`] - The per-file generation pipeline
//! - [`writer`] - File output and dry-run support
//! - [`error`] - Error types and handling

pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod package;
pub mod parser;
pub mod renderer;
pub mod scanner;
pub mod writer;

// Re-export main types for convenience
pub use config::{Config, ConfigManager};
pub use context::RenderContext;
pub use error::{CliError, CliResult};
pub use generator::{GenerationReport, Generator, OutputNaming};
pub use package::PackageResolver;
pub use parser::{BlankLines, EnumMember, EnumSpec, SpecParser};
pub use renderer::TemplateRenderer;
pub use scanner::SpecScanner;
pub use writer::FileWriter;
