//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `goenum.toml` files
//! and merging with command-line arguments. Every path in the configuration
//! is relative to the source root the generator runs in.

use crate::error::{CliResult, ConfigError};
use crate::parser::BlankLines;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "goenum.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Specification and template input.
    pub input: InputConfig,

    /// Generated file naming and location.
    pub output: OutputConfig,

    /// Package name resolution.
    pub package: PackageConfig,

    /// Specification parsing.
    pub parser: ParserConfig,
}

/// Input configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory holding the template and specification files.
    pub dir: PathBuf,

    /// Extension shared by specification files, including the dot.
    pub extension: String,

    /// Template file name inside `dir`.
    pub template: String,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory generated files are written to.
    pub dir: PathBuf,

    /// Prefix put in front of the lower-cased type name.
    pub prefix: String,

    /// Extension of generated files, including the dot.
    pub extension: String,
}

/// Package name resolution configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Explicit package name. Disables inference when set.
    pub name: Option<String>,

    /// Extension of source files scanned for a package declaration.
    pub source_extension: String,

    /// Keyword that starts a package declaration line.
    pub keyword: String,
}

/// Parser configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// How blank lines in specification files are treated.
    pub blank_lines: BlankLines,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("goenum"),
            extension: ".goenum".to_string(),
            template: "goenum.template".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: "enum".to_string(),
            extension: ".go".to_string(),
        }
    }
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: None,
            source_extension: ".go".to_string(),
            keyword: "package".to_string(),
        }
    }
}

impl Config {
    /// Path of the template file relative to `root`.
    pub fn template_path(&self, root: &Path) -> PathBuf {
        join_path(&self.spec_dir(root), Path::new(&self.input.template))
    }

    /// Directory holding specification files relative to `root`.
    pub fn spec_dir(&self, root: &Path) -> PathBuf {
        join_path(root, &self.input.dir)
    }

    /// Directory generated files go to relative to `root`.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        join_path(root, &self.output.dir)
    }

    /// Check values that would make discovery or naming meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_extension("input.extension", &self.input.extension)?;
        check_extension("output.extension", &self.output.extension)?;
        check_extension("package.source_extension", &self.package.source_extension)?;

        if self.input.template.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "input.template",
                "template file name must not be empty",
            ));
        }

        if self.package.keyword.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "package.keyword",
                "keyword must not be empty",
            ));
        }

        if let Some(name) = &self.package.name {
            if name.split_whitespace().count() != 1 {
                return Err(ConfigError::invalid_value(
                    "package.name",
                    format!("'{}' is not a single identifier", name),
                ));
            }
        }

        Ok(())
    }
}

/// Join `path` onto `base`, dropping `.` components.
///
/// `./.` collapses to `.`, so default settings print as `enumcolor.go`
/// rather than `././enumcolor.go`.
pub fn join_path(base: &Path, path: &Path) -> PathBuf {
    let joined: PathBuf = base
        .join(path)
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();

    if joined.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        joined
    }
}

fn check_extension(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.len() < 2 || !value.starts_with('.') {
        return Err(ConfigError::invalid_value(
            key,
            format!("'{}' must start with '.' followed by at least one character", value),
        ));
    }
    if value.contains(['/', '\\', '*', '?', '[']) {
        return Err(ConfigError::invalid_value(
            key,
            format!("'{}' contains path or pattern characters", value),
        ));
    }
    Ok(())
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// An explicit path must exist. If the path is None, the default
    /// `goenum.toml` in the current directory is tried instead.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        match path {
            Some(path) => Self::load_file(path),
            None => Self::load_in(Path::new(".")),
        }
    }

    /// Load `goenum.toml` from `dir`, falling back to defaults when absent.
    pub fn load_in(dir: &Path) -> CliResult<Config> {
        let config_path = dir.join(CONFIG_FILENAME);

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        Self::load_file(&config_path)
    }

    fn load_file(config_path: &Path) -> CliResult<Config> {
        let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path.to_path_buf(), e.to_string()))?;

        config.validate()?;
        tracing::debug!(path = %config_path.display(), "Loaded config");

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(ref input) = args.input {
            config.input.dir = input.clone();
        }

        if let Some(ref template) = args.template {
            config.input.template = template.clone();
        }

        if let Some(ref package) = args.package {
            config.package.name = Some(package.clone());
        }

        if let Some(blank_lines) = args.blank_lines {
            config.parser.blank_lines = blank_lines;
        }

        config
    }

    /// Get default configuration.
    pub fn default_config() -> Config {
        Config::default()
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# goenum configuration file

[input]
# Directory holding the template and the enum specification files
dir = "goenum"

# Extension of enum specification files
extension = ".goenum"

# Template file name inside the input directory
template = "goenum.template"

[output]
# Directory generated Go files are written to
dir = "."

# Generated file name: <prefix><lowercase type name><extension>
prefix = "enum"
extension = ".go"

[package]
# Explicit Go package name. When unset, the first `package` declaration
# found in *.go files of the source directory is used.
# name = "shapes"
source_extension = ".go"
keyword = "package"

[parser]
# Blank lines in specification files: "skip" or "keep"
# ("keep" turns each blank line into a member with an empty name)
blank_lines = "skip"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Input directory override.
    pub input: Option<PathBuf>,

    /// Template file name override.
    pub template: Option<String>,

    /// Explicit package name.
    pub package: Option<String>,

    /// Blank line policy override.
    pub blank_lines: Option<BlankLines>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.dir, PathBuf::from("goenum"));
        assert_eq!(config.input.extension, ".goenum");
        assert_eq!(config.input.template, "goenum.template");
        assert_eq!(config.output.dir, PathBuf::from("."));
        assert_eq!(config.output.prefix, "enum");
        assert_eq!(config.output.extension, ".go");
        assert_eq!(config.package.name, None);
        assert_eq!(config.package.keyword, "package");
        assert_eq!(config.parser.blank_lines, BlankLines::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_content_matches_defaults() {
        let parsed: Config = toml::from_str(ConfigManager::default_config_content()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.input.dir, defaults.input.dir);
        assert_eq!(parsed.input.extension, defaults.input.extension);
        assert_eq!(parsed.output.prefix, defaults.output.prefix);
        assert_eq!(parsed.package.name, defaults.package.name);
        assert_eq!(parsed.parser.blank_lines, defaults.parser.blank_lines);
    }

    #[test]
    fn test_merge_cli_args_output() {
        let config = Config::default();
        let args = CliArgs {
            output: Some(PathBuf::from("./custom")),
            package: Some("shapes".to_string()),
            ..Default::default()
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
        assert_eq!(merged.package.name.as_deref(), Some("shapes"));
    }

    #[test]
    fn test_merge_cli_args_input_and_template() {
        let config: Config = toml::from_str("[input]\ndir = \"enums\"\ntemplate = \"enum.hbs\"\n").unwrap();
        let args = CliArgs {
            input: Some(PathBuf::from("specs")),
            template: Some("go.hbs".to_string()),
            ..Default::default()
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.input.dir, PathBuf::from("specs"));
        assert_eq!(merged.input.template, "go.hbs");
        assert_eq!(
            merged.template_path(Path::new("/project")),
            PathBuf::from("/project/specs/go.hbs")
        );
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = Config::default();
        let args = CliArgs::default();

        let merged = ConfigManager::merge_cli_args(config.clone(), &args);
        assert_eq!(merged.output.dir, config.output.dir);
        assert_eq!(merged.input.template, config.input.template);
        assert_eq!(merged.parser.blank_lines, config.parser.blank_lines);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[input]
dir = "enums"
extension = ".enum"
template = "enum.hbs"

[output]
dir = "gen"
prefix = "zz_"
extension = ".go"

[package]
name = "shapes"

[parser]
blank_lines = "keep"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.dir, PathBuf::from("enums"));
        assert_eq!(config.input.extension, ".enum");
        assert_eq!(config.input.template, "enum.hbs");
        assert_eq!(config.output.dir, PathBuf::from("gen"));
        assert_eq!(config.output.prefix, "zz_");
        assert_eq!(config.package.name.as_deref(), Some("shapes"));
        assert_eq!(config.package.keyword, "package");
        assert_eq!(config.parser.blank_lines, BlankLines::Keep);
    }

    #[test]
    fn test_validate_rejects_bad_extension() {
        let mut config = Config::default();
        config.input.extension = "goenum".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "input.extension"
        ));

        config.input.extension = ".*".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_multi_word_package() {
        let mut config = Config::default();
        config.package.name = Some("two words".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_in_without_config_returns_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = ConfigManager::load_in(dir.path()).unwrap();
        assert_eq!(config.input.extension, ".goenum");
    }

    #[test]
    fn test_load_in_reads_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "[output]\nprefix = \"zz_\"\n").unwrap();

        let config = ConfigManager::load_in(dir.path()).unwrap();
        assert_eq!(config.output.prefix, "zz_");
    }

    #[test]
    fn test_load_explicit_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let result = ConfigManager::load(Some(&path));
        match result {
            Err(crate::error::CliError::Config(ConfigError::Io { path: reported, source })) => {
                assert_eq!(reported, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected a config I/O error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[input\ndir = ").unwrap();

        let result = ConfigManager::load(Some(&path));
        assert!(matches!(
            result,
            Err(crate::error::CliError::Config(ConfigError::InvalidToml { .. }))
        ));
    }

    #[test]
    fn test_join_path_drops_current_dir() {
        assert_eq!(join_path(Path::new("."), Path::new(".")), PathBuf::from("."));
        assert_eq!(
            join_path(Path::new("."), Path::new("enumone.go")),
            PathBuf::from("enumone.go")
        );
        assert_eq!(
            join_path(Path::new("/project/."), Path::new("./gen")),
            PathBuf::from("/project/gen")
        );
        assert_eq!(join_path(Path::new("../app"), Path::new(".")), PathBuf::from("../app"));
    }

    #[test]
    fn test_output_dir_with_default_root() {
        let config = Config::default();
        assert_eq!(config.output_dir(Path::new(".")), PathBuf::from("."));
        assert_eq!(
            config.template_path(Path::new(".")),
            PathBuf::from("goenum/goenum.template")
        );
    }

    #[test]
    fn test_template_path_is_joined_to_root() {
        let config = Config::default();
        assert_eq!(
            config.template_path(Path::new("/project")),
            PathBuf::from("/project/goenum/goenum.template")
        );
    }
}
