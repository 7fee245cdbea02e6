//! Generation pipeline.
//!
//! A run resolves the package name and compiles the template once, then
//! processes every discovered specification file independently:
//!
//! ```text
//! discover -> parse -> build context -> render -> write
//! ```
//!
//! Setup failures abort the run. A failure while processing one specification
//! is logged, recorded in the [`GenerationReport`], and the run moves on to
//! the next file.

use crate::config::{join_path, Config, OutputConfig};
use crate::context::RenderContext;
use crate::error::{CliError, CliResult, GenerateError, WriteError};
use crate::package::PackageResolver;
use crate::parser::SpecParser;
use crate::renderer::TemplateRenderer;
use crate::scanner::SpecScanner;
use crate::writer::{FileWriter, WriteResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Naming rule for generated files: `<prefix><lowercase type name><extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    prefix: String,
    extension: String,
}

impl OutputNaming {
    /// Create a naming rule.
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    /// Naming rule from output configuration.
    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.prefix, &config.extension)
    }

    /// Output file name for a type, e.g. `Alignment` -> `enumalignment.go`.
    pub fn file_name(&self, type_name: &str) -> String {
        format!("{}{}{}", self.prefix, type_name.to_lowercase(), self.extension)
    }
}

/// A rendered specification, not yet written.
#[derive(Debug, Clone)]
pub struct RenderedFile {
    /// Specification file the output was rendered from.
    pub source: PathBuf,

    /// Enum type name.
    pub type_name: String,

    /// Destination path.
    pub output_path: PathBuf,

    /// Rendered content.
    pub content: String,
}

/// A specification that was rendered and written (or dry-run).
#[derive(Debug)]
pub struct GeneratedFile {
    /// Specification file.
    pub source: PathBuf,

    /// Enum type name.
    pub type_name: String,

    /// Outcome of the write.
    pub result: WriteResult,
}

/// A specification that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    /// Specification file.
    pub source: PathBuf,

    /// Why it failed.
    pub error: CliError,
}

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files generated, in discovery order.
    pub generated: Vec<GeneratedFile>,

    /// Files that failed, in discovery order.
    pub failures: Vec<FileFailure>,
}

impl GenerationReport {
    /// Whether every discovered specification was generated.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of discovered specifications.
    pub fn total(&self) -> usize {
        self.generated.len() + self.failures.len()
    }
}

/// State of a generated file compared with a fresh render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// File on disk matches the rendered output.
    UpToDate,
    /// File on disk differs from the rendered output.
    Stale,
    /// File has not been generated.
    Missing,
}

/// Outcome of comparing generated files with their specifications.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Output path and status per rendered specification.
    pub files: Vec<(PathBuf, FileStatus)>,

    /// Specifications that could not be rendered.
    pub failures: Vec<FileFailure>,
}

impl ValidationReport {
    /// Whether every output exists and matches, and every spec rendered.
    pub fn is_up_to_date(&self) -> bool {
        self.failures.is_empty()
            && self
                .files
                .iter()
                .all(|(_, status)| *status == FileStatus::UpToDate)
    }
}

/// Enum source generator.
#[derive(Debug)]
pub struct Generator {
    config: Config,
    root: PathBuf,
    package_name: String,
    renderer: TemplateRenderer,
    parser: SpecParser,
    naming: OutputNaming,
}

impl Generator {
    /// Prepare a run rooted at `root`.
    ///
    /// Resolves the package name, then loads and compiles the template.
    /// Either failing aborts the whole run.
    pub fn prepare(config: Config, root: impl Into<PathBuf>) -> CliResult<Self> {
        let root = root.into();
        config.validate()?;

        let package_name = PackageResolver::new(&root, &config.package).resolve()?;

        let template_path = config.template_path(&root);
        let source = std::fs::read_to_string(&template_path).map_err(|e| {
            GenerateError::TemplateLoad {
                path: template_path.clone(),
                source: e,
            }
        })?;
        let renderer = TemplateRenderer::compile(&source)?;

        tracing::info!(
            package = %package_name,
            template = %template_path.display(),
            "Prepared generation run"
        );

        Ok(Self::from_parts(config, root, package_name, renderer))
    }

    /// Assemble a generator from already resolved setup.
    pub fn from_parts(
        config: Config,
        root: impl Into<PathBuf>,
        package_name: impl Into<String>,
        renderer: TemplateRenderer,
    ) -> Self {
        let parser = SpecParser::new().with_blank_lines(config.parser.blank_lines);
        let naming = OutputNaming::from_config(&config.output);

        Self {
            config,
            root: root.into(),
            package_name: package_name.into(),
            renderer,
            parser,
            naming,
        }
    }

    /// Package name used for every file in this run.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Discover specification files.
    pub fn discover(&self) -> CliResult<Vec<PathBuf>> {
        SpecScanner::new(self.config.spec_dir(&self.root), &self.config.input.extension).scan()
    }

    /// Destination path for a type.
    pub fn output_path(&self, type_name: &str) -> PathBuf {
        join_path(
            &self.config.output_dir(&self.root),
            Path::new(&self.naming.file_name(type_name)),
        )
    }

    /// Parse, bind and render one specification file.
    pub fn render_file(&self, path: &Path) -> CliResult<RenderedFile> {
        let spec = self.parser.parse_file(path, &self.config.input.extension)?;
        let context = RenderContext::build(&spec, &self.package_name)?;
        let content = self.renderer.render(&context)?;

        Ok(RenderedFile {
            source: path.to_path_buf(),
            output_path: self.output_path(&spec.type_name),
            type_name: spec.type_name,
            content,
        })
    }

    /// Generate every discovered specification.
    ///
    /// Only discovery failures are returned as errors; per-file failures are
    /// collected in the report. Type names differing only by case map to the
    /// same output, so a later specification claiming an already generated
    /// output is recorded as a failure instead of overwriting it.
    pub fn generate(&self, writer: &FileWriter) -> CliResult<GenerationReport> {
        let mut report = GenerationReport::default();
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for path in self.discover()? {
            match self.generate_file(&path, writer, &mut claimed) {
                Ok(generated) => {
                    tracing::info!(
                        source = %path.display(),
                        output = %generated.result.path().display(),
                        "Generated enum"
                    );
                    report.generated.push(generated);
                }
                Err(error) => {
                    tracing::warn!(source = %path.display(), error = %error, "Skipping specification");
                    report.failures.push(FileFailure {
                        source: path,
                        error,
                    });
                }
            }
        }

        Ok(report)
    }

    fn generate_file(
        &self,
        path: &Path,
        writer: &FileWriter,
        claimed: &mut HashMap<PathBuf, PathBuf>,
    ) -> CliResult<GeneratedFile> {
        let rendered = self.render_file(path)?;

        if let Some(first) = claimed.get(&rendered.output_path) {
            return Err(WriteError::OutputCollision {
                path: rendered.output_path,
                first: first.clone(),
            }
            .into());
        }

        let result = writer.write(&rendered.output_path, &rendered.content)?;
        claimed.insert(rendered.output_path, rendered.source.clone());

        Ok(GeneratedFile {
            source: rendered.source,
            type_name: rendered.type_name,
            result,
        })
    }

    /// Compare files on disk with what a run would generate.
    pub fn check(&self) -> CliResult<ValidationReport> {
        let mut report = ValidationReport::default();

        for path in self.discover()? {
            let rendered = match self.render_file(&path) {
                Ok(rendered) => rendered,
                Err(error) => {
                    tracing::warn!(source = %path.display(), error = %error, "Cannot render specification");
                    report.failures.push(FileFailure {
                        source: path,
                        error,
                    });
                    continue;
                }
            };

            let status = match std::fs::read_to_string(&rendered.output_path) {
                Ok(existing) if existing == rendered.content => FileStatus::UpToDate,
                Ok(_) => FileStatus::Stale,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileStatus::Missing,
                Err(e) => {
                    report.failures.push(FileFailure {
                        source: path,
                        error: e.into(),
                    });
                    continue;
                }
            };

            tracing::debug!(output = %rendered.output_path.display(), ?status, "Checked output");
            report.files.push((rendered.output_path, status));
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ContextError, ParseError, TemplateError};
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str =
        "package {{Package}} // {{EnumType}}: {{#each EnumValues}}{{#unless IsFirst}},{{/unless}}{{Name}}{{/each}}";

    fn project(specs: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("goenum")).unwrap();
        fs::write(dir.path().join("goenum/goenum.template"), TEMPLATE).unwrap();
        fs::write(dir.path().join("main.go"), "package shapes\n").unwrap();
        for (name, content) in specs {
            fs::write(dir.path().join("goenum").join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_output_naming() {
        let naming = OutputNaming::new("enum", ".go");
        assert_eq!(naming.file_name("Alignment"), "enumalignment.go");
        assert_eq!(naming.file_name("HTTPStatus"), "enumhttpstatus.go");
        assert_eq!(naming.file_name("Alignment"), naming.file_name("Alignment"));
    }

    #[test]
    fn test_prepare_resolves_package() {
        let dir = project(&[]);
        let generator = Generator::prepare(Config::default(), dir.path()).unwrap();
        assert_eq!(generator.package_name(), "shapes");
    }

    #[test]
    fn test_prepare_missing_template() {
        let dir = project(&[]);
        fs::remove_file(dir.path().join("goenum/goenum.template")).unwrap();

        let result = Generator::prepare(Config::default(), dir.path());
        assert!(matches!(
            result,
            Err(CliError::Generate(GenerateError::TemplateLoad { .. }))
        ));
    }

    #[test]
    fn test_prepare_invalid_template() {
        let dir = project(&[]);
        fs::write(dir.path().join("goenum/goenum.template"), "{{#each EnumValues}}").unwrap();

        let result = Generator::prepare(Config::default(), dir.path());
        assert!(matches!(
            result,
            Err(CliError::Template(TemplateError::Compile { .. }))
        ));
    }

    #[test]
    fn test_render_file() {
        let dir = project(&[("Alignment.goenum", "LEFT\nCENTER\nRIGHT\n")]);
        let generator = Generator::prepare(Config::default(), dir.path()).unwrap();

        let rendered = generator
            .render_file(&dir.path().join("goenum/Alignment.goenum"))
            .unwrap();

        assert_eq!(rendered.type_name, "Alignment");
        assert_eq!(rendered.output_path, dir.path().join("enumalignment.go"));
        assert_eq!(rendered.content, "package shapes // Alignment: LEFT,CENTER,RIGHT");
    }

    #[test]
    fn test_render_empty_spec_fails_with_context_error() {
        let dir = project(&[("Empty.goenum", "")]);
        let generator = Generator::prepare(Config::default(), dir.path()).unwrap();

        let result = generator.render_file(&dir.path().join("goenum/Empty.goenum"));
        assert!(matches!(
            result,
            Err(CliError::Context(ContextError::EmptyMembers { .. }))
        ));
    }

    #[test]
    fn test_render_missing_spec_fails_with_io_error() {
        let dir = project(&[]);
        let generator = Generator::prepare(Config::default(), dir.path()).unwrap();

        let result = generator.render_file(&dir.path().join("goenum/Gone.goenum"));
        assert!(matches!(
            result,
            Err(CliError::Parse(ParseError::Io { .. }))
        ));
    }

    #[test]
    fn test_generate_isolates_failures() {
        let dir = project(&[
            ("Alignment.goenum", "LEFT\nCENTER\nRIGHT"),
            ("Broken.goenum", "\n\n"),
            ("Color.goenum", "Red\nGreen"),
        ]);
        let generator = Generator::prepare(Config::default(), dir.path()).unwrap();

        let report = generator.generate(&FileWriter::new(false)).unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.is_clean());
        assert!(report.failures[0].source.ends_with("Broken.goenum"));
        assert!(dir.path().join("enumalignment.go").exists());
        assert!(dir.path().join("enumcolor.go").exists());
        assert!(!dir.path().join("enumbroken.go").exists());
    }

    #[test]
    fn test_generate_keep_blank_lines_renders_empty_names() {
        let dir = project(&[("Gappy.goenum", "A\n\nB")]);
        let mut config = Config::default();
        config.parser.blank_lines = crate::parser::BlankLines::Keep;
        let generator = Generator::prepare(config, dir.path()).unwrap();

        let rendered = generator
            .render_file(&dir.path().join("goenum/Gappy.goenum"))
            .unwrap();

        assert_eq!(rendered.content, "package shapes // Gappy: A,,B");
    }

    #[test]
    fn test_generate_with_no_specs() {
        let dir = project(&[]);
        let generator = Generator::prepare(Config::default(), dir.path()).unwrap();

        let report = generator.generate(&FileWriter::new(false)).unwrap();

        assert_eq!(report.total(), 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_check_reports_status() {
        let dir = project(&[("Alignment.goenum", "LEFT"), ("Color.goenum", "Red")]);
        let generator = Generator::prepare(Config::default(), dir.path()).unwrap();

        let report = generator.check().unwrap();
        assert!(!report.is_up_to_date());
        assert!(report
            .files
            .iter()
            .all(|(_, status)| *status == FileStatus::Missing));

        generator.generate(&FileWriter::new(false)).unwrap();
        assert!(generator.check().unwrap().is_up_to_date());

        fs::write(dir.path().join("enumcolor.go"), "edited").unwrap();
        let report = generator.check().unwrap();
        let stale: Vec<_> = report
            .files
            .iter()
            .filter(|(_, status)| *status == FileStatus::Stale)
            .collect();
        assert_eq!(stale.len(), 1);
        assert!(stale[0].0.ends_with("enumcolor.go"));
    }

    #[test]
    fn test_generate_reports_case_colliding_outputs() {
        let dir = project(&[("One.goenum", "Upper"), ("one.goenum", "lower")]);
        let generator = Generator::prepare(Config::default(), dir.path()).unwrap();

        let report = generator.generate(&FileWriter::new(false)).unwrap();

        assert_eq!(report.generated.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].source.ends_with("one.goenum"));
        assert!(matches!(
            report.failures[0].error,
            CliError::Write(WriteError::OutputCollision { ref first, .. }) if first.ends_with("One.goenum")
        ));
        assert_eq!(
            fs::read_to_string(dir.path().join("enumone.go")).unwrap(),
            "package shapes // One: Upper"
        );
    }

    #[test]
    fn test_output_path_under_current_dir() {
        let renderer = TemplateRenderer::compile(TEMPLATE).unwrap();
        let generator = Generator::from_parts(Config::default(), ".", "shapes", renderer);

        assert_eq!(generator.output_path("One"), PathBuf::from("enumone.go"));
    }
}
