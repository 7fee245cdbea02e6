//! # goenum
//!
//! CLI tool for generating Go enum source files from enum descriptions.
//!
//! ## Usage
//!
//! ```bash
//! # Generate enums from ./goenum/*.goenum into the current directory
//! goenum generate
//!
//! # Use an explicit package name and output directory
//! goenum generate --package shapes --output ./internal/shapes
//!
//! # Read specifications and the template from another directory
//! goenum generate --input enums --template go.hbs
//!
//! # Dry run to preview generated files
//! goenum generate --dry-run
//!
//! # Initialize configuration and a starter template
//! goenum init --with-template
//!
//! # Check generated files are up-to-date
//! goenum validate
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use goenum_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    error::CliError,
    generator::{FileStatus, GenerationReport, Generator},
    parser::BlankLines,
    renderer::DEFAULT_TEMPLATE,
    writer::{FileWriter, WriteResult},
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GOENUM_LOG";

#[derive(Parser)]
#[command(name = "goenum")]
#[command(author, version, about = "Generate Go enum source files from enum descriptions", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go files from enum specification files
    Generate {
        /// Source directory (holds the Go package and the goenum directory)
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Output directory for generated Go files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input directory holding the template and specification files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Template file name inside the input directory
        #[arg(short, long)]
        template: Option<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Go package name (skips package inference)
        #[arg(short, long)]
        package: Option<String>,

        /// Preview generated files without writing them
        #[arg(long)]
        dry_run: bool,

        /// Turn blank specification lines into members with empty names
        #[arg(long)]
        keep_blank_lines: bool,
    },

    /// Initialize a new goenum configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,

        /// Also write a starter Go enum template
        #[arg(long)]
        with_template: bool,
    },

    /// Validate that generated files are up-to-date
    Validate {
        /// Source directory (holds the Go package and the goenum directory)
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Input directory holding the template and specification files
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Template file name inside the input directory
        #[arg(short, long)]
        template: Option<String>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Go package name (skips package inference)
        #[arg(short, long)]
        package: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Install the stderr log subscriber.
fn init_tracing(verbose: bool) {
    let default = if verbose { "goenum_cli=debug,goenum=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            source,
            output,
            input,
            template,
            config,
            package,
            dry_run,
            keep_blank_lines,
        } => {
            let args = CliArgs {
                output,
                input,
                template,
                package,
                blank_lines: keep_blank_lines.then_some(BlankLines::Keep),
                ..Default::default()
            };
            cmd_generate(&source, config, &args, dry_run)
        }

        Commands::Init {
            output,
            force,
            with_template,
        } => cmd_init(output, force, with_template),

        Commands::Validate {
            source,
            input,
            template,
            config,
            package,
        } => {
            let args = CliArgs {
                input,
                template,
                package,
                ..Default::default()
            };
            cmd_validate(&source, config, &args)
        }
    }
}

/// Load the config file and apply overrides.
///
/// An explicit `--config` path must exist; otherwise `goenum.toml` next to the
/// sources is used when present.
fn load_config(source: &Path, config_path: Option<PathBuf>, args: &CliArgs) -> Result<Config, CliError> {
    let config = match config_path {
        Some(path) => ConfigManager::load(Some(&path))?,
        None => ConfigManager::load_in(source)?,
    };
    Ok(ConfigManager::merge_cli_args(config, args))
}

/// Generate command implementation.
fn cmd_generate(
    source: &Path,
    config_path: Option<PathBuf>,
    args: &CliArgs,
    dry_run: bool,
) -> Result<(), CliError> {
    let config = load_config(source, config_path, args)?;

    println!("{}", "Preparing generation...".cyan());
    let generator = Generator::prepare(config, source)?;
    println!("  Package {}", generator.package_name().green());

    println!("{}", "Generating enums...".cyan());
    let writer = FileWriter::new(dry_run);
    let report = generator.generate(&writer)?;

    print_report(&report);
    Ok(())
}

/// Print generated files and failures.
fn print_report(report: &GenerationReport) {
    if report.total() == 0 {
        println!("{}", "No enum specification files found.".yellow());
        return;
    }

    for generated in &report.generated {
        match &generated.result {
            WriteResult::Written { path, bytes } => {
                println!(
                    "{} {} -> {} ({} bytes)",
                    "✓".green(),
                    generated.type_name,
                    path.display(),
                    bytes
                );
            }
            WriteResult::DryRun { content, path } => {
                println!(
                    "{} Would write {} to {}:",
                    "[dry-run]".yellow(),
                    generated.type_name,
                    path.display()
                );
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    for failure in &report.failures {
        eprintln!(
            "{} {}: {}",
            "✗".red(),
            failure.source.display(),
            failure.error
        );
    }

    println!(
        "  Generated {} of {} enum(s)",
        report.generated.len().to_string().green(),
        report.total()
    );
    if !report.is_clean() {
        eprintln!(
            "{} {} specification(s) skipped",
            "Warning:".yellow(),
            report.failures.len()
        );
    }
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool, with_template: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        return Err(CliError::AlreadyExists { path: output });
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    if with_template {
        let config = ConfigManager::default_config();
        let root = output.parent().unwrap_or_else(|| Path::new("."));
        let template_path = config.template_path(root);

        if template_path.exists() && !force {
            println!(
                "{} Template already exists, leaving it: {}",
                "Warning:".yellow(),
                template_path.display()
            );
            return Ok(());
        }

        std::fs::create_dir_all(config.spec_dir(root))?;
        std::fs::write(&template_path, DEFAULT_TEMPLATE)?;

        println!(
            "{} Created template: {}",
            "✓".green(),
            template_path.display()
        );
    }

    Ok(())
}

/// Validate command implementation.
fn cmd_validate(source: &Path, config_path: Option<PathBuf>, args: &CliArgs) -> Result<(), CliError> {
    println!("{}", "Validating generated enums...".cyan());

    let config = load_config(source, config_path, args)?;
    let generator = Generator::prepare(config, source)?;
    let report = generator.check()?;

    for (path, status) in &report.files {
        match status {
            FileStatus::UpToDate => {}
            FileStatus::Stale => eprintln!("{} {} is out of date", "✗".red(), path.display()),
            FileStatus::Missing => eprintln!("{} {} is missing", "✗".red(), path.display()),
        }
    }

    for failure in &report.failures {
        eprintln!(
            "{} {}: {}",
            "✗".red(),
            failure.source.display(),
            failure.error
        );
    }

    if report.is_up_to_date() {
        println!("{} Generated enums are up-to-date", "✓".green());
        Ok(())
    } else {
        println!("  Run 'goenum generate' to update");
        Err(CliError::Validation(
            "Generated enums are out of date".to_string(),
        ))
    }
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
