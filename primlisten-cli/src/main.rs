//! # primlisten-cli
//!
//! CLI tool for generating specialized primitive change-listener contracts.
//!
//! ## Usage
//!
//! ```bash
//! # Generate Java interfaces for the configured types
//! primlisten generate
//!
//! # Generate a Rust module to a specific output directory
//! primlisten generate --target rust --output ./src/generated
//!
//! # Watch the configuration and regenerate on change
//! primlisten generate --watch
//!
//! # Dry run to preview changes
//! primlisten generate --dry-run
//!
//! # Initialize configuration
//! primlisten init
//!
//! # Validate generated files are up-to-date
//! primlisten validate --path ./generated
//!
//! # List the registered types and their contracts
//! primlisten list --format json
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use primlisten_cli::{
    config::{CliArgs, Config, ConfigManager, Target},
    error::CliError,
    generator::{FileStatus, ListenerGenerator},
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "primlisten")]
#[command(author, version, about = "Generate specialized primitive change-listener contracts", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate listener contracts for the configured primitive types
    Generate {
        /// Output directory for generated files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language
        #[arg(short, long, value_enum)]
        target: Option<Target>,

        /// Output file name for single-file targets
        #[arg(long)]
        file: Option<String>,

        /// Java package of the generated interfaces
        #[arg(long)]
        package: Option<String>,

        /// Omit documentation comments
        #[arg(long)]
        no_docs: bool,

        /// Watch the configuration file and regenerate
        #[arg(short, long)]
        watch: bool,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new primlisten configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = "primlisten.toml")]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that generated contracts are up-to-date
    Validate {
        /// Directory holding the generated files (defaults to output.dir)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the registered primitive types and their contract names
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ListFormat,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ListFormat {
    Text,
    Json,
}

/// One row of `list --format json`.
#[derive(Serialize)]
struct ContractEntry<'a> {
    name: &'a str,
    abbreviation: &'a str,
    boxed: &'a str,
    rust_type: &'a str,
    contract: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e.downcast_ref::<CliError>() {
                Some(CliError::Validation(_)) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            target,
            file,
            package,
            no_docs,
            watch,
            dry_run,
            config,
        } => {
            let args = CliArgs {
                output,
                target,
                output_file: file,
                generate_docs: no_docs.then_some(false),
                package,
            };
            cmd_generate(config, &args, watch, dry_run)
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Validate { path, config } => cmd_validate(path, config),

        Commands::List { format, config } => cmd_list(format, config),
    }
}

/// Generate command implementation.
fn cmd_generate(
    config_path: Option<PathBuf>,
    args: &CliArgs,
    watch: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = load_config(config_path.as_deref(), args)?;

    if watch {
        run_watch_mode(config_path.as_deref(), args, config, dry_run)
    } else {
        run_generate(&config, dry_run)
    }
}

fn load_config(path: Option<&Path>, args: &CliArgs) -> anyhow::Result<Config> {
    let config = ConfigManager::load(path)?;
    Ok(ConfigManager::merge_cli_args(config, args))
}

/// Run contract generation once.
fn run_generate(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    println!("{}", "Generating listener contracts...".cyan());

    let generator = ListenerGenerator::new(config.clone());
    let output = generator.generate()?;

    println!(
        "  Generated {} contract(s) in {} file(s)",
        output.contracts.len().to_string().green(),
        output.artifacts.len().to_string().green()
    );

    let writer = FileWriter::new(dry_run);
    for result in writer.write_artifacts(&config.output.dir, &output.artifacts)? {
        match result {
            WriteResult::Written { path, bytes } => {
                println!(
                    "{} Written {} bytes to {}",
                    "✓".green(),
                    bytes,
                    path.display()
                );
            }
            WriteResult::DryRun { content, path } => {
                println!(
                    "{} Would write to {}:",
                    "[dry-run]".yellow(),
                    path.display()
                );
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    Ok(())
}

/// Run in watch mode.
fn run_watch_mode(
    config_path: Option<&Path>,
    args: &CliArgs,
    config: Config,
    dry_run: bool,
) -> anyhow::Result<()> {
    let watched = ConfigManager::resolve_path(config_path);

    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", watched.display());
    println!("  Press Ctrl+C to stop\n");

    run_generate(&config, dry_run)?;

    let watcher = FileWatcher::new(&watched);
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if event.is_error() {
            println!(
                "{} {}",
                "Watch error:".red(),
                event.error_message().unwrap_or("Unknown error")
            );
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        let regenerated =
            load_config(config_path, args).and_then(|config| run_generate(&config, dry_run));
        if let Err(e) = regenerated {
            println!("{} {:#}", "Generation error:".red(), e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Validation("Configuration file already exists".to_string()).into());
    }

    let content = ConfigManager::default_config_content();
    std::fs::write(&output, content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Validate command implementation.
fn cmd_validate(path: Option<PathBuf>, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    println!("{}", "Validating contracts...".cyan());

    let config = ConfigManager::load(config_path.as_deref())?;
    let dir = path.unwrap_or_else(|| config.output.dir.clone());

    let report = ListenerGenerator::new(config).validate(&dir)?;

    if report.is_up_to_date() {
        println!(
            "{} {} file(s) are up-to-date",
            "✓".green(),
            report.files.len()
        );
        return Ok(());
    }

    for status in report.outdated() {
        let label = match status {
            FileStatus::Missing(_) => "missing",
            FileStatus::Extra(_) => "not generated",
            _ => "out of date",
        };
        println!("{} {} ({})", "✗".red(), status.path().display(), label);
    }
    println!("  Run 'primlisten generate' to update");

    Err(CliError::Validation("Contracts are out of date".to_string()).into())
}

/// List command implementation.
fn cmd_list(format: ListFormat, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ConfigManager::load(config_path.as_deref())?;
    let registry = config.registry()?;

    let entries = registry
        .iter()
        .map(|descriptor| -> anyhow::Result<ContractEntry<'_>> {
            Ok(ContractEntry {
                name: &descriptor.name,
                abbreviation: &descriptor.abbreviation,
                boxed: &descriptor.boxed_name,
                rust_type: descriptor.rust_type(),
                contract: registry.contract_name(descriptor)?,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    match format {
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&entries)
                .context("Failed to serialize contract list")?;
            println!("{}", json);
        }
        ListFormat::Text => {
            for entry in &entries {
                println!(
                    "  {:<24} {} ({}, {})",
                    entry.contract.green(),
                    entry.name,
                    entry.boxed,
                    entry.rust_type
                );
            }
        }
    }

    Ok(())
}

/// Print an error with formatting.
fn print_error(error: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), error);
}
