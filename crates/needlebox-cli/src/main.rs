//! needlebox CLI
//!
//! Command-line interface for needlebox - fiber-arts tool records.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use needlebox_core::Config;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "needlebox")]
#[command(about = "needlebox - Fiber-arts tool records with unit reconciliation")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the units of every tool in one or more inventory files
    Check {
        /// Inventory files (.toml or .json)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Convert a value between units (cm, mm, in, g, oz)
    Convert {
        /// Value to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Unit of the value
        from: String,
        /// Unit to convert to
        to: String,
    },
    /// List measured dimensions with their units and tolerances
    #[command(alias = "dims")]
    Dimensions,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (log_level, log_file, default_format)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    init_logging(&config);

    let output = Output::new(OutputFormat::resolve(
        cli.json,
        cli.quiet,
        config.default_format,
    ));
    debug!("Output format: {:?}", output.format);

    match cli.command {
        Commands::Check { files } => commands::check::run(&files, &output),
        Commands::Convert { value, from, to } => commands::convert::run(value, &from, &to, &output),
        Commands::Dimensions => commands::dimensions::list(&output),
        Commands::Config { command } => {
            handle_config_command(command, cli.config.as_ref(), &output)
        }
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Initialize logging to stderr, or to the configured log file
fn init_logging(config: &Config) {
    let level = &config.log_level;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(format!("needlebox_core={},needlebox={}", level, level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    match &config.log_file {
        Some(log_path) => {
            let log_file = match std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)
            {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };

            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}
