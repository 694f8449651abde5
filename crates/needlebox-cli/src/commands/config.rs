//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use needlebox_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "log_level": config.log_level,
                    "log_file": config.log_file,
                    "default_format": config.default_format
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.log_level);
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  log_level:      {}", config.log_level);
            println!(
                "  log_file:       {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(not set)".to_string())
            );
            println!("  default_format: {}", config.default_format);
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    config
        .save_to_path(&save_path)
        .context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "log_level" => {
            let level = value.to_lowercase();
            if !LOG_LEVELS.contains(&level.as_str()) {
                bail!(
                    "Invalid value for log_level: '{}'. Use one of: {}",
                    value,
                    LOG_LEVELS.join(", ")
                );
            }
            config.log_level = level;
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        "default_format" => {
            config.default_format = value.parse()?;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: log_level, log_file, default_format",
                key
            );
        }
    }
    Ok(())
}
