//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag, or `default_format = "json"` in config)
//! - Quiet mode for scripting (--quiet flag)

use std::path::PathBuf;

use needlebox_core::{Dimension, Format, Measured, ReconcileReport, Unit};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    /// Create format from CLI flags, falling back to the configured default
    pub fn resolve(json: bool, quiet: bool, default: Format) -> Self {
        match Self::from_flags(json, quiet) {
            OutputFormat::Human if default == Format::Json => OutputFormat::Json,
            format => format,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the reconciliation report for each inventory file
    pub fn print_reports(&self, reports: &[(PathBuf, ReconcileReport)]) {
        match self.format {
            OutputFormat::Human => {
                let mut total = 0;
                let mut failed = 0;
                for (path, report) in reports {
                    println!("{}", path.display());
                    if report.entries.is_empty() {
                        println!("  No tools found.");
                    }
                    for entry in &report.entries {
                        match &entry.error {
                            None => {
                                println!("  ✓ {}", entry.description);
                                for (dimension, pair) in entry.tool.measurement_pairs() {
                                    println!(
                                        "      {:<15} {}",
                                        format!("{}:", dimension.name),
                                        format_pair(&dimension, pair.primary, pair.secondary)
                                    );
                                }
                            }
                            Some(err) => {
                                println!("  ✗ {}", entry.description);
                                println!("      {}", err);
                            }
                        }
                    }
                    total += report.entries.len();
                    failed += report.failure_count();
                    println!();
                }
                println!("{} tool(s), {} failed", total, failed);
            }
            OutputFormat::Json => {
                let json: Vec<_> = reports
                    .iter()
                    .map(|(path, report)| {
                        serde_json::json!({
                            "file": path,
                            "ok": report.is_ok(),
                            "entries": report.entries,
                        })
                    })
                    .collect();
                println!("{}", to_pretty_json(&json));
            }
            OutputFormat::Quiet => {
                for (path, report) in reports {
                    for entry in report.failures() {
                        if let Some(ref err) = entry.error {
                            println!("{}:{}: {}", path.display(), entry.index + 1, err);
                        }
                    }
                }
            }
        }
    }

    /// Print the result of a unit conversion
    pub fn print_conversion(&self, value: f64, from: Unit, result: f64, to: Unit) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "{} {} = {} {}",
                    format_number(value),
                    from,
                    format_number(result),
                    to
                );
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "value": value,
                        "from": from,
                        "result": result,
                        "to": to
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", result);
            }
        }
    }

    /// Print the known dimensions with their units and tolerances
    pub fn print_dimensions(&self, dimensions: &[Dimension]) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "{:<16} {:<8} {:<10} TOLERANCE",
                    "DIMENSION", "PRIMARY", "SECONDARY"
                );
                for dim in dimensions {
                    println!(
                        "{:<16} {:<8} {:<10} {} {}",
                        dim.name,
                        dim.primary_unit,
                        dim.secondary_unit,
                        format_number(dim.tolerance),
                        dim.secondary_unit
                    );
                }
            }
            OutputFormat::Json => {
                let json: Vec<_> = dimensions
                    .iter()
                    .map(|dim| {
                        serde_json::json!({
                            "name": dim.name,
                            "primary_unit": dim.primary_unit,
                            "secondary_unit": dim.secondary_unit,
                            "primary_field": dim.primary_field(),
                            "secondary_field": dim.secondary_field(),
                            "tolerance": dim.tolerance
                        })
                    })
                    .collect();
                println!("{}", to_pretty_json(&json));
            }
            OutputFormat::Quiet => {
                for dim in dimensions {
                    println!("{}", dim.name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Format a number with at most two decimals, dropping trailing zeros
pub fn format_number(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Render a measurement pair as `22.86 cm = 9 in`
fn format_pair(dimension: &Dimension, primary: Option<f64>, secondary: Option<f64>) -> String {
    match (primary, secondary) {
        (Some(p), Some(s)) => format!(
            "{} {} = {} {}",
            format_number(p),
            dimension.primary_unit,
            format_number(s),
            dimension.secondary_unit
        ),
        (Some(p), None) => format!("{} {}", format_number(p), dimension.primary_unit),
        (None, Some(s)) => format!("{} {}", format_number(s), dimension.secondary_unit),
        (None, None) => "(not set)".to_string(),
    }
}
