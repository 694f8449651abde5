//! Convert command handler

use anyhow::{Context, Result};

use needlebox_core::{convert, Unit};

use crate::output::Output;

/// Convert a value between two units of the same quantity
pub fn run(value: f64, from: &str, to: &str, output: &Output) -> Result<()> {
    let from: Unit = from.parse().context("Invalid source unit")?;
    let to: Unit = to.parse().context("Invalid target unit")?;
    let result = convert(value, from, to)?;

    output.print_conversion(value, from, result, to);
    Ok(())
}
