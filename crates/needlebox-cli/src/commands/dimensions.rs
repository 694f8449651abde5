//! Dimensions command handler

use anyhow::Result;

use needlebox_core::reconcile::all_dimensions;

use crate::output::Output;

/// List every dimension with its units and tolerance
pub fn list(output: &Output) -> Result<()> {
    output.print_dimensions(all_dimensions());
    Ok(())
}
