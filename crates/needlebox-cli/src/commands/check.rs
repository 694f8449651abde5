//! Check command handler
//!
//! Loads inventory files, runs save-time unit reconciliation on every tool
//! and reports the outcome per file.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use tracing::debug;

use needlebox_core::{Inventory, ReconcileReport};

use crate::output::Output;

/// Reconcile every tool in the given inventory files
///
/// All files are checked and reported before failing, so one bad record
/// does not hide problems in the rest.
pub fn run(files: &[PathBuf], output: &Output) -> Result<()> {
    let reports = reconcile_files(files)?;
    output.print_reports(&reports);

    let failed: usize = reports.iter().map(|(_, r)| r.failure_count()).sum();
    if failed > 0 {
        bail!("{} tool(s) failed unit reconciliation", failed);
    }
    Ok(())
}

fn reconcile_files(files: &[PathBuf]) -> Result<Vec<(PathBuf, ReconcileReport)>> {
    files
        .iter()
        .map(|path| {
            let mut inventory = load(path)?;
            let report = inventory.reconcile();
            debug!(
                "{:?}: {} tool(s), {} failed",
                path,
                report.entries.len(),
                report.failure_count()
            );
            Ok((path.clone(), report))
        })
        .collect()
}

/// Load an inventory, attaching the recovery suggestion to any error
fn load(path: &Path) -> Result<Inventory> {
    Inventory::load(path).map_err(|e| match e.recovery_suggestion() {
        Some(hint) => anyhow!("{}\n{}", e, hint),
        None => anyhow!(e),
    })
}
