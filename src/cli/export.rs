// src/cli/export.rs — Spreadsheet export command
//
// Prints one `<date>,,<description>,<hours>` line per bucket on stdout so
// the output can be pasted or redirected straight into a spreadsheet.

use std::io::Write;

use super::status;
use crate::core::{export, Ledger};
use crate::infra::config::ExportConfig;
use crate::infra::errors::WbsoError;

pub fn run_export(
    ledger: &Ledger,
    config: &ExportConfig,
    out: &mut impl Write,
) -> Result<(), WbsoError> {
    let rows = match export::aggregate(ledger, config.order) {
        Ok(rows) => rows,
        Err(e @ WbsoError::ExportWhileOpen) => {
            status::write_sessions(ledger, out)?;
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    if rows.is_empty() {
        writeln!(out, "No sessions.")?;
        return Ok(());
    }
    for row in &rows {
        writeln!(out, "{}", row.to_line(config.precision))?;
    }
    tracing::info!(rows = rows.len(), "exported sessions");
    Ok(())
}
