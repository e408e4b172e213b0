// src/cli/status.rs — Session listing

use std::io::Write;

use crate::core::Ledger;

/// Full report shown when wbso is called without arguments.
pub fn write_report(ledger: &Ledger, out: &mut impl Write) -> std::io::Result<()> {
    if let Some(open) = ledger.open_session() {
        writeln!(out, "Open session:\n{open}")?;
    }
    if ledger.is_empty() {
        writeln!(out, "No sessions.")
    } else {
        writeln!(out, "Sessions:")?;
        write_sessions(ledger, out)
    }
}

/// The indexed session list, or a notice when there is nothing to list.
pub fn write_sessions(ledger: &Ledger, out: &mut impl Write) -> std::io::Result<()> {
    if ledger.is_empty() {
        writeln!(out, "No sessions.")
    } else {
        writeln!(out, "{}", ledger.render())
    }
}
