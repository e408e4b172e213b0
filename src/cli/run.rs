// src/cli/run.rs — Dispatch one command against the ledger

use chrono::NaiveDateTime;
use std::io::Write;

use super::{export, status, Command};
use crate::core::Ledger;
use crate::infra::config::ExportConfig;
use crate::infra::errors::WbsoError;
use crate::infra::store::LedgerStore;

/// Everything a command needs besides the ledger itself.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Moment `now` resolves to; also the day `HH:MM` times land on.
    pub now: NaiveDateTime,
    pub export: ExportConfig,
}

/// Run `command`, writing its user-facing output to `out`. On error the
/// ledger holds whatever was applied before the failure, which for every
/// command is nothing.
pub fn execute(
    ledger: &mut Ledger,
    command: Command,
    ctx: &RunContext,
    out: &mut impl Write,
) -> Result<(), WbsoError> {
    tracing::debug!(?command, "executing");
    let now = ctx.now;

    match command {
        Command::Show => status::write_report(ledger, out)?,
        Command::Start { start, description } => {
            ledger.start(&description, start, now)?;
            status::write_sessions(ledger, out)?;
        }
        Command::Log {
            start,
            end,
            description,
        } => {
            ledger.log(start, end, &description, now)?;
            status::write_sessions(ledger, out)?;
        }
        Command::Close { end } => {
            if !ledger.close(Some(end), now)? {
                writeln!(out, "No session to close.")?;
            }
            status::write_sessions(ledger, out)?;
        }
        Command::Cancel => {
            match ledger.cancel() {
                Some(session) => writeln!(out, "Cancelled: {session}")?,
                None => writeln!(out, "No session to cancel.")?,
            }
            status::write_sessions(ledger, out)?;
        }
        Command::Resume { index, start, end } => {
            if ledger.is_empty() {
                writeln!(out, "No session to resume.")?;
            } else {
                ledger.resume(index, start, end, now)?;
                status::write_sessions(ledger, out)?;
            }
        }
        Command::Delete { index } => {
            ledger.delete(index)?;
            writeln!(out, "Sessions:")?;
            status::write_sessions(ledger, out)?;
        }
        Command::Clear => {
            let count = ledger.clear();
            writeln!(out, "{count} sessions cleared.")?;
        }
        Command::Amend { index, description } => {
            ledger.amend(index, &description)?;
            status::write_sessions(ledger, out)?;
        }
        Command::Export => export::run_export(ledger, &ctx.export, out)?,
    }
    Ok(())
}

/// One full invocation: load (creating the file if missing), execute, and
/// save. The ledger is saved on every path, including no-ops and command
/// errors. The outer `Result` carries storage failures; the inner one the
/// command's own outcome.
pub async fn run_invocation(
    store: &LedgerStore,
    command: Command,
    ctx: &RunContext,
    out: &mut impl Write,
) -> anyhow::Result<Result<(), WbsoError>> {
    let (mut ledger, created) = store.load_or_create().await?;
    if created {
        writeln!(out, "Created new log file.")?;
    }

    let result = execute(&mut ledger, command, ctx, out);
    store.save(&ledger).await?;
    if let Err(e) = &result {
        tracing::debug!(error = %e, "command failed, ledger saved");
    }
    Ok(result)
}
