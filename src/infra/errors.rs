// src/infra/errors.rs — Error types for wbso

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WbsoError {
    // Ledger state errors
    #[error("There is already an open session:\n{session}")]
    AlreadyOpen { session: String },

    #[error("Session index {index} out of range ({len} sessions)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Session ends before it starts: {end} < {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Cannot export while a session is open.")]
    ExportWhileOpen,

    // User input errors
    #[error("Malformed time '{token}': expected 'now', 'last' or HH:MM")]
    MalformedTime { token: String },

    #[error("No closed session to take the 'last' end time from")]
    NoClosedSession,

    #[error("Invalid arguments: {0}")]
    Usage(String),

    // Infra
    #[error("Corrupt ledger: {0}")]
    CorruptLedger(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ledger encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WbsoError {
    /// Errors raised by a command against a healthy ledger. These are
    /// reported to the user while the ledger is still saved.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            WbsoError::CorruptLedger(_) | WbsoError::Io(_) | WbsoError::Json(_)
        )
    }
}
