// src/core/ledger.rs — Session ledger and its open/idle state machine
//
// The ledger is either Idle (`open_index == None`) or Open, with exactly
// one running session at `open_index`. Every mutation keeps that index
// pointing at the session with no end time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::session::Session;
use super::time::TimeToken;
use crate::infra::errors::WbsoError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    sessions: Vec<Session>,
    #[serde(default)]
    open_index: Option<usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open_index
    }

    pub fn is_open(&self) -> bool {
        self.open_index.is_some()
    }

    pub fn open_session(&self) -> Option<&Session> {
        self.open_index.and_then(|i| self.sessions.get(i))
    }

    /// Latest end time across all sessions, independent of list order.
    pub fn last_end(&self) -> Option<NaiveDateTime> {
        self.sessions.iter().filter_map(|s| s.end).max()
    }

    pub fn resolve_time(
        &self,
        token: TimeToken,
        now: NaiveDateTime,
    ) -> Result<NaiveDateTime, WbsoError> {
        token.resolve(now, self.last_end())
    }

    /// Map a positional index onto the session list. Negative values count
    /// from the back, so `-1` is the most recent entry.
    pub fn resolve_index(&self, index: i64) -> Result<usize, WbsoError> {
        let len = self.sessions.len();
        let out_of_range = || WbsoError::IndexOutOfRange { index, len };
        let resolved = if index < 0 {
            let back = usize::try_from(index.unsigned_abs()).map_err(|_| out_of_range())?;
            len.checked_sub(back).ok_or_else(out_of_range)?
        } else {
            usize::try_from(index).map_err(|_| out_of_range())?
        };
        if resolved < len {
            Ok(resolved)
        } else {
            Err(out_of_range())
        }
    }

    /// Open a new session. Fails without touching state if one is running.
    pub fn start(
        &mut self,
        description: &str,
        start: Option<TimeToken>,
        now: NaiveDateTime,
    ) -> Result<usize, WbsoError> {
        if let Some(open) = self.open_session() {
            return Err(WbsoError::AlreadyOpen {
                session: open.to_string(),
            });
        }
        let start = self.resolve_time(start.unwrap_or(TimeToken::Now), now)?;

        self.sessions.push(Session::open(start, description));
        let index = self.sessions.len() - 1;
        self.open_index = Some(index);
        tracing::debug!(index, %start, "session started");
        Ok(index)
    }

    /// Close the running session. Returns `false` when there was none.
    pub fn close(
        &mut self,
        end: Option<TimeToken>,
        now: NaiveDateTime,
    ) -> Result<bool, WbsoError> {
        let Some(index) = self.open_index else {
            return Ok(false);
        };
        let end = self.resolve_time(end.unwrap_or(TimeToken::Now), now)?;
        let session = &mut self.sessions[index];
        if end < session.start {
            return Err(WbsoError::EndBeforeStart {
                start: session.start,
                end,
            });
        }

        session.end = Some(end);
        self.open_index = None;
        tracing::debug!(index, %end, "session closed");
        Ok(true)
    }

    /// Drop the running session entirely.
    pub fn cancel(&mut self) -> Option<Session> {
        let index = self.open_index?;
        Some(self.remove_at(index))
    }

    /// Record a finished session. Does not affect the running one.
    pub fn log(
        &mut self,
        start: TimeToken,
        end: TimeToken,
        description: &str,
        now: NaiveDateTime,
    ) -> Result<usize, WbsoError> {
        let start = self.resolve_time(start, now)?;
        let end = self.resolve_time(end, now)?;
        if end < start {
            return Err(WbsoError::EndBeforeStart { start, end });
        }

        self.sessions.push(Session::closed(start, end, description));
        let index = self.sessions.len() - 1;
        tracing::debug!(index, %start, %end, "session logged");
        Ok(index)
    }

    /// Replace a session's description. Returns the previous one.
    pub fn amend(&mut self, index: i64, description: &str) -> Result<String, WbsoError> {
        let index = self.resolve_index(index)?;
        let previous = std::mem::replace(
            &mut self.sessions[index].description,
            description.to_string(),
        );
        tracing::debug!(index, "session amended");
        Ok(previous)
    }

    /// Start (or, with an end time, log) a new session carrying over only
    /// the description of `sessions[index]`.
    pub fn resume(
        &mut self,
        index: i64,
        start: Option<TimeToken>,
        end: Option<TimeToken>,
        now: NaiveDateTime,
    ) -> Result<usize, WbsoError> {
        let description = self.sessions[self.resolve_index(index)?].description.clone();
        match end {
            Some(end) => self.log(start.unwrap_or(TimeToken::Now), end, &description, now),
            None => self.start(&description, start, now),
        }
    }

    pub fn delete(&mut self, index: i64) -> Result<Session, WbsoError> {
        let index = self.resolve_index(index)?;
        Ok(self.remove_at(index))
    }

    /// Remove everything. Returns how many sessions were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.sessions.len();
        self.sessions.clear();
        self.open_index = None;
        tracing::debug!(count, "ledger cleared");
        count
    }

    /// One `"<index>. <session>"` line per session, in storage order.
    pub fn render(&self) -> String {
        self.sessions
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{i}. {s}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check the open-session invariant on a ledger read from disk.
    pub fn validate(&self) -> Result<(), WbsoError> {
        if let Some(index) = self.open_index {
            match self.sessions.get(index) {
                None => {
                    return Err(WbsoError::CorruptLedger(format!(
                        "open session index {index} out of range ({} sessions)",
                        self.sessions.len()
                    )))
                }
                Some(s) if !s.is_open() => {
                    return Err(WbsoError::CorruptLedger(format!(
                        "open session index {index} points at a closed session"
                    )))
                }
                Some(_) => {}
            }
        }
        let stray = self
            .sessions
            .iter()
            .enumerate()
            .find(|(i, s)| s.is_open() && Some(*i) != self.open_index);
        if let Some((i, _)) = stray {
            return Err(WbsoError::CorruptLedger(format!(
                "session {i} has no end time but is not the open session"
            )));
        }
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Session {
        let removed = self.sessions.remove(index);
        self.open_index = match self.open_index {
            Some(open) if open == index => None,
            Some(open) if open > index => Some(open - 1),
            other => other,
        };
        tracing::debug!(index, open_index = ?self.open_index, "session removed");
        removed
    }
}
