// src/core/session.rs — A single recorded work interval

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

const START_FORMAT: &str = "%a, %d %b %H:%M:%S";
const END_FORMAT: &str = "%H:%M:%S";
const NEXT_DAY_END_FORMAT: &str = "%d %b %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub start: NaiveDateTime,
    /// `None` while the session is still running.
    pub end: Option<NaiveDateTime>,
    pub description: String,
}

impl Session {
    pub fn open(start: NaiveDateTime, description: impl Into<String>) -> Self {
        Self {
            start,
            end: None,
            description: description.into(),
        }
    }

    pub fn closed(
        start: NaiveDateTime,
        end: NaiveDateTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end: Some(end),
            description: description.into(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ", self.start.format(START_FORMAT))?;
        match self.end {
            None => f.write_str("...")?,
            Some(end) if end.date() != self.start.date() => {
                write!(f, "{}", end.format(NEXT_DAY_END_FORMAT))?
            }
            Some(end) => write!(f, "{}", end.format(END_FORMAT))?,
        }
        write!(f, ": {}", self.description)
    }
}
