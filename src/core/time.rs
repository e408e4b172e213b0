// src/core/time.rs — Time tokens accepted on the command line

use chrono::{NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;

use crate::infra::errors::WbsoError;

/// A time as typed by the user: `now`, `last`, or `HH:MM` today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeToken {
    Now,
    /// The latest end time recorded in the ledger.
    Last,
    At(NaiveTime),
}

impl FromStr for TimeToken {
    type Err = WbsoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "now" => Ok(TimeToken::Now),
            "last" => Ok(TimeToken::Last),
            _ => NaiveTime::parse_from_str(s, "%H:%M")
                .map(TimeToken::At)
                .map_err(|_| WbsoError::MalformedTime {
                    token: s.to_string(),
                }),
        }
    }
}

impl fmt::Display for TimeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeToken::Now => f.write_str("now"),
            TimeToken::Last => f.write_str("last"),
            TimeToken::At(t) => write!(f, "{}", t.format("%H:%M")),
        }
    }
}

impl TimeToken {
    /// Resolve against `now`. `last_end` is the ledger's latest end time.
    pub fn resolve(
        self,
        now: NaiveDateTime,
        last_end: Option<NaiveDateTime>,
    ) -> Result<NaiveDateTime, WbsoError> {
        match self {
            TimeToken::Now => Ok(now),
            TimeToken::Last => last_end.ok_or(WbsoError::NoClosedSession),
            TimeToken::At(t) => Ok(now.date().and_time(t)),
        }
    }
}

/// Fractional hours elapsed between two timestamps.
pub fn duration_as_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let elapsed = end - start;
    match elapsed.num_microseconds() {
        Some(us) => us as f64 / 3_600_000_000.0,
        None => elapsed.num_seconds() as f64 / 3_600.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("now".parse::<TimeToken>().unwrap(), TimeToken::Now);
        assert_eq!("last".parse::<TimeToken>().unwrap(), TimeToken::Last);
    }

    #[test]
    fn test_parse_clock_time() {
        let token: TimeToken = "09:30".parse().unwrap();
        assert_eq!(
            token,
            TimeToken::At(NaiveTime::from_hms_opt(9, 30, 0).unwrap())
        );
        assert_eq!(token.to_string(), "09:30");
    }

    #[test]
    fn test_parse_malformed() {
        for bad in ["", "tomorrow", "25:00", "12:61", "12", "12:30:15", "Now"] {
            let err = bad.parse::<TimeToken>().unwrap_err();
            assert!(
                matches!(err, WbsoError::MalformedTime { ref token } if token == bad),
                "expected MalformedTime for {bad:?}"
            );
        }
    }

    #[test]
    fn test_resolve_clock_time_today_seconds_zeroed() {
        let now = at(17, 42, 13);
        let resolved = "08:15".parse::<TimeToken>().unwrap().resolve(now, None).unwrap();
        assert_eq!(resolved, at(8, 15, 0));
        assert_eq!(resolved.second(), 0);
    }

    #[test]
    fn test_resolve_now() {
        let now = at(10, 0, 5);
        assert_eq!(TimeToken::Now.resolve(now, None).unwrap(), now);
    }

    #[test]
    fn test_resolve_last() {
        let now = at(18, 0, 0);
        assert_eq!(
            TimeToken::Last.resolve(now, Some(at(12, 0, 0))).unwrap(),
            at(12, 0, 0)
        );
        assert!(matches!(
            TimeToken::Last.resolve(now, None),
            Err(WbsoError::NoClosedSession)
        ));
    }

    #[test]
    fn test_duration_as_hours() {
        assert!((duration_as_hours(at(9, 0, 0), at(10, 30, 0)) - 1.5).abs() < 1e-9);
        assert!((duration_as_hours(at(9, 0, 0), at(9, 0, 36)) - 0.01).abs() < 1e-9);
        assert_eq!(duration_as_hours(at(9, 0, 0), at(9, 0, 0)), 0.0);
    }

    #[test]
    fn test_duration_as_hours_keeps_microseconds() {
        let start = at(9, 0, 0);
        let end = NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_micro_opt(9, 0, 0, 360)
            .unwrap();
        assert!((duration_as_hours(start, end) - 1e-7).abs() < 1e-15);
    }

    #[test]
    fn test_duration_as_hours_beyond_microsecond_range() {
        let start = NaiveDate::from_ymd_opt(-262_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(262_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let hours = duration_as_hours(start, end);
        assert!((hours - (end - start).num_hours() as f64).abs() < 1.0);
    }
}
