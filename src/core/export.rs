// src/core/export.rs — Date/description bucketed hours for spreadsheets

use chrono::NaiveDate;

use super::ledger::Ledger;
use super::time::duration_as_hours;
use crate::infra::config::ExportOrder;
use crate::infra::errors::WbsoError;

/// Summed hours for one (date, description) bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub description: String,
    pub hours: f64,
}

impl ExportRow {
    /// `<date>,,<description>,<hours>`. The empty column is reserved for a
    /// category.
    pub fn to_line(&self, precision: usize) -> String {
        format!(
            "{},,{},{:.*}",
            self.date.format("%Y-%m-%d"),
            csv_field(&self.description),
            precision,
            self.hours
        )
    }
}

/// Quote a field only when it would otherwise break the column layout.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Aggregate all sessions into export rows. Refused while a session runs.
pub fn aggregate(ledger: &Ledger, order: ExportOrder) -> Result<Vec<ExportRow>, WbsoError> {
    if ledger.is_open() {
        return Err(WbsoError::ExportWhileOpen);
    }

    let mut days: Vec<(NaiveDate, Vec<ExportRow>)> = Vec::new();
    for session in ledger.sessions() {
        let Some(end) = session.end else {
            return Err(WbsoError::ExportWhileOpen);
        };
        let date = session.start.date();
        let hours = duration_as_hours(session.start, end);

        let day = match days.iter().position(|(d, _)| *d == date) {
            Some(i) => i,
            None => {
                days.push((date, Vec::new()));
                days.len() - 1
            }
        };
        let rows = &mut days[day].1;
        match rows
            .iter_mut()
            .find(|r| r.description == session.description)
        {
            Some(row) => row.hours += hours,
            None => rows.push(ExportRow {
                date,
                description: session.description.clone(),
                hours,
            }),
        }
    }

    if order == ExportOrder::Sorted {
        days.sort_by_key(|(date, _)| *date);
        for (_, rows) in &mut days {
            rows.sort_by(|a, b| a.description.cmp(&b.description));
        }
    }

    let rows: Vec<ExportRow> = days.into_iter().flat_map(|(_, rows)| rows).collect();
    tracing::debug!(buckets = rows.len(), "export aggregated");
    Ok(rows)
}
