//! CSV export of waitlist entries.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::db::models::SignupEntry;

pub const CSV_HEADER: &str = "Name,Email,Phone,User Type,Reason,Timestamp";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// A rendered export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    pub fn new(records: &[SignupEntry], today: NaiveDate) -> Self {
        CsvExport {
            filename: export_filename(today),
            content: to_csv(records),
        }
    }
}

/// Header line, then one line per record. Every value is double-quoted and
/// embedded quotes are doubled. Lines are joined with `\n`, no trailing
/// newline.
pub fn to_csv(records: &[SignupEntry]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for record in records {
        let timestamp = format_timestamp(&record.timestamp);
        let cells = [
            record.name.as_str(),
            record.email.as_str(),
            record.phone.as_str(),
            record.user_type.as_str(),
            record.reason.as_deref().unwrap_or(""),
            timestamp.as_str(),
        ];
        let line = cells.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(",");
        lines.push(line);
    }

    lines.join("\n")
}

/// `resale-waitlist-YYYY-MM-DD.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("resale-waitlist-{}.csv", date.format("%Y-%m-%d"))
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}
