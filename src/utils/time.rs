use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{Error, Result};

const INTERVIEW_DATE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Accepts the `datetime-local` form inputs send, with or without seconds,
/// and full RFC 3339 timestamps (converted to UTC wall time).
pub fn parse_interview_date(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    for format in INTERVIEW_DATE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc).naive_utc())
        .map_err(|_| Error::BadRequest(format!("Invalid interview date: {}", raw)))
}
