//! Date utilities: every record date is parsed once, at the boundary.
//!
//! Inputs may carry a time-of-day (`2019-01-02T10:30:00`, `2019-01-02 10:30`,
//! RFC 3339). Queries compare calendar dates only, so the time part is dropped
//! here and never reaches the store.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{LedgerError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date, ignoring any time-of-day component.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return Err(LedgerError::InvalidDate {
            input: input.to_string(),
            reason: "empty".to_string(),
        });
    }

    let date_err = match NaiveDate::parse_from_str(s, DATE_FORMAT) {
        Ok(d) => return Ok(d),
        Err(e) => e,
    };

    // RFC 3339 keeps the calendar date as written, not shifted to UTC.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| LedgerError::InvalidDate {
            input: input.to_string(),
            reason: date_err.to_string(),
        })
}

/// Format a date the way datasets store it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Serde adapter for record dates: writes `YYYY-MM-DD`, reads anything
/// [`parse_date`] accepts.
pub mod serde_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
