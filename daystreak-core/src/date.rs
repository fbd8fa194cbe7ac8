//! Date formatting helpers
//!
//! - Persisted dates: "2024-01-01"
//! - Header label: "Monday, January 1, 2024"

use chrono::NaiveDate;

use crate::error::{CoreError, Result};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), ISO_FORMAT).map_err(|e| {
        CoreError::validation("date", format!("'{}' is not a YYYY-MM-DD date: {}", input, e))
    })
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Long form used for the date header
pub fn format_date_long(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
