//! Text form of timestamps: `yyyy-MM-dd HH:mm`, parsed strictly.

use chrono::{DateTime, Datelike, NaiveDateTime};
use thiserror::Error;

use crate::model::Ms;

/// chrono pattern for `yyyy-MM-dd HH:mm`.
pub const FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("invalid date/time {0:?}: expected yyyy-MM-dd HH:mm")]
    Format(String),
    #[error("date/time {0:?} outside years 1..=9999")]
    OutOfRange(String),
}

/// Out-of-range fields (month 13, hour 24, Feb 30) are errors, never rolled
/// over into the next unit.
pub fn parse_datetime(input: &str) -> Result<Ms, DateTimeError> {
    let input = input.trim();
    let naive = NaiveDateTime::parse_from_str(input, FORMAT)
        .map_err(|_| DateTimeError::Format(input.to_string()))?;
    if !(1..=9999).contains(&naive.year()) {
        return Err(DateTimeError::OutOfRange(input.to_string()));
    }
    Ok(naive.and_utc().timestamp_millis())
}

pub fn format_ms(ms: Ms) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(dt) => dt.naive_utc().format(FORMAT).to_string(),
        None => ms.to_string(),
    }
}
