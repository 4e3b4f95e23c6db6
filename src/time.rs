//! Reconstruction of the time axis of wind products.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

use crate::error::InvalidInputError;

pub const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";

/// Years that render as exactly four digits in [`COMPACT_FORMAT`].
const COMPACT_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Converts elapsed seconds since `year-month-day 00:00:00` (UTC) into timestamps.
///
/// Fractional seconds are truncated toward zero, so every timestamp has a
/// one-second resolution. Both the reference date and every result must fall
/// within years 0..=9999.
pub fn seconds_to_datetime(
    t: &[f64],
    year: i32,
    month: u32,
    day: u32,
) -> Result<Vec<NaiveDateTime>, InvalidInputError> {
    let reference = NaiveDate::from_ymd_opt(year, month, day)
        .filter(|_| COMPACT_YEARS.contains(&year))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or(InvalidInputError::InvalidReferenceDate { year, month, day })?;

    t.iter()
        .enumerate()
        .map(|(index, &value)| {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidInputError::InvalidTime { index, value });
            }

            // Saturating cast; anything past i64 overflows chrono anyway
            let seconds = value.trunc() as i64;
            TimeDelta::try_seconds(seconds)
                .and_then(|delta| reference.checked_add_signed(delta))
                .filter(|dt| COMPACT_YEARS.contains(&dt.year()))
                .ok_or(InvalidInputError::TimeOverflow { index })
        })
        .collect()
}

/// Renders each timestamp as `YYYYMMDDHHMMSS`.
pub fn datetime_to_compact_string(timestamps: &[NaiveDateTime]) -> Vec<String> {
    timestamps
        .iter()
        .map(|dt| dt.format(COMPACT_FORMAT).to_string())
        .collect()
}

pub fn parse_compact_string(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, COMPACT_FORMAT)
}
