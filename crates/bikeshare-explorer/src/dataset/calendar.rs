//! Calendar fields derived from the trip start timestamp.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use polars::prelude::*;

/// Month number, 1 = January.
pub const MONTH_COLUMN: &str = "month";
/// Day of week, 0 = Monday.
pub const DAY_OF_WEEK_COLUMN: &str = "day_of_week";
/// Hour of day, 0-23.
pub const HOUR_COLUMN: &str = "hour";

const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Full month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full weekday names, Monday first.
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Name of a 1-based month number.
pub fn month_name(month: i32) -> Option<&'static str> {
    usize::try_from(month - 1)
        .ok()
        .and_then(|idx| MONTH_NAMES.get(idx).copied())
}

/// Name of a Monday-based day index.
pub fn day_name(day: i32) -> Option<&'static str> {
    usize::try_from(day)
        .ok()
        .and_then(|idx| DAY_NAMES.get(idx).copied())
}

/// Calendar fields of a single timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    pub month: i32,
    pub day_of_week: i32,
    pub hour: i32,
}

impl CalendarFields {
    pub fn of(ts: &NaiveDateTime) -> Self {
        Self {
            month: ts.month() as i32,
            day_of_week: ts.weekday().num_days_from_monday() as i32,
            hour: ts.hour() as i32,
        }
    }
}

/// Parse a start timestamp. Date-only values are taken as midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Build the `month`, `day_of_week` and `hour` columns for a frame.
///
/// Rows whose timestamp is missing or unparseable get nulls in all three.
pub(crate) fn derive_calendar_columns(
    df: &DataFrame,
    start_time: &str,
) -> PolarsResult<[Series; 3]> {
    let raw = df
        .column(start_time)?
        .as_materialized_series()
        .cast(&DataType::String)?;

    let fields: Vec<Option<CalendarFields>> = raw
        .str()?
        .into_iter()
        .map(|v| v.and_then(parse_timestamp).map(|ts| CalendarFields::of(&ts)))
        .collect();

    let months: Vec<Option<i32>> = fields.iter().map(|f| f.map(|f| f.month)).collect();
    let days: Vec<Option<i32>> = fields.iter().map(|f| f.map(|f| f.day_of_week)).collect();
    let hours: Vec<Option<i32>> = fields.iter().map(|f| f.map(|f| f.hour)).collect();

    Ok([
        Series::new(MONTH_COLUMN.into(), months),
        Series::new(DAY_OF_WEEK_COLUMN.into(), days),
        Series::new(HOUR_COLUMN.into(), hours),
    ])
}
