use anyhow::Result;
use chrono::{Local, NaiveDate};
use nextup_core::models::parse_date;

/// The current date on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses an optional `YYYYMMDD` argument, falling back to today.
pub fn date_or_today(value: Option<&str>) -> Result<NaiveDate> {
    match value {
        Some(value) => Ok(parse_date(value)?),
        None => Ok(today()),
    }
}
