//! Next-occurrence calculation for [`RepeatRule`]s.
//!
//! Every function here is a pure computation over its arguments, so the
//! calculator can be called from any number of tasks at once.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::RuleError;
use crate::rule::{self, RepeatRule};

/// Leap days can be up to eight years apart (2096 -> 2104), so a monthly
/// rule that has produced nothing within this many years never will.
const MONTHLY_SEARCH_YEARS: i32 = 8;

/// Last year that fits the `YYYYMMDD` date format.
pub const MAX_YEAR: i32 = 9999;

/// Parses `raw` and computes the next occurrence.
///
/// An empty rule yields [`RuleError::EmptyRule`], which callers should read
/// as "the task does not repeat".
pub fn next_date_from_str(
    anchor: NaiveDate,
    reference: NaiveDate,
    raw: &str,
) -> Result<NaiveDate, RuleError> {
    let rule = rule::parse(raw)?;
    next_date(anchor, reference, &rule)
}

/// Computes the first occurrence of `rule` strictly after `reference`.
///
/// `anchor` is the task's own date. Yearly and day-interval rules step
/// forward from it; weekly rules ignore it; monthly rules additionally
/// require the result to be strictly after it. A result past [`MAX_YEAR`]
/// is reported as [`RuleError::NoOccurrenceFound`].
pub fn next_date(
    anchor: NaiveDate,
    reference: NaiveDate,
    rule: &RepeatRule,
) -> Result<NaiveDate, RuleError> {
    let next = match rule {
        RepeatRule::Yearly => next_yearly(anchor, reference),
        RepeatRule::EveryNDays { n } => next_every_n_days(anchor, reference, *n),
        RepeatRule::Weekly { weekdays } => next_weekly(reference, |day| weekdays.contains(&day)),
        RepeatRule::Monthly {
            days_of_month,
            months,
        } => next_monthly(anchor, reference, days_of_month, months),
    }?;

    // Stored dates are exactly eight digits.
    if next.year() > MAX_YEAR {
        return Err(RuleError::NoOccurrenceFound);
    }

    tracing::trace!(%anchor, %reference, kind = rule.kind(), %next, "computed next date");
    Ok(next)
}

fn next_yearly(anchor: NaiveDate, reference: NaiveDate) -> Result<NaiveDate, RuleError> {
    let mut candidate = anchor;
    loop {
        candidate = normalized_date(candidate.year() + 1, candidate.month() as i32, candidate.day() as i32)
            .ok_or(RuleError::NoOccurrenceFound)?;
        if candidate > reference {
            return Ok(candidate);
        }
    }
}

fn next_every_n_days(anchor: NaiveDate, reference: NaiveDate, n: u32) -> Result<NaiveDate, RuleError> {
    let step = Duration::days(i64::from(n));
    let mut candidate = anchor;
    loop {
        candidate = candidate
            .checked_add_signed(step)
            .ok_or(RuleError::NoOccurrenceFound)?;
        if candidate > reference {
            return Ok(candidate);
        }
    }
}

fn next_weekly<F>(reference: NaiveDate, matches: F) -> Result<NaiveDate, RuleError>
where
    F: Fn(u32) -> bool,
{
    let mut candidate = reference;
    for _ in 0..7 {
        candidate = candidate.succ_opt().ok_or(RuleError::NoOccurrenceFound)?;
        if matches(candidate.weekday().number_from_monday()) {
            return Ok(candidate);
        }
    }
    Err(RuleError::NoOccurrenceFound)
}

fn next_monthly(
    anchor: NaiveDate,
    reference: NaiveDate,
    days_of_month: &BTreeSet<i32>,
    months: &BTreeSet<u32>,
) -> Result<NaiveDate, RuleError> {
    let floor = reference.max(anchor);
    let last_year = floor.year() + MONTHLY_SEARCH_YEARS;

    for year in reference.year()..=last_year {
        let mut candidates: Vec<NaiveDate> = months
            .iter()
            .flat_map(|&month| {
                days_of_month
                    .iter()
                    .filter_map(move |&day| day_in_month(year, month, day))
            })
            .collect();
        candidates.sort_unstable();

        if let Some(found) = candidates.into_iter().find(|date| *date > floor) {
            return Ok(found);
        }
    }

    Err(RuleError::NoOccurrenceFound)
}

/// Resolves a day-of-month rule value within `(year, month)`.
///
/// Positive days count from the 1st. Negative days target the following
/// month so that overflow normalization lands on the end of `month`:
/// `-1` becomes day 0 of the next month (the last day) and `-2` day -1
/// (the second-to-last). Returns `None` if the result spills out of `month`,
/// e.g. the 31st of April.
fn day_in_month(year: i32, month: u32, day: i32) -> Option<NaiveDate> {
    let date = if day > 0 {
        normalized_date(year, month as i32, day)?
    } else {
        normalized_date(year, month as i32 + 1, day + 1)?
    };
    (date.month() == month).then_some(date)
}

/// Builds a date from possibly out-of-range components, carrying overflow
/// into the neighbouring months and years: `(2025, 2, 29)` is March 1st and
/// `(2024, 3, 0)` is February 29th.
fn normalized_date(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    let month_index = month - 1;
    let year = year.checked_add(month_index.div_euclid(12))?;
    let month = month_index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_signed(Duration::days(i64::from(day) - 1))
}
