//! Parsing of textual repeat rules.
//!
//! A rule is a space separated list of tokens whose first token selects the
//! kind:
//!
//! | rule          | meaning                                              |
//! |---------------|------------------------------------------------------|
//! | `y`           | every year on the same day                           |
//! | `d 7`         | every 7 days (1 to 400)                              |
//! | `w 1,3,7`     | on Mondays, Wednesdays and Sundays                   |
//! | `m 1,-1`      | on the 1st and the last day of every month          |
//! | `m 15 1,6`    | on the 15th of January and June                      |
//!
//! Negative days of month count back from the end of the month: `-1` is the
//! last day and `-2` the second-to-last.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::RuleError;

pub const MAX_DAY_INTERVAL: u32 = 400;

const DAY_INTERVAL_RANGE: RangeInclusive<i64> = 1..=MAX_DAY_INTERVAL as i64;
const WEEKDAY_RANGE: RangeInclusive<i64> = 1..=7;
const DAY_OF_MONTH_RANGE: RangeInclusive<i64> = -2..=31;
const MONTH_RANGE: RangeInclusive<i64> = 1..=12;

/// A validated repeat rule.
///
/// Sets are ordered so that iteration and [`fmt::Display`] are deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatRule {
    Yearly,
    EveryNDays {
        n: u32,
    },
    /// ISO weekday numbers, 1 = Monday through 7 = Sunday.
    Weekly {
        weekdays: BTreeSet<u32>,
    },
    Monthly {
        days_of_month: BTreeSet<i32>,
        months: BTreeSet<u32>,
    },
}

impl RepeatRule {
    /// Short name of the rule kind, used in logs and listings.
    pub fn kind(&self) -> &'static str {
        match self {
            RepeatRule::Yearly => "yearly",
            RepeatRule::EveryNDays { .. } => "daily",
            RepeatRule::Weekly { .. } => "weekly",
            RepeatRule::Monthly { .. } => "monthly",
        }
    }
}

/// Parses a raw rule string into a [`RepeatRule`].
///
/// # Errors
///
/// * [`RuleError::EmptyRule`] for `""`
/// * [`RuleError::UnknownRuleKind`] when the first token is not `y`, `d`, `w` or `m`
/// * [`RuleError::MalformedRule`] for a wrong number of arguments or a non-integer value
/// * [`RuleError::OutOfRangeValue`] for values outside their allowed range
pub fn parse(raw: &str) -> Result<RepeatRule, RuleError> {
    if raw.is_empty() {
        return Err(RuleError::EmptyRule);
    }

    let tokens: Vec<&str> = raw.split(' ').collect();
    let args = &tokens[1..];

    match tokens[0] {
        "y" => Ok(RepeatRule::Yearly),
        "d" => {
            expect_args(raw, args, 1..=1)?;
            let n = parse_number(raw, args[0])?;
            let n = check_range("day interval", n, DAY_INTERVAL_RANGE, "1..=400")?;
            Ok(RepeatRule::EveryNDays { n: n as u32 })
        }
        "w" => {
            expect_args(raw, args, 1..=1)?;
            let weekdays = parse_list(raw, args[0], |value| {
                check_range("weekday", value, WEEKDAY_RANGE, "1..=7").map(|w| w as u32)
            })?;
            Ok(RepeatRule::Weekly { weekdays })
        }
        "m" => {
            expect_args(raw, args, 1..=2)?;
            let days_of_month = parse_list(raw, args[0], |value| {
                if value == 0 {
                    return Err(out_of_range("day of month", value, "-2..=31 except 0"));
                }
                check_range("day of month", value, DAY_OF_MONTH_RANGE, "-2..=31 except 0")
                    .map(|d| d as i32)
            })?;
            let months = match args.get(1) {
                Some(list) => parse_list(raw, list, |value| {
                    check_range("month", value, MONTH_RANGE, "1..=12").map(|m| m as u32)
                })?,
                None => (1..=12).collect(),
            };
            Ok(RepeatRule::Monthly {
                days_of_month,
                months,
            })
        }
        other => Err(RuleError::UnknownRuleKind(other.to_string())),
    }
}

impl FromStr for RepeatRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatRule::Yearly => write!(f, "y"),
            RepeatRule::EveryNDays { n } => write!(f, "d {}", n),
            RepeatRule::Weekly { weekdays } => write!(f, "w {}", join(weekdays)),
            RepeatRule::Monthly {
                days_of_month,
                months,
            } => {
                write!(f, "m {}", join(days_of_month))?;
                if months.len() < 12 {
                    write!(f, " {}", join(months))?;
                }
                Ok(())
            }
        }
    }
}

fn join<T: fmt::Display>(values: &BTreeSet<T>) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn expect_args(raw: &str, args: &[&str], expected: RangeInclusive<usize>) -> Result<(), RuleError> {
    if expected.contains(&args.len()) {
        return Ok(());
    }

    let wanted = if expected.start() == expected.end() {
        expected.start().to_string()
    } else {
        format!("{} to {}", expected.start(), expected.end())
    };
    Err(RuleError::malformed(
        raw,
        format!("expected {} argument(s), got {}", wanted, args.len()),
    ))
}

fn parse_number(raw: &str, token: &str) -> Result<i64, RuleError> {
    token
        .parse::<i64>()
        .map_err(|_| RuleError::malformed(raw, format!("'{}' is not an integer", token)))
}

fn parse_list<T, F>(raw: &str, list: &str, validate: F) -> Result<BTreeSet<T>, RuleError>
where
    T: Ord,
    F: Fn(i64) -> Result<T, RuleError>,
{
    list.split(',')
        .map(|token| parse_number(raw, token).and_then(&validate))
        .collect()
}

fn check_range(
    field: &'static str,
    value: i64,
    range: RangeInclusive<i64>,
    allowed: &'static str,
) -> Result<i64, RuleError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(out_of_range(field, value, allowed))
    }
}

fn out_of_range(field: &'static str, value: i64, allowed: &'static str) -> RuleError {
    RuleError::OutOfRangeValue {
        field,
        value,
        allowed,
    }
}
