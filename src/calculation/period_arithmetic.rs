//! Calendar and period arithmetic.
//!
//! Pure helpers over closed [`DateInterval`]s: weekday filtering with
//! holiday exclusion, intersection, inclusive lengths and month/year
//! shifting. Every interval is closed on both ends; `days_between` of a
//! single-day interval is 1.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::models::DateInterval;

/// Returns true for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Counts the Monday-Friday dates in `interval` that are not in `holidays`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::weekdays_only;
/// use leave_engine::models::DateInterval;
/// use chrono::NaiveDate;
/// use std::collections::BTreeSet;
///
/// // 2024-01-01 is a Monday.
/// let week = DateInterval::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
/// )
/// .unwrap();
/// let holidays = BTreeSet::from([NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()]);
///
/// assert_eq!(weekdays_only(&week, &BTreeSet::new()), 5);
/// assert_eq!(weekdays_only(&week, &holidays), 4);
/// ```
pub fn weekdays_only(interval: &DateInterval, holidays: &BTreeSet<NaiveDate>) -> u32 {
    interval
        .dates()
        .filter(|d| is_weekday(*d) && !holidays.contains(d))
        .count() as u32
}

/// The overlap of two intervals, or `None` when they are disjoint.
pub fn intersect(a: &DateInterval, b: &DateInterval) -> Option<DateInterval> {
    let start = a.start().max(b.start());
    let end = a.end().min(b.end());
    DateInterval::new(start, end).ok()
}

/// Inclusive length in days: `end - start + 1`.
pub fn days_between(interval: &DateInterval) -> i64 {
    (interval.end() - interval.start()).num_days() + 1
}

/// Adds calendar months, clamping to the last day of shorter months.
pub fn add_months(date: NaiveDate, months: u32) -> EngineResult<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| out_of_range(date))
}

/// Adds whole years as twelve calendar months each (02-29 lands on 02-28).
pub fn add_years(date: NaiveDate, years: u32) -> EngineResult<NaiveDate> {
    add_months(date, years * 12)
}

/// Subtracts whole years as twelve calendar months each.
pub fn sub_years(date: NaiveDate, years: u32) -> EngineResult<NaiveDate> {
    date.checked_sub_months(Months::new(years * 12))
        .ok_or_else(|| out_of_range(date))
}

/// The previous calendar day.
pub fn day_before(date: NaiveDate) -> EngineResult<NaiveDate> {
    date.checked_sub_days(Days::new(1))
        .ok_or_else(|| out_of_range(date))
}

/// The next calendar day.
pub fn day_after(date: NaiveDate) -> EngineResult<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| out_of_range(date))
}

/// The year that starts on `start`: `[start, start + 1 year - 1 day]`.
pub fn year_starting(start: NaiveDate) -> EngineResult<DateInterval> {
    DateInterval::new(start, day_before(add_years(start, 1)?)?)
}

/// The year that ends the day before `next_start`.
pub fn year_ending_before(next_start: NaiveDate) -> EngineResult<DateInterval> {
    DateInterval::new(sub_years(next_start, 1)?, day_before(next_start)?)
}

/// The dates of `dates` that fall inside `interval`.
pub fn dates_within(dates: &BTreeSet<NaiveDate>, interval: &DateInterval) -> BTreeSet<NaiveDate> {
    dates
        .range(interval.start()..=interval.end())
        .copied()
        .collect()
}

fn out_of_range(date: NaiveDate) -> EngineError {
    EngineError::invalid_input(
        "date",
        format!("date arithmetic from {} leaves the supported range", date),
    )
}
