//! Date interval and non-working period models.
//!
//! This module contains the [`DateInterval`] type used for every accrual,
//! monthly window and availability range in the engine, and the
//! caller-supplied [`NonWorkingPeriod`] records that tag days as deemed
//! worked, absent, or excluded from prescribed work.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A closed range of calendar dates, inclusive of both ends.
///
/// The invariant `start <= end` is enforced at construction and the
/// interval is immutable afterwards.
///
/// # Example
///
/// ```
/// use leave_engine::models::DateInterval;
/// use chrono::NaiveDate;
///
/// let january = DateInterval::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// assert!(january.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())); // start
/// assert!(january.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())); // end
/// assert!(!january.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "IntervalBounds")]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct IntervalBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<IntervalBounds> for DateInterval {
    type Error = EngineError;

    fn try_from(bounds: IntervalBounds) -> EngineResult<Self> {
        DateInterval::new(bounds.start, bounds.end)
    }
}

impl DateInterval {
    /// Creates an interval, rejecting `start > end` as invalid input.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if start > end {
            return Err(EngineError::invalid_input(
                "interval",
                format!("start {} is after end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    /// A one-day interval.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The first day of the interval.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last day of the interval.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Checks if a date falls within the interval (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates every date of the interval in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

impl std::fmt::Display for DateInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// How a caller-tagged non-working day affects attendance.
///
/// Serialized as the numeric codes used on the wire: `1` deemed worked,
/// `2` absence, `3` excluded from prescribed work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NonWorkingCategory {
    /// Not worked, but counted as attended (e.g. statutory maternity leave).
    DeemedWorked,
    /// Not worked and counted against attendance.
    Absence,
    /// Removed from the prescribed working days altogether.
    ExcludedFromPrescribedWork,
}

impl NonWorkingCategory {
    /// The wire code for this category.
    pub fn code(self) -> u8 {
        match self {
            NonWorkingCategory::DeemedWorked => 1,
            NonWorkingCategory::Absence => 2,
            NonWorkingCategory::ExcludedFromPrescribedWork => 3,
        }
    }

    /// Precedence when periods of different categories cover the same day.
    /// Higher wins.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            NonWorkingCategory::DeemedWorked => 3,
            NonWorkingCategory::ExcludedFromPrescribedWork => 2,
            NonWorkingCategory::Absence => 1,
        }
    }
}

impl TryFrom<u8> for NonWorkingCategory {
    type Error = EngineError;

    fn try_from(code: u8) -> EngineResult<Self> {
        match code {
            1 => Ok(NonWorkingCategory::DeemedWorked),
            2 => Ok(NonWorkingCategory::Absence),
            3 => Ok(NonWorkingCategory::ExcludedFromPrescribedWork),
            other => Err(EngineError::invalid_input(
                "category",
                format!("unknown non-working category code {}", other),
            )),
        }
    }
}

impl From<NonWorkingCategory> for u8 {
    fn from(category: NonWorkingCategory) -> Self {
        category.code()
    }
}

/// A caller-supplied range of days tagged with a non-working category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonWorkingPeriod {
    /// How the days in this period count towards attendance.
    pub category: NonWorkingCategory,
    /// The days covered.
    pub interval: DateInterval,
}

impl NonWorkingPeriod {
    /// Creates a period of the given category.
    pub fn new(category: NonWorkingCategory, interval: DateInterval) -> Self {
        Self { category, interval }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_interval_rejects_start_after_end() {
        let result = DateInterval::new(date(2024, 2, 1), date(2024, 1, 31));
        match result {
            Err(EngineError::InvalidInput { field, message }) => {
                assert_eq!(field, "interval");
                assert!(message.contains("2024-02-01"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_single_day_interval_is_valid() {
        let interval = DateInterval::new(date(2024, 3, 4), date(2024, 3, 4)).unwrap();
        assert_eq!(interval, DateInterval::single_day(date(2024, 3, 4)));
        assert_eq!(interval.dates().count(), 1);
    }

    #[test]
    fn test_dates_are_inclusive_of_both_ends() {
        let interval = DateInterval::new(date(2024, 2, 27), date(2024, 3, 1)).unwrap();
        let dates: Vec<NaiveDate> = interval.dates().collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1)
            ]
        );
    }

    #[test]
    fn test_interval_display() {
        let interval = DateInterval::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        assert_eq!(interval.to_string(), "2024-01-01..=2024-12-31");
    }

    #[test]
    fn test_interval_deserialization_validates_order() {
        let ok: DateInterval =
            serde_json::from_str(r#"{"start":"2024-01-01","end":"2024-01-31"}"#).unwrap();
        assert_eq!(ok.end(), date(2024, 1, 31));

        let bad = serde_json::from_str::<DateInterval>(r#"{"start":"2024-02-01","end":"2024-01-31"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_category_codes_round_trip_through_serde() {
        let period = NonWorkingPeriod::new(
            NonWorkingCategory::ExcludedFromPrescribedWork,
            DateInterval::single_day(date(2024, 5, 2)),
        );
        let json = serde_json::to_value(period).unwrap();
        assert_eq!(json["category"], 3);

        let parsed: NonWorkingPeriod = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, period);
    }

    #[test]
    fn test_unknown_category_code_is_rejected() {
        let result = NonWorkingCategory::try_from(4);
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
        assert!(serde_json::from_str::<NonWorkingCategory>("0").is_err());
    }

    #[test]
    fn test_deemed_worked_takes_precedence() {
        assert!(
            NonWorkingCategory::DeemedWorked.precedence()
                > NonWorkingCategory::ExcludedFromPrescribedWork.precedence()
        );
        assert!(
            NonWorkingCategory::ExcludedFromPrescribedWork.precedence()
                > NonWorkingCategory::Absence.precedence()
        );
    }
}
