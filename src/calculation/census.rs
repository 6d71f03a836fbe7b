//! Working-day census over an accrual interval.
//!
//! Classifies every date of an interval once: weekend, statutory holiday,
//! company holiday, or prescribed working day, and for prescribed days
//! whether the caller tagged it as absent or excluded. Overlapping
//! non-working periods resolve by category precedence
//! (deemed worked > excluded > absence).

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{DateInterval, LeaveRequest, NonWorkingCategory, NonWorkingPeriod};

use super::holiday_lookup::HolidayLookup;
use super::period_arithmetic::{dates_within, intersect, is_weekday};

/// Day counts and date sets for one interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDayCensus {
    /// The interval surveyed.
    pub interval: DateInterval,
    /// Weekdays that are neither statutory nor company holidays.
    pub prescribed_days: u32,
    /// Prescribed days tagged as absence.
    pub absent_days: u32,
    /// Prescribed days tagged as excluded from prescribed work.
    pub excluded_days: u32,
    /// Prescribed dates tagged as absence.
    pub absence_dates: BTreeSet<NaiveDate>,
    /// Prescribed dates tagged as excluded.
    pub excluded_dates: BTreeSet<NaiveDate>,
    /// Weekday statutory holidays in the interval.
    pub statutory_holidays: BTreeSet<NaiveDate>,
    /// Company holidays in the interval.
    pub company_holidays: BTreeSet<NaiveDate>,
}

impl WorkingDayCensus {
    /// Surveys `interval` for `request`, fetching statutory holidays once.
    pub fn survey<L: HolidayLookup + ?Sized>(
        lookup: &L,
        interval: DateInterval,
        request: &LeaveRequest,
    ) -> EngineResult<Self> {
        let statutory = lookup.weekday_holidays(&interval)?;
        let company: BTreeSet<NaiveDate> = request.company_holidays.iter().copied().collect();
        Ok(Self::tally(
            interval,
            statutory,
            &company,
            &request.non_working_periods,
        ))
    }

    /// Builds the census from already-known holiday sets.
    pub fn tally(
        interval: DateInterval,
        statutory_holidays: BTreeSet<NaiveDate>,
        company_holidays: &BTreeSet<NaiveDate>,
        periods: &[NonWorkingPeriod],
    ) -> Self {
        let statutory_holidays = dates_within(&statutory_holidays, &interval);
        let company_holidays = dates_within(company_holidays, &interval);
        let relevant: Vec<(NonWorkingCategory, DateInterval)> = periods
            .iter()
            .filter_map(|p| intersect(&p.interval, &interval).map(|i| (p.category, i)))
            .collect();

        let mut prescribed_days = 0;
        let mut absence_dates = BTreeSet::new();
        let mut excluded_dates = BTreeSet::new();

        for date in interval.dates() {
            if !is_weekday(date)
                || statutory_holidays.contains(&date)
                || company_holidays.contains(&date)
            {
                continue;
            }
            prescribed_days += 1;

            let category = relevant
                .iter()
                .filter(|(_, span)| span.contains(date))
                .map(|(category, _)| *category)
                .max_by_key(|category| category.precedence());

            match category {
                Some(NonWorkingCategory::Absence) => {
                    absence_dates.insert(date);
                }
                Some(NonWorkingCategory::ExcludedFromPrescribedWork) => {
                    excluded_dates.insert(date);
                }
                Some(NonWorkingCategory::DeemedWorked) | None => {}
            }
        }

        Self {
            interval,
            prescribed_days,
            absent_days: absence_dates.len() as u32,
            excluded_days: excluded_dates.len() as u32,
            absence_dates,
            excluded_dates,
            statutory_holidays,
            company_holidays,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(start: NaiveDate, end: NaiveDate) -> DateInterval {
        DateInterval::new(start, end).unwrap()
    }

    fn january() -> DateInterval {
        interval(date(2024, 1, 1), date(2024, 1, 31))
    }

    #[test]
    fn test_plain_month_has_only_prescribed_days() {
        let census = WorkingDayCensus::tally(january(), BTreeSet::new(), &BTreeSet::new(), &[]);
        assert_eq!(census.prescribed_days, 23);
        assert_eq!(census.absent_days, 0);
        assert_eq!(census.excluded_days, 0);
    }

    #[test]
    fn test_statutory_and_company_holidays_reduce_prescribed_days() {
        let statutory = BTreeSet::from([date(2024, 1, 1)]);
        let company = BTreeSet::from([date(2024, 1, 2), date(2024, 1, 6)]);
        let census = WorkingDayCensus::tally(january(), statutory, &company, &[]);

        assert_eq!(census.prescribed_days, 21);
        assert_eq!(census.statutory_holidays.len(), 1);
        assert_eq!(census.company_holidays.len(), 2);
    }

    #[test]
    fn test_holidays_outside_interval_are_dropped() {
        let statutory = BTreeSet::from([date(2023, 12, 25), date(2024, 1, 1)]);
        let census = WorkingDayCensus::tally(january(), statutory, &BTreeSet::new(), &[]);
        assert_eq!(census.statutory_holidays, BTreeSet::from([date(2024, 1, 1)]));
    }

    #[test]
    fn test_absence_counts_only_prescribed_days() {
        // Friday 5th through Monday 8th: the weekend is not absence.
        let periods = [NonWorkingPeriod::new(
            NonWorkingCategory::Absence,
            interval(date(2024, 1, 5), date(2024, 1, 8)),
        )];
        let census = WorkingDayCensus::tally(january(), BTreeSet::new(), &BTreeSet::new(), &periods);

        assert_eq!(census.absent_days, 2);
        assert_eq!(
            census.absence_dates,
            BTreeSet::from([date(2024, 1, 5), date(2024, 1, 8)])
        );
    }

    #[test]
    fn test_periods_are_clipped_to_interval() {
        let periods = [NonWorkingPeriod::new(
            NonWorkingCategory::ExcludedFromPrescribedWork,
            interval(date(2023, 12, 1), date(2024, 1, 2)),
        )];
        let census = WorkingDayCensus::tally(january(), BTreeSet::new(), &BTreeSet::new(), &periods);
        assert_eq!(census.excluded_days, 2);
    }

    #[test]
    fn test_overlap_precedence() {
        let periods = [
            NonWorkingPeriod::new(
                NonWorkingCategory::Absence,
                interval(date(2024, 1, 8), date(2024, 1, 12)),
            ),
            NonWorkingPeriod::new(
                NonWorkingCategory::ExcludedFromPrescribedWork,
                interval(date(2024, 1, 10), date(2024, 1, 12)),
            ),
            NonWorkingPeriod::new(
                NonWorkingCategory::DeemedWorked,
                DateInterval::single_day(date(2024, 1, 12)),
            ),
        ];
        let census = WorkingDayCensus::tally(january(), BTreeSet::new(), &BTreeSet::new(), &periods);

        assert_eq!(census.absent_days, 2); // 8th, 9th
        assert_eq!(census.excluded_days, 2); // 10th, 11th
        assert!(!census.absence_dates.contains(&date(2024, 1, 12)));
        assert!(!census.excluded_dates.contains(&date(2024, 1, 12)));
    }

    #[test]
    fn test_absence_on_holiday_is_ignored() {
        let periods = [NonWorkingPeriod::new(
            NonWorkingCategory::Absence,
            DateInterval::single_day(date(2024, 1, 1)),
        )];
        let statutory = BTreeSet::from([date(2024, 1, 1)]);
        let census = WorkingDayCensus::tally(january(), statutory, &BTreeSet::new(), &periods);
        assert_eq!(census.absent_days, 0);
    }
}
