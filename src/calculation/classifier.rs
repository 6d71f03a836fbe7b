//! Shared accrual classification pieces.
//!
//! Both accrual bases end in the same attendance decision once a full
//! accrual year is available; this module holds that decision and the
//! [`AccrualClassifier`] trait the engine dispatches on.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AccrualContext, AccrualMetrics, AnnualContext, ClassifiedAccrual, FlowStep, LeaveRequest,
    MonthlyContext,
};

use super::census::WorkingDayCensus;
use super::metrics::{attendance_rate, prescribed_working_ratio, ratio_threshold};
use super::period_arithmetic::{day_after, year_starting};

/// Turns a request into exactly one accrual context.
pub trait AccrualClassifier {
    /// Classifies a validated request.
    fn classify(&self, request: &LeaveRequest) -> EngineResult<ClassifiedAccrual>;
}

/// Attendance rate and prescribed working ratio of a census.
pub(crate) fn census_ratios(census: &WorkingDayCensus) -> EngineResult<(Decimal, Decimal)> {
    let ar = attendance_rate(census.prescribed_days, census.absent_days, census.excluded_days)?;
    let pwr = prescribed_working_ratio(census.prescribed_days, census.excluded_days)?;
    Ok((ar, pwr))
}

/// A monthly context over the census interval.
pub(crate) fn monthly_context(census: WorkingDayCensus, metrics: AccrualMetrics) -> MonthlyContext {
    MonthlyContext {
        metrics,
        absence_dates: census.absence_dates,
        excluded_dates: census.excluded_dates,
        company_holidays: census.company_holidays,
        statutory_holidays: census.statutory_holidays,
    }
}

/// Decides among monthly, adjusted and full annual leave for a completed
/// accrual year.
///
/// `AR < 0.8` falls back to monthly leave over the accrual year;
/// otherwise `PWR < 0.8` scales the annual entitlement; otherwise the full
/// entitlement applies.
pub(crate) fn decide_annual(
    census: WorkingDayCensus,
    service_years: u32,
    flow: &mut Vec<FlowStep>,
) -> EngineResult<AccrualContext> {
    let (ar, pwr) = census_ratios(&census)?;
    let metrics = AccrualMetrics {
        service_years,
        accrual_interval: census.interval,
        attendance_rate: Some(ar),
        prescribed_working_ratio: Some(pwr),
    };
    debug!(
        accrual_interval = %census.interval,
        attendance_rate = %ar,
        prescribed_working_ratio = %pwr,
        service_years,
        "Evaluating completed accrual year"
    );

    if ar < ratio_threshold() {
        flow.push(FlowStep::UnderAttendanceRate);
        return Ok(AccrualContext::Monthly(monthly_context(census, metrics)));
    }

    let availability_interval = year_starting(day_after(census.interval.end())?)?;
    let context = AnnualContext {
        metrics,
        availability_interval,
    };

    if pwr < ratio_threshold() {
        flow.push(FlowStep::UnderPrescribedWorkingRatio);
        Ok(AccrualContext::AdjustedAnnual(context))
    } else {
        flow.push(FlowStep::FullEntitlement);
        Ok(AccrualContext::FullAnnual(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DateInterval, LeaveType, NonWorkingCategory, NonWorkingPeriod};
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn year_2023() -> DateInterval {
        DateInterval::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap()
    }

    fn census_with(periods: &[NonWorkingPeriod]) -> WorkingDayCensus {
        WorkingDayCensus::tally(year_2023(), BTreeSet::new(), &BTreeSet::new(), periods)
    }

    fn period(category: NonWorkingCategory, start: NaiveDate, end: NaiveDate) -> NonWorkingPeriod {
        NonWorkingPeriod::new(category, DateInterval::new(start, end).unwrap())
    }

    #[test]
    fn test_full_attendance_is_full_entitlement() {
        let mut flow = vec![];
        let context = decide_annual(census_with(&[]), 3, &mut flow).unwrap();

        assert_eq!(context.leave_type(), LeaveType::FullAnnual);
        assert_eq!(flow, vec![FlowStep::FullEntitlement]);
        match context {
            AccrualContext::FullAnnual(ctx) => {
                assert_eq!(ctx.metrics.service_years, 3);
                assert_eq!(
                    ctx.availability_interval,
                    DateInterval::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap()
                );
            }
            _ => panic!("Expected FullAnnual context"),
        }
    }

    #[test]
    fn test_low_attendance_falls_back_to_monthly() {
        // 2023 has 260 weekdays; 3 absent months puts attendance under 80%.
        let mut flow = vec![];
        let census = census_with(&[period(
            NonWorkingCategory::Absence,
            date(2023, 3, 1),
            date(2023, 5, 31),
        )]);
        let context = decide_annual(census, 1, &mut flow).unwrap();

        assert_eq!(context.leave_type(), LeaveType::Monthly);
        assert_eq!(flow, vec![FlowStep::UnderAttendanceRate]);
    }

    #[test]
    fn test_large_exclusion_adjusts_annual_leave() {
        let mut flow = vec![];
        let census = census_with(&[period(
            NonWorkingCategory::ExcludedFromPrescribedWork,
            date(2023, 1, 1),
            date(2023, 3, 31),
        )]);
        let context = decide_annual(census, 1, &mut flow).unwrap();

        assert_eq!(context.leave_type(), LeaveType::AdjustedAnnual);
        assert_eq!(flow, vec![FlowStep::UnderPrescribedWorkingRatio]);
        assert_eq!(context.metrics().attendance_rate, Some(Decimal::ONE));
    }
}
