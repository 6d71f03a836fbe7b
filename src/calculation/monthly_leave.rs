//! Monthly leave calculation.
//!
//! The accrual interval is cut into consecutive one-calendar-month windows
//! anchored on its start date. A window counts only once it is complete,
//! i.e. the employee reached the same day-of-month after it. Any absence
//! inside a window forfeits the whole window; otherwise the window grants
//! the share of its prescribed days that were not excluded, rounded up.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{DateInterval, MonthlyContext, MonthlyGrant, MonthlyLeave};

use super::metrics::{MONTHLY_LEAVE_CAP_DAYS, ceil_round};
use super::period_arithmetic::{add_months, day_before, weekdays_only};

/// Calculates month-by-month leave, capped at 11 days.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_monthly_leave;
/// use leave_engine::models::{AccrualMetrics, DateInterval, MonthlyContext};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeSet;
///
/// let context = MonthlyContext {
///     metrics: AccrualMetrics {
///         service_years: 0,
///         accrual_interval: DateInterval::new(
///             NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///             NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///         )
///         .unwrap(),
///         attendance_rate: None,
///         prescribed_working_ratio: None,
///     },
///     absence_dates: BTreeSet::new(),
///     excluded_dates: BTreeSet::new(),
///     company_holidays: BTreeSet::new(),
///     statutory_holidays: BTreeSet::new(),
/// };
///
/// let leave = calculate_monthly_leave(&context).unwrap();
/// assert_eq!(leave.grants.len(), 6);
/// assert_eq!(leave.total_leave_days.to_string(), "6.00");
/// ```
pub fn calculate_monthly_leave(context: &MonthlyContext) -> EngineResult<MonthlyLeave> {
    let interval = context.metrics.accrual_interval;
    let cap = Decimal::from(MONTHLY_LEAVE_CAP_DAYS);
    let holidays = context.all_holidays();

    let mut grants = Vec::new();
    let mut total = ceil_round(Decimal::ZERO);
    let mut month = 0;

    while total < cap {
        let window_start = add_months(interval.start(), month)?;
        let next_window_start = add_months(interval.start(), month + 1)?;
        if next_window_start > interval.end() {
            break;
        }
        let window = DateInterval::new(window_start, day_before(next_window_start)?)?;
        let grant = grant_for_window(window, &holidays, context)?;

        total = (total + grant.granted_days).min(ceil_round(cap));
        grants.push(grant);
        month += 1;
    }

    Ok(MonthlyLeave {
        metrics: context.metrics.clone(),
        grants,
        total_leave_days: total,
    })
}

fn grant_for_window(
    window: DateInterval,
    holidays: &BTreeSet<NaiveDate>,
    context: &MonthlyContext,
) -> EngineResult<MonthlyGrant> {
    let prescribed_days = weekdays_only(&window, holidays);
    let absent_days = count_within(&context.absence_dates, &window);
    let excluded_days = count_within(&context.excluded_dates, &window);

    if absent_days + excluded_days > prescribed_days {
        return Err(EngineError::inconsistency(format!(
            "window {} has {} absent and {} excluded of {} prescribed days",
            window, absent_days, excluded_days, prescribed_days
        )));
    }

    let granted_days = if absent_days > 0 || prescribed_days == 0 {
        ceil_round(Decimal::ZERO)
    } else {
        ceil_round(
            Decimal::from(prescribed_days - excluded_days) / Decimal::from(prescribed_days),
        )
    };

    Ok(MonthlyGrant {
        window,
        prescribed_days,
        excluded_days,
        absent_days,
        granted_days,
    })
}

fn count_within(dates: &BTreeSet<NaiveDate>, window: &DateInterval) -> u32 {
    dates.range(window.start()..=window.end()).count() as u32
}
