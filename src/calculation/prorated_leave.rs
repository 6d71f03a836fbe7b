//! Prorated leave for a partial first fiscal year.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{ProratedContext, ProratedLeave};

use super::metrics::{BASE_ANNUAL_LEAVE_DAYS, ceil_round};

/// Scales the statutory base by the prorated ratio, rounding up.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_prorated_leave;
/// use leave_engine::models::{AccrualMetrics, DateInterval, ProratedContext};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let context = ProratedContext {
///     metrics: AccrualMetrics {
///         service_years: 0,
///         accrual_interval: DateInterval::new(
///             NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///             NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///         )
///         .unwrap(),
///         attendance_rate: Some(Decimal::ONE),
///         prescribed_working_ratio: Some(Decimal::ONE),
///     },
///     prorated_ratio: Decimal::new(5, 1),
///     availability_interval: DateInterval::new(
///         NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
///     )
///     .unwrap(),
/// };
///
/// let leave = calculate_prorated_leave(&context).unwrap();
/// assert_eq!(leave.total_leave_days.to_string(), "7.50");
/// ```
pub fn calculate_prorated_leave(context: &ProratedContext) -> EngineResult<ProratedLeave> {
    let ratio = context.prorated_ratio;
    if ratio < Decimal::ZERO || ratio > Decimal::ONE {
        return Err(EngineError::inconsistency(format!(
            "prorated ratio {} is outside [0, 1]",
            ratio
        )));
    }

    Ok(ProratedLeave {
        metrics: context.metrics.clone(),
        prorated_ratio: ratio,
        availability_interval: context.availability_interval,
        total_leave_days: ceil_round(Decimal::from(BASE_ANNUAL_LEAVE_DAYS) * ratio),
    })
}
