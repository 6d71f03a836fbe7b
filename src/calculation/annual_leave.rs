//! Full and adjusted annual leave calculation.
//!
//! Both calculators start from the statutory base of 15 days plus one
//! additional day per two years of service beyond the first (at most 10).
//! The adjusted calculator scales that entitlement by the prescribed
//! working ratio of the accrual year and rounds up at the hundredths.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AnnualContext, AnnualLeave};

use super::metrics::{BASE_ANNUAL_LEAVE_DAYS, additional_leave, ceil_round};

/// Calculates the full annual entitlement.
///
/// The total is the whole number `15 + additional` and is not rescaled.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_full_annual_leave;
/// use leave_engine::models::{AccrualMetrics, AnnualContext, DateInterval};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let context = AnnualContext {
///     metrics: AccrualMetrics {
///         service_years: 3,
///         accrual_interval: DateInterval::new(
///             NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///             NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
///         )
///         .unwrap(),
///         attendance_rate: Some(Decimal::ONE),
///         prescribed_working_ratio: Some(Decimal::ONE),
///     },
///     availability_interval: DateInterval::new(
///         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     )
///     .unwrap(),
/// };
///
/// let leave = calculate_full_annual_leave(&context).unwrap();
/// assert_eq!(leave.additional_leave_days, 1);
/// assert_eq!(leave.total_leave_days, Decimal::from(16));
/// ```
pub fn calculate_full_annual_leave(context: &AnnualContext) -> EngineResult<AnnualLeave> {
    let additional = additional_leave(context.metrics.service_years);
    Ok(AnnualLeave {
        metrics: context.metrics.clone(),
        base_leave_days: BASE_ANNUAL_LEAVE_DAYS,
        additional_leave_days: additional,
        availability_interval: context.availability_interval,
        total_leave_days: Decimal::from(BASE_ANNUAL_LEAVE_DAYS + additional),
    })
}

/// Calculates the annual entitlement scaled by the prescribed working ratio.
///
/// Returns an inconsistency when the context carries no ratio or a ratio
/// outside `[0, 1]`.
pub fn calculate_adjusted_annual_leave(context: &AnnualContext) -> EngineResult<AnnualLeave> {
    let ratio = context.metrics.prescribed_working_ratio.ok_or_else(|| {
        EngineError::inconsistency("adjusted annual leave requires a prescribed working ratio")
    })?;
    if ratio < Decimal::ZERO || ratio > Decimal::ONE {
        return Err(EngineError::inconsistency(format!(
            "prescribed working ratio {} is outside [0, 1]",
            ratio
        )));
    }

    let additional = additional_leave(context.metrics.service_years);
    let entitlement = Decimal::from(BASE_ANNUAL_LEAVE_DAYS + additional);
    Ok(AnnualLeave {
        metrics: context.metrics.clone(),
        base_leave_days: BASE_ANNUAL_LEAVE_DAYS,
        additional_leave_days: additional,
        availability_interval: context.availability_interval,
        total_leave_days: ceil_round(entitlement * ratio),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccrualMetrics, DateInterval};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn context(service_years: u32, pwr: Option<Decimal>) -> AnnualContext {
        AnnualContext {
            metrics: AccrualMetrics {
                service_years,
                accrual_interval: DateInterval::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap(),
                attendance_rate: Some(Decimal::ONE),
                prescribed_working_ratio: pwr,
            },
            availability_interval: DateInterval::new(date(2024, 1, 1), date(2024, 12, 31))
                .unwrap(),
        }
    }

    #[test]
    fn test_full_annual_leave_first_year_is_base() {
        let leave = calculate_full_annual_leave(&context(1, Some(Decimal::ONE))).unwrap();
        assert_eq!(leave.base_leave_days, 15);
        assert_eq!(leave.additional_leave_days, 0);
        assert_eq!(leave.total_leave_days, Decimal::from(15));
    }

    #[test]
    fn test_full_annual_leave_three_years_is_sixteen() {
        let leave = calculate_full_annual_leave(&context(3, Some(Decimal::ONE))).unwrap();
        assert_eq!(leave.total_leave_days.to_string(), "16");
    }

    #[test]
    fn test_full_annual_leave_is_capped_at_twenty_five() {
        let leave = calculate_full_annual_leave(&context(30, Some(Decimal::ONE))).unwrap();
        assert_eq!(leave.additional_leave_days, 10);
        assert_eq!(leave.total_leave_days, Decimal::from(25));
    }

    #[test]
    fn test_adjusted_annual_leave_scales_by_ratio() {
        let leave = calculate_adjusted_annual_leave(&context(3, Some(dec("0.79")))).unwrap();
        assert_eq!(leave.total_leave_days.to_string(), "12.64");
    }

    #[test]
    fn test_adjusted_annual_leave_rounds_up() {
        // 15 * 200/261 = 11.4942...
        let ratio = Decimal::from(200) / Decimal::from(261);
        let leave = calculate_adjusted_annual_leave(&context(1, Some(ratio))).unwrap();
        assert_eq!(leave.total_leave_days, dec("11.50"));
    }

    #[test]
    fn test_adjusted_annual_leave_requires_valid_ratio() {
        assert!(matches!(
            calculate_adjusted_annual_leave(&context(3, None)),
            Err(EngineError::InternalInconsistency { .. })
        ));
        assert!(matches!(
            calculate_adjusted_annual_leave(&context(3, Some(dec("1.2")))),
            Err(EngineError::InternalInconsistency { .. })
        ));
    }

    #[test]
    fn test_availability_interval_is_carried_through() {
        let leave = calculate_adjusted_annual_leave(&context(3, Some(dec("0.5")))).unwrap();
        assert_eq!(leave.availability_interval.start(), date(2024, 1, 1));
        assert_eq!(leave.total_leave_days, dec("8.00"));
    }
}
