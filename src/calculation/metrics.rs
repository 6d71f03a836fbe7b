//! Attendance metrics, tenure and statutory constants.
//!
//! Ratios are computed exactly in [`Decimal`] and only final totals are
//! rounded, always upward at the hundredths via [`ceil_round`].

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

use super::period_arithmetic::add_years;

/// Statutory base entitlement in days.
pub const BASE_ANNUAL_LEAVE_DAYS: u32 = 15;

/// Maximum monthly leave accrued before the first regular grant.
pub const MONTHLY_LEAVE_CAP_DAYS: u32 = 11;

/// Maximum additional leave for long tenure.
pub const ADDITIONAL_LEAVE_CAP_DAYS: u32 = 10;

/// Attendance and working-ratio threshold (80%).
pub fn ratio_threshold() -> Decimal {
    Decimal::new(8, 1)
}

/// Rounds up to two decimal places (ceiling at the hundredths).
///
/// # Example
///
/// ```
/// use leave_engine::calculation::ceil_round;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(ceil_round(Decimal::from_str("0.94834").unwrap()).to_string(), "0.95");
/// assert_eq!(ceil_round(Decimal::from(5)).to_string(), "5.00");
/// ```
pub fn ceil_round(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity);
    rounded.rescale(2);
    rounded
}

/// Attendance rate: `(P - E - A) / (P - E)`, or 0 when `P - E <= 0`.
///
/// Returns an inconsistency when more days are absent than remain
/// prescribed.
pub fn attendance_rate(prescribed_days: u32, absent_days: u32, excluded_days: u32) -> EngineResult<Decimal> {
    let denominator = i64::from(prescribed_days) - i64::from(excluded_days);
    if denominator <= 0 {
        return Ok(Decimal::ZERO);
    }
    let numerator = denominator - i64::from(absent_days);
    if numerator < 0 {
        return Err(EngineError::inconsistency(format!(
            "{} absent days exceed {} attendable days",
            absent_days, denominator
        )));
    }
    Ok(Decimal::from(numerator) / Decimal::from(denominator))
}

/// Prescribed working ratio: `(P - E) / P`, or 0 when `P == 0`.
pub fn prescribed_working_ratio(prescribed_days: u32, excluded_days: u32) -> EngineResult<Decimal> {
    if prescribed_days == 0 {
        return Ok(Decimal::ZERO);
    }
    if excluded_days > prescribed_days {
        return Err(EngineError::inconsistency(format!(
            "{} excluded days exceed {} prescribed days",
            excluded_days, prescribed_days
        )));
    }
    Ok(Decimal::from(prescribed_days - excluded_days) / Decimal::from(prescribed_days))
}

/// Prorated ratio: prescribed days actually available in the sub-period
/// over the prescribed days of the whole reference year.
pub fn prorated_ratio(
    period_prescribed_days: u32,
    period_excluded_days: u32,
    year_prescribed_days: u32,
) -> EngineResult<Decimal> {
    if year_prescribed_days == 0 {
        return Err(EngineError::inconsistency(
            "reference fiscal year has no prescribed working days",
        ));
    }
    if period_excluded_days > period_prescribed_days || period_prescribed_days > year_prescribed_days {
        return Err(EngineError::inconsistency(format!(
            "prorated day counts out of range: {} excluded of {} prescribed, {} in year",
            period_excluded_days, period_prescribed_days, year_prescribed_days
        )));
    }
    Ok(Decimal::from(period_prescribed_days - period_excluded_days) / Decimal::from(year_prescribed_days))
}

/// Whole years fully elapsed from `start` to `end`.
///
/// An anniversary is reached on the day `start` plus that many years
/// (02-29 anniversaries fall on 02-28).
pub fn service_years(start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
    if end < start {
        return Ok(0);
    }
    let mut years = (end.year() - start.year()).max(0) as u32;
    while years > 0 && add_years(start, years)? > end {
        years -= 1;
    }
    Ok(years)
}

/// Extra leave for long tenure: one day per two years beyond the first,
/// capped at ten.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::additional_leave;
///
/// assert_eq!(additional_leave(0), 0);
/// assert_eq!(additional_leave(2), 0);
/// assert_eq!(additional_leave(3), 1);
/// assert_eq!(additional_leave(21), 10);
/// assert_eq!(additional_leave(40), 10);
/// ```
pub fn additional_leave(service_years: u32) -> u32 {
    if service_years < 1 {
        return 0;
    }
    ((service_years - 1) / 2).min(ADDITIONAL_LEAVE_CAP_DAYS)
}
