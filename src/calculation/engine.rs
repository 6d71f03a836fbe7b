//! Single entry point for entitlement calculations.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AccrualBasis, LeaveCalculation, LeaveRequest};

use super::classifier::AccrualClassifier;
use super::dispatcher::dispatch;
use super::fiscal_year_classifier::FiscalYearClassifier;
use super::hire_date_classifier::HireDateClassifier;
use super::holiday_lookup::{CachedHolidayLookup, HolidayLookup};

/// Validates a request, classifies it and runs the matching calculator.
///
/// Holiday lookups are memoized for the duration of the call, so each
/// distinct sub-interval is fetched at most once. The result depends only
/// on the request and the holidays returned by `lookup`.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::{NoHolidays, calculate_annual_leave};
/// use leave_engine::models::{LeaveRequest, LeaveType};
/// use chrono::NaiveDate;
///
/// let request = LeaveRequest::hire_date_basis(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
/// );
///
/// let calculation = calculate_annual_leave(&request, &NoHolidays).unwrap();
/// assert_eq!(calculation.leave_type, LeaveType::Monthly);
/// assert_eq!(calculation.total_leave_days.to_string(), "6.00");
/// ```
pub fn calculate_annual_leave<L: HolidayLookup + ?Sized>(
    request: &LeaveRequest,
    lookup: &L,
) -> EngineResult<LeaveCalculation> {
    request.validate()?;
    let lookup = CachedHolidayLookup::new(lookup);

    let classified = match request.accrual_basis {
        AccrualBasis::HireDate => HireDateClassifier::new(&lookup).classify(request)?,
        AccrualBasis::FiscalYear => {
            FiscalYearClassifier::new(&lookup, request.required_fiscal_year_start()?)
                .classify(request)?
        }
    };
    debug!(
        leave_type = %classified.context.leave_type(),
        holiday_intervals = lookup.cached_intervals(),
        "Classified request"
    );

    let breakdown = dispatch(&classified.context)?;
    Ok(LeaveCalculation::new(breakdown, classified.flow))
}
