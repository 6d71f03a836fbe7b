//! Request types for the leave entitlement API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint. Fields arrive in their wire form and are checked when the
//! request is converted into a [`LeaveRequest`], so bad values surface as
//! validation errors naming the offending field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AccrualBasis, DateInterval, FiscalYearStart, LeaveRequest, NonWorkingCategory, NonWorkingPeriod,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// `"hire_date"` or `"fiscal_year"`.
    pub accrual_basis: AccrualBasis,
    /// Fiscal-year start as `"MM-DD"`; required for the fiscal-year basis.
    #[serde(default)]
    pub fiscal_year_start: Option<String>,
    /// The employee's hire date.
    pub hire_date: NaiveDate,
    /// The date the entitlement is evaluated at.
    pub evaluation_date: NaiveDate,
    /// Tagged non-working periods.
    #[serde(default)]
    pub non_working_periods: Vec<NonWorkingPeriodRequest>,
    /// Company-specific days off.
    #[serde(default)]
    pub company_holidays: Vec<NaiveDate>,
}

/// A non-working period in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonWorkingPeriodRequest {
    /// `1` deemed worked, `2` absence, `3` excluded from prescribed work.
    pub category: u8,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
}

impl TryFrom<NonWorkingPeriodRequest> for NonWorkingPeriod {
    type Error = EngineError;

    fn try_from(req: NonWorkingPeriodRequest) -> EngineResult<Self> {
        let category = NonWorkingCategory::try_from(req.category)?;
        let interval = DateInterval::new(req.start_date, req.end_date).map_err(|_| {
            EngineError::invalid_input(
                "non_working_periods",
                format!(
                    "period start {} is after its end {}",
                    req.start_date, req.end_date
                ),
            )
        })?;
        Ok(NonWorkingPeriod::new(category, interval))
    }
}

impl TryFrom<CalculationRequest> for LeaveRequest {
    type Error = EngineError;

    fn try_from(req: CalculationRequest) -> EngineResult<Self> {
        let fiscal_year_start = req
            .fiscal_year_start
            .as_deref()
            .map(str::parse::<FiscalYearStart>)
            .transpose()?;
        let non_working_periods = req
            .non_working_periods
            .into_iter()
            .map(NonWorkingPeriod::try_from)
            .collect::<EngineResult<Vec<_>>>()?;

        let request = LeaveRequest {
            accrual_basis: req.accrual_basis,
            fiscal_year_start,
            hire_date: req.hire_date,
            evaluation_date: req.evaluation_date,
            non_working_periods,
            company_holidays: req.company_holidays,
        };
        request.validate()?;
        Ok(request)
    }
}
