//! Leave request model.
//!
//! This module defines the format-agnostic input of a calculation: the
//! accrual basis, the optional fiscal-year start, hire and evaluation
//! dates, tagged non-working periods and company holidays.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::NonWorkingPeriod;

/// The accounting convention used to accrue annual leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualBasis {
    /// Leave accrues on each anniversary of the hire date.
    HireDate,
    /// Leave accrues at the start of each organizational fiscal year.
    FiscalYear,
}

/// The month and day on which every fiscal year starts.
///
/// February 29th is rejected: a fiscal year must start on the same date
/// every year. Serialized as `"MM-DD"`.
///
/// # Example
///
/// ```
/// use leave_engine::models::FiscalYearStart;
/// use chrono::NaiveDate;
///
/// let april = FiscalYearStart::new(4, 1).unwrap();
/// let hire = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
/// assert_eq!(
///     april.first_start_after(hire).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
/// );
/// assert_eq!(april.to_string(), "04-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalYearStart {
    month: u32,
    day: u32,
}

impl FiscalYearStart {
    /// Creates a fiscal-year start, validating the month-day.
    pub fn new(month: u32, day: u32) -> EngineResult<Self> {
        if month == 2 && day == 29 {
            return Err(EngineError::invalid_input(
                "fiscal_year_start",
                "February 29th cannot start a fiscal year",
            ));
        }
        // 2001 is not a leap year, so every remaining valid month-day exists in it.
        if NaiveDate::from_ymd_opt(2001, month, day).is_none() {
            return Err(EngineError::invalid_input(
                "fiscal_year_start",
                format!("{:02}-{:02} is not a calendar date", month, day),
            ));
        }
        Ok(Self { month, day })
    }

    /// The month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The day of the month.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// The fiscal-year start falling in the given calendar year.
    pub fn start_in(&self, year: i32) -> EngineResult<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day).ok_or_else(|| {
            EngineError::invalid_input(
                "fiscal_year_start",
                format!("year {} is outside the supported date range", year),
            )
        })
    }

    /// The first fiscal-year start strictly after `date`.
    pub fn first_start_after(&self, date: NaiveDate) -> EngineResult<NaiveDate> {
        let candidate = self.start_in(date.year())?;
        if candidate > date {
            Ok(candidate)
        } else {
            self.start_in(date.year() + 1)
        }
    }

    /// The first fiscal-year start on or after `date`.
    pub fn first_start_on_or_after(&self, date: NaiveDate) -> EngineResult<NaiveDate> {
        let candidate = self.start_in(date.year())?;
        if candidate >= date {
            Ok(candidate)
        } else {
            self.start_in(date.year() + 1)
        }
    }

    /// The most recent fiscal-year start on or before `date`.
    pub fn latest_start_on_or_before(&self, date: NaiveDate) -> EngineResult<NaiveDate> {
        let candidate = self.start_in(date.year())?;
        if candidate <= date {
            Ok(candidate)
        } else {
            self.start_in(date.year() - 1)
        }
    }
}

impl std::fmt::Display for FiscalYearStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl std::str::FromStr for FiscalYearStart {
    type Err = EngineError;

    fn from_str(s: &str) -> EngineResult<Self> {
        let malformed = || {
            EngineError::invalid_input(
                "fiscal_year_start",
                format!("expected MM-DD, got '{}'", s),
            )
        };
        let (month, day) = s.split_once('-').ok_or_else(malformed)?;
        let month = month.parse::<u32>().map_err(|_| malformed())?;
        let day = day.parse::<u32>().map_err(|_| malformed())?;
        FiscalYearStart::new(month, day)
    }
}

impl TryFrom<String> for FiscalYearStart {
    type Error = EngineError;

    fn try_from(value: String) -> EngineResult<Self> {
        value.parse()
    }
}

impl From<FiscalYearStart> for String {
    fn from(start: FiscalYearStart) -> Self {
        start.to_string()
    }
}

/// Everything the engine needs to compute one employee's entitlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Which accrual convention applies.
    pub accrual_basis: AccrualBasis,
    /// Fiscal-year start; required iff the basis is [`AccrualBasis::FiscalYear`].
    #[serde(default)]
    pub fiscal_year_start: Option<FiscalYearStart>,
    /// The employee's hire date.
    pub hire_date: NaiveDate,
    /// The date the entitlement is evaluated at.
    pub evaluation_date: NaiveDate,
    /// Tagged non-working periods.
    #[serde(default)]
    pub non_working_periods: Vec<NonWorkingPeriod>,
    /// Company-specific days off.
    #[serde(default)]
    pub company_holidays: Vec<NaiveDate>,
}

impl LeaveRequest {
    /// Builds a hire-date basis request with no non-working periods.
    pub fn hire_date_basis(hire_date: NaiveDate, evaluation_date: NaiveDate) -> Self {
        Self {
            accrual_basis: AccrualBasis::HireDate,
            fiscal_year_start: None,
            hire_date,
            evaluation_date,
            non_working_periods: vec![],
            company_holidays: vec![],
        }
    }

    /// Builds a fiscal-year basis request with no non-working periods.
    pub fn fiscal_year_basis(
        fiscal_year_start: FiscalYearStart,
        hire_date: NaiveDate,
        evaluation_date: NaiveDate,
    ) -> Self {
        Self {
            accrual_basis: AccrualBasis::FiscalYear,
            fiscal_year_start: Some(fiscal_year_start),
            hire_date,
            evaluation_date,
            non_working_periods: vec![],
            company_holidays: vec![],
        }
    }

    /// Adds a non-working period.
    pub fn with_period(mut self, period: NonWorkingPeriod) -> Self {
        self.non_working_periods.push(period);
        self
    }

    /// Adds a company holiday.
    pub fn with_company_holiday(mut self, date: NaiveDate) -> Self {
        self.company_holidays.push(date);
        self
    }

    /// Checks the cross-field rules the classifiers rely on.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hire_date > self.evaluation_date {
            return Err(EngineError::invalid_input(
                "hire_date",
                format!(
                    "hire date {} is after evaluation date {}",
                    self.hire_date, self.evaluation_date
                ),
            ));
        }
        if self.accrual_basis == AccrualBasis::FiscalYear && self.fiscal_year_start.is_none() {
            return Err(EngineError::invalid_input(
                "fiscal_year_start",
                "required when accrual_basis is fiscal_year",
            ));
        }
        Ok(())
    }

    /// The fiscal-year start, or an input error when it was not supplied.
    pub fn required_fiscal_year_start(&self) -> EngineResult<FiscalYearStart> {
        self.fiscal_year_start.ok_or_else(|| {
            EngineError::invalid_input(
                "fiscal_year_start",
                "required when accrual_basis is fiscal_year",
            )
        })
    }
}
