//! Accrual context models.
//!
//! A classifier inspects the request dates and builds exactly one
//! [`AccrualContext`] variant, carrying everything its matching leave
//! calculator needs, along with the ordered [`FlowStep`] markers recording
//! which branches fired.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DateInterval;

/// Metrics shared by every accrual regime, reported for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualMetrics {
    /// Completed service years counted for additional leave.
    pub service_years: u32,
    /// The range over which attendance was evaluated.
    pub accrual_interval: DateInterval,
    /// Attendance rate, when the regime evaluates one.
    pub attendance_rate: Option<Decimal>,
    /// Prescribed working ratio, when the regime evaluates one.
    pub prescribed_working_ratio: Option<Decimal>,
}

/// Inputs for the month-by-month calculator.
///
/// Absence and excluded dates are already restricted to prescribed
/// working days inside the accrual interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyContext {
    /// Common metrics.
    pub metrics: AccrualMetrics,
    /// Prescribed working days the employee was absent.
    pub absence_dates: BTreeSet<NaiveDate>,
    /// Prescribed working days excluded from prescribed work.
    pub excluded_dates: BTreeSet<NaiveDate>,
    /// Company holidays inside the accrual interval.
    pub company_holidays: BTreeSet<NaiveDate>,
    /// Weekday statutory holidays inside the accrual interval.
    pub statutory_holidays: BTreeSet<NaiveDate>,
}

impl MonthlyContext {
    /// Statutory and company holidays together.
    pub fn all_holidays(&self) -> BTreeSet<NaiveDate> {
        self.statutory_holidays
            .union(&self.company_holidays)
            .copied()
            .collect()
    }
}

/// Inputs for the full and ratio-adjusted annual calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualContext {
    /// Common metrics; the adjusted calculator requires the working ratio.
    pub metrics: AccrualMetrics,
    /// The year in which the granted leave may be taken.
    pub availability_interval: DateInterval,
}

/// Inputs for the prorated calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProratedContext {
    /// Common metrics over the prorated sub-period.
    pub metrics: AccrualMetrics,
    /// Prescribed days worked in the sub-period over those of the full
    /// preceding fiscal year.
    pub prorated_ratio: Decimal,
    /// The fiscal year in which the prorated leave may be taken.
    pub availability_interval: DateInterval,
}

/// The fiscal-year grant summed with first-year monthly leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FiscalGrantContext {
    /// Attendance fell short; monthly leave over the prorated sub-period.
    Monthly(MonthlyContext),
    /// Prorated leave for the partial first fiscal year.
    Prorated(ProratedContext),
}

/// Monthly leave for the first year paired with a fiscal-year grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedContext {
    /// First-year monthly leave up to the evaluation date.
    pub monthly: MonthlyContext,
    /// The grant made at the first fiscal-year start.
    pub fiscal_grant: FiscalGrantContext,
}

/// One variant per accrual regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "leave_type", rename_all = "snake_case")]
pub enum AccrualContext {
    /// Month-by-month leave, capped at 11 days.
    Monthly(MonthlyContext),
    /// Base plus additional leave, unadjusted.
    FullAnnual(AnnualContext),
    /// Base plus additional leave scaled by the prescribed working ratio.
    AdjustedAnnual(AnnualContext),
    /// Base leave scaled by the prorated ratio.
    Prorated(ProratedContext),
    /// Monthly leave plus a fiscal-year grant.
    MonthlyAndProrated(CombinedContext),
}

impl AccrualContext {
    /// The leave type the context will be calculated as.
    pub fn leave_type(&self) -> LeaveType {
        match self {
            AccrualContext::Monthly(_) => LeaveType::Monthly,
            AccrualContext::FullAnnual(_) => LeaveType::FullAnnual,
            AccrualContext::AdjustedAnnual(_) => LeaveType::AdjustedAnnual,
            AccrualContext::Prorated(_) => LeaveType::Prorated,
            AccrualContext::MonthlyAndProrated(_) => LeaveType::MonthlyAndProrated,
        }
    }

    /// The metrics reported for the context.
    ///
    /// A combined context reports the metrics of its fiscal-year grant,
    /// the part whose attendance was evaluated.
    pub fn metrics(&self) -> &AccrualMetrics {
        match self {
            AccrualContext::Monthly(ctx) => &ctx.metrics,
            AccrualContext::FullAnnual(ctx) | AccrualContext::AdjustedAnnual(ctx) => &ctx.metrics,
            AccrualContext::Prorated(ctx) => &ctx.metrics,
            AccrualContext::MonthlyAndProrated(ctx) => match &ctx.fiscal_grant {
                FiscalGrantContext::Monthly(grant) => &grant.metrics,
                FiscalGrantContext::Prorated(grant) => &grant.metrics,
            },
        }
    }
}

/// Tag naming the calculator that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Month-by-month leave.
    Monthly,
    /// Full annual leave.
    FullAnnual,
    /// Ratio-adjusted annual leave.
    AdjustedAnnual,
    /// Prorated fiscal-year leave.
    Prorated,
    /// Monthly leave plus a fiscal-year grant.
    MonthlyAndProrated,
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveType::Monthly => write!(f, "monthly"),
            LeaveType::FullAnnual => write!(f, "full_annual"),
            LeaveType::AdjustedAnnual => write!(f, "adjusted_annual"),
            LeaveType::Prorated => write!(f, "prorated"),
            LeaveType::MonthlyAndProrated => write!(f, "monthly_and_prorated"),
        }
    }
}

/// Symbolic marker for a classifier branch that fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    /// Hire-date basis selected.
    HireDateBasis,
    /// Fiscal-year basis selected.
    FiscalYearBasis,
    /// Evaluated before the first hire anniversary.
    LessThanOneYear,
    /// Evaluated on or after the first hire anniversary.
    AfterOneYear,
    /// Evaluated before the first regular fiscal-year grant.
    BeforeFirstRegularFiscalYear,
    /// Evaluated on or after the first regular fiscal-year grant.
    RegularFiscalYear,
    /// Evaluated before the prorated grant date.
    BeforeProrated,
    /// Evaluated after the first anniversary but before regular grants.
    ProratedOnly,
    /// Evaluated between the prorated grant and the first anniversary.
    CombinedMonthlyAndProrated,
    /// Attendance rate below 80%.
    UnderAttendanceRate,
    /// Attendance met, prescribed working ratio below 80%.
    UnderPrescribedWorkingRatio,
    /// Both ratios met; full entitlement.
    FullEntitlement,
    /// Attendance met for the prorated sub-period.
    ProratedGrant,
}

/// A classifier's output: the context to calculate and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedAccrual {
    /// The context routed to a calculator.
    pub context: AccrualContext,
    /// Branch markers in the order they fired.
    pub flow: Vec<FlowStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn metrics(attendance_rate: Option<Decimal>) -> AccrualMetrics {
        AccrualMetrics {
            service_years: 0,
            accrual_interval: DateInterval::new(date(2024, 7, 1), date(2024, 12, 31)).unwrap(),
            attendance_rate,
            prescribed_working_ratio: None,
        }
    }

    fn monthly(attendance_rate: Option<Decimal>) -> MonthlyContext {
        MonthlyContext {
            metrics: metrics(attendance_rate),
            absence_dates: BTreeSet::new(),
            excluded_dates: BTreeSet::new(),
            company_holidays: BTreeSet::new(),
            statutory_holidays: BTreeSet::new(),
        }
    }

    #[test]
    fn test_all_holidays_merges_statutory_and_company() {
        let mut context = monthly(None);
        context.statutory_holidays = BTreeSet::from([date(2024, 8, 15), date(2024, 9, 16)]);
        context.company_holidays = BTreeSet::from([date(2024, 8, 15), date(2024, 10, 2)]);

        assert_eq!(
            context.all_holidays(),
            BTreeSet::from([date(2024, 8, 15), date(2024, 9, 16), date(2024, 10, 2)])
        );
    }

    #[test]
    fn test_leave_type_matches_variant() {
        let context = AccrualContext::Monthly(monthly(None));
        assert_eq!(context.leave_type(), LeaveType::Monthly);
        assert_eq!(context.leave_type().to_string(), "monthly");
    }

    #[test]
    fn test_combined_context_reports_fiscal_grant_metrics() {
        let grant = monthly(Some(Decimal::new(5, 1)));
        let context = AccrualContext::MonthlyAndProrated(CombinedContext {
            monthly: monthly(None),
            fiscal_grant: FiscalGrantContext::Monthly(grant),
        });
        assert_eq!(context.metrics().attendance_rate, Some(Decimal::new(5, 1)));
    }

    #[test]
    fn test_flow_step_serialization() {
        let json = serde_json::to_string(&FlowStep::UnderPrescribedWorkingRatio).unwrap();
        assert_eq!(json, "\"under_prescribed_working_ratio\"");
    }

    #[test]
    fn test_context_serializes_with_leave_type_tag() {
        let context = AccrualContext::Monthly(monthly(None));
        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["leave_type"], "monthly");
        assert_eq!(json["metrics"]["accrual_interval"]["start"], "2024-07-01");
    }
}
