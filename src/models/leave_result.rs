//! Leave result models.
//!
//! [`LeaveResult`] mirrors [`AccrualContext`](super::AccrualContext): one
//! variant per calculator, each carrying its total and breakdown.
//! [`LeaveCalculation`] flattens the common fields for callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccrualMetrics, DateInterval, FlowStep, LeaveType};

/// The leave granted for one completed monthly window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyGrant {
    /// The calendar-month window.
    pub window: DateInterval,
    /// Weekdays in the window that are not holidays.
    pub prescribed_days: u32,
    /// Prescribed days excluded from prescribed work.
    pub excluded_days: u32,
    /// Prescribed days the employee was absent.
    pub absent_days: u32,
    /// Fraction of a leave day granted for the window.
    pub granted_days: Decimal,
}

/// Result of the monthly calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLeave {
    /// Common metrics.
    pub metrics: AccrualMetrics,
    /// One record per evaluated window, in order.
    pub grants: Vec<MonthlyGrant>,
    /// Sum of grants, capped at 11.
    pub total_leave_days: Decimal,
}

/// Result of the full or adjusted annual calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeave {
    /// Common metrics.
    pub metrics: AccrualMetrics,
    /// The statutory base entitlement.
    pub base_leave_days: u32,
    /// Extra days for long tenure.
    pub additional_leave_days: u32,
    /// The year in which the leave may be taken.
    pub availability_interval: DateInterval,
    /// Final entitlement.
    pub total_leave_days: Decimal,
}

/// Result of the prorated calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProratedLeave {
    /// Common metrics over the prorated sub-period.
    pub metrics: AccrualMetrics,
    /// The ratio applied to the base entitlement.
    pub prorated_ratio: Decimal,
    /// The fiscal year in which the leave may be taken.
    pub availability_interval: DateInterval,
    /// Final entitlement.
    pub total_leave_days: Decimal,
}

/// The fiscal-year part of a combined result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FiscalGrantLeave {
    /// Monthly leave over the prorated sub-period.
    Monthly(MonthlyLeave),
    /// Prorated leave.
    Prorated(ProratedLeave),
}

impl FiscalGrantLeave {
    /// The sub-total of this part.
    pub fn total_leave_days(&self) -> Decimal {
        match self {
            FiscalGrantLeave::Monthly(leave) => leave.total_leave_days,
            FiscalGrantLeave::Prorated(leave) => leave.total_leave_days,
        }
    }
}

/// Result of the combined calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedLeave {
    /// First-year monthly leave.
    pub monthly: MonthlyLeave,
    /// The fiscal-year grant.
    pub fiscal_grant: FiscalGrantLeave,
    /// Sum of both sub-totals.
    pub total_leave_days: Decimal,
}

/// One variant per calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "leave_type", rename_all = "snake_case")]
pub enum LeaveResult {
    /// Month-by-month leave.
    Monthly(MonthlyLeave),
    /// Full annual leave.
    FullAnnual(AnnualLeave),
    /// Ratio-adjusted annual leave.
    AdjustedAnnual(AnnualLeave),
    /// Prorated leave.
    Prorated(ProratedLeave),
    /// Monthly leave plus a fiscal-year grant.
    MonthlyAndProrated(CombinedLeave),
}

impl LeaveResult {
    /// The tag of the calculator that produced the result.
    pub fn leave_type(&self) -> LeaveType {
        match self {
            LeaveResult::Monthly(_) => LeaveType::Monthly,
            LeaveResult::FullAnnual(_) => LeaveType::FullAnnual,
            LeaveResult::AdjustedAnnual(_) => LeaveType::AdjustedAnnual,
            LeaveResult::Prorated(_) => LeaveType::Prorated,
            LeaveResult::MonthlyAndProrated(_) => LeaveType::MonthlyAndProrated,
        }
    }

    /// The final entitlement.
    pub fn total_leave_days(&self) -> Decimal {
        match self {
            LeaveResult::Monthly(leave) => leave.total_leave_days,
            LeaveResult::FullAnnual(leave) | LeaveResult::AdjustedAnnual(leave) => {
                leave.total_leave_days
            }
            LeaveResult::Prorated(leave) => leave.total_leave_days,
            LeaveResult::MonthlyAndProrated(leave) => leave.total_leave_days,
        }
    }

    /// The metrics reported for the result.
    pub fn metrics(&self) -> &AccrualMetrics {
        match self {
            LeaveResult::Monthly(leave) => &leave.metrics,
            LeaveResult::FullAnnual(leave) | LeaveResult::AdjustedAnnual(leave) => &leave.metrics,
            LeaveResult::Prorated(leave) => &leave.metrics,
            LeaveResult::MonthlyAndProrated(leave) => match &leave.fiscal_grant {
                FiscalGrantLeave::Monthly(grant) => &grant.metrics,
                FiscalGrantLeave::Prorated(grant) => &grant.metrics,
            },
        }
    }
}

/// The complete, deterministic output of one entitlement calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveCalculation {
    /// Which calculator produced the total.
    pub leave_type: LeaveType,
    /// The entitlement in leave days.
    pub total_leave_days: Decimal,
    /// Completed service years.
    pub service_years: u32,
    /// Attendance rate, when evaluated.
    pub attendance_rate: Option<Decimal>,
    /// Prescribed working ratio, when evaluated.
    pub prescribed_working_ratio: Option<Decimal>,
    /// The range over which attendance was evaluated.
    pub accrual_interval: DateInterval,
    /// Regime-specific breakdown.
    pub breakdown: LeaveResult,
    /// Classifier branches in the order they fired.
    pub flow: Vec<FlowStep>,
}

impl LeaveCalculation {
    /// Flattens a calculator result and its classifier flow.
    pub fn new(breakdown: LeaveResult, flow: Vec<FlowStep>) -> Self {
        let metrics = breakdown.metrics().clone();
        Self {
            leave_type: breakdown.leave_type(),
            total_leave_days: breakdown.total_leave_days(),
            service_years: metrics.service_years,
            attendance_rate: metrics.attendance_rate,
            prescribed_working_ratio: metrics.prescribed_working_ratio,
            accrual_interval: metrics.accrual_interval,
            breakdown,
            flow,
        }
    }
}
