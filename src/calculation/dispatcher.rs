//! Routes an accrual context to its calculator.

use crate::error::EngineResult;
use crate::models::{AccrualContext, LeaveResult};

use super::annual_leave::{calculate_adjusted_annual_leave, calculate_full_annual_leave};
use super::combined_leave::calculate_combined_leave;
use super::monthly_leave::calculate_monthly_leave;
use super::prorated_leave::calculate_prorated_leave;

/// Runs the calculator matching the context variant.
pub fn dispatch(context: &AccrualContext) -> EngineResult<LeaveResult> {
    match context {
        AccrualContext::Monthly(ctx) => calculate_monthly_leave(ctx).map(LeaveResult::Monthly),
        AccrualContext::FullAnnual(ctx) => {
            calculate_full_annual_leave(ctx).map(LeaveResult::FullAnnual)
        }
        AccrualContext::AdjustedAnnual(ctx) => {
            calculate_adjusted_annual_leave(ctx).map(LeaveResult::AdjustedAnnual)
        }
        AccrualContext::Prorated(ctx) => calculate_prorated_leave(ctx).map(LeaveResult::Prorated),
        AccrualContext::MonthlyAndProrated(ctx) => {
            calculate_combined_leave(ctx).map(LeaveResult::MonthlyAndProrated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccrualMetrics, AnnualContext, DateInterval, LeaveType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn annual() -> AnnualContext {
        AnnualContext {
            metrics: AccrualMetrics {
                service_years: 3,
                accrual_interval: DateInterval::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap(),
                attendance_rate: Some(Decimal::ONE),
                prescribed_working_ratio: Some(Decimal::new(79, 2)),
            },
            availability_interval: DateInterval::new(date(2024, 1, 1), date(2024, 12, 31))
                .unwrap(),
        }
    }

    #[test]
    fn test_leave_type_follows_context_variant() {
        let full = dispatch(&AccrualContext::FullAnnual(annual())).unwrap();
        let adjusted = dispatch(&AccrualContext::AdjustedAnnual(annual())).unwrap();

        assert_eq!(full.leave_type(), LeaveType::FullAnnual);
        assert_eq!(full.total_leave_days(), Decimal::from(16));
        assert_eq!(adjusted.leave_type(), LeaveType::AdjustedAnnual);
        assert_eq!(adjusted.total_leave_days(), Decimal::new(1264, 2));
    }
}
