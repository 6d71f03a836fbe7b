//! First-year monthly leave combined with the first fiscal-year grant.

use crate::error::EngineResult;
use crate::models::{CombinedContext, CombinedLeave, FiscalGrantContext, FiscalGrantLeave};

use super::monthly_leave::calculate_monthly_leave;
use super::prorated_leave::calculate_prorated_leave;

/// Sums monthly leave and the fiscal-year grant.
///
/// Each part is rounded by its own calculator; the sum is not rounded
/// again.
pub fn calculate_combined_leave(context: &CombinedContext) -> EngineResult<CombinedLeave> {
    let monthly = calculate_monthly_leave(&context.monthly)?;
    let fiscal_grant = calculate_fiscal_grant(&context.fiscal_grant)?;
    let total_leave_days = monthly.total_leave_days + fiscal_grant.total_leave_days();

    Ok(CombinedLeave {
        monthly,
        fiscal_grant,
        total_leave_days,
    })
}

fn calculate_fiscal_grant(context: &FiscalGrantContext) -> EngineResult<FiscalGrantLeave> {
    match context {
        FiscalGrantContext::Monthly(ctx) => calculate_monthly_leave(ctx).map(FiscalGrantLeave::Monthly),
        FiscalGrantContext::Prorated(ctx) => {
            calculate_prorated_leave(ctx).map(FiscalGrantLeave::Prorated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccrualMetrics, DateInterval, MonthlyContext, ProratedContext};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly(start: NaiveDate, end: NaiveDate) -> MonthlyContext {
        MonthlyContext {
            metrics: AccrualMetrics {
                service_years: 0,
                accrual_interval: DateInterval::new(start, end).unwrap(),
                attendance_rate: None,
                prescribed_working_ratio: None,
            },
            absence_dates: BTreeSet::new(),
            excluded_dates: BTreeSet::new(),
            company_holidays: BTreeSet::new(),
            statutory_holidays: BTreeSet::new(),
        }
    }

    #[test]
    fn test_monthly_plus_prorated_grant() {
        let context = CombinedContext {
            monthly: monthly(date(2024, 7, 1), date(2025, 3, 1)),
            fiscal_grant: FiscalGrantContext::Prorated(ProratedContext {
                metrics: AccrualMetrics {
                    service_years: 0,
                    accrual_interval: DateInterval::new(date(2024, 7, 1), date(2024, 12, 31))
                        .unwrap(),
                    attendance_rate: Some(Decimal::ONE),
                    prescribed_working_ratio: Some(Decimal::ONE),
                },
                prorated_ratio: Decimal::from(132) / Decimal::from(262),
                availability_interval: DateInterval::new(date(2025, 1, 1), date(2025, 12, 31))
                    .unwrap(),
            }),
        };

        let leave = calculate_combined_leave(&context).unwrap();
        assert_eq!(leave.monthly.total_leave_days, dec("8.00"));
        assert_eq!(leave.fiscal_grant.total_leave_days(), dec("7.56"));
        assert_eq!(leave.total_leave_days, dec("15.56"));
    }

    #[test]
    fn test_monthly_plus_monthly_grant() {
        let context = CombinedContext {
            monthly: monthly(date(2024, 7, 1), date(2024, 9, 1)),
            fiscal_grant: FiscalGrantContext::Monthly(monthly(date(2024, 7, 1), date(2024, 8, 31))),
        };

        let leave = calculate_combined_leave(&context).unwrap();
        assert!(matches!(leave.fiscal_grant, FiscalGrantLeave::Monthly(_)));
        assert_eq!(leave.total_leave_days, dec("3.00"));
    }
}
