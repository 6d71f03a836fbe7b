//! Calculation logic for the leave entitlement engine.
//!
//! This module contains calendar arithmetic, the working-day census of an
//! accrual interval, attendance metrics, the hire-date and fiscal-year
//! classifiers that select an accrual regime, the monthly, annual, prorated
//! and combined calculators, and the dispatcher that ties them together.

mod annual_leave;
mod census;
mod classifier;
mod combined_leave;
mod dispatcher;
mod engine;
mod fiscal_year_classifier;
mod hire_date_classifier;
mod holiday_lookup;
mod metrics;
mod monthly_leave;
mod period_arithmetic;
mod prorated_leave;

pub use annual_leave::{calculate_adjusted_annual_leave, calculate_full_annual_leave};
pub use census::WorkingDayCensus;
pub use classifier::AccrualClassifier;
pub use combined_leave::calculate_combined_leave;
pub use dispatcher::dispatch;
pub use engine::calculate_annual_leave;
pub use fiscal_year_classifier::FiscalYearClassifier;
pub use hire_date_classifier::HireDateClassifier;
pub use holiday_lookup::{CachedHolidayLookup, HolidayLookup, NoHolidays};
pub use metrics::{
    ADDITIONAL_LEAVE_CAP_DAYS, BASE_ANNUAL_LEAVE_DAYS, MONTHLY_LEAVE_CAP_DAYS, additional_leave,
    attendance_rate, ceil_round, prescribed_working_ratio, prorated_ratio, ratio_threshold,
    service_years,
};
pub use monthly_leave::calculate_monthly_leave;
pub use period_arithmetic::{
    add_months, add_years, day_after, day_before, days_between, intersect, is_weekday,
    weekdays_only, year_ending_before, year_starting,
};
pub use prorated_leave::calculate_prorated_leave;
