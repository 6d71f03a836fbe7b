//! Fiscal-year accrual classifier.
//!
//! Leave is granted at each fiscal-year start. The first regular grant is
//! the first fiscal-year start on or after the first hire anniversary.
//! Before it the employee may hold first-year monthly leave, a prorated
//! grant for the partial fiscal year worked after hire, or both.
//!
//! Boundary comparisons follow the hire-date basis: a date "before" a
//! boundary is strictly before it, everything else is on or after.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AccrualContext, AccrualMetrics, ClassifiedAccrual, CombinedContext, DateInterval,
    FiscalGrantContext, FiscalYearStart, FlowStep, LeaveRequest, MonthlyContext, ProratedContext,
};

use super::census::WorkingDayCensus;
use super::classifier::{AccrualClassifier, census_ratios, decide_annual, monthly_context};
use super::holiday_lookup::HolidayLookup;
use super::metrics::{prorated_ratio, ratio_threshold};
use super::period_arithmetic::{add_years, day_before, weekdays_only, year_ending_before, year_starting};

/// Classifies requests on the fiscal-year accrual basis.
pub struct FiscalYearClassifier<'a, L: HolidayLookup + ?Sized> {
    lookup: &'a L,
    fiscal_year_start: FiscalYearStart,
}

impl<'a, L: HolidayLookup + ?Sized> FiscalYearClassifier<'a, L> {
    /// Creates a classifier for fiscal years starting on `fiscal_year_start`.
    pub fn new(lookup: &'a L, fiscal_year_start: FiscalYearStart) -> Self {
        Self {
            lookup,
            fiscal_year_start,
        }
    }

    /// The first fiscal-year start on or after the first hire anniversary.
    pub fn first_regular_fiscal_start(&self, request: &LeaveRequest) -> EngineResult<NaiveDate> {
        let anniversary = add_years(request.hire_date, 1)?;
        self.fiscal_year_start.first_start_on_or_after(anniversary)
    }

    /// Monthly leave from hire, capped at the day before the first anniversary.
    fn first_year_monthly(&self, request: &LeaveRequest) -> EngineResult<MonthlyContext> {
        let last_first_year_day = day_before(add_years(request.hire_date, 1)?)?;
        let interval = DateInterval::new(
            request.hire_date,
            request.evaluation_date.min(last_first_year_day),
        )?;
        let census = WorkingDayCensus::survey(self.lookup, interval, request)?;
        let metrics = AccrualMetrics {
            service_years: 0,
            accrual_interval: interval,
            attendance_rate: None,
            prescribed_working_ratio: None,
        };
        Ok(monthly_context(census, metrics))
    }

    /// The grant made at `prorated_start` for the partial fiscal year
    /// between hire and that start.
    fn prorated_grant(
        &self,
        request: &LeaveRequest,
        prorated_start: NaiveDate,
        flow: &mut Vec<FlowStep>,
    ) -> EngineResult<FiscalGrantContext> {
        let period = DateInterval::new(request.hire_date, day_before(prorated_start)?)?;
        let census = WorkingDayCensus::survey(self.lookup, period, request)?;
        let (ar, pwr) = census_ratios(&census)?;
        let metrics = AccrualMetrics {
            service_years: 0,
            accrual_interval: period,
            attendance_rate: Some(ar),
            prescribed_working_ratio: Some(pwr),
        };

        if ar < ratio_threshold() {
            flow.push(FlowStep::UnderAttendanceRate);
            return Ok(FiscalGrantContext::Monthly(monthly_context(census, metrics)));
        }

        let reference_year = year_ending_before(prorated_start)?;
        let mut holidays = self.lookup.weekday_holidays(&reference_year)?;
        holidays.extend(request.company_holidays.iter().copied());
        let year_prescribed_days = weekdays_only(&reference_year, &holidays);

        let ratio = prorated_ratio(census.prescribed_days, census.excluded_days, year_prescribed_days)?;
        debug!(
            prorated_period = %period,
            reference_year = %reference_year,
            prorated_ratio = %ratio,
            "Prorated grant"
        );
        flow.push(FlowStep::ProratedGrant);
        Ok(FiscalGrantContext::Prorated(ProratedContext {
            metrics,
            prorated_ratio: ratio,
            availability_interval: year_starting(prorated_start)?,
        }))
    }
}

impl<L: HolidayLookup + ?Sized> AccrualClassifier for FiscalYearClassifier<'_, L> {
    fn classify(&self, request: &LeaveRequest) -> EngineResult<ClassifiedAccrual> {
        let hire = request.hire_date;
        let evaluation = request.evaluation_date;
        let mut flow = vec![FlowStep::FiscalYearBasis];

        let first_regular = self.first_regular_fiscal_start(request)?;
        debug!(
            fiscal_year_start = %self.fiscal_year_start,
            first_regular_fiscal_start = %first_regular,
            "Fiscal-year classification"
        );

        if evaluation >= first_regular {
            flow.push(FlowStep::RegularFiscalYear);
            let latest_start = self.fiscal_year_start.latest_start_on_or_before(evaluation)?;
            let interval = year_ending_before(latest_start)?;
            let service_years = (evaluation.year() - first_regular.year() + 1).max(0) as u32;
            let census = WorkingDayCensus::survey(self.lookup, interval, request)?;
            let context = decide_annual(census, service_years, &mut flow)?;
            return Ok(ClassifiedAccrual { context, flow });
        }

        flow.push(FlowStep::BeforeFirstRegularFiscalYear);
        let prorated_start = self.fiscal_year_start.first_start_after(hire)?;
        let first_anniversary = add_years(hire, 1)?;

        if evaluation < prorated_start {
            flow.push(FlowStep::BeforeProrated);
            let context = AccrualContext::Monthly(self.first_year_monthly(request)?);
            return Ok(ClassifiedAccrual { context, flow });
        }

        if evaluation >= first_anniversary {
            flow.push(FlowStep::ProratedOnly);
            let context = match self.prorated_grant(request, prorated_start, &mut flow)? {
                FiscalGrantContext::Monthly(ctx) => AccrualContext::Monthly(ctx),
                FiscalGrantContext::Prorated(ctx) => AccrualContext::Prorated(ctx),
            };
            return Ok(ClassifiedAccrual { context, flow });
        }

        flow.push(FlowStep::CombinedMonthlyAndProrated);
        let monthly = self.first_year_monthly(request)?;
        let fiscal_grant = self.prorated_grant(request, prorated_start, &mut flow)?;
        Ok(ClassifiedAccrual {
            context: AccrualContext::MonthlyAndProrated(CombinedContext {
                monthly,
                fiscal_grant,
            }),
            flow,
        })
    }
}
