//! Hire-date accrual classifier.
//!
//! Before the first anniversary the employee accrues monthly leave from the
//! hire date up to the evaluation date. From the first anniversary on, the
//! most recently completed service year is the accrual interval and the
//! attendance decision selects monthly, adjusted or full annual leave.

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AccrualContext, AccrualMetrics, ClassifiedAccrual, DateInterval, FlowStep, LeaveRequest};

use super::census::WorkingDayCensus;
use super::classifier::{AccrualClassifier, decide_annual, monthly_context};
use super::holiday_lookup::HolidayLookup;
use super::metrics::service_years;
use super::period_arithmetic::{add_years, day_before};

/// Classifies requests on the hire-date accrual basis.
pub struct HireDateClassifier<'a, L: HolidayLookup + ?Sized> {
    lookup: &'a L,
}

impl<'a, L: HolidayLookup + ?Sized> HireDateClassifier<'a, L> {
    /// Creates a classifier that fetches statutory holidays from `lookup`.
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }
}

impl<L: HolidayLookup + ?Sized> AccrualClassifier for HireDateClassifier<'_, L> {
    fn classify(&self, request: &LeaveRequest) -> EngineResult<ClassifiedAccrual> {
        let hire = request.hire_date;
        let evaluation = request.evaluation_date;
        let mut flow = vec![FlowStep::HireDateBasis];

        let first_anniversary = add_years(hire, 1)?;
        if evaluation < first_anniversary {
            flow.push(FlowStep::LessThanOneYear);
            let interval = DateInterval::new(hire, evaluation)?;
            debug!(accrual_interval = %interval, "Less than one year of service");

            let census = WorkingDayCensus::survey(self.lookup, interval, request)?;
            let metrics = AccrualMetrics {
                service_years: 0,
                accrual_interval: interval,
                attendance_rate: None,
                prescribed_working_ratio: None,
            };
            return Ok(ClassifiedAccrual {
                context: AccrualContext::Monthly(monthly_context(census, metrics)),
                flow,
            });
        }

        flow.push(FlowStep::AfterOneYear);
        let years = service_years(hire, evaluation)?;
        let interval = DateInterval::new(
            add_years(hire, years - 1)?,
            day_before(add_years(hire, years)?)?,
        )?;
        debug!(accrual_interval = %interval, service_years = years, "After one year of service");

        let census = WorkingDayCensus::survey(self.lookup, interval, request)?;
        let context = decide_annual(census, years, &mut flow)?;
        Ok(ClassifiedAccrual { context, flow })
    }
}
