//! Core data models for the leave entitlement engine.
//!
//! This module contains all the domain models used throughout the engine.

mod accrual_context;
mod leave_request;
mod leave_result;
mod period;

pub use accrual_context::{
    AccrualContext, AccrualMetrics, AnnualContext, ClassifiedAccrual, CombinedContext,
    FiscalGrantContext, FlowStep, LeaveType, MonthlyContext, ProratedContext,
};
pub use leave_request::{AccrualBasis, FiscalYearStart, LeaveRequest};
pub use leave_result::{
    AnnualLeave, CombinedLeave, FiscalGrantLeave, LeaveCalculation, LeaveResult, MonthlyGrant,
    MonthlyLeave, ProratedLeave,
};
pub use period::{DateInterval, NonWorkingCategory, NonWorkingPeriod};
