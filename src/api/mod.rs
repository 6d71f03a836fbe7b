//! HTTP API module for the leave entitlement engine.
//!
//! This module provides the REST endpoint for calculating statutory annual
//! leave over a shared holiday calendar.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, NonWorkingPeriodRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse};
pub use state::AppState;
