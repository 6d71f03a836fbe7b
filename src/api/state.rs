//! Application state for the leave entitlement API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::calculation::HolidayLookup;
use crate::config::HolidayCalendar;

/// Shared application state.
///
/// Holds the statutory holiday source shared by every calculation.
#[derive(Clone)]
pub struct AppState {
    holidays: Arc<dyn HolidayLookup + Send + Sync>,
}

impl AppState {
    /// Creates application state backed by a loaded holiday calendar.
    pub fn new(calendar: HolidayCalendar) -> Self {
        Self::with_lookup(Arc::new(calendar))
    }

    /// Creates application state backed by any holiday lookup.
    pub fn with_lookup(holidays: Arc<dyn HolidayLookup + Send + Sync>) -> Self {
        Self { holidays }
    }

    /// Returns the shared holiday lookup.
    pub fn holidays(&self) -> Arc<dyn HolidayLookup + Send + Sync> {
        Arc::clone(&self.holidays)
    }
}
