//! Configuration loading for the leave entitlement engine.
//!
//! This module loads the statutory holiday calendar from YAML files. The
//! resulting [`HolidayCalendar`] is the production
//! [`HolidayLookup`](crate::calculation::HolidayLookup).
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::HolidayCalendarLoader;
//!
//! let calendar = HolidayCalendarLoader::load("./config/kr").unwrap();
//! println!("Loaded calendar: {}", calendar.calendar().name);
//! ```

mod loader;
mod types;

pub use loader::HolidayCalendarLoader;
pub use types::{CalendarMetadata, HolidayCalendar, HolidayEntry, HolidayYearFile};
