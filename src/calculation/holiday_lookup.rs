//! Statutory holiday lookup seam.
//!
//! The classifiers never read a holiday calendar directly. They are handed a
//! [`HolidayLookup`] at construction and ask it, once per distinct accrual
//! sub-interval, for the statutory holidays falling on weekdays.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::DateInterval;

/// Source of statutory holidays.
///
/// Implementations must be deterministic for a given interval and return
/// only weekday holidays inside it. Failures are reported as
/// [`EngineError::HolidayLookupFailed`](crate::error::EngineError::HolidayLookupFailed).
pub trait HolidayLookup {
    /// Weekday statutory holidays within `interval`.
    fn weekday_holidays(&self, interval: &DateInterval) -> EngineResult<BTreeSet<NaiveDate>>;
}

impl<L: HolidayLookup + ?Sized> HolidayLookup for &L {
    fn weekday_holidays(&self, interval: &DateInterval) -> EngineResult<BTreeSet<NaiveDate>> {
        (**self).weekday_holidays(interval)
    }
}

impl<L: HolidayLookup + ?Sized> HolidayLookup for Arc<L> {
    fn weekday_holidays(&self, interval: &DateInterval) -> EngineResult<BTreeSet<NaiveDate>> {
        (**self).weekday_holidays(interval)
    }
}

/// A lookup with no statutory holidays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayLookup for NoHolidays {
    fn weekday_holidays(&self, _interval: &DateInterval) -> EngineResult<BTreeSet<NaiveDate>> {
        Ok(BTreeSet::new())
    }
}

/// Request-scoped memo over another lookup, keyed by exact interval.
///
/// Not `Sync`: create one per calculation.
pub struct CachedHolidayLookup<L> {
    inner: L,
    cache: RefCell<HashMap<DateInterval, BTreeSet<NaiveDate>>>,
}

impl<L: HolidayLookup> CachedHolidayLookup<L> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Number of distinct intervals fetched so far.
    pub fn cached_intervals(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<L: HolidayLookup> HolidayLookup for CachedHolidayLookup<L> {
    fn weekday_holidays(&self, interval: &DateInterval) -> EngineResult<BTreeSet<NaiveDate>> {
        if let Some(hit) = self.cache.borrow().get(interval) {
            return Ok(hit.clone());
        }
        debug!(interval = %interval, "Fetching statutory holidays");
        let holidays = self.inner.weekday_holidays(interval)?;
        self.cache.borrow_mut().insert(*interval, holidays.clone());
        Ok(holidays)
    }
}
