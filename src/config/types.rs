//! Configuration types for the statutory holiday calendar.
//!
//! This module contains the strongly-typed structures deserialized from the
//! calendar YAML files and the assembled [`HolidayCalendar`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::calculation::{HolidayLookup, is_weekday};
use crate::error::{EngineError, EngineResult};
use crate::models::DateInterval;

/// Metadata about the calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarMetadata {
    /// Short code of the calendar (e.g., "KR").
    pub code: String,
    /// The human-readable name of the calendar.
    pub name: String,
    /// The jurisdiction the holidays apply to.
    pub region: String,
    /// URL of the official holiday publication.
    pub source_url: String,
}

impl fmt::Display for CalendarMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ({})", self.name, self.code, self.region)
    }
}

/// One statutory holiday.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayEntry {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The holiday name.
    pub name: String,
}

/// Holidays file for a single calendar year.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidayYearFile {
    /// The year every entry must fall in.
    pub year: i32,
    /// The holidays of the year, weekend ones included.
    pub holidays: Vec<HolidayEntry>,
}

/// A statutory holiday calendar covering a set of whole years.
///
/// Lookups for intervals reaching into a year the calendar does not cover
/// fail instead of silently reporting no holidays.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    metadata: CalendarMetadata,
    holidays: BTreeMap<NaiveDate, String>,
    years: BTreeSet<i32>,
}

impl HolidayCalendar {
    /// Creates a calendar from its metadata and per-year files.
    pub fn new(metadata: CalendarMetadata, files: Vec<HolidayYearFile>) -> Self {
        let mut holidays = BTreeMap::new();
        let mut years = BTreeSet::new();
        for file in files {
            years.insert(file.year);
            for entry in file.holidays {
                holidays.insert(entry.date, entry.name);
            }
        }
        Self {
            metadata,
            holidays,
            years,
        }
    }

    /// Returns the calendar metadata.
    pub fn calendar(&self) -> &CalendarMetadata {
        &self.metadata
    }

    /// The years the calendar covers, in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.iter().copied()
    }

    /// Named weekday holidays inside `interval`, in date order.
    pub fn weekday_holidays_named(&self, interval: &DateInterval) -> Vec<(NaiveDate, &str)> {
        self.holidays
            .range(interval.start()..=interval.end())
            .filter(|(date, _)| is_weekday(**date))
            .map(|(date, name)| (*date, name.as_str()))
            .collect()
    }

    fn covers(&self, interval: &DateInterval) -> bool {
        (interval.start().year()..=interval.end().year()).all(|year| self.years.contains(&year))
    }
}

impl HolidayLookup for HolidayCalendar {
    fn weekday_holidays(&self, interval: &DateInterval) -> EngineResult<BTreeSet<NaiveDate>> {
        if !self.covers(interval) {
            return Err(EngineError::HolidayLookupFailed {
                start: interval.start(),
                end: interval.end(),
                message: format!(
                    "{} has no holidays for part of the interval (see {})",
                    self.metadata, self.metadata.source_url
                ),
            });
        }
        let named = self.weekday_holidays_named(interval);
        debug!(
            calendar = %self.metadata.code,
            interval = %interval,
            holidays = ?named,
            "Weekday holidays"
        );
        Ok(named.into_iter().map(|(date, _)| date).collect())
    }
}
