//! Configuration loading functionality.
//!
//! This module provides the [`HolidayCalendarLoader`] type for loading a
//! statutory holiday calendar from YAML files.

use chrono::Datelike;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{CalendarMetadata, HolidayCalendar, HolidayYearFile};

/// Loads a statutory holiday calendar from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/kr/
/// ├── calendar.yaml      # Calendar metadata
/// └── holidays/
///     ├── 2024.yaml      # Holidays of one calendar year
///     └── 2025.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::calculation::HolidayLookup;
/// use leave_engine::config::HolidayCalendarLoader;
/// use leave_engine::models::DateInterval;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendarLoader::load("./config/kr")?;
/// let may = DateInterval::new(
///     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
/// )?;
/// println!("{} weekday holidays in May", calendar.weekday_holidays(&may)?.len());
/// # Ok::<(), leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HolidayCalendarLoader;

impl HolidayCalendarLoader {
    /// Loads the calendar in `path`.
    ///
    /// Returns an error if:
    /// - `calendar.yaml` or the `holidays` directory is missing
    /// - the `holidays` directory contains no year files
    /// - any file contains invalid YAML
    /// - a year file lists a date outside its `year`
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<HolidayCalendar> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CalendarMetadata>(&path.join("calendar.yaml"))?;
        let files = Self::load_years(&path.join("holidays"))?;

        let calendar = HolidayCalendar::new(metadata, files);
        info!(
            calendar = %calendar.calendar(),
            source_url = %calendar.calendar().source_url,
            years = ?calendar.years().collect::<Vec<_>>(),
            "Loaded holiday calendar"
        );
        Ok(calendar)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all year files from the holidays directory.
    fn load_years(holidays_dir: &Path) -> EngineResult<Vec<HolidayYearFile>> {
        let dir_str = holidays_dir.display().to_string();

        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<HolidayYearFile>(&path)?;
                if let Some(stray) = file.holidays.iter().find(|h| h.date.year() != file.year) {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("{} is not in year {}", stray.date, file.year),
                    });
                }
                files.push(file);
            }
        }

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no holiday files found)", dir_str),
            });
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::HolidayLookup;
    use crate::models::DateInterval;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn config_path() -> &'static str {
        "./config/kr"
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = HolidayCalendarLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let calendar = result.unwrap();
        assert_eq!(calendar.calendar().code, "KR");
        assert_eq!(calendar.calendar().region, "Republic of Korea");
        assert_eq!(calendar.calendar().source_url, "https://www.law.go.kr");
        assert_eq!(calendar.years().collect::<Vec<_>>(), vec![2023, 2024, 2025]);
    }

    #[test]
    fn test_may_2024_weekday_holidays() {
        let calendar = HolidayCalendarLoader::load(config_path()).unwrap();
        let may = DateInterval::new(date(2024, 5, 1), date(2024, 5, 31)).unwrap();

        // Children's Day (Sunday) is replaced by 05-06; Buddha's Birthday is 05-15.
        assert_eq!(
            calendar.weekday_holidays(&may).unwrap(),
            BTreeSet::from([date(2024, 5, 6), date(2024, 5, 15)])
        );
    }

    #[test]
    fn test_lunar_new_year_2025_weekdays() {
        let calendar = HolidayCalendarLoader::load(config_path()).unwrap();
        let january = DateInterval::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(calendar.weekday_holidays(&january).unwrap().len(), 5);
    }

    #[test]
    fn test_lookup_beyond_loaded_years_fails() {
        let calendar = HolidayCalendarLoader::load(config_path()).unwrap();
        let interval = DateInterval::new(date(2025, 6, 1), date(2026, 5, 31)).unwrap();
        assert!(matches!(
            calendar.weekday_holidays(&interval),
            Err(EngineError::HolidayLookupFailed { .. })
        ));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = HolidayCalendarLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("calendar.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other.err()),
        }
    }
}
