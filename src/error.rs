//! Error types for the leave entitlement engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while classifying an employee
//! and computing their leave entitlement.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the leave entitlement engine.
///
/// All operations in the engine return this error type. Input errors are
/// business errors the caller can fix; lookup failures may be retried by
/// re-running the whole calculation; internal inconsistencies are defects.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "hire_date".to_string(),
///     message: "must not be after evaluation_date".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid input field 'hire_date': must not be after evaluation_date"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A request field was malformed, missing or inconsistent.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The statutory holiday lookup could not answer for an interval.
    #[error("Holiday lookup failed for {start}..={end}: {message}")]
    HolidayLookupFailed {
        /// First day of the queried interval.
        start: NaiveDate,
        /// Last day of the queried interval.
        end: NaiveDate,
        /// A description of the lookup failure.
        message: String,
    },

    /// The engine reached a state its own classifiers should make impossible.
    #[error("Internal inconsistency: {message}")]
    InternalInconsistency {
        /// A description of the violated invariant.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InternalInconsistency`].
    pub fn inconsistency(message: impl Into<String>) -> Self {
        EngineError::InternalInconsistency {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("fiscal_year_start", "required for fiscal_year");
        assert_eq!(
            error.to_string(),
            "Invalid input field 'fiscal_year_start': required for fiscal_year"
        );
    }

    #[test]
    fn test_holiday_lookup_failed_displays_interval() {
        let error = EngineError::HolidayLookupFailed {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            message: "calendar unavailable".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Holiday lookup failed for 2024-01-01..=2024-12-31: calendar unavailable"
        );
    }

    #[test]
    fn test_internal_inconsistency_displays_message() {
        let error = EngineError::inconsistency("negative prescribed-day count");
        assert_eq!(
            error.to_string(),
            "Internal inconsistency: negative prescribed-day count"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/calendar.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/calendar.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/holidays/2024.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/holidays/2024.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_inconsistency() -> EngineResult<()> {
            Err(EngineError::inconsistency("unroutable context"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_inconsistency()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::InternalInconsistency { .. })
        ));
    }
}
