//! Parsing and validation of ISO-8601 date query parameters.

use crate::domain::entities::DATE_FORMAT;
use chrono::NaiveDate;

/// Errors produced while reading date parameters.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DateParamError {
    #[error("'{name}' must be an ISO-8601 date (YYYY-MM-DD), got '{value}'")]
    InvalidFormat { name: &'static str, value: String },

    #[error("'from_date' ({from}) must not be after 'to_date' ({to})")]
    InvertedRange { from: NaiveDate, to: NaiveDate },
}

/// Parses a `YYYY-MM-DD` calendar date. Surrounding whitespace is ignored.
pub fn parse_iso_date(name: &'static str, value: &str) -> Result<NaiveDate, DateParamError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        DateParamError::InvalidFormat {
            name,
            value: value.to_string(),
        }
    })
}

/// Checks that `from` is not after `to`. Equal dates are a valid one-day range.
pub fn validate_date_range(from: NaiveDate, to: NaiveDate) -> Result<(), DateParamError> {
    if from > to {
        return Err(DateParamError::InvertedRange { from, to });
    }
    Ok(())
}
