//! Pure request validation: coordinate bounds and date-range rules.

use chrono::{NaiveDate, Utc};
use thiserror::Error;

/// Upper bound on the requested span, in days between start and end.
const MAX_RANGE_DAYS: i64 = 31;

/// Textual date format accepted in requests.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A rejected request parameter. The message is the client-facing
/// reason returned with a 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange,

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange,

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDateFormat,

    #[error("Start date ({0}) cannot be in the future. Historical data only.")]
    StartDateInFuture(String),

    #[error("End date ({0}) cannot be in the future. Historical data only.")]
    EndDateInFuture(String),

    #[error("start_date must be less than or equal to end_date")]
    StartAfterEnd,

    #[error("Date range must be 31 days or less")]
    RangeTooLong,
}

/// Validate a store-weather request against the current UTC date.
///
/// Checks run in a fixed order and stop at the first failure. No side
/// effects.
pub fn validate_request(
    latitude: f64,
    longitude: f64,
    start_date: &str,
    end_date: &str,
) -> Result<(), ValidationError> {
    validate_with_today(
        latitude,
        longitude,
        start_date,
        end_date,
        Utc::now().date_naive(),
    )
}

fn validate_with_today(
    latitude: f64,
    longitude: f64,
    start_date: &str,
    end_date: &str,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::LatitudeOutOfRange);
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::LongitudeOutOfRange);
    }

    let start = NaiveDate::parse_from_str(start_date, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDateFormat)?;
    let end = NaiveDate::parse_from_str(end_date, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDateFormat)?;

    if start > today {
        return Err(ValidationError::StartDateInFuture(start_date.to_string()));
    }
    if end > today {
        return Err(ValidationError::EndDateInFuture(end_date.to_string()));
    }
    if start > end {
        return Err(ValidationError::StartAfterEnd);
    }
    if (end - start).num_days() > MAX_RANGE_DAYS {
        return Err(ValidationError::RangeTooLong);
    }

    Ok(())
}
