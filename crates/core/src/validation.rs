//! Field validation and normalization for talent and work payloads.
//!
//! Every failure here is a client-input problem and maps to
//! [`CoreError::Unprocessable`].

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::naming::title_case;

/// Wire format for release dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum stored length of a talent name part.
pub const MAX_NAME_LEN: usize = 120;

/// Maximum stored length of a gender label.
pub const MAX_GENDER_LEN: usize = 20;

/// Require a non-blank string and return it title-cased.
pub fn normalized_text(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Unprocessable(format!("{field} must not be empty")));
    }
    if value.chars().count() > max_len {
        return Err(CoreError::Unprocessable(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(title_case(value))
}

/// Require a non-blank title and return it title-cased. Titles are unbounded.
pub fn normalized_title(value: &str) -> Result<String, CoreError> {
    normalized_text("title", value, usize::MAX)
}

/// Require a strictly positive age that fits the storage column.
pub fn validate_age(age: i64) -> Result<i32, CoreError> {
    if age < 1 {
        return Err(CoreError::Unprocessable("age must be positive".into()));
    }
    i32::try_from(age).map_err(|_| CoreError::Unprocessable("age is out of range".into()))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_release_date(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        CoreError::Unprocessable(format!("release_date '{value}' is not a YYYY-MM-DD date"))
    })
}
