//! Input validation for booking submissions.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};

use crate::models::NewBooking;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty value where one is required.
    Empty(String),
    /// Invalid email format.
    InvalidEmail(String),
    /// Invalid phone number.
    InvalidPhone(String),
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Date or time could not be parsed.
    InvalidDateTime(String),
    /// Appointment is in the past.
    InPast,
    /// Appointment falls outside business hours.
    OutsideBusinessHours(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::InvalidEmail(msg) => write!(f, "Invalid email: {}", msg),
            ValidationError::InvalidPhone(msg) => write!(f, "Invalid phone number: {}", msg),
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::InvalidDateTime(msg) => write!(f, "Invalid appointment: {}", msg),
            ValidationError::InPast => write!(f, "Appointment must be in the future"),
            ValidationError::OutsideBusinessHours(msg) => {
                write!(f, "Outside business hours: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for email addresses.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum allowed length for the issue description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Digit count bounds for phone numbers.
pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Opening hours for a weekday, `None` when closed.
pub fn business_hours(day: Weekday) -> Option<(NaiveTime, NaiveTime)> {
    let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0);
    match day {
        Weekday::Sun => None,
        Weekday::Sat => hm(10, 0).zip(hm(16, 0)),
        _ => hm(9, 0).zip(hm(18, 0)),
    }
}

/// Validate a booking form submission against the current time.
pub fn validate_new_booking(new: &NewBooking) -> Result<(), ValidationError> {
    validate_new_booking_at(new, Utc::now())
}

/// Validate a booking form submission relative to `now`.
pub fn validate_new_booking_at(new: &NewBooking, now: DateTime<Utc>) -> Result<(), ValidationError> {
    require("customerName", &new.customer_name)?;
    require("deviceType", &new.device_type)?;
    require("serviceType", &new.service_type)?;
    require("issueDescription", &new.issue_description)?;

    let description_len = new.issue_description.trim().chars().count();
    if description_len > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "issueDescription".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
            actual: description_len,
        });
    }

    validate_email(&new.email)?;
    validate_phone(&new.phone)?;
    validate_appointment(&new.preferred_date, &new.preferred_time, now)
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field.to_string()));
    }
    Ok(())
}

/// Validate an email address (basic format check).
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Empty("email".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LENGTH,
            actual: email.len(),
        });
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail(
            "must contain an @ symbol".to_string(),
        ));
    };

    if domain.contains('@') {
        return Err(ValidationError::InvalidEmail(
            "must contain exactly one @ symbol".to_string(),
        ));
    }

    if local.is_empty() || domain.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "missing text before or after @".to_string(),
        ));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail(
            "domain must look like example.com".to_string(),
        ));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail(
            "cannot contain spaces".to_string(),
        ));
    }

    Ok(())
}

/// Validate a phone number: digits plus common separators, 7-15 digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Empty("phone".to_string()));
    }

    if let Some(c) = phone
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.')))
    {
        return Err(ValidationError::InvalidPhone(format!(
            "invalid character '{}'",
            c
        )));
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::InvalidPhone(format!(
            "expected {}-{} digits, got {}",
            MIN_PHONE_DIGITS, MAX_PHONE_DIGITS, digits
        )));
    }

    Ok(())
}

/// Validate a preferred appointment date (`YYYY-MM-DD`) and time (`HH:MM`).
pub fn validate_appointment(
    date: &str,
    time: &str,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDateTime(format!("unreadable date '{}'", date)))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| ValidationError::InvalidDateTime(format!("unreadable time '{}'", time)))?;

    if date.and_time(time) <= now.naive_utc() {
        return Err(ValidationError::InPast);
    }

    let weekday = date.weekday();
    let Some((open, close)) = business_hours(weekday) else {
        return Err(ValidationError::OutsideBusinessHours(format!(
            "closed on {}",
            weekday
        )));
    };

    if time < open || time >= close {
        return Err(ValidationError::OutsideBusinessHours(format!(
            "{} hours are {} to {}",
            weekday,
            open.format("%H:%M"),
            close.format("%H:%M")
        )));
    }

    Ok(())
}
