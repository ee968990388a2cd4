// =====================================================================================
// INPUT VALIDATION FOR REGISTRY OPERATIONS
// =====================================================================================

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use shared_utils::text::digits_only;

static PATIENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^PT\d{6}$").expect("valid patient id regex"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

const MIN_PHONE_DIGITS: usize = 10;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

pub fn is_valid_patient_id(patient_id: &str) -> bool {
    PATIENT_ID_REGEX.is_match(patient_id)
}

/// At least ten digits once punctuation and spaces are stripped.
pub fn is_valid_phone(phone: &str) -> bool {
    digits_only(phone).len() >= MIN_PHONE_DIGITS
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email) && email.len() <= 254
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// Combines a date and a time of day into a timestamp. When `time` is blank
/// the date string itself may carry the time, separated by `T` or a space.
pub fn parse_appointment_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = if time.trim().is_empty() {
        date.trim().replacen('T', " ", 1)
    } else {
        format!("{} {}", date.trim(), time.trim())
    };

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&combined, format).ok())
}
