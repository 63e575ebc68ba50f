//! Input validation shared by the lifecycle and registration managers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{EventError, EventResult};

pub static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
pub static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());
static RE_TWELVE_HOUR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s?(AM|PM)$").unwrap());
static RE_TWENTY_FOUR_HOUR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}:\d{2}$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    RE_EMAIL.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    RE_PHONE.is_match(phone)
}

/// Fails with a single message listing every blank field, in input order.
pub fn require_fields(fields: &[(&str, &str)]) -> EventResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EventError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Accepts `YYYY-MM-DD`, or an ISO-8601 datetime whose date part is used.
/// The whole datetime must parse; only then is the time dropped.
pub fn parse_date(raw: &str) -> EventResult<NaiveDate> {
    let value = raw.trim();
    let invalid = || EventError::validation(format!("Invalid date '{}'. Use YYYY-MM-DD", raw));

    if !value.contains('T') {
        return NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid());
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|datetime| datetime.date())
        .ok_or_else(invalid)
}

/// Accepts 24-hour `HH:MM` or 12-hour `H:MM AM/PM`.
pub fn parse_time(raw: &str) -> EventResult<NaiveTime> {
    let raw = raw.trim();
    let invalid = || EventError::validation(format!("Invalid time '{}'. Use HH:MM (24-hour)", raw));

    if let Some(caps) = RE_TWELVE_HOUR.captures(raw) {
        let hours: u32 = caps[1].parse().map_err(|_| invalid())?;
        let minutes: u32 = caps[2].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&hours) {
            return Err(invalid());
        }
        let hours = match (caps[3].to_ascii_uppercase().as_str(), hours) {
            ("AM", 12) => 0,
            ("PM", 12) => 12,
            ("PM", h) => h + 12,
            (_, h) => h,
        };
        return NaiveTime::from_hms_opt(hours, minutes, 0).ok_or_else(invalid);
    }

    if !RE_TWENTY_FOUR_HOUR.is_match(raw) {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| invalid())
}

/// Combines separate date and time inputs into a UTC instant.
pub fn parse_datetime(date: &str, time: &str) -> EventResult<DateTime<Utc>> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Ok(date.and_time(time).and_utc())
}

pub fn ensure_ordered(start: DateTime<Utc>, end: DateTime<Utc>) -> EventResult<()> {
    if end <= start {
        return Err(EventError::validation(
            "End date/time must be after start date/time",
        ));
    }
    Ok(())
}
