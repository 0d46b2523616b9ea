use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Formats a stored timestamp for display in the local time zone,
/// e.g. `Jan 5, 2024, 03:07 PM`.
pub fn format_timestamp(value: &str) -> String {
    format_timestamp_in(value, &Local)
}

/// Same as [`format_timestamp`] with an explicit zone.
pub fn format_timestamp_in<Tz>(value: &str, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_timestamp(value) {
        Some(instant) => instant
            .with_timezone(zone)
            .format(DISPLAY_FORMAT)
            .to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Accepts RFC 3339 and zone-less SQL style timestamps. Zone-less values are
/// taken as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
