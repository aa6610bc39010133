use chrono::{DateTime, NaiveDate, NaiveDateTime};

const INVALID_DATE: &str = "Invalid Date";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub(crate) fn parse_date(date_string: &str) -> Option<NaiveDate> {
    let s = date_string.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.date_naive());
    }
    DATETIME_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(s, format)
            .ok()
            .map(|datetime| datetime.date())
    })
}

/// Formats a date string in en-US long style, e.g. `January 5, 2024`.
///
/// Unparseable input yields `Invalid Date` instead of an error.
pub(crate) fn get_formatted_date(date_string: &str) -> String {
    match parse_date(date_string) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}
