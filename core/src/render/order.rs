//! Newest-first ordering of dated records.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use ruichiji_types::Record;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Milliseconds since the epoch, or `0` if `date` is missing or unreadable.
#[must_use]
pub fn timestamp(date: &str) -> i64 {
    let date = date.trim();
    if date.is_empty() {
        return 0;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(date) {
        return parsed.timestamp_millis();
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
        .map_or(0, |parsed| parsed.and_utc().timestamp_millis())
}

/// Sort `items` newest first. Items with equal dates keep their order.
#[must_use]
pub fn sort_by_date_desc<T: Record>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_cached_key(|item| Reverse(timestamp(item.date())));
    items
}
