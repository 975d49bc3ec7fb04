//! Humanized timestamps for the listing page.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Formats `then` relative to `now`.
///
/// | elapsed            | output          |
/// |--------------------|-----------------|
/// | under a minute     | `just now`      |
/// | under an hour      | `5m ago`        |
/// | under a day        | `3h ago`        |
/// | one whole day      | `yesterday`     |
/// | under 30 days      | `12d ago`       |
/// | anything older     | `Jan 05, 2024`  |
///
/// Timestamps in the future count as `just now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();

    if seconds < MINUTE {
        return "just now".to_string();
    }
    if seconds < HOUR {
        return format!("{}m ago", seconds / MINUTE);
    }
    if seconds < DAY {
        return format!("{}h ago", seconds / HOUR);
    }

    match seconds / DAY {
        1 => "yesterday".to_string(),
        days if days < 30 => format!("{days}d ago"),
        _ => then.format("%b %d, %Y").to_string(),
    }
}

/// Parses an RFC 3339 timestamp and formats it with [`relative_time`].
///
/// Values that do not parse are returned unchanged.
pub fn format_timestamp(raw: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(then) => relative_time(then.with_timezone(&Utc), now),
        Err(_) => raw.to_string(),
    }
}
