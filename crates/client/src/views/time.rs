//! Timestamp display.

use chrono::{DateTime, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%b %d, %Y %H:%M";

/// Render a backend timestamp as `Mar 05, 2024 14:07`.
///
/// Accepts RFC 3339 (with offset, shown in its own offset) and naive ISO-8601
/// with or without fractional seconds. Anything else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    let raw_trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw_trimmed) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw_trimmed, pattern) {
            return dt.format(DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_string()
}
