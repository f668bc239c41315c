use chrono::{DateTime, Utc};

/// Get current Unix timestamp in milliseconds (UTC)
pub fn unix_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a millisecond Unix timestamp to an RFC 3339 string (UTC)
pub fn timestamp_to_rfc3339(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
