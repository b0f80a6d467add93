use std::time::{SystemTime, UNIX_EPOCH};

pub fn get_u64_time_millis() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        Err(_) => 0
    }
}

/// RFC 3339 timestamp used for match scheduling.
pub fn get_timestamp_string() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
