//! Wall-clock helpers.
//!
//! Timestamps are epoch milliseconds; `HH:mm:ss` formatting is for log and
//! display lines only and never feeds back into protocol semantics.

use chrono::{Local, TimeZone, Utc};

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Format an epoch-millisecond timestamp as local `HH:mm:ss`.
pub fn wall_clock(millis: u64) -> String {
    match Local.timestamp_millis_opt(millis as i64).single() {
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}

/// Local `HH:mm:ss` for the current instant.
pub fn now_wall_clock() -> String {
    Local::now().format("%H:%M:%S").to_string()
}
