//! Time and timestamp helpers.

use chrono::{DateTime, Local, Utc};

/// UTC timestamp attached to log entries and events.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Format a timestamp as local wall-clock `HH:MM:SS`, the way the panel log shows it.
#[must_use]
pub fn clock_time(ts: Timestamp) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}
