//! Wall-clock stamps for the harness transcript.

use chrono::{DateTime, Utc};

/// Formats `now` as an ISO-8601 UTC timestamp, e.g. `2024-03-01T12:00:00Z`.
pub fn utc_timestamp(now: &DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// The `time=<unix seconds> (<timestamp>)` line logged before each transfer.
pub fn time_line(now: &DateTime<Utc>) -> String {
    format!("time={} ({})", now.timestamp(), utc_timestamp(now))
}
