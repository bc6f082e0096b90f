mod client_id;
mod patch_id;

pub use client_id::ClientId;
pub use patch_id::PatchId;

use chrono::{DateTime, Utc};

/// Server-side time, always UTC
pub type Timestamp = DateTime<Utc>;

/// Wire format for patch timestamps (UTC, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp the way clients expect it
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_drops_subseconds() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(format_timestamp(&ts), "2024-03-09 07:05:01");
    }
}
