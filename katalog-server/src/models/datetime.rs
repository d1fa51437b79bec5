//! Response timestamp formatting
//!
//! Timestamps are stored in UTC and rendered in responses as wall-clock
//! strings in the catalog's fixed display timezone (Asia/Jakarta, which
//! has no DST). The format is `d/m/yyyy, HH.MM.SS` - day and month
//! unpadded, dots between the time components.

use chrono::{DateTime, Utc};
use chrono_tz::Asia::Jakarta;

/// Render a stored timestamp as a Jakarta wall-clock string.
pub fn format_display(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Jakarta)
        .format("%-d/%-m/%Y, %H.%M.%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_jakarta_wall_clock() {
        // 17:00 UTC is midnight the next day in Jakarta (UTC+7)
        let ts = Utc.with_ymd_and_hms(2024, 1, 31, 17, 0, 0).unwrap();
        assert_eq!(format_display(ts), "1/2/2024, 00.00.00");
    }

    #[test]
    fn day_and_month_are_unpadded() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 2, 3, 4, 5).unwrap();
        assert_eq!(format_display(ts), "2/6/2024, 10.04.05");
    }
}
