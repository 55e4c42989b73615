//! X-axis labels: clock time for intraday windows, calendar date otherwise.

use crate::shared::DayRange;
use chrono::{DateTime, FixedOffset, Timelike, Utc};

/// Format one sample timestamp for the label axis.
///
/// One-day windows get a 12-hour clock (`H:MM AM/PM`, `12` for midnight and
/// noon); longer windows get `M/D/YYYY`. Timestamps outside chrono's range
/// fall back to the raw millis.
pub fn format_label(time_ms: i64, days: DayRange, offset: &FixedOffset) -> String {
    let Some(utc) = DateTime::<Utc>::from_timestamp_millis(time_ms) else {
        return time_ms.to_string();
    };
    let local = utc.with_timezone(offset);

    if days.is_intraday() {
        let hour = local.hour();
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        let meridiem = if hour >= 12 { "PM" } else { "AM" };
        format!("{}:{:02} {}", hour12, local.minute(), meridiem)
    } else {
        local.format("%-m/%-d/%Y").to_string()
    }
}
