//! Human-readable formatting for byte counts, timestamps and labels.
//!
//! Everything here is a total function over well-formed input: the chart
//! pipeline and the terminal UI call these without error handling.

use std::fmt;

use chrono::TimeZone;

use crate::report::Timestamp;

/// Unit symbols, each 1024 times the previous one.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Layout used for file creation/modification times.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a size in bytes to a human-readable string.
///
/// Picks the largest unit the value reaches (clamped to TB) and always prints
/// two decimals, so `1536` becomes `"1.50 KB"`. Zero is special-cased as
/// `"0 B"`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut index = 0;
    let mut scale: u64 = 1;
    while index + 1 < UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        index += 1;
    }

    format!("{:.2} {}", bytes as f64 / scale as f64, UNITS[index])
}

/// The plain summary line shown above the storage bar.
pub fn summary_line(used: u64, total: u64) -> String {
    format!("{} of {} Used", format_bytes(used), format_bytes(total))
}

/// Format a timestamp in an explicit time zone.
///
/// Seconds that do not map to a single instant (out of chrono's range) are
/// printed raw rather than dropped.
pub fn format_timestamp_in<Tz>(ts: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    i64::try_from(ts.secs())
        .ok()
        .and_then(|secs| tz.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| ts.secs().to_string())
}

/// Truncate a string to a maximum length, adding ellipsis if needed.
/// Respects Unicode character boundaries.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else if max_chars > 3 {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_chars).collect()
    }
}

/// Truncate a path to show the end portion with ellipsis at start.
pub fn truncate_path(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        s.chars().skip(char_count - max_chars).collect()
    } else {
        let skip = char_count - (max_chars - 3);
        let suffix: String = s.chars().skip(skip).collect();
        format!("...{}", suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1), "1.00 B");
        assert_eq!(format_bytes(512), "512.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1048576), "1.00 MB");
        assert_eq!(format_bytes(1073741824), "1.00 GB");
        assert_eq!(format_bytes(1610612736), "1.50 GB");
        assert_eq!(format_bytes(1099511627776), "1.00 TB");
    }

    #[test]
    fn test_format_bytes_clamps_to_terabytes() {
        // 1 PiB stays in TB
        assert_eq!(format_bytes(1024u64.pow(5)), "1024.00 TB");
        assert!(format_bytes(u64::MAX).ends_with(" TB"));
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(600, 1000), "600.00 B of 1000.00 B Used");
        assert_eq!(summary_line(0, 1073741824), "0 B of 1.00 GB Used");
    }

    #[test]
    fn test_format_timestamp_utc() {
        assert_eq!(
            format_timestamp_in(Timestamp::from_secs(0), &Utc),
            "1970-01-01 00:00:00"
        );
        assert_eq!(
            format_timestamp_in(Timestamp::from_secs(1_700_000_000), &Utc),
            "2023-11-14 22:13:20"
        );
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        let ts = Timestamp::from_secs(u64::MAX);
        assert_eq!(format_timestamp_in(ts, &Utc), u64::MAX.to_string());
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hi", 2), "hi");
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_path() {
        assert_eq!(truncate_path("/short", 10), "/short");
        assert_eq!(truncate_path("/very/long/path/to/file", 15), "...path/to/file");
    }
}
