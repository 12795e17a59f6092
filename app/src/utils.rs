//! Utility functions
//!
//! Formatting helpers used across the frontend.

use chrono::{DateTime, NaiveDate, Utc};

/// Compact number for badges ("1.2K", "3.4M")
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map(|t| t.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// "1 task", "3 tasks"
pub fn pluralize(count: u32, singular: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {singular}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_large_numbers() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_240), "1.2K");
        assert_eq!(format_number(3_400_000), "3.4M");
    }

    #[test]
    fn pluralizes_counts() {
        assert_eq!(pluralize(1, "task"), "1 task");
        assert_eq!(pluralize(0, "task"), "0 tasks");
    }

    #[test]
    fn formats_missing_timestamp_as_dash() {
        assert_eq!(format_timestamp(None), "-");
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date");
        assert_eq!(format_date(date), "Mar 5");
    }
}
