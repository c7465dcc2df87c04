//! Month Label - History Keys such as "March 2025"

use chrono::{Datelike, Local, NaiveDate};

use crate::constants::MONTH_LABEL_FORMAT;

/// Label of the month containing `date`
pub fn month_label(date: NaiveDate) -> String {
    date.format(MONTH_LABEL_FORMAT).to_string()
}

/// Label of the current local month
pub fn current_month_label() -> String {
    month_label(Local::now().date_naive())
}

/// Parse a label back into `(year, month)`
///
/// Returns `None` for labels that were not produced by [`month_label`].
pub fn parse_month_label(label: &str) -> Option<(i32, u32)> {
    let with_day = format!("1 {}", label.trim());
    NaiveDate::parse_from_str(&with_day, "%d %B %Y")
        .ok()
        .map(|d| (d.year(), d.month()))
}

/// Chronological sort key for a label
///
/// Unparseable labels sort before every real month, then by text.
pub fn month_sort_key(label: &str) -> (i32, u32, String) {
    match parse_month_label(label) {
        Some((year, month)) => (year, month, String::new()),
        None => (i32::MIN, 0, label.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_label() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).expect("date");
        assert_eq!(month_label(date), "March 2025");
    }

    #[test]
    fn test_parse_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).expect("date");
        assert_eq!(parse_month_label(&month_label(date)), Some((2024, 12)));
        assert_eq!(parse_month_label("Sometime"), None);
    }

    #[test]
    fn test_sort_key_is_chronological() {
        let mut labels = vec!["March 2025", "December 2024", "April 2025", "garbage"];
        labels.sort_by_key(|l| month_sort_key(l));
        assert_eq!(labels, vec!["garbage", "December 2024", "March 2025", "April 2025"]);
    }
}
