use chrono::{Datelike, Local, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Trims a raw date value and keeps its `YYYY-MM-DD` prefix.
///
/// Values shorter than ten characters pass through unchanged, so malformed
/// input is not rejected here.
pub fn normalize(value: Option<&str>) -> Option<String> {
    let text = value?.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() >= 10 {
        return Some(text.chars().take(10).collect());
    }
    Some(text.to_string())
}

pub fn today_iso() -> String {
    date_key(Local::now().date_naive())
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `month0` is zero based (0 = January).
pub fn iso_date(year: i32, month0: u32, day: u32) -> String {
    format!("{year:04}-{:02}-{day:02}", month0 + 1)
}

pub fn parse_year_month(date: &str) -> Option<(i32, u32)> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    Some((parsed.year(), parsed.month0()))
}

pub fn year_month_of(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month0())
}

pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let (next_year, next_month0) = if month0 >= 11 {
        (year + 1, 0)
    } else {
        (year, month0 + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month0 + 1, 1),
        NaiveDate::from_ymd_opt(next_year, next_month0 + 1, 1),
    ) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        _ => 0,
    }
}

/// Weekday of the first day of the month, 0 = Sunday.
pub fn first_weekday(year: i32, month0: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .map(|first| first.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES
        .get(month0 as usize)
        .copied()
        .unwrap_or(MONTH_NAMES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_truncates_timestamps() {
        assert_eq!(
            normalize(Some("2024-05-01T10:00:00Z")).as_deref(),
            Some("2024-05-01")
        );
        assert_eq!(normalize(Some("  2024-05-01  ")).as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn normalize_empty_and_missing_are_none() {
        assert_eq!(normalize(Some("")), None);
        assert_eq!(normalize(Some("   ")), None);
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn normalize_keeps_short_values() {
        assert_eq!(normalize(Some("2024-5-1")).as_deref(), Some("2024-5-1"));
    }

    #[test]
    fn month_lengths_follow_gregorian_rules() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2024, 11), 31);
        assert_eq!(days_in_month(2024, 3), 30);
    }

    #[test]
    fn first_weekday_counts_from_sunday() {
        // 2024-02-01 was a Thursday.
        assert_eq!(first_weekday(2024, 1), 4);
        // 2023-10-01 was a Sunday.
        assert_eq!(first_weekday(2023, 9), 0);
    }

    #[test]
    fn iso_date_pads_fields() {
        assert_eq!(iso_date(2024, 0, 5), "2024-01-05");
        assert_eq!(parse_year_month("2024-12-31"), Some((2024, 11)));
        assert_eq!(parse_year_month("not-a-date"), None);
    }
}
