use chrono::{Datelike, Local, NaiveDate};

/// Short display names indexed by day-of-week (0 = Sunday).
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Today's calendar date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's canonical date string, `YYYY-MM-DD`.
pub fn today_string() -> String {
    format_date(today())
}

/// Formats a date as the canonical `YYYY-MM-DD` key.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a canonical `YYYY-MM-DD` date string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Day of week as 0..=6 with 0 = Sunday. `NaiveDate` carries no time zone,
/// so month/year boundaries and DST transitions cannot shift the result.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Day of week for a canonical date string, if it parses.
pub fn day_of_week_str(s: &str) -> Option<u8> {
    parse_date(s).map(day_of_week)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_canonical_format() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(d), "2024-01-05");
        assert_eq!(parse_date("2024-01-05"), Some(d));
    }

    #[test]
    fn day_of_week_is_sunday_based() {
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday.
        assert_eq!(day_of_week_str("2024-01-01"), Some(1));
        assert_eq!(day_of_week_str("2024-01-06"), Some(6));
        assert_eq!(day_of_week_str("2024-01-07"), Some(0));
        assert_eq!(day_of_week_str("not-a-date"), None);
    }
}
