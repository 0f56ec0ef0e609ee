/// Pure date arithmetic for birthday occurrences (transport-agnostic)
use chrono::{Datelike, NaiveDate};

/// Date-of-birth format used in the spreadsheet, e.g. "05.03.1990"
const DOB_FORMAT: &str = "%d.%m.%Y";

/// A date-of-birth cell that could not be parsed
#[derive(Debug)]
pub struct ParseError {
    pub value: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid date of birth '{}': expected day.month.year (e.g. 05.03.1990)",
            self.value
        )
    }
}

impl std::error::Error for ParseError {}

/// Parse a date of birth in day.month.year form
pub fn parse_dob(value: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(value.trim(), DOB_FORMAT).map_err(|_| ParseError {
        value: value.to_string(),
    })
}

/// Check if a given year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Project a date of birth onto a target year, keeping month and day.
///
/// February 29 in a non-leap target year maps to February 28, so the
/// birthday is still announced (a day early) rather than skipped.
pub fn occurrence_in_year(dob: NaiveDate, year: i32) -> NaiveDate {
    if dob.month() == 2 && dob.day() == 29 && !is_leap_year(year) {
        return NaiveDate::from_ymd_opt(year, 2, 28).expect("Feb 28 exists in every year");
    }

    NaiveDate::from_ymd_opt(year, dob.month(), dob.day())
        .expect("month/day taken from a valid date")
}

/// Days between two dates compared by day-of-year, each within its own year.
///
/// This is a cyclic-year approximation: it only makes sense for windows that
/// stay inside one calendar year. A late-December reference with an
/// early-January occurrence yields a large negative value, not the real
/// few-day gap. Callers rely on the raw signed difference, so the
/// limitation stands.
pub fn days_until_same_day(reference: NaiveDate, occurrence: NaiveDate) -> i64 {
    occurrence.ordinal() as i64 - reference.ordinal() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_dob() {
        assert_eq!(parse_dob("05.03.1990").unwrap(), date(1990, 3, 5));
        assert_eq!(parse_dob("29.02.2000").unwrap(), date(2000, 2, 29));
        assert_eq!(parse_dob(" 1.12.1985 ").unwrap(), date(1985, 12, 1));
    }

    #[test]
    fn test_parse_dob_rejects_malformed() {
        assert!(parse_dob("1990-03-05").is_err());
        assert!(parse_dob("32.01.1990").is_err());
        assert!(parse_dob("30.02.1999").is_err());
        assert!(parse_dob("").is_err());
        assert!(parse_dob("yesterday").is_err());
    }

    #[test]
    fn test_parse_dob_error_mentions_value() {
        let err = parse_dob("03/05/1990").unwrap_err();
        assert!(err.to_string().contains("03/05/1990"));
    }

    #[test]
    fn test_is_leap_year() {
        assert!(is_leap_year(2000)); // Divisible by 400
        assert!(is_leap_year(2024));

        assert!(!is_leap_year(1900)); // Divisible by 100, not by 400
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_occurrence_keeps_month_and_day() {
        let occurrence = occurrence_in_year(date(1990, 3, 5), 2026);
        assert_eq!(occurrence, date(2026, 3, 5));

        let end_of_year = occurrence_in_year(date(1985, 12, 31), 2026);
        assert_eq!(end_of_year, date(2026, 12, 31));
    }

    #[test]
    fn test_occurrence_leap_day_in_leap_year() {
        assert_eq!(occurrence_in_year(date(2000, 2, 29), 2024), date(2024, 2, 29));
    }

    #[test]
    fn test_occurrence_leap_day_maps_to_feb_28() {
        assert_eq!(occurrence_in_year(date(2000, 2, 29), 2025), date(2025, 2, 28));
    }

    #[test]
    fn test_days_until_same_day() {
        assert_eq!(days_until_same_day(date(2026, 3, 5), date(2026, 3, 5)), 0);
        assert_eq!(days_until_same_day(date(2026, 3, 5), date(2026, 3, 6)), 1);
        assert_eq!(days_until_same_day(date(2026, 3, 5), date(2026, 3, 4)), -1);
        assert_eq!(days_until_same_day(date(2026, 3, 5), date(2026, 4, 2)), 28);
    }

    #[test]
    fn test_days_until_same_day_does_not_wrap_years() {
        // Known limitation: the day-of-year difference goes far negative
        // instead of wrapping into the next year.
        let distance = days_until_same_day(date(2026, 12, 20), date(2026, 1, 3));
        assert_eq!(distance, -351);
    }
}
