use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// chrono alone accepts single-digit months and days for `%m`/`%d`, so the
/// shape is checked before the calendar validation.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let well_formed = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// ISO 8601 year + week number.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl WeekKey {
    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn monday(&self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
    }

    pub fn sunday(&self) -> Option<NaiveDate> {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Sun)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.week)
    }
}

/// Calendar year + month.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.and_then(|d| d.pred_opt())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Number of days in `first..=last` that also fall inside `span_start..=span_end`.
pub fn overlap_days(
    first: NaiveDate,
    last: NaiveDate,
    span_start: NaiveDate,
    span_end: NaiveDate,
) -> u32 {
    let start = first.max(span_start);
    let end = last.min(span_end);
    if end < start {
        return 0;
    }
    (end - start).num_days() as u32 + 1
}

/// Rounds exact halves to even, like the tracker's own exports.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-01"), Some(date(2024, 1, 1)));
        assert_eq!(parse_date("2024-02-29"), Some(date(2024, 2, 29)));

        assert_eq!(parse_date("2023-02-29"), None); // not a leap year
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("2024-1-1"), None);
        assert_eq!(parse_date("01/01/2024"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-01-01 "), None);
    }

    #[test]
    fn test_week_key_year_boundaries() {
        // Dec 30 2024 is the Monday of ISO week 1 of 2025
        let key = WeekKey::of(date(2024, 12, 31));
        assert_eq!(key, WeekKey { year: 2025, week: 1 });
        assert_eq!(key.to_string(), "2025-1");
        assert_eq!(key.monday(), Some(date(2024, 12, 30)));
        assert_eq!(key.sunday(), Some(date(2025, 1, 5)));

        // Jan 1 2021 is a Friday, still in 2020-W53
        let key = WeekKey::of(date(2021, 1, 1));
        assert_eq!(key, WeekKey { year: 2020, week: 53 });
        assert_eq!(key.monday(), Some(date(2020, 12, 28)));
    }

    #[test]
    fn test_month_key() {
        let key = MonthKey::of(date(2024, 2, 10));
        assert_eq!(key.to_string(), "2024-02");
        assert_eq!(key.first_day(), Some(date(2024, 2, 1)));
        assert_eq!(key.last_day(), Some(date(2024, 2, 29)));
        assert_eq!(MonthKey::of(date(2023, 12, 5)).last_day(), Some(date(2023, 12, 31)));
    }

    #[test]
    fn test_overlap_days() {
        let mon = date(2024, 1, 1);
        let sun = date(2024, 1, 7);
        assert_eq!(overlap_days(mon, sun, date(2023, 12, 1), date(2024, 2, 1)), 7);
        assert_eq!(overlap_days(mon, sun, date(2024, 1, 3), date(2024, 2, 1)), 5);
        assert_eq!(overlap_days(mon, sun, date(2024, 1, 3), date(2024, 1, 3)), 1);
        assert_eq!(overlap_days(mon, sun, date(2024, 2, 1), date(2024, 2, 2)), 0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(12.345, 1), 12.3);
        assert_eq!(round_to(12.36, 1), 12.4);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        // exact halves go to the even neighbour
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
    }
}
