//! Calendar arithmetic shared by the scheduler, the period model and the reports
//!
//! Month arithmetic clamps a missing day-of-month to the 28th instead of
//! rolling over to the following month (March 31 + 1 month = April 28).

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Day used when a day-of-month does not exist in the target month
pub const CLAMP_DAY: u32 = 28;

/// The smallest date strictly after `reference` that falls on `target`
///
/// Never returns `reference` itself, even if it is already on `target`.
pub fn next_weekday_after(reference: NaiveDate, target: Weekday) -> NaiveDate {
    let offset = days_until_weekday(reference.weekday(), target);
    let offset = if offset <= 0 { offset + 7 } else { offset };
    reference + Duration::days(offset)
}

/// Signed forward distance in days from `from` to `target` within one week (0..=6)
pub fn days_until_weekday(from: Weekday, target: Weekday) -> i64 {
    (target.num_days_from_monday() as i64 - from.num_days_from_monday() as i64).rem_euclid(7)
}

/// Add `months` calendar months, clamping a missing day-of-month to the 28th
pub fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months as i32;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    ymd_clamped(year, month, date.day())
}

/// Build a date, falling back to the 28th when `day` does not exist in the month
pub fn ymd_clamped(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, CLAMP_DAY))
        .unwrap_or(NaiveDate::MIN)
}

/// Number of days in the given month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    (CLAMP_DAY..=31)
        .rev()
        .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
        .unwrap_or(CLAMP_DAY)
}

/// The Monday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The last representable minute of `date` (23:59:59)
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::seconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_weekday_is_strictly_future() {
        // 2025-01-06 is a Monday
        let monday = date(2025, 1, 6);
        assert_eq!(next_weekday_after(monday, Weekday::Mon), date(2025, 1, 13));
        assert_eq!(next_weekday_after(monday, Weekday::Fri), date(2025, 1, 10));
        assert_eq!(next_weekday_after(monday, Weekday::Sun), date(2025, 1, 12));

        let saturday = date(2025, 1, 11);
        assert_eq!(next_weekday_after(saturday, Weekday::Fri), date(2025, 1, 17));
    }

    #[test]
    fn test_add_months_clamps_to_28() {
        assert_eq!(add_months_clamped(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months_clamped(date(2025, 3, 31), 1), date(2025, 4, 28));
        assert_eq!(add_months_clamped(date(2024, 1, 30), 1), date(2024, 2, 28));
        assert_eq!(add_months_clamped(date(2025, 1, 15), 1), date(2025, 2, 15));
    }

    #[test]
    fn test_add_months_year_rollover() {
        assert_eq!(add_months_clamped(date(2024, 12, 31), 1), date(2025, 1, 31));
        assert_eq!(add_months_clamped(date(2024, 11, 10), 3), date(2025, 2, 10));
        assert_eq!(add_months_clamped(date(2024, 5, 10), 0), date(2024, 5, 10));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_week_start() {
        assert_eq!(week_start(date(2025, 1, 8)), date(2025, 1, 6));
        assert_eq!(week_start(date(2025, 1, 6)), date(2025, 1, 6));
        assert_eq!(week_start(date(2025, 1, 5)), date(2024, 12, 30));
    }

    #[test]
    fn test_day_bounds() {
        let d = date(2025, 1, 8);
        assert_eq!(start_of_day(d).to_string(), "2025-01-08 00:00:00");
        assert_eq!(end_of_day(d).to_string(), "2025-01-08 23:59:59");
    }
}
