use chrono::{Datelike, NaiveDate, Weekday};

/// Count leave days in the closed interval `[start, end]`.
///
/// With `exclude_weekends` only Monday–Friday days count. Dates are plain
/// calendar dates; there is no holiday calendar and no timezone handling.
/// An inverted range counts as zero.
pub fn duration(start: NaiveDate, end: NaiveDate, exclude_weekends: bool) -> f64 {
    if end < start {
        return 0.0;
    }

    if !exclude_weekends {
        return (end - start).num_days() as f64 + 1.0;
    }

    let mut days = 0u64;
    let mut current = start;
    while current <= end {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            days += 1;
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    days as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_monday_counts_one() {
        // 2024-07-01 is a Monday
        assert_eq!(duration(d(2024, 7, 1), d(2024, 7, 1), true), 1.0);
    }

    #[test]
    fn single_sunday_counts_zero() {
        // 2024-07-07 is a Sunday
        assert_eq!(duration(d(2024, 7, 7), d(2024, 7, 7), true), 0.0);
    }

    #[test]
    fn friday_to_monday_skips_weekend() {
        // 2024-07-05 (Fri) .. 2024-07-08 (Mon)
        assert_eq!(duration(d(2024, 7, 5), d(2024, 7, 8), true), 2.0);
    }

    #[test]
    fn inverted_range_is_zero() {
        assert_eq!(duration(d(2024, 7, 2), d(2024, 7, 1), true), 0.0);
        assert_eq!(duration(d(2024, 7, 2), d(2024, 7, 1), false), 0.0);
    }

    #[test]
    fn inclusive_calendar_count_without_weekend_exclusion() {
        // Sat..Sun inclusive, 9 calendar days
        assert_eq!(duration(d(2024, 7, 6), d(2024, 7, 14), false), 9.0);
    }

    #[test]
    fn full_week_has_five_working_days() {
        // Mon..Sun
        assert_eq!(duration(d(2024, 7, 1), d(2024, 7, 7), true), 5.0);
    }
}
