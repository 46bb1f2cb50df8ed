//! Calendar helpers for the year-stepped engine.
//!
//! Generators walk month boundaries, the benefit calculator shifts
//! first-of-month dates by whole years and months, and accounts accrue growth
//! over partial years. All of it is plain calendar arithmetic, so it is done
//! here on Rata Die day numbers and (year, month) pairs instead of going
//! through jiff's `Span` normalisation.

use jiff::civil::Date;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[inline]
pub fn days_in_year(year: i16) -> i32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// Convert a civil date to a Rata Die day number (days since 0001-01-01).
///
/// Uses the proleptic Gregorian calendar algorithm from Baum (2017).
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // Shift March = month 1 so Feb (end of "year") is month 12
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

/// Convert a Rata Die day number back to a civil date.
#[inline]
fn rd_to_date(rd: i32) -> Date {
    let z = rd + 306;
    let h = 100 * z - 25;
    let a = h / 3_652_425;
    let b = a - a / 4;
    let y = (100 * b + h) / 36_525;
    let c = b + z - 365 * y - y / 4;
    let m = (5 * c + 456) / 153;
    let day = c - (153 * m - 457) / 5;

    let (year, month) = if m > 12 { (y + 1, m - 12) } else { (y, m) };

    jiff::civil::date(year as i16, month as i8, day as i8)
}

/// Number of days between two dates (`d2 - d1`), negative when `d2 < d1`.
#[inline]
pub fn fast_days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Add `n` days to a date (negative `n` moves backwards).
#[inline]
pub fn add_days(d: Date, n: i32) -> Date {
    rd_to_date(rata_die(d) + n)
}

/// First day of the month containing `d`.
#[inline]
pub fn month_start(d: Date) -> Date {
    jiff::civil::date(d.year(), d.month(), 1)
}

/// First day of the month following the one containing `d`.
#[inline]
pub fn next_month_start(d: Date) -> Date {
    shift_months(month_start(d), 1)
}

/// First day of `year`.
#[inline]
pub fn year_start(year: i16) -> Date {
    jiff::civil::date(year, 1, 1)
}

/// Move a date by whole months, keeping the day of month.
///
/// Days past the end of the target month clamp to its last day.
#[inline]
pub fn shift_months(d: Date, months: i32) -> Date {
    let index = d.year() as i32 * 12 + (d.month() as i32 - 1) + months;
    let year = index.div_euclid(12) as i16;
    let month = (index.rem_euclid(12) + 1) as i8;
    let last_day = jiff::civil::date(year, month, 1).days_in_month();
    jiff::civil::date(year, month, d.day().min(last_day))
}

/// Move a date by whole years, keeping month and day.
#[inline]
pub fn shift_years(d: Date, years: i32) -> Date {
    shift_months(d, years * 12)
}

/// Whole calendar months from `a` to `b`, ignoring the day of month.
#[inline]
pub fn months_between(a: Date, b: Date) -> i32 {
    (b.year() as i32 * 12 + b.month() as i32) - (a.year() as i32 * 12 + a.month() as i32)
}

/// Iterate the first-of-month dates inside `[from, to)`.
///
/// `from` itself is yielded only when it already falls on the 1st.
pub fn month_starts(from: Date, to: Date) -> impl Iterator<Item = Date> {
    let first = if from.day() == 1 {
        from
    } else {
        next_month_start(from)
    };
    std::iter::successors(Some(first), |d| Some(shift_months(*d, 1))).take_while(move |d| *d < to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_fast_days_between_across_year() {
        assert_eq!(fast_days_between(date(2024, 1, 1), date(2025, 1, 1)), 366);
        assert_eq!(fast_days_between(date(2025, 1, 1), date(2026, 1, 1)), 365);
        assert_eq!(fast_days_between(date(2025, 1, 2), date(2025, 1, 1)), -1);
    }

    #[test]
    fn test_fast_days_between_matches_jiff() {
        let pairs = [
            (date(2020, 1, 1), date(2030, 6, 15)),
            (date(2024, 2, 29), date(2025, 2, 28)),
            (date(2025, 12, 31), date(2026, 1, 1)),
        ];
        for (d1, d2) in pairs {
            assert_eq!(fast_days_between(d1, d2), (d2 - d1).get_days());
        }
    }

    #[test]
    fn test_add_days_wraps_months() {
        assert_eq!(add_days(date(2025, 1, 31), 1), date(2025, 2, 1));
        assert_eq!(add_days(date(2025, 1, 1), -1), date(2024, 12, 31));
        assert_eq!(add_days(date(2024, 2, 28), 1), date(2024, 2, 29));
    }

    #[test]
    fn test_shift_months_crosses_years() {
        assert_eq!(shift_months(date(2025, 11, 1), 3), date(2026, 2, 1));
        assert_eq!(shift_months(date(2025, 1, 1), -1), date(2024, 12, 1));
        assert_eq!(shift_years(date(1964, 3, 1), 67), date(2031, 3, 1));
    }

    #[test]
    fn test_shift_clamps_to_month_end() {
        assert_eq!(shift_years(date(1964, 2, 29), 62), date(2026, 2, 28));
        assert_eq!(shift_months(date(2025, 1, 31), 1), date(2025, 2, 28));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2028, 3, 1), date(2031, 3, 1)), 36);
        assert_eq!(months_between(date(2031, 3, 15), date(2031, 4, 1)), 1);
        assert_eq!(months_between(date(2031, 3, 1), date(2030, 3, 1)), -12);
    }

    #[test]
    fn test_month_starts_on_boundary() {
        let dates: Vec<_> = month_starts(date(2025, 1, 1), date(2026, 1, 1)).collect();
        assert_eq!(dates.len(), 12);
        assert_eq!(dates[0], date(2025, 1, 1));
        assert_eq!(dates[11], date(2025, 12, 1));
    }

    #[test]
    fn test_month_starts_mid_month() {
        let dates: Vec<_> = month_starts(date(2025, 10, 16), date(2026, 1, 1)).collect();
        assert_eq!(dates, vec![date(2025, 11, 1), date(2025, 12, 1)]);
    }

    #[test]
    fn test_month_starts_empty_window() {
        assert_eq!(month_starts(date(2025, 3, 2), date(2025, 3, 20)).count(), 0);
        assert_eq!(month_starts(date(2025, 3, 1), date(2025, 3, 1)).count(), 0);
    }
}
