use chrono::NaiveDate;

/// Average days per year, leap years included
const DAYS_PER_YEAR: f64 = 365.25;

/// Age in fractional years at `today`
///
/// Counts calendar days elapsed since birth and divides by 365.25. A birth
/// date after `today` yields a negative age.
#[inline]
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> f64 {
    (today - date_of_birth).num_days() as f64 / DAYS_PER_YEAR
}

/// Absolute number of days between two dates
#[inline]
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Check if a date lies within `[from, to]`, both bounds inclusive
#[inline]
pub fn is_within_window(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    date >= from && date <= to
}
