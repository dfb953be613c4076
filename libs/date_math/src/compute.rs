use chrono::{Datelike, Weekday};

use crate::date_value::DateValue;

/// Four Julian years, i.e. `4 * 365.25` days.
const DAYS_PER_FOUR_YEARS: i64 = 1461;

/// Signed number of days from `first` to `last`.
///
/// Negative when `last` precedes `first`.
pub fn days_between(first: DateValue, last: DateValue) -> i64 {
    (last.as_naive_date() - first.as_naive_date()).num_days()
}

/// Full English weekday name of `value`.
pub fn weekday_of(value: DateValue) -> &'static str {
    match value.as_naive_date().weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Approximate age in whole years: `floor(days / 365.25)`.
///
/// Not anniversary-aware. A `birth` after `today` yields a negative age,
/// floored towards negative infinity.
pub fn age_in_years(birth: DateValue, today: DateValue) -> i64 {
    let days = days_between(birth, today);
    (days * 4).div_euclid(DAYS_PER_FOUR_YEARS)
}
