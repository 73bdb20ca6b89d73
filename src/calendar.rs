//! Calendar-month arithmetic shared by the suggestion engine and reports.

use chrono::{Datelike, NaiveDate, Weekday};

pub(crate) const MIN_YEAR: i32 = 1900;
pub(crate) const MAX_YEAR: i32 = 2100;

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

/// Full English name of a month (1-12). Out-of-range months yield "".
pub(crate) fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("")
}

pub(crate) fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// First day of the given month.
pub(crate) fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// The (year, month) after the given one, rolling December into January.
pub(crate) fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// The (year, month) that lies `count` calendar months before the given one.
pub(crate) fn months_back(year: i32, month: u32, count: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - count as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Half-open range `[first of month, first of next month)`.
pub(crate) fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let (next_year, next) = next_month(year, month);
    Some((first_of_month(year, month)?, first_of_month(next_year, next)?))
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    month_range(year, month)
        .map(|(start, end)| (end - start).num_days() as u32)
        .unwrap_or(0)
}

/// Half-open range covering a whole calendar year.
pub(crate) fn year_range(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((first_of_month(year, 1)?, first_of_month(year + 1, 1)?))
}

pub(crate) fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}
