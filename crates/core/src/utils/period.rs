//! Calendar period helpers used to align irregular snapshots.
//!
//! All functions work on plain calendar dates. Nothing here looks at a time
//! zone, so the same input always lands in the same month, quarter and year.

use chrono::{Datelike, Months, NaiveDate};

use crate::constants::{PERIOD_KEY_FORMAT, QUARTER_END_MONTHS, YEAR_END_MONTH};

/// Absolute month counter: `year * 12 + month`.
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month() as i32
}

/// Number of calendar months from `from` to `to`, ignoring the day of month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    month_index(to) - month_index(from)
}

/// True when `curr` falls in the calendar month right after `prev`.
///
/// Jan 31 and Feb 1 are one month apart; Jan 1 and Jan 31 are not.
pub fn is_next_month(prev: NaiveDate, curr: NaiveDate) -> bool {
    months_between(prev, curr) == 1
}

/// March, June, September and December close a quarter. The day is not checked.
pub fn is_quarter_end(date: NaiveDate) -> bool {
    QUARTER_END_MONTHS.contains(&date.month())
}

pub fn is_year_end(date: NaiveDate) -> bool {
    date.month() == YEAR_END_MONTH
}

/// Calendar quarter (1..=4) the date falls in.
pub fn quarter_of(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3 + 1
}

/// Last calendar day of the given month, or `None` outside chrono's range.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Last day of the quarter preceding the one `date` belongs to.
///
/// Q1 steps back to December 31 of the prior year, Q2 to March 31,
/// Q3 to June 30 and Q4 to September 30.
pub fn previous_quarter_end(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = match quarter_of(date) {
        1 => (date.year() - 1, 12),
        q => (date.year(), (q - 1) * 3),
    };
    last_day_of_month(year, month)
}

/// Same calendar day one year earlier. February 29 clamps to February 28.
pub fn same_day_previous_year(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(12))
}

/// Canonical `YYYY-MM-DD` text form of a period key.
pub fn period_key(date: NaiveDate) -> String {
    date.format(PERIOD_KEY_FORMAT).to_string()
}
