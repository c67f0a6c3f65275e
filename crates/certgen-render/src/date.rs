//! Human-readable certificate dates ("21st June, 2025").

use chrono::{Datelike, NaiveDate};

/// English ordinal suffix for a day of the month.
///
/// Only 1/21/31, 2/22 and 3/23 take a non-"th" suffix, so 11, 12 and 13
/// read "11th", "12th", "13th".
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// Format as `{day}{suffix} {MonthName}, {year}`.
pub fn format_readable_date(date: NaiveDate) -> String {
    let day = date.day();
    format!(
        "{day}{suffix} {month}, {year}",
        suffix = ordinal_suffix(day),
        month = date.format("%B"),
        year = date.year()
    )
}
