//! Human-readable date formatting for activity feeds.

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeZone};

/// English ordinal for a day of month: `1st`, `2nd`, `11th`, `23rd`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Format a wall-clock time as `March 5th at 2:30 PM`.
pub fn activity_time(local: &NaiveDateTime) -> String {
    format!(
        "{} {} at {}",
        local.format("%B"),
        ordinal(local.day()),
        local.format("%-I:%M %p"),
    )
}

/// Format a stored timestamp in the server's local time zone.
pub fn activity_time_local<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    activity_time(&at.with_timezone(&Local).naive_local())
}
