use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Human label for how long ago `timestamp` was, relative to `now`.
///
/// Whole seconds, floored. Anything in the future reads as "Just now";
/// a week or more falls back to the date in `now`'s time zone.
pub fn time_ago<Tz>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let seconds = (now.timestamp_millis() - timestamp.timestamp_millis()).div_euclid(1000);
    if seconds < MINUTE {
        "Just now".to_string()
    } else if seconds < HOUR {
        format!("{} min ago", seconds / MINUTE)
    } else if seconds < DAY {
        format!("{} hours ago", seconds / HOUR)
    } else if seconds < WEEK {
        format!("{} days ago", seconds / DAY)
    } else {
        timestamp
            .with_timezone(&now.timezone())
            .format("%-m/%-d/%Y")
            .to_string()
    }
}
