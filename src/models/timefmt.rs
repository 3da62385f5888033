//! Conversions between stored UTC timestamps and the local-time strings used
//! by `<input type="datetime-local">` and list screens.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a `datetime-local` value in the server's local time zone.
pub fn parse_local_input(value: &str) -> Option<DateTime<Utc>> {
    parse_input_in(value, &Local)
}

pub fn parse_input_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn local_input(value: &DateTime<Utc>) -> String {
    value.with_timezone(&Local).format(INPUT_FORMAT).to_string()
}

pub fn local_label(value: &DateTime<Utc>) -> String {
    value.with_timezone(&Local).format(LABEL_FORMAT).to_string()
}

pub fn optional_label(value: &Option<DateTime<Utc>>) -> String {
    value.as_ref().map(local_label).unwrap_or_default()
}

pub fn optional_input(value: &Option<DateTime<Utc>>) -> String {
    value.as_ref().map(local_input).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn parses_input_in_given_offset() {
        let tz = FixedOffset::east_opt(2 * 3600).expect("offset");
        let parsed = parse_input_in("2025-03-09T10:30", &tz).expect("parse");
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 3, 9, 8, 30, 0).unwrap());
    }

    #[test]
    fn accepts_seconds() {
        assert!(parse_input_in("2025-03-09T10:30:15", &Utc).is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_input_in("next sunday", &Utc).is_none());
        assert!(parse_input_in("", &Utc).is_none());
    }

    #[test]
    fn input_round_trips_through_local_time() {
        let stamp = Utc.with_ymd_and_hms(2025, 6, 1, 9, 15, 0).unwrap();
        assert_eq!(parse_local_input(&local_input(&stamp)), Some(stamp));
    }
}
