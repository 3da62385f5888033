//! Calendar windows in the caller's time zone, converted to UTC for queries.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Resolve a wall-clock time to UTC. Ambiguous times (DST fall-back) take the
/// earliest or latest reading as asked; times skipped by a DST gap are read as UTC.
pub fn local_to_utc<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, latest: bool) -> DateTime<Utc> {
    let resolved = tz.from_local_datetime(&naive);
    let picked = if latest { resolved.latest() } else { resolved.earliest() };
    picked
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// First instant of `date` in `tz`.
pub fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    local_to_utc(tz, date.and_time(chrono::NaiveTime::MIN), false)
}

/// Calendar month containing `now`: 00:00:00 on day 1 through 23:59:59 on
/// the last day, both inclusive.
pub fn month_window<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = now.timezone();
    let today = now.date_naive();
    let first = today.with_day(1).unwrap_or(today);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);

    let start = start_of_day(&tz, first);
    let end_naive = last
        .and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| last.and_time(chrono::NaiveTime::MIN));
    (start, local_to_utc(&tz, end_naive, true))
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}
