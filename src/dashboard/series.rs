use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::db::BackendError;
use super::calendar::{start_of_day, week_start};
use super::source::DashboardSource;

/// One bucket of a zero-filled count series, keyed by the bucket's first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub bucket: NaiveDate,
    pub count: i64,
}

impl SeriesPoint {
    /// Short axis label, e.g. "Mar 9".
    pub fn label(&self) -> String {
        self.bucket.format("%b %-d").to_string()
    }
}

/// First day of each bucket, oldest first. The last bucket contains `today`.
fn bucket_starts(today: NaiveDate, count: u32, step_days: u64) -> Vec<NaiveDate> {
    (0..u64::from(count))
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back * step_days)))
        .collect()
}

fn count_into(starts: &[NaiveDate], step_days: i64, dates: impl Iterator<Item = NaiveDate>) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = starts
        .iter()
        .map(|&bucket| SeriesPoint { bucket, count: 0 })
        .collect();
    let Some(first) = starts.first().copied() else {
        return points;
    };
    for date in dates {
        let offset = (date - first).num_days();
        if offset < 0 {
            continue;
        }
        if let Some(point) = points.get_mut((offset / step_days) as usize) {
            point.count += 1;
        }
    }
    points
}

/// Count timestamps per local calendar day for the `days` days ending today.
pub fn daily_counts<Tz: TimeZone>(stamps: &[DateTime<Utc>], days: u32, now: &DateTime<Tz>) -> Vec<SeriesPoint> {
    let tz = now.timezone();
    let starts = bucket_starts(now.date_naive(), days, 1);
    count_into(
        &starts,
        1,
        stamps.iter().map(|s| s.with_timezone(&tz).date_naive()),
    )
}

/// Count timestamps per Monday-based week for the `weeks` weeks ending with
/// the current one.
pub fn weekly_counts<Tz: TimeZone>(stamps: &[DateTime<Utc>], weeks: u32, now: &DateTime<Tz>) -> Vec<SeriesPoint> {
    let tz = now.timezone();
    let starts = bucket_starts(week_start(now.date_naive()), weeks, 7);
    count_into(
        &starts,
        7,
        stamps.iter().map(|s| s.with_timezone(&tz).date_naive()),
    )
}

/// Check-ins per day over the last `days` days.
pub async fn attendance_by_day<Tz: TimeZone>(
    source: &dyn DashboardSource,
    days: u32,
    now: &DateTime<Tz>,
) -> Result<Vec<SeriesPoint>, BackendError> {
    let Some(&first) = bucket_starts(now.date_naive(), days, 1).first() else {
        return Ok(Vec::new());
    };
    let stamps = source.check_ins_since(start_of_day(&now.timezone(), first)).await?;
    Ok(daily_counts(&stamps, days, now))
}

/// Visitor registrations per week over the last `weeks` weeks.
pub async fn visitors_by_week<Tz: TimeZone>(
    source: &dyn DashboardSource,
    weeks: u32,
    now: &DateTime<Tz>,
) -> Result<Vec<SeriesPoint>, BackendError> {
    let Some(&first) = bucket_starts(week_start(now.date_naive()), weeks, 7).first() else {
        return Ok(Vec::new());
    };
    let stamps = source.visitor_registrations_since(start_of_day(&now.timezone(), first)).await?;
    Ok(weekly_counts(&stamps, weeks, now))
}
