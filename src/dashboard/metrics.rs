use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::db::BackendError;
use super::calendar::month_window;
use super::source::DashboardSource;

/// Headline numbers on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_members: i64,
    pub services_this_month: i64,
    pub visitors_this_month: i64,
    /// Percentage, 0..=100.
    pub attendance_rate: u8,
}

/// Share of members who attended this month, as a whole percentage.
///
/// Rounds half up and caps at 100. With no members on record the rate is
/// 100 if anyone attended, else 0.
pub fn attendance_rate(total_members: i64, unique_attendees: i64) -> u8 {
    let members = total_members.max(0);
    let attendees = unique_attendees.max(0);
    if members == 0 {
        return if attendees > 0 { 100 } else { 0 };
    }
    // round(100 * U / M), half up, in integers.
    let rate = (200 * attendees + members) / (2 * members);
    rate.min(100) as u8
}

/// Fetch the four counts for the calendar month containing `now` and derive
/// the stats.
pub async fn load_stats<Tz: TimeZone>(
    source: &dyn DashboardSource,
    now: &DateTime<Tz>,
) -> Result<DashboardStats, BackendError> {
    let (start, end) = month_window(now);
    let (total_members, services_this_month, visitors_this_month, unique_attendees) = tokio::try_join!(
        source.count_members(),
        source.count_services_started(start, end),
        source.count_visitors_created(start, end),
        source.count_unique_attendees(start, end),
    )?;

    Ok(DashboardStats {
        total_members,
        services_this_month,
        visitors_this_month,
        attendance_rate: attendance_rate(total_members, unique_attendees),
    })
}
