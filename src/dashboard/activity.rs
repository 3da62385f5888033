use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::models::attendance::AttendanceRecord;
use crate::models::member::Member;
use crate::models::visitor::Visitor;
use super::source::DashboardSource;
use super::timeago::time_ago;

pub const DEFAULT_LIMIT: usize = 15;

/// Rows fetched from each source before merging.
pub const SOURCE_PAGE_SIZE: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Member,
    Visitor,
    Attendance,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Member => "member",
            ActivityKind::Visitor => "visitor",
            ActivityKind::Attendance => "attendance",
        }
    }
}

/// One line of the recent-activity feed. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub id: String,
    pub kind: ActivityKind,
    pub user_name: String,
    pub action: String,
    /// Relative time label, e.g. "5 min ago".
    pub timestamp: String,
    /// Epoch millis of the source timestamp; 0 when the row has none.
    pub sort_key: i64,
}

fn item<Tz>(
    kind: ActivityKind,
    id: i64,
    user_name: String,
    action: String,
    at: Option<&DateTime<Utc>>,
    now: &DateTime<Tz>,
) -> ActivityItem
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let now_utc = now.with_timezone(&Utc);
    ActivityItem {
        id: format!("{}-{}", kind.as_str(), id),
        kind,
        user_name,
        action,
        timestamp: time_ago(at.unwrap_or(&now_utc), now),
        sort_key: at.map(|t| t.timestamp_millis()).unwrap_or(0),
    }
}

/// Merge the three sources into one feed, newest first, at most `limit` items.
/// Items with equal sort keys keep member, visitor, attendance order.
pub fn build_feed<Tz>(
    members: &[Member],
    visitors: &[Visitor],
    attendance: &[AttendanceRecord],
    limit: usize,
    now: &DateTime<Tz>,
) -> Vec<ActivityItem>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut items = Vec::with_capacity(members.len() + visitors.len() + attendance.len());

    items.extend(members.iter().map(|m| {
        item(
            ActivityKind::Member,
            m.id,
            m.display_name(),
            "joined as member".to_string(),
            m.created_at.as_ref(),
            now,
        )
    }));

    items.extend(visitors.iter().map(|v| {
        item(
            ActivityKind::Visitor,
            v.id,
            v.display_name(),
            "registered as visitor".to_string(),
            v.created_at.as_ref(),
            now,
        )
    }));

    items.extend(attendance.iter().map(|a| {
        item(
            ActivityKind::Attendance,
            a.id,
            a.attendee_name(),
            format!("attended {}", a.service_label()),
            a.checked_in_at.as_ref(),
            now,
        )
    }));

    items.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
    items.truncate(limit);
    items
}

/// Recent activity across members, visitors and attendance.
///
/// Never fails: if any of the three reads errors, the error is logged and
/// the feed is empty.
pub async fn recent_activity<Tz>(
    source: &dyn DashboardSource,
    limit: usize,
    now: &DateTime<Tz>,
) -> Vec<ActivityItem>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let fetched = tokio::try_join!(
        source.latest_members(SOURCE_PAGE_SIZE),
        source.latest_visitors(SOURCE_PAGE_SIZE),
        source.latest_attendance(SOURCE_PAGE_SIZE),
    );

    match fetched {
        Ok((members, visitors, attendance)) => build_feed(&members, &visitors, &attendance, limit, now),
        Err(e) => {
            log::error!("Error fetching recent activity: {e}");
            Vec::new()
        }
    }
}
