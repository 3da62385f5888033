//! Dashboard read model: headline stats, the activity feed and chart series.

pub mod activity;
pub mod calendar;
pub mod metrics;
pub mod series;
pub mod source;
pub mod timeago;

use std::fmt;

use chrono::{DateTime, TimeZone};
use serde::Serialize;

pub use activity::{ActivityItem, ActivityKind};
pub use metrics::DashboardStats;
pub use series::SeriesPoint;
pub use source::DashboardSource;

pub const ATTENDANCE_DAYS: u32 = 14;
pub const VISITOR_WEEKS: u32 = 6;

/// Everything the dashboard page shows. Failed sections are flagged rather
/// than failing the page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub stats_failed: bool,
    pub activity: Vec<ActivityItem>,
    pub attendance_by_day: Vec<SeriesPoint>,
    pub attendance_chart_failed: bool,
    pub visitors_by_week: Vec<SeriesPoint>,
    pub visitor_chart_failed: bool,
}

pub async fn load<Tz>(source: &dyn DashboardSource, now: &DateTime<Tz>) -> DashboardView
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let (stats, activity, by_day, by_week) = tokio::join!(
        metrics::load_stats(source, now),
        activity::recent_activity(source, activity::DEFAULT_LIMIT, now),
        series::attendance_by_day(source, ATTENDANCE_DAYS, now),
        series::visitors_by_week(source, VISITOR_WEEKS, now),
    );

    let mut view = DashboardView {
        activity,
        ..DashboardView::default()
    };

    match stats {
        Ok(stats) => view.stats = stats,
        Err(e) => {
            log::error!("Error fetching dashboard stats: {e}");
            view.stats_failed = true;
        }
    }

    match by_day {
        Ok(points) => view.attendance_by_day = points,
        Err(e) => {
            log::error!("Error fetching attendance chart: {e}");
            view.attendance_chart_failed = true;
        }
    }

    match by_week {
        Ok(points) => view.visitors_by_week = points,
        Err(e) => {
            log::error!("Error fetching visitor chart: {e}");
            view.visitor_chart_failed = true;
        }
    }

    view
}
