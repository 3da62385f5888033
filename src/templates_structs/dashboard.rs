use askama::Template;

use crate::dashboard::{DashboardView, SeriesPoint};
use super::PageContext;

/// A bar of a server-rendered chart; `percent` is the height relative to the tallest bar.
pub struct ChartBar {
    pub label: String,
    pub count: i64,
    pub percent: i64,
}

impl ChartBar {
    pub fn from_series(points: &[SeriesPoint]) -> Vec<ChartBar> {
        let max = points.iter().map(|p| p.count).max().unwrap_or(0);
        points
            .iter()
            .map(|p| ChartBar {
                label: p.label(),
                count: p.count,
                percent: if max > 0 { p.count * 100 / max } else { 0 },
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub view: DashboardView,
    pub attendance_bars: Vec<ChartBar>,
    pub visitor_bars: Vec<ChartBar>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn bars_scale_to_the_tallest() {
        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let bars = ChartBar::from_series(&[
            SeriesPoint { bucket: day(1), count: 2 },
            SeriesPoint { bucket: day(2), count: 8 },
            SeriesPoint { bucket: day(3), count: 0 },
        ]);
        let heights: Vec<i64> = bars.iter().map(|b| b.percent).collect();
        assert_eq!(heights, vec![25, 100, 0]);
        assert_eq!(bars[1].label, "Mar 2");
    }

    #[test]
    fn all_zero_series_has_flat_bars() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let bars = ChartBar::from_series(&[SeriesPoint { bucket: day, count: 0 }]);
        assert_eq!(bars[0].percent, 0);
    }
}
