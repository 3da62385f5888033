use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Local, Timelike};

use crate::dashboard::{self, DashboardSource};
use crate::errors::{AppError, render};
use crate::settings::SettingsStore;
use crate::templates_structs::{ChartBar, DashboardTemplate, PageContext};

fn time_greeting(hour: u32, name: &str) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {name}")
}

pub async fn index(
    source: web::Data<dyn DashboardSource>,
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, "/dashboard");
    let now = Local::now();

    let view = dashboard::load(source.get_ref(), &now).await;

    let tmpl = DashboardTemplate {
        greeting: time_greeting(now.hour(), &ctx.user_name),
        attendance_bars: ChartBar::from_series(&view.attendance_by_day),
        visitor_bars: ChartBar::from_series(&view.visitors_by_week),
        ctx,
        view,
    };
    render(tmpl)
}
