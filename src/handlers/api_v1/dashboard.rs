use actix_web::{web, HttpResponse};
use chrono::Local;
use serde::Deserialize;

use crate::dashboard::{self, DashboardSource, activity};
use crate::errors::AppError;
use crate::settings::{SettingsPatch, SettingsStore};

const MAX_ACTIVITY_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

/// GET /api/v1/dashboard - stats, activity and chart series in one document
pub async fn overview(source: web::Data<dyn DashboardSource>) -> Result<HttpResponse, AppError> {
    let view = dashboard::load(source.get_ref(), &Local::now()).await;
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/v1/activity?limit=N - recent activity, newest first (default 15)
pub async fn activity(
    source: web::Data<dyn DashboardSource>,
    query: web::Query<ActivityQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query
        .limit
        .unwrap_or(activity::DEFAULT_LIMIT)
        .min(MAX_ACTIVITY_LIMIT);
    let items = activity::recent_activity(source.get_ref(), limit, &Local::now()).await;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/v1/settings
pub async fn get_settings(settings: web::Data<SettingsStore>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(settings.get()))
}

/// POST /api/v1/settings - merge a partial record; returns the effective settings
pub async fn update_settings(
    settings: web::Data<SettingsStore>,
    body: web::Json<SettingsPatch>,
) -> Result<HttpResponse, AppError> {
    let updated = settings.save(body.into_inner());
    log::info!("Settings updated via API");
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /api/v1/health - 200 when `members` is readable, 503 with the backend error otherwise
pub async fn health(source: web::Data<dyn DashboardSource>) -> Result<HttpResponse, AppError> {
    match source.probe().await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))),
        Err(e) => {
            log::error!("Health check failed: {e}");
            Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "error",
                "error": e,
            })))
        }
    }
}
