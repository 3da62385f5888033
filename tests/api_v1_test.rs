//! JSON API tests: the session guard, dashboard and activity documents,
//! settings round trip, the content-type check and the health probe.

#[macro_use]
mod common;

use actix_web::{http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::Value;

use church_admin::auth::rate_limit::LoginThrottle;
use church_admin::settings::{MemoryStore, SettingsStore};
use common::{FakeSource, check_in, member, visitor};

fn settings() -> web::Data<SettingsStore> {
    web::Data::new(SettingsStore::new(MemoryStore::new()))
}

fn throttle() -> web::Data<LoginThrottle> {
    web::Data::new(LoginThrottle::new())
}

fn busy_source() -> FakeSource {
    let now = Utc::now();
    FakeSource {
        total_members: 40,
        services_started: 4,
        visitors_created: 3,
        unique_attendees: 10,
        members: vec![member(1, "Ama", "Boateng", Some(now - Duration::hours(3)))],
        visitors: vec![visitor(2, "Kofi", "Mensah", Some(now - Duration::hours(1)))],
        attendance: vec![check_in(3, "Esi", "Sunday Service", Some(now - Duration::hours(2)))],
        check_ins: vec![now - Duration::hours(2)],
        registrations: vec![now - Duration::hours(1)],
        ..Default::default()
    }
}

async fn json_body(resp: actix_web::dev::ServiceResponse) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).expect("response is JSON")
}

#[actix_web::test]
async fn test_api_requires_session() {
    let app = test_app!(busy_source(), settings(), throttle());

    for uri in ["/api/v1/dashboard", "/api/v1/activity", "/api/v1/settings"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        let body = json_body(resp).await;
        assert_eq!(body["error"], "Not authenticated");
    }
}

#[actix_web::test]
async fn test_api_dashboard_document() {
    let app = test_app!(busy_source(), settings(), throttle());
    let cookie = sign_in!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/dashboard").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;

    assert_eq!(body["stats"]["total_members"], 40);
    assert_eq!(body["stats"]["services_this_month"], 4);
    assert_eq!(body["stats"]["visitors_this_month"], 3);
    assert_eq!(body["stats"]["attendance_rate"], 25);
    assert_eq!(body["stats_failed"], false);
    assert_eq!(body["attendance_chart_failed"], false);
    assert_eq!(body["visitor_chart_failed"], false);

    let ids: Vec<&str> = body["activity"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["visitor-2", "attendance-3", "member-1"]);

    assert_eq!(body["attendance_by_day"].as_array().unwrap().len(), 14);
    assert_eq!(body["visitors_by_week"].as_array().unwrap().len(), 6);
}

#[actix_web::test]
async fn test_api_dashboard_flags_failed_stats() {
    let app = test_app!(busy_source().failing_on("count_members"), settings(), throttle());
    let cookie = sign_in!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/dashboard").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["stats_failed"], true);
    assert_eq!(body["stats"]["total_members"], 0);
    // Other panels still load.
    assert_eq!(body["activity"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_api_activity_honours_limit() {
    let app = test_app!(busy_source(), settings(), throttle());
    let cookie = sign_in!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/activity?limit=2").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["kind"], "visitor");
    assert_eq!(items[0]["action"], "registered as visitor");
    assert_eq!(items[0]["user_name"], "Kofi Mensah");
    assert_eq!(items[0]["timestamp"], "1 hours ago");
}

#[actix_web::test]
async fn test_api_activity_is_empty_when_a_source_fails() {
    let app = test_app!(busy_source().failing_on("latest_visitors"), settings(), throttle());
    let cookie = sign_in!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/activity").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, serde_json::json!([]));
}

#[actix_web::test]
async fn test_api_settings_round_trip() {
    let app = test_app!(busy_source(), settings(), throttle());
    let cookie = sign_in!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/settings").cookie(cookie.clone()).to_request(),
    )
    .await;
    let defaults = json_body(resp).await;
    assert_eq!(defaults["churchName"], "Church Admin");
    assert_eq!(defaults["emailNotifications"], true);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/settings")
            .cookie(cookie.clone())
            .set_json(serde_json::json!({ "churchName": "Grace Chapel", "serviceReminders": true }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let saved = json_body(resp).await;
    assert_eq!(saved["churchName"], "Grace Chapel");
    assert_eq!(saved["serviceReminders"], true);
    assert_eq!(saved["visitorAlerts"], true);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/settings").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(json_body(resp).await, saved);
}

#[actix_web::test]
async fn test_api_mutation_requires_json_content_type() {
    let app = test_app!(busy_source(), settings(), throttle());
    let cookie = sign_in!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/settings")
            .cookie(cookie)
            .set_form([("churchName", "Forged")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "Content-Type must be application/json");
}

#[actix_web::test]
async fn test_api_health_is_public() {
    let app = test_app!(FakeSource::default(), settings(), throttle());
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, serde_json::json!({ "status": "ok" }));
}

#[actix_web::test]
async fn test_api_health_reports_backend_error() {
    let app = test_app!(FakeSource::default().failing_on("probe"), settings(), throttle());
    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/v1/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], "08006");
    assert_eq!(body["error"]["message"], "probe unavailable");
}
