//! Authentication tests: password hashing, the login form, throttling,
//! the protected-route guard and sign-out.

#[macro_use]
mod common;

use std::time::Duration;

use actix_web::{http::StatusCode, test, web};

use church_admin::auth::password;
use church_admin::auth::rate_limit::LoginThrottle;
use church_admin::settings::{MemoryStore, SettingsStore};
use common::{ADMIN_PASS, ADMIN_USER, FakeSource, csrf_from};

const TEST_PASSWORD: &str = "password123";

fn settings() -> web::Data<SettingsStore> {
    web::Data::new(SettingsStore::new(MemoryStore::new()))
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[actix_web::test]
async fn test_hash_password_success() {
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    assert!(hash.starts_with("$argon2"));
}

#[actix_web::test]
async fn test_verify_password_correct_and_incorrect() {
    let hash = password::hash_password(TEST_PASSWORD).expect("Failed to hash password");
    assert!(password::verify_password(TEST_PASSWORD, &hash).expect("verify"));
    assert!(!password::verify_password("wrong", &hash).expect("verify"));
    assert!(password::verify_password(TEST_PASSWORD, "not-a-hash").is_err());
}

#[actix_web::test]
async fn test_protected_routes_redirect_to_login() {
    let app = test_app!(FakeSource::default(), settings(), web::Data::new(LoginThrottle::new()));

    for uri in ["/dashboard", "/dashboard/members", "/dashboard/settings"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&resp), "/login");
    }
}

#[actix_web::test]
async fn test_root_redirects_to_dashboard() {
    let app = test_app!(FakeSource::default(), settings(), web::Data::new(LoginThrottle::new()));
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");
}

#[actix_web::test]
async fn test_login_page_shows_church_name() {
    let store = settings();
    store.save(church_admin::settings::SettingsPatch {
        church_name: Some("Grace Chapel".to_string()),
        ..Default::default()
    });
    let app = test_app!(FakeSource::default(), store, web::Data::new(LoginThrottle::new()));

    let resp = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Grace Chapel"));
    assert_eq!(csrf_from(&html).len(), 64);
}

/// Submit the login form with the given credentials; returns the response body.
macro_rules! submit_login {
    ($app:expr, $user:expr, $pass:expr) => {{
        let page = test::call_service(&$app, test::TestRequest::get().uri("/login").to_request()).await;
        let cookie = page
            .response()
            .cookies()
            .find(|c| c.name() == "church_admin_session")
            .unwrap()
            .into_owned();
        let html = String::from_utf8(test::read_body(page).await.to_vec()).unwrap();
        let token = csrf_from(&html);
        let resp = test::call_service(
            &$app,
            test::TestRequest::post()
                .uri("/login")
                .cookie(cookie)
                .set_form([("user_name", $user), ("password", $pass), ("csrf_token", token.as_str())])
                .to_request(),
        )
        .await;
        let status = resp.status();
        (status, String::from_utf8(test::read_body(resp).await.to_vec()).unwrap())
    }};
}

#[actix_web::test]
async fn test_login_requires_both_fields() {
    let app = test_app!(FakeSource::default(), settings(), web::Data::new(LoginThrottle::new()));
    let (status, body) = submit_login!(app, ADMIN_USER, "");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please fill in all fields"));
}

#[actix_web::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app!(FakeSource::default(), settings(), web::Data::new(LoginThrottle::new()));
    let (status, body) = submit_login!(app, ADMIN_USER, "not-the-password");
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid username or password"));
}

#[actix_web::test]
async fn test_login_without_csrf_token_is_forbidden() {
    let app = test_app!(FakeSource::default(), settings(), web::Data::new(LoginThrottle::new()));
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .set_form([("user_name", ADMIN_USER), ("password", ADMIN_PASS), ("csrf_token", "forged")])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_successful_login_opens_the_dashboard() {
    let app = test_app!(FakeSource::default(), settings(), web::Data::new(LoginThrottle::new()));
    let cookie = sign_in!(app);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/dashboard").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(html.contains("Total members"));
    assert!(html.contains(ADMIN_USER));
}

#[actix_web::test]
async fn test_throttle_blocks_after_repeated_failures() {
    let throttle = web::Data::new(LoginThrottle::with_limits(2, Duration::from_secs(60)));
    let app = test_app!(FakeSource::default(), settings(), throttle);

    for _ in 0..2 {
        let (_, body) = submit_login!(app, ADMIN_USER, "wrong");
        assert!(body.contains("Invalid username or password"));
    }
    // Even the right password is refused while blocked.
    let (_, body) = submit_login!(app, ADMIN_USER, ADMIN_PASS);
    assert!(body.contains("Too many failed login attempts"));
}

#[actix_web::test]
async fn test_logout_ends_the_session() {
    let app = test_app!(FakeSource::default(), settings(), web::Data::new(LoginThrottle::new()));
    let cookie = sign_in!(app);

    let page = test::call_service(
        &app,
        test::TestRequest::get().uri("/dashboard").cookie(cookie.clone()).to_request(),
    )
    .await;
    let cookie = page
        .response()
        .cookies()
        .find(|c| c.name() == "church_admin_session")
        .map(|c| c.into_owned())
        .unwrap_or(cookie);
    let html = String::from_utf8(test::read_body(page).await.to_vec()).unwrap();
    let token = csrf_from(&html);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie)
            .set_form([("csrf_token", token.as_str())])
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");

    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == "church_admin_session")
        .expect("logout rewrites the cookie")
        .into_owned();
    let after = test::call_service(
        &app,
        test::TestRequest::get().uri("/dashboard").cookie(cleared).to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::SEE_OTHER);
}
