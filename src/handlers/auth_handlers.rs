use std::net::{IpAddr, Ipv4Addr};

use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::accounts::Authenticator;
use crate::auth::rate_limit::LoginThrottle;
use crate::auth::session::{SessionState, clear_session, is_authenticated, store_session};
use crate::auth::csrf;
use crate::errors::{AppError, render, see_other};
use crate::handlers::CsrfOnly;
use crate::settings::SettingsStore;
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
    pub csrf_token: String,
}

fn login_page_with(
    session: &Session,
    settings: &SettingsStore,
    user_name: &str,
    error: Option<&str>,
) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error: error.map(str::to_string),
        app_name: settings.get().church_name,
        user_name: user_name.to_string(),
        csrf_token: csrf::get_or_create_token(session),
    };
    render(tmpl)
}

pub async fn login_page(
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    if is_authenticated(&session) {
        return Ok(see_other("/dashboard"));
    }
    login_page_with(&session, &settings, "", None)
}

pub async fn login_submit(
    req: HttpRequest,
    settings: web::Data<SettingsStore>,
    session: Session,
    form: web::Form<LoginForm>,
    authenticator: web::Data<dyn Authenticator>,
    throttle: web::Data<LoginThrottle>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Throttle before touching credentials
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if throttle.is_blocked(ip) {
        log::warn!("Login throttled for {ip}");
        return login_page_with(
            &session,
            &settings,
            &form.user_name,
            Some("Too many failed login attempts. Please try again later."),
        );
    }

    if form.user_name.trim().is_empty() || form.password.is_empty() {
        return login_page_with(&session, &settings, &form.user_name, Some("Please fill in all fields"));
    }

    match authenticator.authenticate(&form.user_name, &form.password) {
        Some(account) => {
            throttle.clear(ip);
            store_session(&session, &SessionState::signed_in(&account))?;
            log::info!("{account} signed in");
            Ok(see_other("/dashboard"))
        }
        None => {
            throttle.record_failure(ip);
            log::warn!("Failed login for '{}' from {ip}", form.user_name.trim());
            login_page_with(
                &session,
                &settings,
                &form.user_name,
                Some("Invalid username or password"),
            )
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    clear_session(&session);
    Ok(see_other("/login"))
}
