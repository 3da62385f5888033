use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{cookie::Key, web};

use crate::auth;
use crate::handlers::{
    self, attendance_handlers, auth_handlers, member_handlers, service_handlers, service_type_handlers,
    settings_handlers, visitor_handlers,
};

pub fn session_middleware(key: Key) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("church_admin_session".to_string())
        .cookie_secure(false)
        .cookie_http_only(true)
        .build()
}

/// Every route of the application. Callers supply the session middleware and
/// the app data (pool, dashboard source, settings, authenticator, throttle).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/", web::get().to(|| async { crate::errors::see_other("/dashboard") }))
        // JSON API, with its own auth guard
        .service(web::scope("/api/v1").configure(handlers::api_v1::configure))
        // Protected routes. `new` is registered before `{id}` on every resource.
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                .route("/logout", web::post().to(auth_handlers::logout))
                .route("/dashboard", web::get().to(handlers::dashboard::index))
                .route("/dashboard/settings", web::get().to(settings_handlers::show))
                .route("/dashboard/settings", web::post().to(settings_handlers::save))
                // Members
                .route("/dashboard/members", web::get().to(member_handlers::list))
                .route("/dashboard/members/new", web::get().to(member_handlers::new_form))
                .route("/dashboard/members", web::post().to(member_handlers::create))
                .route("/dashboard/members/{id}/edit", web::get().to(member_handlers::edit_form))
                .route("/dashboard/members/{id}", web::post().to(member_handlers::update))
                .route("/dashboard/members/{id}/delete", web::post().to(member_handlers::delete))
                // Visitors
                .route("/dashboard/visitors", web::get().to(visitor_handlers::list))
                .route("/dashboard/visitors/new", web::get().to(visitor_handlers::new_form))
                .route("/dashboard/visitors", web::post().to(visitor_handlers::create))
                .route("/dashboard/visitors/{id}/edit", web::get().to(visitor_handlers::edit_form))
                .route("/dashboard/visitors/{id}", web::post().to(visitor_handlers::update))
                .route("/dashboard/visitors/{id}/delete", web::post().to(visitor_handlers::delete))
                // Services
                .route("/dashboard/services", web::get().to(service_handlers::list))
                .route("/dashboard/services/new", web::get().to(service_handlers::new_form))
                .route("/dashboard/services", web::post().to(service_handlers::create))
                .route("/dashboard/services/{id}/edit", web::get().to(service_handlers::edit_form))
                .route("/dashboard/services/{id}", web::post().to(service_handlers::update))
                .route("/dashboard/services/{id}/delete", web::post().to(service_handlers::delete))
                // Service types
                .route("/dashboard/service-types", web::get().to(service_type_handlers::list))
                .route("/dashboard/service-types/new", web::get().to(service_type_handlers::new_form))
                .route("/dashboard/service-types", web::post().to(service_type_handlers::create))
                .route("/dashboard/service-types/{id}/edit", web::get().to(service_type_handlers::edit_form))
                .route("/dashboard/service-types/{id}", web::post().to(service_type_handlers::update))
                .route("/dashboard/service-types/{id}/delete", web::post().to(service_type_handlers::delete))
                // Attendance
                .route("/dashboard/attendance", web::get().to(attendance_handlers::list))
                .route("/dashboard/attendance/new", web::get().to(attendance_handlers::new_form))
                .route("/dashboard/attendance", web::post().to(attendance_handlers::create))
                .route("/dashboard/attendance/{id}/edit", web::get().to(attendance_handlers::edit_form))
                .route("/dashboard/attendance/{id}", web::post().to(attendance_handlers::update))
                .route("/dashboard/attendance/{id}/delete", web::post().to(attendance_handlers::delete)),
        );
}
