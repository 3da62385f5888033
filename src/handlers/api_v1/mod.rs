pub mod dashboard;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, header},
    middleware::Next,
};

use crate::auth::middleware::require_auth_json;

fn is_json(req: &ServiceRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().starts_with("application/json"))
}

/// Writes through the API must be JSON. A cross-site form post cannot set
/// that content type, so API routes need no form token.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let writes = matches!(*req.method(), Method::POST | Method::PUT | Method::PATCH | Method::DELETE);
    if writes && !is_json(&req) {
        log::warn!("Rejected {} {} without a JSON body", req.method(), req.path());
        let response = HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Content-Type must be application/json" }));
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure API v1 routes. `/health` is public; the rest need a session.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(dashboard::health));
    cfg.service(
        web::scope("")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .wrap(actix_web::middleware::from_fn(require_auth_json))
            .route("/dashboard", web::get().to(dashboard::overview))
            .route("/activity", web::get().to(dashboard::activity))
            .route("/settings", web::get().to(dashboard::get_settings))
            .route("/settings", web::post().to(dashboard::update_settings))
    );
}
