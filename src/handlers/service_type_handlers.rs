use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{AppError, render, see_other};
use crate::handlers::{CsrfOnly, or_empty, save_failed};
use crate::models::service_type::{self, ServiceTypeForm};
use crate::settings::SettingsStore;
use crate::templates_structs::{PageContext, ServiceTypeFormTemplate, ServiceTypeListTemplate};

const LIST_PATH: &str = "/dashboard/service-types";

fn form_page(
    ctx: PageContext,
    form_action: String,
    form_title: &str,
    form: ServiceTypeForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    render(ServiceTypeFormTemplate {
        ctx,
        form_action,
        form_title: form_title.to_string(),
        form,
        errors,
    })
}

pub async fn list(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    let (service_types, load_failed) = or_empty(service_type::find_all(&pool).await, "service types");
    render(ServiceTypeListTemplate { ctx, service_types, load_failed })
}

pub async fn new_form(
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    form_page(ctx, LIST_PATH.to_string(), "Add Service Type", ServiceTypeForm::default(), Vec::new())
}

pub async fn create(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    form: web::Form<ServiceTypeForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &settings, LIST_PATH);
        return form_page(ctx, LIST_PATH.to_string(), "Add Service Type", form, errors);
    }

    match service_type::create(&pool, form.name.trim()).await {
        Ok(created) => {
            set_flash(&session, &format!("Service type '{}' added", created.name));
            Ok(see_other(LIST_PATH))
        }
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            let errors = vec![save_failed("service type", &e)];
            form_page(ctx, LIST_PATH.to_string(), "Add Service Type", form, errors)
        }
    }
}

pub async fn edit_form(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let found = service_type::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    let action = format!("{LIST_PATH}/{id}");
    form_page(ctx, action, "Edit Service Type", ServiceTypeForm::from(&found), Vec::new())
}

pub async fn update(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<ServiceTypeForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let form = form.into_inner();
    let action = format!("{LIST_PATH}/{id}");

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &settings, LIST_PATH);
        return form_page(ctx, action, "Edit Service Type", form, errors);
    }

    match service_type::update(&pool, id, form.name.trim()).await {
        Ok(updated) => {
            log::info!("Service type {id} renamed to '{}'", updated.name);
            set_flash(&session, "Service type updated");
            Ok(see_other(LIST_PATH))
        }
        Err(e) if e.is_not_found() => Err(AppError::NotFound),
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            form_page(ctx, action, "Edit Service Type", form, vec![save_failed("service type", &e)])
        }
    }
}

/// Types still referenced by services cannot be deleted.
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    match service_type::delete(&pool, id).await {
        Ok(true) => {
            log::info!("Service type {id} deleted");
            set_flash(&session, "Service type deleted");
        }
        Ok(false) => return Err(AppError::NotFound),
        Err(e) if e.is_foreign_key_violation() => {
            set_flash(&session, "This service type is still used by services and cannot be deleted");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(see_other(LIST_PATH))
}
