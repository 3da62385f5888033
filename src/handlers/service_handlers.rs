use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{AppError, render, see_other};
use crate::handlers::{CsrfOnly, or_empty, save_failed};
use crate::models::service::{self, ServiceForm};
use crate::models::service_type;
use crate::settings::SettingsStore;
use crate::templates_structs::{PageContext, SelectOption, ServiceFormTemplate, ServiceListTemplate};

const LIST_PATH: &str = "/dashboard/services";

async fn form_page(
    pool: &PgPool,
    ctx: PageContext,
    form_action: String,
    form_title: &str,
    form: ServiceForm,
    mut errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let (types, failed) = or_empty(service_type::find_all(pool).await, "service types");
    if failed {
        errors.push("Service types could not be loaded".to_string());
    }
    let service_types = SelectOption::list(
        std::iter::once((String::new(), "Select a service type".to_string()))
            .chain(types.into_iter().map(|t| (t.id.to_string(), t.name))),
        &form.service_type_id,
    );
    render(ServiceFormTemplate {
        ctx,
        form_action,
        form_title: form_title.to_string(),
        form,
        service_types,
        errors,
    })
}

pub async fn list(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    let (services, load_failed) = or_empty(service::find_all(&pool, None).await, "services");
    render(ServiceListTemplate { ctx, services, load_failed })
}

/// New services start at the configured default location.
pub async fn new_form(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let form = ServiceForm::with_location(&settings.get().default_location);
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    form_page(&pool, ctx, LIST_PATH.to_string(), "Add Service", form, Vec::new()).await
}

pub async fn create(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    form: web::Form<ServiceForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let input = match form.to_input() {
        Ok(input) => input,
        Err(errors) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            return form_page(&pool, ctx, LIST_PATH.to_string(), "Add Service", form, errors).await;
        }
    };

    match service::create(&pool, &input).await {
        Ok(_) => {
            set_flash(&session, "Service added");
            Ok(see_other(LIST_PATH))
        }
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            let errors = vec![save_failed("service", &e)];
            form_page(&pool, ctx, LIST_PATH.to_string(), "Add Service", form, errors).await
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
    let found = service::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    let action = format!("{LIST_PATH}/{id}");
    form_page(&pool, ctx, action, "Edit Service", ServiceForm::from(&found), Vec::new()).await
}

pub async fn update(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<ServiceForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let form = form.into_inner();
    let action = format!("{LIST_PATH}/{id}");

    let input = match form.to_input() {
        Ok(input) => input,
        Err(errors) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            return form_page(&pool, ctx, action, "Edit Service", form, errors).await;
        }
    };

    match service::update(&pool, id, &input).await {
        Ok(()) => {
            log::info!("Service {id} updated");
            set_flash(&session, "Service updated");
            Ok(see_other(LIST_PATH))
        }
        Err(e) if e.is_not_found() => Err(AppError::NotFound),
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            form_page(&pool, ctx, action, "Edit Service", form, vec![save_failed("service", &e)]).await
        }
    }
}

/// Deleting a service also removes its check-ins.
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    if !service::delete(&pool, id).await? {
        return Err(AppError::NotFound);
    }
    log::info!("Service {id} deleted");
    set_flash(&session, "Service deleted");
    Ok(see_other(LIST_PATH))
}
