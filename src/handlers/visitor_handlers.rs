use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{AppError, render, see_other};
use crate::handlers::{CsrfOnly, or_empty, save_failed};
use crate::models::visitor::{self, VisitorForm};
use crate::settings::SettingsStore;
use crate::templates_structs::{PageContext, VisitorFormTemplate, VisitorListTemplate};

const LIST_PATH: &str = "/dashboard/visitors";

fn form_page(
    ctx: PageContext,
    form_action: String,
    form_title: &str,
    form: VisitorForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    render(VisitorFormTemplate {
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
    let (visitors, load_failed) = or_empty(visitor::find_all(&pool, None).await, "visitors");
    render(VisitorListTemplate { ctx, visitors, load_failed })
}

pub async fn new_form(
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    form_page(ctx, LIST_PATH.to_string(), "Register Visitor", VisitorForm::default(), Vec::new())
}

pub async fn create(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    form: web::Form<VisitorForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &settings, LIST_PATH);
        return form_page(ctx, LIST_PATH.to_string(), "Register Visitor", form, errors);
    }

    match visitor::create(&pool, &form.to_input()).await {
        Ok(created) => {
            set_flash(&session, &format!("{} registered", created.display_name()));
            Ok(see_other(LIST_PATH))
        }
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            form_page(ctx, LIST_PATH.to_string(), "Register Visitor", form, vec![save_failed("visitor", &e)])
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
    let found = visitor::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    form_page(ctx, format!("{LIST_PATH}/{id}"), "Edit Visitor", VisitorForm::from(&found), Vec::new())
}

pub async fn update(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<VisitorForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let form = form.into_inner();
    let action = format!("{LIST_PATH}/{id}");

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &settings, LIST_PATH);
        return form_page(ctx, action, "Edit Visitor", form, errors);
    }

    match visitor::update(&pool, id, &form.to_input()).await {
        Ok(updated) => {
            log::info!("Visitor {id} updated");
            set_flash(&session, &format!("{} updated", updated.display_name()));
            Ok(see_other(LIST_PATH))
        }
        Err(e) if e.is_not_found() => Err(AppError::NotFound),
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            form_page(ctx, action, "Edit Visitor", form, vec![save_failed("visitor", &e)])
        }
    }
}

/// Deleting a visitor also removes their check-ins.
pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    if !visitor::delete(&pool, id).await? {
        return Err(AppError::NotFound);
    }
    log::info!("Visitor {id} deleted");
    set_flash(&session, "Visitor deleted");
    Ok(see_other(LIST_PATH))
}
