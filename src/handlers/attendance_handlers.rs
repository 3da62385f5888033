use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{AppError, render, see_other};
use crate::handlers::{CsrfOnly, or_empty, save_failed};
use crate::models::attendance::{self, AttendanceForm};
use crate::models::{service, timefmt, visitor};
use crate::settings::SettingsStore;
use crate::templates_structs::{AttendanceFormTemplate, AttendanceListTemplate, PageContext, SelectOption};

const LIST_PATH: &str = "/dashboard/attendance";

async fn form_page(
    pool: &PgPool,
    ctx: PageContext,
    form_action: String,
    form_title: &str,
    form: AttendanceForm,
    mut errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let (services, visitors) = tokio::join!(service::find_all(pool, None), visitor::find_options(pool));
    let (services, services_failed) = or_empty(services, "services");
    let (visitors, visitors_failed) = or_empty(visitors, "visitors");
    if services_failed || visitors_failed {
        errors.push("Services or visitors could not be loaded".to_string());
    }

    let services = SelectOption::list(
        std::iter::once((String::new(), "Select a service".to_string()))
            .chain(services.iter().map(|s| (s.id.to_string(), s.option_label()))),
        &form.service_id,
    );
    let visitors = SelectOption::list(
        std::iter::once((String::new(), "Select a visitor".to_string()))
            .chain(visitors.iter().map(|v| (v.id.to_string(), v.display_name()))),
        &form.visitor_id,
    );
    render(AttendanceFormTemplate {
        ctx,
        form_action,
        form_title: form_title.to_string(),
        form,
        services,
        visitors,
        errors,
    })
}

pub async fn list(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    let (records, load_failed) = or_empty(attendance::find_all(&pool, None).await, "attendance");
    render(AttendanceListTemplate { ctx, records, load_failed })
}

/// The check-in time defaults to now.
pub async fn new_form(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let form = AttendanceForm {
        checked_in_at: timefmt::local_input(&Utc::now()),
        ..AttendanceForm::default()
    };
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    form_page(&pool, ctx, LIST_PATH.to_string(), "Record Attendance", form, Vec::new()).await
}

pub async fn create(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    form: web::Form<AttendanceForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let input = match form.to_input() {
        Ok(input) => input,
        Err(errors) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            return form_page(&pool, ctx, LIST_PATH.to_string(), "Record Attendance", form, errors).await;
        }
    };

    match attendance::create(&pool, &input).await {
        Ok(_) => {
            set_flash(&session, "Attendance recorded");
            Ok(see_other(LIST_PATH))
        }
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            let errors = vec![save_failed("attendance", &e)];
            form_page(&pool, ctx, LIST_PATH.to_string(), "Record Attendance", form, errors).await
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
    let found = attendance::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    let action = format!("{LIST_PATH}/{id}");
    form_page(&pool, ctx, action, "Edit Attendance", AttendanceForm::from(&found), Vec::new()).await
}

pub async fn update(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<AttendanceForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let form = form.into_inner();
    let action = format!("{LIST_PATH}/{id}");

    let input = match form.to_input() {
        Ok(input) => input,
        Err(errors) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            return form_page(&pool, ctx, action, "Edit Attendance", form, errors).await;
        }
    };

    match attendance::update(&pool, id, &input).await {
        Ok(()) => {
            log::info!("Attendance {id} updated");
            set_flash(&session, "Attendance updated");
            Ok(see_other(LIST_PATH))
        }
        Err(e) if e.is_not_found() => Err(AppError::NotFound),
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            let errors = vec![save_failed("attendance", &e)];
            form_page(&pool, ctx, action, "Edit Attendance", form, errors).await
        }
    }
}

pub async fn delete(
    pool: web::Data<PgPool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();

    if !attendance::delete(&pool, id).await? {
        return Err(AppError::NotFound);
    }
    log::info!("Attendance {id} deleted");
    set_flash(&session, "Attendance record deleted");
    Ok(see_other(LIST_PATH))
}
