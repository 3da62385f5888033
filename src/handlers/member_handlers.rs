use actix_session::Session;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::errors::{AppError, render, see_other};
use crate::handlers::{CsrfOnly, or_empty, save_failed};
use crate::models::member::{self, DEFAULT_STATUS, DEPARTMENTS, MemberForm, STATUSES};
use crate::settings::SettingsStore;
use crate::templates_structs::{MemberFormTemplate, MemberListTemplate, PageContext, SelectOption};

const LIST_PATH: &str = "/dashboard/members";

fn form_page(
    ctx: PageContext,
    form_action: String,
    form_title: &str,
    form: MemberForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let departments = SelectOption::list(
        std::iter::once((String::new(), "No department".to_string()))
            .chain(DEPARTMENTS.iter().map(|d| (d.to_string(), d.to_string()))),
        &form.department,
    );
    let current_status = if form.status.is_empty() { DEFAULT_STATUS } else { form.status.as_str() };
    let statuses = SelectOption::list(
        STATUSES.iter().map(|s| (s.to_string(), s.to_string())),
        current_status,
    );
    render(MemberFormTemplate {
        ctx,
        form_action,
        form_title: form_title.to_string(),
        form,
        departments,
        statuses,
        errors,
    })
}

pub async fn list(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    let (members, load_failed) = or_empty(member::find_all(&pool, None).await, "members");
    render(MemberListTemplate { ctx, members, load_failed })
}

pub async fn new_form(
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    form_page(ctx, LIST_PATH.to_string(), "Add Member", MemberForm::default(), Vec::new())
}

pub async fn create(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    form: web::Form<MemberForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let form = form.into_inner();

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &settings, LIST_PATH);
        return form_page(ctx, LIST_PATH.to_string(), "Add Member", form, errors);
    }

    match member::create(&pool, &form.to_new()).await {
        Ok(created) => {
            set_flash(&session, &format!("{} added to members", created.display_name()));
            Ok(see_other(LIST_PATH))
        }
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            form_page(ctx, LIST_PATH.to_string(), "Add Member", form, vec![save_failed("member", &e)])
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
    let found = member::find_by_id(&pool, id).await?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, &settings, LIST_PATH);
    form_page(ctx, format!("{LIST_PATH}/{id}"), "Edit Member", MemberForm::from(&found), Vec::new())
}

pub async fn update(
    pool: web::Data<PgPool>,
    settings: web::Data<SettingsStore>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<MemberForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let form = form.into_inner();
    let action = format!("{LIST_PATH}/{id}");

    let errors = form.validate();
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &settings, LIST_PATH);
        return form_page(ctx, action, "Edit Member", form, errors);
    }

    match member::update(&pool, id, &form.to_update()).await {
        Ok(updated) => {
            log::info!("Member {id} updated");
            set_flash(&session, &format!("{} updated", updated.display_name()));
            Ok(see_other(LIST_PATH))
        }
        Err(e) if e.is_not_found() => Err(AppError::NotFound),
        Err(e) => {
            let ctx = PageContext::build(&session, &settings, LIST_PATH);
            form_page(ctx, action, "Edit Member", form, vec![save_failed("member", &e)])
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

    if !member::delete(&pool, id).await? {
        return Err(AppError::NotFound);
    }
    log::info!("Member {id} deleted");
    set_flash(&session, "Member deleted");
    Ok(see_other(LIST_PATH))
}
