use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::set_flash;
use crate::auth::validate::{validate_optional, validate_optional_email, validate_required};
use crate::errors::{AppError, render, see_other};
use crate::settings::{AppSettings, SettingsForm, SettingsStore};
use crate::templates_structs::{PageContext, SettingsTemplate};

const PATH: &str = "/dashboard/settings";

pub async fn show(
    settings: web::Data<SettingsStore>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &settings, PATH);
    let tmpl = SettingsTemplate {
        ctx,
        settings: settings.get(),
        errors: Vec::new(),
    };
    render(tmpl)
}

fn validate(form: &SettingsForm) -> Vec<String> {
    let mut errors = Vec::new();
    errors.extend(validate_required(&form.church_name, "Church name", 100));
    errors.extend(validate_optional_email(&form.church_email));
    errors.extend(validate_optional(&form.church_phone, "Phone", 50));
    errors.extend(validate_optional(&form.default_location, "Default location", 200));
    errors
}

pub async fn save(
    settings: web::Data<SettingsStore>,
    session: Session,
    form: web::Form<SettingsForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = validate(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &settings, PATH);
        let tmpl = SettingsTemplate {
            ctx,
            settings: AppSettings::default().merged(form.to_patch()),
            errors,
        };
        return render(tmpl);
    }

    settings.save(form.to_patch());
    log::info!("Settings updated");
    set_flash(&session, "Settings saved");
    Ok(see_other(PATH))
}
