use askama::Template;

use crate::models::attendance::{AttendanceForm, AttendanceRecord};
use super::{PageContext, SelectOption};

#[derive(Template)]
#[template(path = "attendance/list.html")]
pub struct AttendanceListTemplate {
    pub ctx: PageContext,
    pub records: Vec<AttendanceRecord>,
    pub load_failed: bool,
}

/// Check-in form. Picker lists come from the services and visitors tables.
#[derive(Template)]
#[template(path = "attendance/form.html")]
pub struct AttendanceFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: AttendanceForm,
    pub services: Vec<SelectOption>,
    pub visitors: Vec<SelectOption>,
    pub errors: Vec<String>,
}
