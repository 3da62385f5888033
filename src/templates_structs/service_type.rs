use askama::Template;

use crate::models::service_type::{ServiceType, ServiceTypeForm};
use super::PageContext;

#[derive(Template)]
#[template(path = "service_types/list.html")]
pub struct ServiceTypeListTemplate {
    pub ctx: PageContext,
    pub service_types: Vec<ServiceType>,
    pub load_failed: bool,
}

#[derive(Template)]
#[template(path = "service_types/form.html")]
pub struct ServiceTypeFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: ServiceTypeForm,
    pub errors: Vec<String>,
}
