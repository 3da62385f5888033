use askama::Template;

use crate::models::service::{Service, ServiceForm};
use super::{PageContext, SelectOption};

#[derive(Template)]
#[template(path = "services/list.html")]
pub struct ServiceListTemplate {
    pub ctx: PageContext,
    pub services: Vec<Service>,
    pub load_failed: bool,
}

#[derive(Template)]
#[template(path = "services/form.html")]
pub struct ServiceFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: ServiceForm,
    pub service_types: Vec<SelectOption>,
    pub errors: Vec<String>,
}
