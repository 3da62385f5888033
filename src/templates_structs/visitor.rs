use askama::Template;

use crate::models::visitor::{Visitor, VisitorForm};
use super::PageContext;

#[derive(Template)]
#[template(path = "visitors/list.html")]
pub struct VisitorListTemplate {
    pub ctx: PageContext,
    pub visitors: Vec<Visitor>,
    pub load_failed: bool,
}

#[derive(Template)]
#[template(path = "visitors/form.html")]
pub struct VisitorFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: VisitorForm,
    pub errors: Vec<String>,
}
