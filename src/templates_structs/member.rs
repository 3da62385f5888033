use askama::Template;

use crate::models::member::{Member, MemberForm};
use super::{PageContext, SelectOption};

#[derive(Template)]
#[template(path = "members/list.html")]
pub struct MemberListTemplate {
    pub ctx: PageContext,
    pub members: Vec<Member>,
    pub load_failed: bool,
}

#[derive(Template)]
#[template(path = "members/form.html")]
pub struct MemberFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub form: MemberForm,
    pub departments: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
    pub errors: Vec<String>,
}
