use askama::Template;

use crate::settings::AppSettings;
use super::PageContext;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: String,
    pub user_name: String,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub ctx: PageContext,
    pub settings: AppSettings,
    pub errors: Vec<String>,
}
