// Template context structures for Askama templates, organized by screen.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{load_session, take_flash};
use crate::settings::SettingsStore;

/// Sidebar entry.
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

const NAV: &[(&str, &str)] = &[
    ("Dashboard", "/dashboard"),
    ("Members", "/dashboard/members"),
    ("Visitors", "/dashboard/visitors"),
    ("Services", "/dashboard/services"),
    ("Service Types", "/dashboard/service-types"),
    ("Attendance", "/dashboard/attendance"),
    ("Settings", "/dashboard/settings"),
];

fn nav_links(current_path: &str) -> Vec<NavLink> {
    NAV.iter()
        .map(|&(label, href)| NavLink {
            label,
            href,
            active: if href == "/dashboard" {
                current_path == href
            } else {
                current_path == href || current_path.starts_with(&format!("{href}/"))
            },
        })
        .collect()
}

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.user_name`, `ctx.nav`, etc.
pub struct PageContext {
    pub user_name: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
    pub nav: Vec<NavLink>,
}

impl PageContext {
    pub fn build(session: &Session, settings: &SettingsStore, current_path: &str) -> Self {
        let state = load_session(session);
        let user_name = state.display_name().to_string();
        let avatar_initial = user_name.chars().next().unwrap_or('?').to_uppercase().to_string();
        Self {
            user_name,
            avatar_initial,
            flash: take_flash(session),
            app_name: settings.get().church_name,
            csrf_token: csrf::get_or_create_token(session),
            nav: nav_links(current_path),
        }
    }
}

/// One `<option>` in a select box.
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn list(items: impl IntoIterator<Item = (String, String)>, current: &str) -> Vec<SelectOption> {
        items
            .into_iter()
            .map(|(value, label)| SelectOption {
                selected: value == current,
                value,
                label,
            })
            .collect()
    }
}

mod attendance;
mod common;
mod dashboard;
mod member;
mod service;
mod service_type;
mod visitor;

pub use self::attendance::{AttendanceFormTemplate, AttendanceListTemplate};
pub use self::common::{LoginTemplate, SettingsTemplate};
pub use self::dashboard::{ChartBar, DashboardTemplate};
pub use self::member::{MemberFormTemplate, MemberListTemplate};
pub use self::service::{ServiceFormTemplate, ServiceListTemplate};
pub use self::service_type::{ServiceTypeFormTemplate, ServiceTypeListTemplate};
pub use self::visitor::{VisitorFormTemplate, VisitorListTemplate};
