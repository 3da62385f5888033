pub mod api_v1;
pub mod attendance_handlers;
pub mod auth_handlers;
pub mod dashboard;
pub mod member_handlers;
pub mod service_handlers;
pub mod service_type_handlers;
pub mod settings_handlers;
pub mod visitor_handlers;

use serde::Deserialize;

use crate::db::BackendError;

/// Body of the delete and logout buttons.
#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

/// A list-screen read: errors are logged and the screen shows an empty,
/// flagged list instead of failing.
pub(crate) fn or_empty<T: Default>(result: Result<T, BackendError>, what: &str) -> (T, bool) {
    match result {
        Ok(rows) => (rows, false),
        Err(e) => {
            log::error!("Error fetching {what}: {e}");
            (T::default(), true)
        }
    }
}

/// User-facing message for a failed write.
pub(crate) fn save_failed(what: &str, e: &BackendError) -> String {
    if e.is_unique_violation() {
        format!("Could not save {what}: a record with that name already exists")
    } else {
        format!("Could not save {what}: {}", e.message)
    }
}
