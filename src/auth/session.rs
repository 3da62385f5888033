use actix_session::Session;

use crate::errors::AppError;

const AUTHENTICATED_KEY: &str = "is_authenticated";
const USER_NAME_KEY: &str = "user_name";
const FLASH_KEY: &str = "flash";

/// What the session cookie records about the signed-in operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub user_name: Option<String>,
}

impl SessionState {
    pub fn signed_in(user_name: &str) -> Self {
        Self {
            authenticated: true,
            user_name: Some(user_name.to_string()),
        }
    }

    /// Name shown in the header. Falls back to "Admin" for sessions without one.
    pub fn display_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Admin")
    }
}

/// Read the session. Unreadable values count as signed out.
pub fn load_session(session: &Session) -> SessionState {
    let authenticated = session
        .get::<bool>(AUTHENTICATED_KEY)
        .unwrap_or(None)
        .unwrap_or(false);
    let user_name = session.get::<String>(USER_NAME_KEY).unwrap_or(None);
    SessionState { authenticated, user_name }
}

pub fn is_authenticated(session: &Session) -> bool {
    load_session(session).authenticated
}

pub fn store_session(session: &Session, state: &SessionState) -> Result<(), AppError> {
    session.renew();
    session
        .insert(AUTHENTICATED_KEY, state.authenticated)
        .map_err(|e| AppError::Session(format!("Failed to store session: {e}")))?;
    if let Some(name) = &state.user_name {
        session
            .insert(USER_NAME_KEY, name)
            .map_err(|e| AppError::Session(format!("Failed to store session: {e}")))?;
    }
    Ok(())
}

/// Sign out: drops every key, including the CSRF token.
pub fn clear_session(session: &Session) {
    session.purge();
}

pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_KEY, message) {
        log::warn!("Failed to store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
