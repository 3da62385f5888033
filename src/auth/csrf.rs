//! Per-session form tokens. Every HTML form carries the token as a hidden
//! `csrf_token` field; mutating handlers call `validate_csrf` first.

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;

const CSRF_KEY: &str = "csrf_token";
const TOKEN_BYTES: usize = 32;

fn session_token(session: &Session) -> Option<String> {
    session
        .get::<String>(CSRF_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

/// The session's form token, issuing one on first use.
pub fn get_or_create_token(session: &Session) -> String {
    if let Some(token) = session_token(session) {
        return token;
    }
    let token = fresh_token();
    if let Err(e) = session.insert(CSRF_KEY, &token) {
        log::warn!("Could not keep form token in session: {e}");
    }
    token
}

/// `AppError::Csrf` (403) unless `submitted` matches the session's token.
/// A session that never issued a token rejects everything.
pub fn validate_csrf(session: &Session, submitted: &str) -> Result<(), AppError> {
    match session_token(session) {
        Some(expected) if tokens_match(expected.as_bytes(), submitted.as_bytes()) => Ok(()),
        _ => {
            log::warn!("Rejected form post with a bad or missing token");
            Err(AppError::Csrf)
        }
    }
}

fn fresh_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    hex::encode(bytes)
}

// Examines every byte regardless of where the first mismatch is.
fn tokens_match(expected: &[u8], submitted: &[u8]) -> bool {
    expected.len() == submitted.len()
        && expected
            .iter()
            .zip(submitted)
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
