use std::fmt;

use serde::Serialize;
use sqlx::PgPool;
use sqlx::postgres::{PgDatabaseError, PgPoolOptions};

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL error code for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";
const NOT_FOUND: &str = "not_found";

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Error returned by every data-access function.
///
/// Mirrors what the database reports: a SQLSTATE code, the primary message,
/// and the optional hint and detail lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackendError {
    pub code: String,
    pub message: String,
    pub hint: String,
    pub details: String,
}

impl BackendError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code == UNIQUE_VIOLATION
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.code == FOREIGN_KEY_VIOLATION
    }

    pub fn is_not_found(&self) -> bool {
        self.code == NOT_FOUND
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() {
            write!(f, "{}", self.message)?;
        } else {
            write!(f, "[{}] {}", self.code, self.message)?;
        }
        if !self.hint.is_empty() {
            write!(f, " (hint: {})", self.hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for BackendError {}

impl From<sqlx::Error> for BackendError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db_err) => {
                let (hint, details) = db_err
                    .try_downcast_ref::<PgDatabaseError>()
                    .map(|pg| {
                        (
                            pg.hint().unwrap_or_default().to_string(),
                            pg.detail().unwrap_or_default().to_string(),
                        )
                    })
                    .unwrap_or_default();
                BackendError {
                    code: db_err.code().map(|c| c.into_owned()).unwrap_or_default(),
                    message: db_err.message().to_string(),
                    hint,
                    details,
                }
            }
            sqlx::Error::RowNotFound => BackendError::new(NOT_FOUND, "No matching row"),
            other => BackendError::new("", other.to_string()),
        }
    }
}

/// Read probe against the members table, used by the health endpoint.
pub async fn probe_members_table(pool: &PgPool) -> Result<(), BackendError> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM members LIMIT 1")
        .fetch_optional(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_and_hint() {
        let err = BackendError {
            code: "42P01".to_string(),
            message: "relation \"members\" does not exist".to_string(),
            hint: "run migrations".to_string(),
            details: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "[42P01] relation \"members\" does not exist (hint: run migrations)"
        );
    }

    #[test]
    fn row_not_found_maps_to_not_found_code() {
        let err = BackendError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.code, "not_found");
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn unique_violation_is_detected_by_code() {
        assert!(BackendError::new("23505", "duplicate key").is_unique_violation());
        assert!(BackendError::new("23503", "still referenced").is_foreign_key_violation());
    }
}
