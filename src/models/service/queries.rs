use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::BackendError;
use super::types::{DEFAULT_USER_ID, Service, ServiceInput};

const SELECT_SERVICE: &str = "\
    SELECT s.id, s.user_id, s.service_type_id, st.name AS service_type_name, \
           s.location, s.notes, s.started_at, s.ended_at, s.created_at \
    FROM services s \
    LEFT JOIN service_types st ON st.id = s.service_type_id";

/// Services, most recently started first. `limit = None` returns all.
pub async fn find_all(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Service>, BackendError> {
    let services = sqlx::query_as::<_, Service>(&format!(
        "{SELECT_SERVICE} ORDER BY s.started_at DESC, s.id DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(services)
}

/// Services started in `[start, end]`, both bounds inclusive.
pub async fn count_started_between(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<i64, BackendError> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM services WHERE started_at >= $1 AND started_at <= $2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(n)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Service>, BackendError> {
    let service = sqlx::query_as::<_, Service>(&format!("{SELECT_SERVICE} WHERE s.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(service)
}

pub async fn create(pool: &PgPool, input: &ServiceInput) -> Result<i64, BackendError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO services (user_id, service_type_id, location, notes, started_at, ended_at) \
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(DEFAULT_USER_ID)
    .bind(input.service_type_id)
    .bind(&input.location)
    .bind(&input.notes)
    .bind(input.started_at)
    .bind(input.ended_at)
    .fetch_one(pool)
    .await?;
    log::info!("Service {id} scheduled");
    Ok(id)
}

pub async fn update(pool: &PgPool, id: i64, input: &ServiceInput) -> Result<(), BackendError> {
    let result = sqlx::query(
        "UPDATE services SET service_type_id = $1, location = $2, notes = $3, \
                started_at = $4, ended_at = $5 \
         WHERE id = $6",
    )
    .bind(input.service_type_id)
    .bind(&input.location)
    .bind(&input.notes)
    .bind(input.started_at)
    .bind(input.ended_at)
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(BackendError::new("not_found", format!("Service {id} not found")));
    }
    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM services WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
