use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::BackendError;
use super::types::{AttendanceInput, AttendanceRecord};

const SELECT_ATTENDANCE: &str = "\
    SELECT a.id, a.service_id, a.visitor_id, a.checked_in_at, \
           (v.id IS NOT NULL) AS visitor_found, \
           v.first_name AS visitor_first_name, v.last_name AS visitor_last_name, \
           st.name AS service_type_name, s.started_at AS service_started_at \
    FROM attendance a \
    LEFT JOIN visitors v ON v.id = a.visitor_id \
    LEFT JOIN services s ON s.id = a.service_id \
    LEFT JOIN service_types st ON st.id = s.service_type_id";

/// Check-ins, most recent first. `limit = None` returns all.
pub async fn find_all(pool: &PgPool, limit: Option<i64>) -> Result<Vec<AttendanceRecord>, BackendError> {
    let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
        "{SELECT_ATTENDANCE} ORDER BY a.checked_in_at DESC NULLS LAST, a.id DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(records)
}

/// Distinct visitors with at least one check-in in `[start, end]`.
pub async fn count_unique_visitors_between(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<i64, BackendError> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(DISTINCT visitor_id) FROM attendance \
         WHERE checked_in_at >= $1 AND checked_in_at <= $2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(n)
}

/// Check-in timestamps at or after `start`, for the daily series.
pub async fn checked_in_since(pool: &PgPool, start: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, BackendError> {
    let stamps = sqlx::query_scalar::<_, DateTime<Utc>>(
        "SELECT checked_in_at FROM attendance WHERE checked_in_at >= $1 ORDER BY checked_in_at",
    )
    .bind(start)
    .fetch_all(pool)
    .await?;
    Ok(stamps)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<AttendanceRecord>, BackendError> {
    let record = sqlx::query_as::<_, AttendanceRecord>(&format!("{SELECT_ATTENDANCE} WHERE a.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(record)
}

pub async fn create(pool: &PgPool, input: &AttendanceInput) -> Result<i64, BackendError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO attendance (service_id, visitor_id, checked_in_at) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(input.service_id)
    .bind(input.visitor_id)
    .bind(input.checked_in_at)
    .fetch_one(pool)
    .await?;
    log::info!("Attendance {id} recorded for visitor {}", input.visitor_id);
    Ok(id)
}

pub async fn update(pool: &PgPool, id: i64, input: &AttendanceInput) -> Result<(), BackendError> {
    let result = sqlx::query(
        "UPDATE attendance SET service_id = $1, visitor_id = $2, checked_in_at = $3 WHERE id = $4",
    )
    .bind(input.service_id)
    .bind(input.visitor_id)
    .bind(input.checked_in_at)
    .bind(id)
    .execute(pool)
    .await?;
    if result.rows_affected() == 0 {
        return Err(BackendError::new("not_found", format!("Attendance {id} not found")));
    }
    Ok(())
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
