use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::BackendError;
use super::types::{Visitor, VisitorInput};

const VISITOR_COLUMNS: &str = "id, first_name, last_name, phone, email, inviter_name, created_at";

/// Visitors, newest first. `limit = None` returns all.
pub async fn find_all(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Visitor>, BackendError> {
    let visitors = sqlx::query_as::<_, Visitor>(&format!(
        "SELECT {VISITOR_COLUMNS} FROM visitors \
         ORDER BY created_at DESC NULLS LAST, id DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(visitors)
}

/// All visitors ordered by name, for pickers.
pub async fn find_options(pool: &PgPool) -> Result<Vec<Visitor>, BackendError> {
    let visitors = sqlx::query_as::<_, Visitor>(&format!(
        "SELECT {VISITOR_COLUMNS} FROM visitors ORDER BY first_name, last_name, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(visitors)
}

/// Visitors registered in `[start, end]`, both bounds inclusive.
pub async fn count_created_between(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<i64, BackendError> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM visitors WHERE created_at >= $1 AND created_at <= $2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(n)
}

/// Registration timestamps at or after `start`, for the weekly series.
pub async fn created_since(pool: &PgPool, start: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, BackendError> {
    let stamps = sqlx::query_scalar::<_, DateTime<Utc>>(
        "SELECT created_at FROM visitors WHERE created_at >= $1 ORDER BY created_at",
    )
    .bind(start)
    .fetch_all(pool)
    .await?;
    Ok(stamps)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Visitor>, BackendError> {
    let visitor = sqlx::query_as::<_, Visitor>(&format!(
        "SELECT {VISITOR_COLUMNS} FROM visitors WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(visitor)
}

pub async fn create(pool: &PgPool, input: &VisitorInput) -> Result<Visitor, BackendError> {
    let visitor = sqlx::query_as::<_, Visitor>(&format!(
        "INSERT INTO visitors (first_name, last_name, phone, email, inviter_name) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {VISITOR_COLUMNS}"
    ))
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(&input.inviter_name)
    .fetch_one(pool)
    .await?;
    log::info!("Visitor {} registered", visitor.id);
    Ok(visitor)
}

pub async fn update(pool: &PgPool, id: i64, input: &VisitorInput) -> Result<Visitor, BackendError> {
    sqlx::query_as::<_, Visitor>(&format!(
        "UPDATE visitors SET first_name = $1, last_name = $2, phone = $3, email = $4, inviter_name = $5 \
         WHERE id = $6 RETURNING {VISITOR_COLUMNS}"
    ))
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.phone)
    .bind(&input.email)
    .bind(&input.inviter_name)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| BackendError::new("not_found", format!("Visitor {id} not found")))
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM visitors WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
