use sqlx::PgPool;

use crate::db::BackendError;
use crate::models::name::join_name;
use super::types::{Member, MemberRow, MemberUpdate, NewMember};

const SELECT_MEMBER: &str = "\
    SELECT id, name, dob, email, phone, location, department, status, created_at \
    FROM members";

/// Members, newest first. `limit = None` returns all.
pub async fn find_all(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Member>, BackendError> {
    let rows = sqlx::query_as::<_, MemberRow>(&format!(
        "{SELECT_MEMBER} ORDER BY created_at DESC NULLS LAST, id DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
    .inspect_err(|e| log::error!("Error fetching members: {e}"))?;
    Ok(rows.into_iter().map(Member::from).collect())
}

pub async fn count(pool: &PgPool) -> Result<i64, BackendError> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Member>, BackendError> {
    let row = sqlx::query_as::<_, MemberRow>(&format!("{SELECT_MEMBER} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Member::from))
}

pub async fn create(pool: &PgPool, new: &NewMember) -> Result<Member, BackendError> {
    let name = join_name(&new.first_name, &new.last_name);
    let d = &new.details;
    let row = sqlx::query_as::<_, MemberRow>(
        "INSERT INTO members (name, dob, email, phone, location, department, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING id, name, dob, email, phone, location, department, status, created_at",
    )
    .bind(&name)
    .bind(d.dob)
    .bind(&d.email)
    .bind(&d.phone)
    .bind(&d.location)
    .bind(&d.department)
    .bind(&d.status)
    .fetch_one(pool)
    .await
    .inspect_err(|e| log::error!("Failed to add member '{name}': {e}"))?;
    log::info!("Member {} added", row.id);
    Ok(Member::from(row))
}

/// Update a member. The combined name column is always rewritten whole.
pub async fn update(pool: &PgPool, id: i64, changes: &MemberUpdate) -> Result<Member, BackendError> {
    let name = join_name(&changes.first_name, &changes.last_name);
    let d = &changes.details;
    let row = sqlx::query_as::<_, MemberRow>(
        "UPDATE members SET name = $1, dob = $2, email = $3, phone = $4, \
                location = $5, department = $6, status = $7 \
         WHERE id = $8 \
         RETURNING id, name, dob, email, phone, location, department, status, created_at",
    )
    .bind(&name)
    .bind(d.dob)
    .bind(&d.email)
    .bind(&d.phone)
    .bind(&d.location)
    .bind(&d.department)
    .bind(&d.status)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| BackendError::new("not_found", format!("Member {id} not found")))?;
    Ok(Member::from(row))
}

/// Returns whether a row was deleted.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM members WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
