use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::auth::validate::validate_required;
use crate::db::BackendError;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ServiceType {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceTypeForm {
    pub name: String,
    pub csrf_token: String,
}

impl ServiceTypeForm {
    pub fn validate(&self) -> Vec<String> {
        validate_required(&self.name, "Name", 100).into_iter().collect()
    }
}

impl From<&ServiceType> for ServiceTypeForm {
    fn from(t: &ServiceType) -> Self {
        ServiceTypeForm {
            name: t.name.clone(),
            csrf_token: String::new(),
        }
    }
}

/// All service types, alphabetical.
pub async fn find_all(pool: &PgPool) -> Result<Vec<ServiceType>, BackendError> {
    let types = sqlx::query_as::<_, ServiceType>("SELECT id, name FROM service_types ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(types)
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ServiceType>, BackendError> {
    let found = sqlx::query_as::<_, ServiceType>("SELECT id, name FROM service_types WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found)
}

pub async fn create(pool: &PgPool, name: &str) -> Result<ServiceType, BackendError> {
    let created = sqlx::query_as::<_, ServiceType>(
        "INSERT INTO service_types (name) VALUES ($1) RETURNING id, name",
    )
    .bind(name)
    .fetch_one(pool)
    .await?;
    log::info!("Service type '{}' added", created.name);
    Ok(created)
}

pub async fn update(pool: &PgPool, id: i64, name: &str) -> Result<ServiceType, BackendError> {
    sqlx::query_as::<_, ServiceType>(
        "UPDATE service_types SET name = $1 WHERE id = $2 RETURNING id, name",
    )
    .bind(name)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| BackendError::new("not_found", format!("Service type {id} not found")))
}

/// Fails with a foreign key violation while services still reference the type.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM service_types WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
