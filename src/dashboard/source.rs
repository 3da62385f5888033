use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::db::{self, BackendError};
use crate::models::attendance::{self, AttendanceRecord};
use crate::models::member::{self, Member};
use crate::models::service;
use crate::models::visitor::{self, Visitor};

/// Every read the dashboard needs. Implemented for `PgPool`; tests supply
/// in-memory fakes.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn count_members(&self) -> Result<i64, BackendError>;

    /// Services started in `[start, end]`.
    async fn count_services_started(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, BackendError>;

    /// Visitors registered in `[start, end]`.
    async fn count_visitors_created(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, BackendError>;

    /// Distinct visitors with a check-in in `[start, end]`.
    async fn count_unique_attendees(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, BackendError>;

    async fn latest_members(&self, limit: i64) -> Result<Vec<Member>, BackendError>;
    async fn latest_visitors(&self, limit: i64) -> Result<Vec<Visitor>, BackendError>;
    async fn latest_attendance(&self, limit: i64) -> Result<Vec<AttendanceRecord>, BackendError>;

    async fn check_ins_since(&self, start: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, BackendError>;
    async fn visitor_registrations_since(&self, start: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, BackendError>;

    /// Cheap read against `members`, used by the health check.
    async fn probe(&self) -> Result<(), BackendError>;
}

#[async_trait]
impl DashboardSource for PgPool {
    async fn count_members(&self) -> Result<i64, BackendError> {
        member::count(self).await
    }

    async fn count_services_started(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, BackendError> {
        service::count_started_between(self, start, end).await
    }

    async fn count_visitors_created(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, BackendError> {
        visitor::count_created_between(self, start, end).await
    }

    async fn count_unique_attendees(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64, BackendError> {
        attendance::count_unique_visitors_between(self, start, end).await
    }

    async fn latest_members(&self, limit: i64) -> Result<Vec<Member>, BackendError> {
        member::find_all(self, Some(limit)).await
    }

    async fn latest_visitors(&self, limit: i64) -> Result<Vec<Visitor>, BackendError> {
        visitor::find_all(self, Some(limit)).await
    }

    async fn latest_attendance(&self, limit: i64) -> Result<Vec<AttendanceRecord>, BackendError> {
        attendance::find_all(self, Some(limit)).await
    }

    async fn check_ins_since(&self, start: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, BackendError> {
        attendance::checked_in_since(self, start).await
    }

    async fn visitor_registrations_since(&self, start: DateTime<Utc>) -> Result<Vec<DateTime<Utc>>, BackendError> {
        visitor::created_since(self, start).await
    }

    async fn probe(&self) -> Result<(), BackendError> {
        db::probe_members_table(self).await
    }
}
