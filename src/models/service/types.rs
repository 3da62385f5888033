use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{parse_id, validate_optional};
use crate::models::{none_if_blank, timefmt};

/// Services are recorded against the single admin account.
pub const DEFAULT_USER_ID: i64 = 1;

/// A service joined with its type name.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Service {
    pub id: i64,
    pub user_id: i64,
    pub service_type_id: i64,
    pub service_type_name: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Service {
    pub fn type_label(&self) -> &str {
        self.service_type_name.as_deref().unwrap_or("service")
    }

    pub fn started_label(&self) -> String {
        timefmt::local_label(&self.started_at)
    }

    pub fn ended_label(&self) -> String {
        timefmt::optional_label(&self.ended_at)
    }

    pub fn started_input(&self) -> String {
        timefmt::local_input(&self.started_at)
    }

    pub fn ended_input(&self) -> String {
        timefmt::optional_input(&self.ended_at)
    }

    /// Label for pickers: "Sunday Service, 2025-03-09 10:00".
    pub fn option_label(&self) -> String {
        format!("{}, {}", self.type_label(), self.started_label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInput {
    pub service_type_id: i64,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceForm {
    #[serde(default)]
    pub service_type_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub ended_at: String,
    pub csrf_token: String,
}

impl ServiceForm {
    /// Blank form for a new service, located at `default_location`.
    pub fn with_location(default_location: &str) -> Self {
        ServiceForm {
            location: default_location.to_string(),
            ..ServiceForm::default()
        }
    }

    /// Parse into a storable input, or the list of field errors.
    pub fn to_input(&self) -> Result<ServiceInput, Vec<String>> {
        let mut errors = Vec::new();
        let service_type_id = parse_id(&self.service_type_id, "Service type")
            .map_err(|e| errors.push(e))
            .ok();
        let started_at = if self.started_at.trim().is_empty() {
            errors.push("Start time is required".to_string());
            None
        } else {
            let parsed = timefmt::parse_local_input(&self.started_at);
            if parsed.is_none() {
                errors.push("Start time must look like YYYY-MM-DDTHH:MM".to_string());
            }
            parsed
        };
        let ended_at = if self.ended_at.trim().is_empty() {
            None
        } else {
            let parsed = timefmt::parse_local_input(&self.ended_at);
            if parsed.is_none() {
                errors.push("End time must look like YYYY-MM-DDTHH:MM".to_string());
            }
            parsed
        };
        errors.extend(validate_optional(&self.location, "Location", 200));

        match (service_type_id, started_at) {
            (Some(service_type_id), Some(started_at)) if errors.is_empty() => {
                if ended_at.is_some_and(|end| end < started_at) {
                    return Err(vec!["End time must not be before the start time".to_string()]);
                }
                Ok(ServiceInput {
                    service_type_id,
                    location: none_if_blank(&self.location),
                    notes: none_if_blank(&self.notes),
                    started_at,
                    ended_at,
                })
            }
            _ => Err(errors),
        }
    }
}

impl From<&Service> for ServiceForm {
    fn from(s: &Service) -> Self {
        ServiceForm {
            service_type_id: s.service_type_id.to_string(),
            location: s.location.clone().unwrap_or_default(),
            notes: s.notes.clone().unwrap_or_default(),
            started_at: s.started_input(),
            ended_at: s.ended_input(),
            csrf_token: String::new(),
        }
    }
}
