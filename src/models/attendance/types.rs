use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::parse_id;
use crate::models::name::display_name;
use crate::models::timefmt;

/// An attendance row joined with the visitor's name and the service's type.
/// `visitor_found` is false when the visitor reference no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub service_id: i64,
    pub visitor_id: i64,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub visitor_found: bool,
    pub visitor_first_name: Option<String>,
    pub visitor_last_name: Option<String>,
    pub service_type_name: Option<String>,
    pub service_started_at: Option<DateTime<Utc>>,
}

impl AttendanceRecord {
    pub fn attendee_name(&self) -> String {
        if !self.visitor_found {
            return "Someone".to_string();
        }
        display_name(
            self.visitor_first_name.as_deref().unwrap_or_default(),
            self.visitor_last_name.as_deref().unwrap_or_default(),
        )
    }

    pub fn service_label(&self) -> &str {
        self.service_type_name.as_deref().unwrap_or("service")
    }

    pub fn checked_in_label(&self) -> String {
        timefmt::optional_label(&self.checked_in_at)
    }

    pub fn checked_in_input(&self) -> String {
        timefmt::optional_input(&self.checked_in_at)
    }

    pub fn service_started_label(&self) -> String {
        timefmt::optional_label(&self.service_started_at)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceInput {
    pub service_id: i64,
    pub visitor_id: i64,
    pub checked_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceForm {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub visitor_id: String,
    #[serde(default)]
    pub checked_in_at: String,
    pub csrf_token: String,
}

impl AttendanceForm {
    pub fn to_input(&self) -> Result<AttendanceInput, Vec<String>> {
        let mut errors = Vec::new();
        let service_id = parse_id(&self.service_id, "Service").map_err(|e| errors.push(e)).ok();
        let visitor_id = parse_id(&self.visitor_id, "Visitor").map_err(|e| errors.push(e)).ok();
        let checked_in_at = if self.checked_in_at.trim().is_empty() {
            errors.push("Check-in time is required".to_string());
            None
        } else {
            let parsed = timefmt::parse_local_input(&self.checked_in_at);
            if parsed.is_none() {
                errors.push("Check-in time must look like YYYY-MM-DDTHH:MM".to_string());
            }
            parsed
        };

        match (service_id, visitor_id, checked_in_at) {
            (Some(service_id), Some(visitor_id), Some(checked_in_at)) => Ok(AttendanceInput {
                service_id,
                visitor_id,
                checked_in_at,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&AttendanceRecord> for AttendanceForm {
    fn from(r: &AttendanceRecord) -> Self {
        AttendanceForm {
            service_id: r.service_id.to_string(),
            visitor_id: r.visitor_id.to_string(),
            checked_in_at: r.checked_in_input(),
            csrf_token: String::new(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            service_id: 2,
            visitor_id: 3,
            checked_in_at: None,
            visitor_found: true,
            visitor_first_name: Some("Efua".to_string()),
            visitor_last_name: Some("Owusu".to_string()),
            service_type_name: Some("Sunday Service".to_string()),
            service_started_at: None,
        }
    }

    #[test]
    fn attendee_name_uses_visitor_name() {
        assert_eq!(record().attendee_name(), "Efua Owusu");
        assert_eq!(record().service_label(), "Sunday Service");
    }

    #[test]
    fn unresolved_visitor_is_someone() {
        let mut r = record();
        r.visitor_found = false;
        r.visitor_first_name = None;
        assert_eq!(r.attendee_name(), "Someone");
    }

    #[test]
    fn missing_service_type_falls_back() {
        let mut r = record();
        r.service_type_name = None;
        assert_eq!(r.service_label(), "service");
    }

    #[test]
    fn form_requires_all_three_fields() {
        let errors = AttendanceForm::default().to_input().unwrap_err();
        assert_eq!(
            errors,
            vec!["Service is required", "Visitor is required", "Check-in time is required"]
        );
    }

    #[test]
    fn form_parses_ids_and_time() {
        let form = AttendanceForm {
            service_id: "4".to_string(),
            visitor_id: "9".to_string(),
            checked_in_at: "2025-03-09T10:15".to_string(),
            csrf_token: String::new(),
        };
        let input = form.to_input().unwrap();
        assert_eq!((input.service_id, input.visitor_id), (4, 9));
    }
}
