use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{validate_optional, validate_optional_email, validate_required};
use crate::models::name::{display_name, join_name, split_name};
use crate::models::{none_if_blank, timefmt};

pub const DEFAULT_STATUS: &str = "Active";
pub const STATUSES: &[&str] = &["Active", "Inactive"];

pub const DEPARTMENTS: &[&str] = &[
    "Auditorium",
    "Baccenta",
    "Billboards & Posters",
    "Camera",
    "Camp",
    "Database",
    "Dispenser",
    "ECG",
    "Editorial Board",
    "Evangelism",
    "Event Co-ordination",
    "First Timers",
    "Live Streaming",
    "Media Production",
    "Music",
    "Offering",
    "Outreach",
    "Prayer",
    "Program Outline",
    "Protocol",
    "Retention",
    "Scent Management",
    "Social Media",
    "Special Events",
    "Storeroom",
];

/// Row as stored: a single combined `name` column.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRow {
    pub id: i64,
    pub name: String,
    pub dob: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Member as the rest of the application sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        let (first_name, last_name) = split_name(&row.name);
        Member {
            id: row.id,
            first_name,
            last_name,
            dob: row.dob,
            email: row.email,
            phone: row.phone,
            location: row.location,
            department: row.department,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

impl Member {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }

    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    pub fn dob_input(&self) -> String {
        self.dob.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
    }

    pub fn joined_label(&self) -> String {
        timefmt::optional_label(&self.created_at)
    }
}

/// Columns shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDetails {
    pub dob: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub details: MemberDetails,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberUpdate {
    pub first_name: String,
    pub last_name: String,
    pub details: MemberDetails,
}

/// Form data from the create/edit member forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberForm {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub dob: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: String,
    pub csrf_token: String,
}

impl MemberForm {
    /// Convert to storable details. Assumes the form already validated.
    pub fn details(&self) -> MemberDetails {
        MemberDetails {
            dob: NaiveDate::parse_from_str(self.dob.trim(), "%Y-%m-%d").ok(),
            email: none_if_blank(&self.email),
            phone: none_if_blank(&self.phone),
            location: none_if_blank(&self.location),
            department: none_if_blank(&self.department),
            status: none_if_blank(&self.status).unwrap_or_else(|| DEFAULT_STATUS.to_string()),
        }
    }

    pub fn to_new(&self) -> NewMember {
        NewMember {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            details: self.details(),
        }
    }

    pub fn to_update(&self) -> MemberUpdate {
        MemberUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            details: self.details(),
        }
    }
}

impl MemberForm {
    /// Field errors, empty when the form can be saved.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate_required(&self.first_name, "First name", 100));
        errors.extend(validate_optional(&self.last_name, "Last name", 100));
        errors.extend(validate_optional_email(&self.email));
        let dob = self.dob.trim();
        if !dob.is_empty() && NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
            errors.push("Date of birth must be a date (YYYY-MM-DD)".to_string());
        }
        let status = self.status.trim();
        if !status.is_empty() && !STATUSES.contains(&status) {
            errors.push(format!("Status must be one of {}", STATUSES.join(", ")));
        }
        errors
    }
}

impl From<&Member> for MemberForm {
    fn from(m: &Member) -> Self {
        MemberForm {
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
            dob: m.dob_input(),
            email: m.email.clone().unwrap_or_default(),
            phone: m.phone.clone().unwrap_or_default(),
            location: m.location.clone().unwrap_or_default(),
            department: m.department.clone().unwrap_or_default(),
            status: m.status.clone(),
            csrf_token: String::new(),
        }
    }
}
