use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::validate::{validate_optional, validate_optional_email, validate_required};
use crate::models::name::display_name;
use crate::models::{none_if_blank, timefmt};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Visitor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub inviter_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Visitor {
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }

    pub fn registered_label(&self) -> String {
        timefmt::optional_label(&self.created_at)
    }
}

/// Insert and update payload; every column is written.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitorInput {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub inviter_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VisitorForm {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub inviter_name: String,
    pub csrf_token: String,
}

impl VisitorForm {
    pub fn to_input(&self) -> VisitorInput {
        VisitorInput {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: none_if_blank(&self.phone),
            email: none_if_blank(&self.email),
            inviter_name: none_if_blank(&self.inviter_name),
        }
    }
}

impl VisitorForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate_required(&self.first_name, "First name", 100));
        errors.extend(validate_optional(&self.last_name, "Last name", 100));
        errors.extend(validate_optional_email(&self.email));
        errors.extend(validate_optional(&self.inviter_name, "Invited by", 200));
        errors
    }
}

impl From<&Visitor> for VisitorForm {
    fn from(v: &Visitor) -> Self {
        VisitorForm {
            first_name: v.first_name.clone(),
            last_name: v.last_name.clone(),
            phone: v.phone.clone().unwrap_or_default(),
            email: v.email.clone().unwrap_or_default(),
            inviter_name: v.inviter_name.clone().unwrap_or_default(),
            csrf_token: String::new(),
        }
    }
}
