//! Organization settings persisted as one JSON record in a local key-value store.

pub mod kv;

use serde::{Deserialize, Serialize};

pub use kv::{FileStore, KeyValueStore, MemoryStore};

pub const SETTINGS_KEY: &str = "church-admin-settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub church_name: String,
    pub church_email: String,
    pub church_phone: String,
    pub default_location: String,
    pub email_notifications: bool,
    pub visitor_alerts: bool,
    pub service_reminders: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            church_name: "Church Admin".to_string(),
            church_email: String::new(),
            church_phone: String::new(),
            default_location: String::new(),
            email_notifications: true,
            visitor_alerts: true,
            service_reminders: false,
        }
    }
}

/// Partial settings: `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub church_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub church_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub church_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor_alerts: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_reminders: Option<bool>,
}

impl AppSettings {
    /// Apply `patch` field by field; patch values win.
    pub fn merged(self, patch: SettingsPatch) -> Self {
        Self {
            church_name: patch.church_name.unwrap_or(self.church_name),
            church_email: patch.church_email.unwrap_or(self.church_email),
            church_phone: patch.church_phone.unwrap_or(self.church_phone),
            default_location: patch.default_location.unwrap_or(self.default_location),
            email_notifications: patch.email_notifications.unwrap_or(self.email_notifications),
            visitor_alerts: patch.visitor_alerts.unwrap_or(self.visitor_alerts),
            service_reminders: patch.service_reminders.unwrap_or(self.service_reminders),
        }
    }
}

/// Form data from the settings screen. Unchecked boxes are simply absent.
#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub church_name: String,
    #[serde(default)]
    pub church_email: String,
    #[serde(default)]
    pub church_phone: String,
    #[serde(default)]
    pub default_location: String,
    pub email_notifications: Option<String>,
    pub visitor_alerts: Option<String>,
    pub service_reminders: Option<String>,
    pub csrf_token: String,
}

impl SettingsForm {
    pub fn to_patch(&self) -> SettingsPatch {
        SettingsPatch {
            church_name: Some(self.church_name.trim().to_string()),
            church_email: Some(self.church_email.trim().to_string()),
            church_phone: Some(self.church_phone.trim().to_string()),
            default_location: Some(self.default_location.trim().to_string()),
            email_notifications: Some(self.email_notifications.is_some()),
            visitor_alerts: Some(self.visitor_alerts.is_some()),
            service_reminders: Some(self.service_reminders.is_some()),
        }
    }
}

/// Read-modify-write access to the settings record.
pub struct SettingsStore {
    kv: Box<dyn KeyValueStore>,
}

impl SettingsStore {
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        Self { kv: Box::new(kv) }
    }

    /// Effective settings: the stored record over the defaults. Never fails.
    pub fn get(&self) -> AppSettings {
        let stored = match self.kv.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AppSettings::default(),
            Err(e) => {
                log::warn!("Settings storage unavailable, using defaults: {e}");
                return AppSettings::default();
            }
        };
        match serde_json::from_str::<SettingsPatch>(&stored) {
            Ok(patch) => AppSettings::default().merged(patch),
            Err(e) => {
                log::warn!("Ignoring corrupt settings record: {e}");
                AppSettings::default()
            }
        }
    }

    /// Merge `patch` over the current settings and persist the result.
    /// A persistence failure is logged; the merged settings are returned regardless.
    pub fn save(&self, patch: SettingsPatch) -> AppSettings {
        let updated = self.get().merged(patch);
        match serde_json::to_string(&updated) {
            Ok(json) => {
                if let Err(e) = self.kv.set_item(SETTINGS_KEY, &json) {
                    log::warn!("Failed to persist settings: {e}");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {e}"),
        }
        updated
    }
}
