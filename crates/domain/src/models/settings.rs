//! Application settings singleton.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Site-wide settings. Exactly one row exists in the store; it is created
/// lazily on the first update, and reads fall back to these defaults while
/// no row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub site_name: String,
    pub contact_email: String,
    pub support_email: String,
    pub max_free_quizzes_per_day: i32,
    pub registration_enabled: bool,
    pub maintenance_message: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            site_name: "Lingora".to_string(),
            contact_email: "hello@lingora.app".to_string(),
            support_email: "support@lingora.app".to_string(),
            max_free_quizzes_per_day: 5,
            registration_enabled: true,
            maintenance_message: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppSettingsRequest {
    #[validate(length(min = 1, max = 100, message = "Site name must be 1-100 characters"))]
    pub site_name: Option<String>,
    #[validate(email(message = "Contact email must be a valid email address"))]
    pub contact_email: Option<String>,
    #[validate(email(message = "Support email must be a valid email address"))]
    pub support_email: Option<String>,
    #[validate(range(min = 0, max = 1000, message = "Daily free quiz limit must be 0-1000"))]
    pub max_free_quizzes_per_day: Option<i32>,
    pub registration_enabled: Option<bool>,
    #[validate(length(max = 500, message = "Maintenance message must be at most 500 characters"))]
    pub maintenance_message: Option<String>,
}

impl AppSettings {
    /// Applies a partial update, returning the merged settings.
    pub fn merged_with(&self, update: &UpdateAppSettingsRequest) -> AppSettings {
        AppSettings {
            site_name: update.site_name.clone().unwrap_or_else(|| self.site_name.clone()),
            contact_email: update
                .contact_email
                .clone()
                .unwrap_or_else(|| self.contact_email.clone()),
            support_email: update
                .support_email
                .clone()
                .unwrap_or_else(|| self.support_email.clone()),
            max_free_quizzes_per_day: update
                .max_free_quizzes_per_day
                .unwrap_or(self.max_free_quizzes_per_day),
            registration_enabled: update
                .registration_enabled
                .unwrap_or(self.registration_enabled),
            maintenance_message: update
                .maintenance_message
                .clone()
                .or_else(|| self.maintenance_message.clone()),
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.site_name, "Lingora");
        assert_eq!(settings.max_free_quizzes_per_day, 5);
        assert!(settings.registration_enabled);
        assert!(settings.maintenance_message.is_none());
    }

    #[test]
    fn test_merged_with_keeps_unset_fields() {
        let settings = AppSettings::default();
        let update = UpdateAppSettingsRequest {
            site_name: None,
            contact_email: None,
            support_email: None,
            max_free_quizzes_per_day: Some(10),
            registration_enabled: None,
            maintenance_message: None,
        };

        let merged = settings.merged_with(&update);
        assert_eq!(merged.max_free_quizzes_per_day, 10);
        assert_eq!(merged.site_name, settings.site_name);
        assert_eq!(merged.registration_enabled, settings.registration_enabled);
    }

    #[test]
    fn test_update_request_rejects_invalid_email() {
        let update = UpdateAppSettingsRequest {
            site_name: None,
            contact_email: Some("not-an-email".to_string()),
            support_email: None,
            max_free_quizzes_per_day: None,
            registration_enabled: None,
            maintenance_message: None,
        };
        assert!(update.validate().is_err());
    }
}
