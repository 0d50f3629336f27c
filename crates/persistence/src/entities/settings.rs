//! Application settings entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the app_settings singleton table.
#[derive(Debug, Clone, FromRow)]
pub struct AppSettingsEntity {
    pub id: i16,
    pub site_name: String,
    pub contact_email: String,
    pub support_email: String,
    pub max_free_quizzes_per_day: i32,
    pub registration_enabled: bool,
    pub maintenance_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<AppSettingsEntity> for domain::models::AppSettings {
    fn from(entity: AppSettingsEntity) -> Self {
        Self {
            site_name: entity.site_name,
            contact_email: entity.contact_email,
            support_email: entity.support_email,
            max_free_quizzes_per_day: entity.max_free_quizzes_per_day,
            registration_enabled: entity.registration_enabled,
            maintenance_message: entity.maintenance_message,
            updated_at: Some(entity.updated_at),
        }
    }
}
