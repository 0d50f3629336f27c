//! Application settings repository for database operations.
//!
//! The app_settings table holds at most one row (id = 1). Reads of a missing
//! row fall back to the domain defaults; the row is created lazily by the
//! first update.

use domain::models::AppSettings;
use sqlx::PgPool;

use crate::entities::AppSettingsEntity;
use crate::metrics::QueryTimer;

const SETTINGS_COLUMNS: &str = "id, site_name, contact_email, support_email, \
     max_free_quizzes_per_day, registration_enabled, maintenance_message, updated_at";

/// Repository for the app settings singleton.
#[derive(Clone)]
pub struct AppSettingsRepository {
    pool: PgPool,
}

impl AppSettingsRepository {
    /// Creates a new AppSettingsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The stored settings row, if one exists yet.
    pub async fn get(&self) -> Result<Option<AppSettingsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_app_settings");
        let result = sqlx::query_as::<_, AppSettingsEntity>(&format!(
            "SELECT {SETTINGS_COLUMNS} FROM app_settings WHERE id = 1",
        ))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Settings with the default fallback applied.
    pub async fn get_or_default(&self) -> Result<AppSettings, sqlx::Error> {
        Ok(self
            .get()
            .await?
            .map(AppSettings::from)
            .unwrap_or_default())
    }

    /// Write the settings, creating the singleton row if it does not exist.
    pub async fn upsert(&self, settings: &AppSettings) -> Result<AppSettingsEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_app_settings");
        let result = sqlx::query_as::<_, AppSettingsEntity>(&format!(
            r#"
            INSERT INTO app_settings
                (id, site_name, contact_email, support_email, max_free_quizzes_per_day,
                 registration_enabled, maintenance_message, updated_at)
            VALUES (1, $1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                site_name = $1,
                contact_email = $2,
                support_email = $3,
                max_free_quizzes_per_day = $4,
                registration_enabled = $5,
                maintenance_message = $6,
                updated_at = NOW()
            RETURNING {SETTINGS_COLUMNS}
            "#,
        ))
        .bind(&settings.site_name)
        .bind(&settings.contact_email)
        .bind(&settings.support_email)
        .bind(settings.max_free_quizzes_per_day)
        .bind(settings.registration_enabled)
        .bind(settings.maintenance_message.as_deref())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
