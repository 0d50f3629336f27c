//! Profile repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProfileEntity;
use crate::metrics::QueryTimer;

const PROFILE_COLUMNS: &str = "id, email, password_hash, full_name, is_admin, is_premium, \
     premium_expires_at, premium_cancelled_at, checkout_customer_id, \
     checkout_subscription_id, created_at, updated_at, last_login_at";

/// Repository for profile-related database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a profile. `password_hash` is `None` for OAuth-only accounts.
    pub async fn create(
        &self,
        email: &str,
        password_hash: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<ProfileEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            INSERT INTO profiles (email, password_hash, full_name)
            VALUES ($1, $2, $3)
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a profile by id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_id");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a profile by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_email");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE lower(email) = lower($1)",
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Load all profiles, newest first. The admin list pipeline filters and
    /// paginates in memory because the status filter is derived, not stored.
    pub async fn list_all(&self) -> Result<Vec<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_profiles");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC",
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update name and/or admin flag; unset fields keep their value.
    pub async fn update_user(
        &self,
        id: Uuid,
        full_name: Option<&str>,
        is_admin: Option<bool>,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                is_admin = COALESCE($3, is_admin),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(full_name)
        .bind(is_admin)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Stamp a successful login.
    pub async fn touch_last_login(&self, id: Uuid) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("touch_last_login");
        let result = sqlx::query("UPDATE profiles SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|_| ());
        timer.record();
        result
    }

    /// Replace the stored password hash.
    pub async fn set_password_hash(&self, id: Uuid, hash: &str) -> Result<(), sqlx::Error> {
        let timer = QueryTimer::new("set_password_hash");
        let result = sqlx::query(
            "UPDATE profiles SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(hash)
        .execute(&self.pool)
        .await
        .map(|_| ());
        timer.record();
        result
    }

    /// Premium activation transition: grants premium until `expires_at`
    /// (NULL for lifetime) and clears any previous cancellation stamp.
    pub async fn activate_premium(
        &self,
        id: Uuid,
        expires_at: Option<DateTime<Utc>>,
        customer_id: Option<&str>,
        subscription_id: Option<&str>,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("activate_premium");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            UPDATE profiles
            SET is_premium = true,
                premium_expires_at = $2,
                premium_cancelled_at = NULL,
                checkout_customer_id = COALESCE($3, checkout_customer_id),
                checkout_subscription_id = COALESCE($4, checkout_subscription_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(expires_at)
        .bind(customer_id)
        .bind(subscription_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Premium cancellation transition: revokes premium and stamps the
    /// cancellation time so the derived status reads `cancelled`.
    pub async fn cancel_premium(
        &self,
        id: Uuid,
        cancelled_at: DateTime<Utc>,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("cancel_premium");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            UPDATE profiles
            SET is_premium = false,
                premium_cancelled_at = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(cancelled_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a profile. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_profile");
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }
}
