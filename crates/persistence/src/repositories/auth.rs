//! Authentication repository: sessions, OAuth links, reset tokens.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{OAuthAccountEntity, PasswordResetTokenEntity, UserSessionEntity};
use crate::metrics::QueryTimer;

/// Repository for authentication-related database operations.
#[derive(Clone)]
pub struct AuthRepository {
    pool: PgPool,
}

impl AuthRepository {
    /// Creates a new AuthRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Create a session for a freshly issued refresh token.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<UserSessionEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_session");
        let result = sqlx::query_as::<_, UserSessionEntity>(
            r#"
            INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, refresh_token_hash, expires_at, created_at, last_used_at
            "#,
        )
        .bind(user_id)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a live session by refresh token hash.
    pub async fn find_session_by_hash(
        &self,
        refresh_token_hash: &str,
    ) -> Result<Option<UserSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_session_by_hash");
        let result = sqlx::query_as::<_, UserSessionEntity>(
            r#"
            SELECT id, user_id, refresh_token_hash, expires_at, created_at, last_used_at
            FROM user_sessions
            WHERE refresh_token_hash = $1 AND expires_at > NOW()
            "#,
        )
        .bind(refresh_token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Rotate a session to a new refresh token hash after a refresh.
    pub async fn rotate_session(
        &self,
        session_id: Uuid,
        refresh_token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Option<UserSessionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("rotate_session");
        let result = sqlx::query_as::<_, UserSessionEntity>(
            r#"
            UPDATE user_sessions
            SET refresh_token_hash = $2, expires_at = $3, last_used_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, refresh_token_hash, expires_at, created_at, last_used_at
            "#,
        )
        .bind(session_id)
        .bind(refresh_token_hash)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete the session holding the given refresh token hash (logout).
    pub async fn delete_session_by_hash(
        &self,
        refresh_token_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_session_by_hash");
        let result = sqlx::query("DELETE FROM user_sessions WHERE refresh_token_hash = $1")
            .bind(refresh_token_hash)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected() > 0);
        timer.record();
        result
    }

    /// Delete every session of a user (password reset, account removal).
    pub async fn delete_sessions_for_user(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_sessions_for_user");
        let result = sqlx::query("DELETE FROM user_sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected());
        timer.record();
        result
    }

    // =========================================================================
    // OAuth accounts
    // =========================================================================

    /// Find an OAuth link by provider and provider-side user id.
    pub async fn find_oauth_account(
        &self,
        provider: &str,
        provider_user_id: &str,
    ) -> Result<Option<OAuthAccountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_oauth_account");
        let result = sqlx::query_as::<_, OAuthAccountEntity>(
            r#"
            SELECT id, user_id, provider, provider_user_id, provider_email, created_at
            FROM oauth_accounts
            WHERE provider = $1 AND provider_user_id = $2
            "#,
        )
        .bind(provider)
        .bind(provider_user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Link an OAuth account to a user.
    pub async fn link_oauth_account(
        &self,
        user_id: Uuid,
        provider: &str,
        provider_user_id: &str,
        provider_email: Option<&str>,
    ) -> Result<OAuthAccountEntity, sqlx::Error> {
        let timer = QueryTimer::new("link_oauth_account");
        let result = sqlx::query_as::<_, OAuthAccountEntity>(
            r#"
            INSERT INTO oauth_accounts (user_id, provider, provider_user_id, provider_email)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, provider, provider_user_id, provider_email, created_at
            "#,
        )
        .bind(user_id)
        .bind(provider)
        .bind(provider_user_id)
        .bind(provider_email)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    // =========================================================================
    // Password reset tokens
    // =========================================================================

    /// Create a single-use password reset token (stored hashed).
    pub async fn create_reset_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetTokenEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_reset_token");
        let result = sqlx::query_as::<_, PasswordResetTokenEntity>(
            r#"
            INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token_hash, expires_at, used_at, created_at
            "#,
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Atomically consume an unused, unexpired reset token. Returns the row
    /// when the token was valid.
    pub async fn consume_reset_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<PasswordResetTokenEntity>, sqlx::Error> {
        let timer = QueryTimer::new("consume_reset_token");
        let result = sqlx::query_as::<_, PasswordResetTokenEntity>(
            r#"
            UPDATE password_reset_tokens
            SET used_at = NOW()
            WHERE token_hash = $1 AND used_at IS NULL AND expires_at > NOW()
            RETURNING id, user_id, token_hash, expires_at, used_at, created_at
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
