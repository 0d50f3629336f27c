//! Profile and authentication entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub email: String,
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub is_admin: bool,
    pub is_premium: bool,
    pub premium_expires_at: Option<DateTime<Utc>>,
    pub premium_cancelled_at: Option<DateTime<Utc>>,
    pub checkout_customer_id: Option<String>,
    pub checkout_subscription_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<ProfileEntity> for domain::models::Profile {
    fn from(entity: ProfileEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            full_name: entity.full_name,
            is_admin: entity.is_admin,
            is_premium: entity.is_premium,
            premium_expires_at: entity.premium_expires_at,
            premium_cancelled_at: entity.premium_cancelled_at,
            checkout_customer_id: entity.checkout_customer_id,
            checkout_subscription_id: entity.checkout_subscription_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            last_login_at: entity.last_login_at,
        }
    }
}

/// Database row mapping for the user_sessions table. Only token hashes are
/// stored, never the tokens themselves.
#[derive(Debug, Clone, FromRow)]
pub struct UserSessionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub refresh_token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

/// Database row mapping for the oauth_accounts table.
#[derive(Debug, Clone, FromRow)]
pub struct OAuthAccountEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub provider: String,
    pub provider_user_id: String,
    pub provider_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database row mapping for the password_reset_tokens table.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetTokenEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
