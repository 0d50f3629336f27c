//! Authentication service: registration, login, tokens, password reset.

use chrono::{Duration, Utc};
use domain::models::Profile;
use persistence::entities::ProfileEntity;
use persistence::repositories::{AuthRepository, ProfileRepository};
use serde::Deserialize;
use shared::jwt::{JwtConfig, JwtError, TokenRole};
use shared::password::{hash_password, verify_password, PasswordError};
use shared::token::{generate_token, sha256_hex};
use shared::validation::validate_password_strength;
use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::error::ApiError;

/// Google's id-token introspection endpoint.
const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Invalid OAuth token")]
    InvalidOAuthToken,

    #[error("OAuth provider error: {0}")]
    OAuthProviderError(String),

    #[error("OAuth sign-in is not configured")]
    OAuthNotConfigured,

    #[error("Token error: {0}")]
    TokenError(#[from] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => ApiError::Conflict("Email already registered".into()),
            AuthError::WeakPassword(msg) => ApiError::Validation(msg),
            AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".into()),
            AuthError::UserNotFound => ApiError::NotFound("User not found".into()),
            AuthError::InvalidRefreshToken => {
                ApiError::Unauthorized("Invalid refresh token".into())
            }
            AuthError::InvalidResetToken => {
                ApiError::Validation("Invalid or expired reset token".into())
            }
            AuthError::InvalidOAuthToken => ApiError::Unauthorized("Invalid OAuth token".into()),
            AuthError::OAuthProviderError(msg) => {
                ApiError::ServiceUnavailable(format!("OAuth provider error: {}", msg))
            }
            AuthError::OAuthNotConfigured => {
                ApiError::ServiceUnavailable("OAuth sign-in is not configured".into())
            }
            AuthError::DatabaseError(e) => e.into(),
            AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
            AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
        }
    }
}

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub user: Profile,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Google id-token introspection response (subset).
#[derive(Debug, Deserialize)]
struct GoogleTokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Authentication service.
pub struct AuthService {
    profiles: ProfileRepository,
    auth_repo: AuthRepository,
    jwt: Arc<JwtConfig>,
    google_client_id: Option<String>,
    http: reqwest::Client,
}

impl AuthService {
    /// Creates a new AuthService.
    pub fn new(pool: PgPool, jwt: Arc<JwtConfig>, google_client_id: Option<String>) -> Self {
        Self {
            profiles: ProfileRepository::new(pool.clone()),
            auth_repo: AuthRepository::new(pool),
            jwt,
            google_client_id,
            http: reqwest::Client::new(),
        }
    }

    /// Registers a new email/password account and signs it in.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<AuthResult, AuthError> {
        validate_password_strength(password).map_err(|e| {
            AuthError::WeakPassword(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Password too weak".to_string()),
            )
        })?;

        if self.profiles.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let profile = self
            .profiles
            .create(email, Some(&password_hash), full_name)
            .await?;

        tracing::info!(user_id = %profile.id, "Registered new user");
        self.sign_in(profile).await
    }

    /// Signs in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, AuthError> {
        let profile = self
            .profiles
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let stored_hash = profile
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, stored_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        self.profiles.touch_last_login(profile.id).await?;
        self.sign_in(profile).await
    }

    /// Signs in (or up) with a Google id token.
    pub async fn login_with_google(&self, id_token: &str) -> Result<AuthResult, AuthError> {
        let client_id = self
            .google_client_id
            .as_deref()
            .ok_or(AuthError::OAuthNotConfigured)?;

        let response = self
            .http
            .get(GOOGLE_TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AuthError::OAuthProviderError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::InvalidOAuthToken);
        }

        let info: GoogleTokenInfo = response
            .json()
            .await
            .map_err(|e| AuthError::OAuthProviderError(e.to_string()))?;

        // The token must have been issued for this application.
        if info.aud != client_id {
            return Err(AuthError::InvalidOAuthToken);
        }

        let profile = match self.auth_repo.find_oauth_account("google", &info.sub).await? {
            Some(account) => self
                .profiles
                .find_by_id(account.user_id)
                .await?
                .ok_or(AuthError::UserNotFound)?,
            None => {
                let email = info.email.as_deref().ok_or(AuthError::InvalidOAuthToken)?;

                // Link to an existing account by email, or create a fresh
                // password-less profile.
                let profile = match self.profiles.find_by_email(email).await? {
                    Some(profile) => profile,
                    None => {
                        let profile = self
                            .profiles
                            .create(email, None, info.name.as_deref())
                            .await?;
                        tracing::info!(user_id = %profile.id, "Created user from Google sign-in");
                        profile
                    }
                };

                self.auth_repo
                    .link_oauth_account(profile.id, "google", &info.sub, info.email.as_deref())
                    .await?;
                profile
            }
        };

        self.profiles.touch_last_login(profile.id).await?;
        self.sign_in(profile).await
    }

    /// Exchanges a refresh token for a fresh token pair, rotating the
    /// session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResult, AuthError> {
        let claims = self
            .jwt
            .validate_refresh_token(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let session = self
            .auth_repo
            .find_session_by_hash(&sha256_hex(refresh_token))
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let profile = self
            .profiles
            .find_by_id(session.user_id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        // Defense in depth; the hash lookup already ties token to session.
        if claims.sub != profile.id.to_string() {
            return Err(AuthError::InvalidRefreshToken);
        }

        let role = Self::role_for(&profile);
        let (access_token, _) = self.jwt.generate_access_token(profile.id, role)?;
        let (new_refresh_token, _) = self.jwt.generate_refresh_token(profile.id, role)?;

        let expires_at = Utc::now() + Duration::seconds(self.jwt.refresh_token_expiry_secs);
        self.auth_repo
            .rotate_session(session.id, &sha256_hex(&new_refresh_token), expires_at)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        Ok(AuthResult {
            user: profile.into(),
            access_token,
            refresh_token: new_refresh_token,
            expires_in: self.jwt.access_token_expiry_secs,
        })
    }

    /// Destroys the session holding the given refresh token.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.auth_repo
            .delete_session_by_hash(&sha256_hex(refresh_token))
            .await?;
        Ok(())
    }

    /// Issues a single-use password reset token for the account, if one
    /// exists. Returns the profile and the raw token for email delivery;
    /// callers respond identically either way to avoid account enumeration.
    pub async fn forgot_password(
        &self,
        email: &str,
        expiry_mins: i64,
    ) -> Result<Option<(ProfileEntity, String)>, AuthError> {
        let Some(profile) = self.profiles.find_by_email(email).await? else {
            return Ok(None);
        };

        let token = generate_token();
        let expires_at = Utc::now() + Duration::minutes(expiry_mins);
        self.auth_repo
            .create_reset_token(profile.id, &sha256_hex(&token), expires_at)
            .await?;

        Ok(Some((profile, token)))
    }

    /// Consumes a reset token and replaces the password, revoking all
    /// sessions.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        validate_password_strength(new_password).map_err(|e| {
            AuthError::WeakPassword(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Password too weak".to_string()),
            )
        })?;

        let reset = self
            .auth_repo
            .consume_reset_token(&sha256_hex(token))
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        let password_hash = hash_password(new_password)?;
        self.profiles
            .set_password_hash(reset.user_id, &password_hash)
            .await?;
        self.auth_repo
            .delete_sessions_for_user(reset.user_id)
            .await?;

        tracing::info!(user_id = %reset.user_id, "Password reset completed");
        Ok(())
    }

    /// Issues a token pair and records the session.
    async fn sign_in(&self, profile: ProfileEntity) -> Result<AuthResult, AuthError> {
        let role = Self::role_for(&profile);
        let (access_token, _) = self.jwt.generate_access_token(profile.id, role)?;
        let (refresh_token, _) = self.jwt.generate_refresh_token(profile.id, role)?;

        let expires_at = Utc::now() + Duration::seconds(self.jwt.refresh_token_expiry_secs);
        self.auth_repo
            .create_session(profile.id, &sha256_hex(&refresh_token), expires_at)
            .await?;

        Ok(AuthResult {
            user: profile.into(),
            access_token,
            refresh_token,
            expires_in: self.jwt.access_token_expiry_secs,
        })
    }

    fn role_for(profile: &ProfileEntity) -> TokenRole {
        if profile.is_admin {
            TokenRole::Admin
        } else {
            TokenRole::Learner
        }
    }
}
