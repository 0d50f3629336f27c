//! Authentication route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use domain::models::{Profile, UpdateProfileRequest};
use domain::services::SubscriptionStatus;
use persistence::repositories::{AppSettingsRepository, ProfileRepository};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::auth::{AuthResult, AuthService};

/// Routes that do not require a token.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/oauth/google", post(oauth_google))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
}

/// Routes that operate on the current session.
pub fn session_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me).put(update_me))
        .route("/logout", post(logout))
}

fn auth_service(state: &AppState) -> AuthService {
    let google_client_id = if state.config.oauth.google_client_id.is_empty() {
        None
    } else {
        Some(state.config.oauth.google_client_id.clone())
    };

    AuthService::new(state.pool.clone(), state.jwt.clone(), google_client_id)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(custom(function = "shared::validation::validate_password_strength"))]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "Full name must be 1-100 characters"))]
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleOAuthRequest {
    pub id_token: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    #[validate(custom(function = "shared::validation::validate_password_strength"))]
    pub new_password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: Profile,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            user: result.user,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            expires_in: result.expires_in,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: Profile,
    pub subscription: SubscriptionStatus,
}

/// POST /api/v1/auth/register
#[axum::debug_handler]
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let settings = AppSettingsRepository::new(state.pool.clone())
        .get_or_default()
        .await?;
    if !settings.registration_enabled {
        return Err(ApiError::Forbidden(
            "Registration is currently disabled".to_string(),
        ));
    }

    let result = auth_service(&state)
        .register(
            &request.email,
            &request.password,
            request.full_name.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(result))))
}

/// POST /api/v1/auth/login
#[axum::debug_handler]
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let result = auth_service(&state)
        .login(&request.email, &request.password)
        .await?;

    Ok((StatusCode::OK, Json(AuthResponse::from(result))))
}

/// POST /api/v1/auth/refresh
#[axum::debug_handler]
async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = auth_service(&state).refresh(&request.refresh_token).await?;
    Ok((StatusCode::OK, Json(AuthResponse::from(result))))
}

/// POST /api/v1/auth/oauth/google
#[axum::debug_handler]
async fn oauth_google(
    State(state): State<AppState>,
    Json(request): Json<GoogleOAuthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = auth_service(&state)
        .login_with_google(&request.id_token)
        .await?;

    Ok((StatusCode::OK, Json(AuthResponse::from(result))))
}

/// POST /api/v1/auth/forgot-password
///
/// Always answers 200 so the endpoint cannot be used to probe for accounts.
#[axum::debug_handler]
async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let issued = auth_service(&state)
        .forgot_password(&request.email, state.config.limits.reset_token_expiry_mins)
        .await?;

    if let Some((profile, token)) = issued {
        if let Err(e) = state
            .email
            .send_password_reset(&profile.email, profile.full_name.as_deref(), &token)
            .await
        {
            tracing::warn!(error = %e, "Failed to deliver password reset email");
        }
    }

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "If that account exists, a reset email has been sent"
        })),
    ))
}

/// POST /api/v1/auth/reset-password
#[axum::debug_handler]
async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    auth_service(&state)
        .reset_password(&request.token, &request.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Password updated" })),
    ))
}

/// GET /api/v1/auth/me
#[axum::debug_handler]
async fn me(
    State(state): State<AppState>,
    user: UserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let profile = super::load_profile(&state, user.user_id).await?;
    let subscription = profile.premium_state().status(chrono::Utc::now());

    Ok((
        StatusCode::OK,
        Json(MeResponse {
            user: profile,
            subscription,
        }),
    ))
}

/// PUT /api/v1/auth/me
#[axum::debug_handler]
async fn update_me(
    State(state): State<AppState>,
    user: UserAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let profile: Profile = ProfileRepository::new(state.pool.clone())
        .update_user(user.user_id, request.full_name.as_deref(), None)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?
        .into();

    let subscription = profile.premium_state().status(chrono::Utc::now());
    Ok((
        StatusCode::OK,
        Json(MeResponse {
            user: profile,
            subscription,
        }),
    ))
}

/// POST /api/v1/auth/logout
#[axum::debug_handler]
async fn logout(
    State(state): State<AppState>,
    user: UserAuth,
    Json(request): Json<LogoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth_service(&state).logout(&request.refresh_token).await?;

    tracing::info!(user_id = %user.user_id, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}
