//! Admin application settings route handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use domain::models::{AppSettings, UpdateAppSettingsRequest};
use persistence::repositories::AppSettingsRepository;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create admin settings routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}

/// GET /api/admin/v1/settings
///
/// Falls back to the built-in defaults while no settings row exists.
#[axum::debug_handler]
async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let settings = AppSettingsRepository::new(state.pool.clone())
        .get_or_default()
        .await?;

    Ok((StatusCode::OK, Json(settings)))
}

/// PUT /api/admin/v1/settings
///
/// Applies a partial update; the singleton row is created on first use.
#[axum::debug_handler]
async fn update_settings(
    State(state): State<AppState>,
    admin: UserAuth,
    Json(request): Json<UpdateAppSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = AppSettingsRepository::new(state.pool.clone());
    let current = repo.get_or_default().await?;
    let merged = current.merged_with(&request);

    let stored: AppSettings = repo.upsert(&merged).await?.into();

    tracing::info!(admin_id = %admin.user_id, "Updated app settings");
    Ok((StatusCode::OK, Json(stored)))
}
