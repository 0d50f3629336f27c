//! Admin upload route handlers.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use persistence::repositories::AudioAssetRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::StorageError;

/// Create admin upload routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/audio", post(upload_audio))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAudioResponse {
    pub asset_id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub created_at: DateTime<Utc>,
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::TooLarge(_) | StorageError::UnsupportedType(_) => {
                ApiError::Validation(err.to_string())
            }
            StorageError::NotFound => ApiError::NotFound("Audio asset not found".to_string()),
            StorageError::Io(e) => ApiError::Internal(format!("Storage I/O error: {}", e)),
        }
    }
}

/// POST /api/admin/v1/uploads/audio
///
/// Accepts one multipart `file` field, writes it to disk, and returns the
/// asset id to link into a listening exercise.
#[axum::debug_handler]
async fn upload_audio(
    State(state): State<AppState>,
    admin: UserAuth,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload".to_string());

        // Prefer the declared content type; fall back to a file name guess.
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| {
                mime_guess::from_path(&file_name)
                    .first_or_octet_stream()
                    .to_string()
            });

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)))?;

        let asset_id = state.storage.save(&bytes, &content_type).await?;

        let asset = AudioAssetRepository::new(state.pool.clone())
            .insert(asset_id, &file_name, &content_type, bytes.len() as i64)
            .await?;

        tracing::info!(
            admin_id = %admin.user_id,
            asset_id = %asset.id,
            size_bytes = asset.size_bytes,
            "Uploaded audio asset"
        );

        return Ok((
            StatusCode::CREATED,
            Json(UploadAudioResponse {
                asset_id: asset.id,
                file_name: asset.file_name,
                content_type: asset.content_type,
                size_bytes: asset.size_bytes,
                created_at: asset.created_at,
            }),
        ));
    }

    Err(ApiError::Validation(
        "Multipart request must contain a 'file' field".to_string(),
    ))
}
