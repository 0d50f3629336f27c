//! Audio asset streaming route handlers.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use persistence::repositories::AudioAssetRepository;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::StorageError;

pub fn router() -> Router<AppState> {
    Router::new().route("/:asset_id", get(get_asset))
}

/// GET /api/v1/assets/:asset_id - streams the audio file from disk.
#[axum::debug_handler]
async fn get_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let asset = AudioAssetRepository::new(state.pool.clone())
        .find_by_id(asset_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Audio asset not found".to_string()))?;

    let file = state.storage.open(asset_id).await.map_err(|e| match e {
        StorageError::NotFound => ApiError::NotFound("Audio asset not found".to_string()),
        other => ApiError::Internal(format!("Failed to open audio asset: {}", other)),
    })?;

    let stream = ReaderStream::new(file);
    let body = Body::from_stream(stream);

    let response = (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, asset.content_type.clone()),
            (header::CONTENT_LENGTH, asset.size_bytes.to_string()),
        ],
        body,
    )
        .into_response();

    Ok(response)
}
