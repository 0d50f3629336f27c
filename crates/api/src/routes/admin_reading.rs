//! Admin reading text route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use domain::models::{
    CreateReadingTextRequest, ReadingListQuery, ReadingText, UpdateReadingTextRequest,
};
use persistence::repositories::ReadingTextRepository;
use shared::listing::{matches_filter, matches_search, Listing, DEFAULT_PAGE_SIZE};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create admin reading text routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_texts).post(create_text))
        .route("/:text_id", put(update_text).delete(delete_text))
}

/// GET /api/admin/v1/reading
#[axum::debug_handler]
async fn list_texts(
    State(state): State<AppState>,
    Query(query): Query<ReadingListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate()?;

    let texts: Vec<ReadingText> = ReadingTextRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let search = query.search.clone().unwrap_or_default();
    let level = query.level.clone();

    let mut listing = Listing::new(texts).filter(|text| {
        matches_search(&search, &[&text.title])
            && matches_filter(level.as_deref(), text.level.as_str())
    });

    if let Some(sort) = query.sort {
        listing =
            listing.sort_by(sort.comparator(|t: &ReadingText| t.created_at, |t| t.title.clone()));
    }

    let page = listing.page(
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    );

    Ok((StatusCode::OK, Json(page)))
}

/// POST /api/admin/v1/reading
#[axum::debug_handler]
async fn create_text(
    State(state): State<AppState>,
    admin: UserAuth,
    Json(request): Json<CreateReadingTextRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let text: ReadingText = ReadingTextRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    tracing::info!(admin_id = %admin.user_id, text_id = %text.id, "Created reading text");
    Ok((StatusCode::CREATED, Json(text)))
}

/// PUT /api/admin/v1/reading/:text_id
#[axum::debug_handler]
async fn update_text(
    State(state): State<AppState>,
    Path(text_id): Path<Uuid>,
    Json(request): Json<UpdateReadingTextRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let text: ReadingText = ReadingTextRepository::new(state.pool.clone())
        .update(text_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reading text not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(text)))
}

/// DELETE /api/admin/v1/reading/:text_id
#[axum::debug_handler]
async fn delete_text(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(text_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = ReadingTextRepository::new(state.pool.clone())
        .delete(text_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("Reading text not found".to_string()));
    }

    tracing::info!(admin_id = %admin.user_id, text_id = %text_id, "Deleted reading text");
    Ok(StatusCode::NO_CONTENT)
}
