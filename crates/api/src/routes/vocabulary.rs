//! Personal vocabulary route handlers. The whole feature is premium-gated.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use domain::models::{
    CreateWordEntryRequest, UpdateWordEntryRequest, VocabularyListQuery, WordEntry,
};
use persistence::repositories::WordEntryRepository;
use shared::listing::{matches_filter, matches_search, Listing, SortOrder, DEFAULT_PAGE_SIZE};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/:entry_id", axum::routing::put(update_entry).delete(delete_entry))
}

/// Free-tier users are denied the vocabulary notebook entirely.
async fn gate(state: &AppState, user_id: Uuid) -> Result<(), ApiError> {
    let profile = super::load_profile(state, user_id).await?;
    super::ensure_premium(&profile)
}

/// GET /api/v1/vocabulary - search, sort, paginate the caller's notebook.
#[axum::debug_handler]
async fn list_entries(
    State(state): State<AppState>,
    user: UserAuth,
    Query(query): Query<VocabularyListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate()?;
    gate(&state, user.user_id).await?;

    let entries: Vec<WordEntry> = WordEntryRepository::new(state.pool.clone())
        .list_for_user(user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let search = query.search.clone().unwrap_or_default();
    let category = query.category.clone();
    let sort = query.sort.unwrap_or(SortOrder::Newest);

    let page = Listing::new(entries)
        .filter(|entry| {
            let category_value = entry
                .category_id
                .map(|id| id.to_string())
                .unwrap_or_default();
            matches_search(
                &search,
                &[
                    &entry.word,
                    entry.description.as_deref().unwrap_or_default(),
                ],
            ) && matches_filter(category.as_deref(), &category_value)
        })
        .sort_by(sort.comparator(|e: &WordEntry| e.created_at, |e| e.word.clone()))
        .page(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

    Ok((StatusCode::OK, Json(page)))
}

/// POST /api/v1/vocabulary
#[axum::debug_handler]
async fn create_entry(
    State(state): State<AppState>,
    user: UserAuth,
    Json(request): Json<CreateWordEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    gate(&state, user.user_id).await?;

    let entry: WordEntry = WordEntryRepository::new(state.pool.clone())
        .create(user.user_id, &request)
        .await?
        .into();

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/v1/vocabulary/:entry_id
#[axum::debug_handler]
async fn update_entry(
    State(state): State<AppState>,
    user: UserAuth,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateWordEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    gate(&state, user.user_id).await?;

    let entry: WordEntry = WordEntryRepository::new(state.pool.clone())
        .update(entry_id, user.user_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Word entry not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(entry)))
}

/// DELETE /api/v1/vocabulary/:entry_id
#[axum::debug_handler]
async fn delete_entry(
    State(state): State<AppState>,
    user: UserAuth,
    Path(entry_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    gate(&state, user.user_id).await?;

    let removed = WordEntryRepository::new(state.pool.clone())
        .delete(entry_id, user.user_id)
        .await?;

    if !removed {
        return Err(ApiError::NotFound("Word entry not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
