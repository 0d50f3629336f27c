//! Admin listening exercise route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use domain::models::{
    CreateListeningExerciseRequest, ListeningExercise, ListeningListQuery,
    UpdateListeningExerciseRequest,
};
use persistence::repositories::{AudioAssetRepository, ListeningExerciseRepository};
use shared::listing::{matches_filter, matches_search, Listing, DEFAULT_PAGE_SIZE};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create admin listening exercise routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises).post(create_exercise))
        .route("/:exercise_id", put(update_exercise).delete(delete_exercise))
}

/// Uploaded audio must exist before an exercise can reference it.
async fn ensure_asset_exists(state: &AppState, asset_id: Uuid) -> Result<(), ApiError> {
    AudioAssetRepository::new(state.pool.clone())
        .find_by_id(asset_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Audio asset not found".to_string()))?;
    Ok(())
}

/// GET /api/admin/v1/listening
#[axum::debug_handler]
async fn list_exercises(
    State(state): State<AppState>,
    Query(query): Query<ListeningListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate()?;

    let exercises: Vec<ListeningExercise> = ListeningExerciseRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let search = query.search.clone().unwrap_or_default();
    let level = query.level.clone();

    let page = Listing::new(exercises)
        .filter(|exercise| {
            matches_search(&search, &[&exercise.title])
                && matches_filter(level.as_deref(), exercise.level.as_str())
        })
        .page(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

    Ok((StatusCode::OK, Json(page)))
}

/// POST /api/admin/v1/listening
#[axum::debug_handler]
async fn create_exercise(
    State(state): State<AppState>,
    admin: UserAuth,
    Json(request): Json<CreateListeningExerciseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    if let Some(asset_id) = request.audio_asset_id {
        ensure_asset_exists(&state, asset_id).await?;
    }

    let exercise: ListeningExercise = ListeningExerciseRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    tracing::info!(admin_id = %admin.user_id, exercise_id = %exercise.id, "Created listening exercise");
    Ok((StatusCode::CREATED, Json(exercise)))
}

/// PUT /api/admin/v1/listening/:exercise_id
#[axum::debug_handler]
async fn update_exercise(
    State(state): State<AppState>,
    Path(exercise_id): Path<Uuid>,
    Json(request): Json<UpdateListeningExerciseRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    if let Some(asset_id) = request.audio_asset_id {
        ensure_asset_exists(&state, asset_id).await?;
    }

    let exercise: ListeningExercise = ListeningExerciseRepository::new(state.pool.clone())
        .update(exercise_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Listening exercise not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(exercise)))
}

/// DELETE /api/admin/v1/listening/:exercise_id
#[axum::debug_handler]
async fn delete_exercise(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(exercise_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = ListeningExerciseRepository::new(state.pool.clone())
        .delete(exercise_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("Listening exercise not found".to_string()));
    }

    tracing::info!(admin_id = %admin.user_id, exercise_id = %exercise_id, "Deleted listening exercise");
    Ok(StatusCode::NO_CONTENT)
}
