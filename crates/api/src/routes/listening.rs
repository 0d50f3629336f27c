//! Learner-facing listening exercise route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use domain::models::{LanguageLevel, ListeningExercise, ListeningListQuery};
use persistence::repositories::ListeningExerciseRepository;
use serde::Serialize;
use shared::listing::{matches_filter, matches_search, Listing, DEFAULT_PAGE_SIZE};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exercises))
        .route("/:exercise_id", get(get_exercise))
}

/// An exercise as listed in the catalogue, without its transcript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListeningSummary {
    pub id: Uuid,
    pub title: String,
    pub level: LanguageLevel,
    pub duration_secs: i32,
    pub is_premium: bool,
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
}

impl From<ListeningExercise> for ListeningSummary {
    fn from(exercise: ListeningExercise) -> Self {
        Self {
            id: exercise.id,
            title: exercise.title,
            level: exercise.level,
            duration_secs: exercise.duration_secs,
            is_premium: exercise.is_premium,
            order_index: exercise.order_index,
            quiz_id: exercise.quiz_id,
        }
    }
}

/// GET /api/v1/listening - the catalogue, filtered and paginated in memory.
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
        )
        .map(ListeningSummary::from);

    Ok((StatusCode::OK, Json(page)))
}

/// GET /api/v1/listening/:exercise_id - full exercise, premium-gated.
#[axum::debug_handler]
async fn get_exercise(
    State(state): State<AppState>,
    user: UserAuth,
    Path(exercise_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let exercise: ListeningExercise = ListeningExerciseRepository::new(state.pool.clone())
        .find_by_id(exercise_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Listening exercise not found".to_string()))?
        .into();

    if exercise.is_premium {
        let profile = super::load_profile(&state, user.user_id).await?;
        super::ensure_premium(&profile)?;
    }

    Ok((StatusCode::OK, Json(exercise)))
}
