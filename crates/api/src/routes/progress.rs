//! Learner progress route handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use domain::services::{category_progress, CategoryProgress, TopicAttempt};
use persistence::repositories::QuizAttemptRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

pub fn router() -> Router<AppState> {
    Router::new().route("/categories", get(get_category_progress))
}

/// GET /api/v1/progress/categories - per-category quiz score roll-up.
#[axum::debug_handler]
async fn get_category_progress(
    State(state): State<AppState>,
    user: UserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let attempts: Vec<TopicAttempt> = QuizAttemptRepository::new(state.pool.clone())
        .category_attempts(user.user_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let progress: Vec<CategoryProgress> = category_progress(&attempts);

    Ok((StatusCode::OK, Json(progress)))
}
