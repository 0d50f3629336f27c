//! Quiz route handlers: taking quizzes and the daily entitlement gate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use domain::models::{Question, QuizResult, QuizSubmission, QuizView};
use domain::services::{grade_submission, quiz_allowance, QuizAllowance};
use persistence::repositories::{AppSettingsRepository, QuizAttemptRepository, QuizRepository};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/allowance", get(get_allowance))
        .route("/:quiz_id", get(get_quiz))
        .route("/:quiz_id/attempts", post(submit_attempt))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceResponse {
    pub can_take: bool,
    /// Remaining quizzes today; absent means unlimited.
    pub remaining: Option<u32>,
    pub used_today: u32,
    /// The configured free-tier daily limit; absent for premium users.
    pub daily_limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResponse {
    pub result: QuizResult,
    /// Remaining quizzes after this attempt; absent means unlimited.
    pub remaining: Option<u32>,
}

/// Computes the caller's allowance from settings, usage, and premium state.
async fn current_allowance(
    state: &AppState,
    user_id: Uuid,
) -> Result<(QuizAllowance, u32, i32), ApiError> {
    let settings = AppSettingsRepository::new(state.pool.clone())
        .get_or_default()
        .await?;
    let used_today = QuizAttemptRepository::new(state.pool.clone())
        .count_today(user_id)
        .await? as u32;

    let profile = super::load_profile(state, user_id).await?;
    let is_premium = profile.premium_state().has_premium_access(Utc::now());

    let max_free = settings.max_free_quizzes_per_day.max(0) as u32;
    let allowance = quiz_allowance(used_today, max_free, is_premium);

    Ok((allowance, used_today, settings.max_free_quizzes_per_day))
}

/// GET /api/v1/quizzes/allowance
#[axum::debug_handler]
async fn get_allowance(
    State(state): State<AppState>,
    user: UserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let (allowance, used_today, daily_limit) = current_allowance(&state, user.user_id).await?;

    let response = AllowanceResponse {
        can_take: allowance.can_take(),
        remaining: allowance.remaining(),
        used_today,
        daily_limit: allowance.remaining().map(|_| daily_limit.max(0) as u32),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// GET /api/v1/quizzes/:quiz_id - the quiz with correct answers stripped.
#[axum::debug_handler]
async fn get_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = QuizRepository::new(state.pool.clone());

    let quiz = repo
        .find_quiz(quiz_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Quiz not found".to_string()))?;

    let questions: Vec<Question> = repo
        .list_questions(quiz_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let quiz = domain::models::Quiz {
        id: quiz.id,
        title: quiz.title,
        created_at: quiz.created_at,
        questions,
    };

    Ok((StatusCode::OK, Json(QuizView::from(&quiz))))
}

/// POST /api/v1/quizzes/:quiz_id/attempts
///
/// Grades the submission and records the attempt. The daily limit is
/// enforced here, not just surfaced to the UI.
#[axum::debug_handler]
async fn submit_attempt(
    State(state): State<AppState>,
    user: UserAuth,
    Path(quiz_id): Path<Uuid>,
    Json(submission): Json<QuizSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    let (allowance, _, _) = current_allowance(&state, user.user_id).await?;
    if !allowance.can_take() {
        return Err(ApiError::PremiumRequired(
            "Daily free quiz limit reached".to_string(),
        ));
    }

    let repo = QuizRepository::new(state.pool.clone());
    repo.find_quiz(quiz_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Quiz not found".to_string()))?;

    let questions: Vec<Question> = repo
        .list_questions(quiz_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let result = grade_submission(&questions, &submission.answers);

    QuizAttemptRepository::new(state.pool.clone())
        .insert(user.user_id, quiz_id, result.score, result.max_score)
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        quiz_id = %quiz_id,
        score = result.score,
        max_score = result.max_score,
        "Quiz attempt recorded"
    );

    // Report the allowance after this attempt.
    let (after, _, _) = current_allowance(&state, user.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(AttemptResponse {
            result,
            remaining: after.remaining(),
        }),
    ))
}
