//! Admin quiz authoring route handlers (the question builder).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post, put},
    Json, Router,
};
use domain::models::{
    CreateQuestionRequest, CreateQuizRequest, Question, QuestionType, Quiz,
    UpdateQuestionRequest,
};
use domain::services::{mark_option_correct, set_question_type, QuestionEditError};
use persistence::repositories::QuizRepository;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create admin quiz authoring routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_quiz))
        .route("/:quiz_id", axum::routing::get(get_quiz).delete(delete_quiz))
        .route("/:quiz_id/questions", post(create_question))
        .route("/questions/:question_id", put(update_question))
        .route("/questions/:question_id", delete(delete_question))
        .route("/questions/:question_id/type", post(change_question_type))
        .route(
            "/questions/:question_id/options/:option_index/correct",
            post(mark_correct_option),
        )
}

impl From<QuestionEditError> for ApiError {
    fn from(err: QuestionEditError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeQuestionTypeRequest {
    pub question_type: QuestionType,
}

/// Authoring-side sanity checks on an incoming question shape.
fn validate_question_shape(
    question_type: QuestionType,
    options_len: usize,
    correct_count: usize,
    correct_answer: Option<&str>,
) -> Result<(), ApiError> {
    match question_type {
        QuestionType::FillBlank => {
            if correct_answer.map(|a| a.trim().is_empty()).unwrap_or(true) {
                return Err(ApiError::Validation(
                    "Fill-in-the-blank questions need a correct answer".to_string(),
                ));
            }
        }
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            if options_len < 2 {
                return Err(ApiError::Validation(
                    "Choice questions need at least two options".to_string(),
                ));
            }
            // Single-answer invariant: never more than one correct option.
            if correct_count > 1 {
                return Err(ApiError::Validation(
                    "Choice questions can have only one correct option".to_string(),
                ));
            }
        }
    }
    Ok(())
}

async fn load_question(repo: &QuizRepository, question_id: Uuid) -> Result<Question, ApiError> {
    Ok(repo
        .find_question(question_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Question not found".to_string()))?
        .into())
}

async fn save_question(repo: &QuizRepository, question: &Question) -> Result<Question, ApiError> {
    Ok(repo
        .save_question(question)
        .await?
        .ok_or_else(|| ApiError::NotFound("Question not found".to_string()))?
        .into())
}

/// POST /api/admin/v1/quizzes
#[axum::debug_handler]
async fn create_quiz(
    State(state): State<AppState>,
    admin: UserAuth,
    Json(request): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let quiz = QuizRepository::new(state.pool.clone())
        .create_quiz(&request.title)
        .await?;

    tracing::info!(admin_id = %admin.user_id, quiz_id = %quiz.id, "Created quiz");

    let quiz = Quiz {
        id: quiz.id,
        title: quiz.title,
        created_at: quiz.created_at,
        questions: vec![],
    };
    Ok((StatusCode::CREATED, Json(quiz)))
}

/// GET /api/admin/v1/quizzes/:quiz_id - full quiz including answers.
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

    let quiz = Quiz {
        id: quiz.id,
        title: quiz.title,
        created_at: quiz.created_at,
        questions,
    };

    Ok((StatusCode::OK, Json(quiz)))
}

/// DELETE /api/admin/v1/quizzes/:quiz_id
#[axum::debug_handler]
async fn delete_quiz(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(quiz_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = QuizRepository::new(state.pool.clone())
        .delete_quiz(quiz_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("Quiz not found".to_string()));
    }

    tracing::info!(admin_id = %admin.user_id, quiz_id = %quiz_id, "Deleted quiz");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/v1/quizzes/:quiz_id/questions
#[axum::debug_handler]
async fn create_question(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Json(request): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    validate_question_shape(
        request.question_type,
        request.options.len(),
        request.options.iter().filter(|o| o.is_correct).count(),
        request.correct_answer.as_deref(),
    )?;

    let repo = QuizRepository::new(state.pool.clone());
    repo.find_quiz(quiz_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Quiz not found".to_string()))?;

    let question: Question = repo.create_question(quiz_id, &request).await?.into();

    Ok((StatusCode::CREATED, Json(question)))
}

/// PUT /api/admin/v1/quizzes/questions/:question_id
#[axum::debug_handler]
async fn update_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(request): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = QuizRepository::new(state.pool.clone());
    let mut question = load_question(&repo, question_id).await?;

    if let Some(text) = request.text {
        question.text = text;
    }
    if let Some(options) = request.options {
        question.options = options;
    }
    if let Some(correct_answer) = request.correct_answer {
        question.correct_answer = Some(correct_answer);
    }
    if let Some(points) = request.points {
        question.points = points;
    }
    if let Some(order_index) = request.order_index {
        question.order_index = order_index;
    }

    validate_question_shape(
        question.question_type,
        question.options.len(),
        question.options.iter().filter(|o| o.is_correct).count(),
        question.correct_answer.as_deref(),
    )?;

    let question = save_question(&repo, &question).await?;
    Ok((StatusCode::OK, Json(question)))
}

/// DELETE /api/admin/v1/quizzes/questions/:question_id
#[axum::debug_handler]
async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = QuizRepository::new(state.pool.clone())
        .delete_question(question_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/v1/quizzes/questions/:question_id/type
///
/// Switching the type reshapes the option set for the new type.
#[axum::debug_handler]
async fn change_question_type(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(request): Json<ChangeQuestionTypeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = QuizRepository::new(state.pool.clone());
    let mut question = load_question(&repo, question_id).await?;

    set_question_type(&mut question, request.question_type);

    let question = save_question(&repo, &question).await?;
    Ok((StatusCode::OK, Json(question)))
}

/// POST /api/admin/v1/quizzes/questions/:question_id/options/:option_index/correct
///
/// Marks one option correct and clears its siblings (single-answer
/// invariant).
#[axum::debug_handler]
async fn mark_correct_option(
    State(state): State<AppState>,
    Path((question_id, option_index)): Path<(Uuid, usize)>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = QuizRepository::new(state.pool.clone());
    let mut question = load_question(&repo, question_id).await?;

    mark_option_correct(&mut question, option_index)?;

    let question = save_question(&repo, &question).await?;
    Ok((StatusCode::OK, Json(question)))
}
