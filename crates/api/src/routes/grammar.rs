//! Learner-facing grammar catalogue route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use domain::models::{GrammarCategory, GrammarTopic};
use persistence::repositories::{GrammarCategoryRepository, GrammarTopicRepository};
use serde::Serialize;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/:category_id/topics", get(list_topics))
        .route("/topics/:topic_id", get(get_topic))
}

/// A topic as listed in the catalogue: enough to render the list with lock
/// badges, without leaking premium content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub is_premium: bool,
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
}

impl From<GrammarTopic> for TopicSummary {
    fn from(topic: GrammarTopic) -> Self {
        Self {
            id: topic.id,
            category_id: topic.category_id,
            title: topic.title,
            is_premium: topic.is_premium,
            order_index: topic.order_index,
            quiz_id: topic.quiz_id,
        }
    }
}

/// GET /api/v1/grammar/categories - active categories only.
#[axum::debug_handler]
async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let categories: Vec<GrammarCategory> = GrammarCategoryRepository::new(state.pool.clone())
        .list_active()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(categories)))
}

/// GET /api/v1/grammar/categories/:category_id/topics
#[axum::debug_handler]
async fn list_topics(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let category = GrammarCategoryRepository::new(state.pool.clone())
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?;

    if !category.is_active {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    let topics: Vec<TopicSummary> = GrammarTopicRepository::new(state.pool.clone())
        .list_by_category(category_id)
        .await?
        .into_iter()
        .map(GrammarTopic::from)
        .map(TopicSummary::from)
        .collect();

    Ok((StatusCode::OK, Json(topics)))
}

/// GET /api/v1/grammar/topics/:topic_id - full topic, premium-gated.
#[axum::debug_handler]
async fn get_topic(
    State(state): State<AppState>,
    user: UserAuth,
    Path(topic_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let topic: GrammarTopic = GrammarTopicRepository::new(state.pool.clone())
        .find_by_id(topic_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?
        .into();

    if topic.is_premium {
        let profile = super::load_profile(&state, user.user_id).await?;
        super::ensure_premium(&profile)?;
    }

    Ok((StatusCode::OK, Json(topic)))
}
