//! Admin grammar catalogue route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use domain::models::{
    CategoryListQuery, CreateGrammarCategoryRequest, CreateGrammarTopicRequest, GrammarCategory,
    GrammarTopic, TopicListQuery, UpdateGrammarCategoryRequest, UpdateGrammarTopicRequest,
};
use persistence::repositories::{GrammarCategoryRepository, GrammarTopicRepository};
use shared::listing::{matches_filter, matches_search, Listing, DEFAULT_PAGE_SIZE};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create admin grammar category routes.
pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:category_id", put(update_category).delete(delete_category))
        .route("/:category_id/toggle", post(toggle_category))
}

/// Create admin grammar topic routes.
pub fn topics_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_topics).post(create_topic))
        .route("/:topic_id", put(update_topic).delete(delete_topic))
}

/// GET /api/admin/v1/grammar/categories
#[axum::debug_handler]
async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate()?;

    let categories: Vec<GrammarCategory> = GrammarCategoryRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let search = query.search.clone().unwrap_or_default();
    let status = query.status.clone();

    let page = Listing::new(categories)
        .filter(|category| {
            let active_label = if category.is_active { "active" } else { "inactive" };
            matches_search(&search, &[&category.name, &category.slug])
                && matches_filter(status.as_deref(), active_label)
        })
        .page(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

    Ok((StatusCode::OK, Json(page)))
}

/// POST /api/admin/v1/grammar/categories
#[axum::debug_handler]
async fn create_category(
    State(state): State<AppState>,
    admin: UserAuth,
    Json(request): Json<CreateGrammarCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let category: GrammarCategory = GrammarCategoryRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    tracing::info!(admin_id = %admin.user_id, category_id = %category.id, "Created grammar category");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/admin/v1/grammar/categories/:category_id
#[axum::debug_handler]
async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(request): Json<UpdateGrammarCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let category: GrammarCategory = GrammarCategoryRepository::new(state.pool.clone())
        .update(category_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(category)))
}

/// POST /api/admin/v1/grammar/categories/:category_id/toggle
#[axum::debug_handler]
async fn toggle_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let category: GrammarCategory = GrammarCategoryRepository::new(state.pool.clone())
        .toggle_active(category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Category not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(category)))
}

/// DELETE /api/admin/v1/grammar/categories/:category_id
#[axum::debug_handler]
async fn delete_category(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(category_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = GrammarCategoryRepository::new(state.pool.clone())
        .delete(category_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    tracing::info!(admin_id = %admin.user_id, category_id = %category_id, "Deleted grammar category");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/v1/grammar/topics
#[axum::debug_handler]
async fn list_topics(
    State(state): State<AppState>,
    Query(query): Query<TopicListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate()?;

    let topics: Vec<GrammarTopic> = GrammarTopicRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let search = query.search.clone().unwrap_or_default();
    let category = query.category.clone();

    let page = Listing::new(topics)
        .filter(|topic| {
            matches_search(&search, &[&topic.title])
                && matches_filter(category.as_deref(), &topic.category_id.to_string())
        })
        .page(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

    Ok((StatusCode::OK, Json(page)))
}

/// POST /api/admin/v1/grammar/topics
#[axum::debug_handler]
async fn create_topic(
    State(state): State<AppState>,
    admin: UserAuth,
    Json(request): Json<CreateGrammarTopicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let topic: GrammarTopic = GrammarTopicRepository::new(state.pool.clone())
        .create(&request)
        .await?
        .into();

    tracing::info!(admin_id = %admin.user_id, topic_id = %topic.id, "Created grammar topic");
    Ok((StatusCode::CREATED, Json(topic)))
}

/// PUT /api/admin/v1/grammar/topics/:topic_id
#[axum::debug_handler]
async fn update_topic(
    State(state): State<AppState>,
    Path(topic_id): Path<Uuid>,
    Json(request): Json<UpdateGrammarTopicRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let topic: GrammarTopic = GrammarTopicRepository::new(state.pool.clone())
        .update(topic_id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Topic not found".to_string()))?
        .into();

    Ok((StatusCode::OK, Json(topic)))
}

/// DELETE /api/admin/v1/grammar/topics/:topic_id
#[axum::debug_handler]
async fn delete_topic(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(topic_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = GrammarTopicRepository::new(state.pool.clone())
        .delete(topic_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("Topic not found".to_string()));
    }

    tracing::info!(admin_id = %admin.user_id, topic_id = %topic_id, "Deleted grammar topic");
    Ok(StatusCode::NO_CONTENT)
}
