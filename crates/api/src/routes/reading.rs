//! Learner-facing reading text route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use domain::models::{LanguageLevel, ReadingListQuery, ReadingText};
use persistence::repositories::ReadingTextRepository;
use serde::Serialize;
use shared::listing::{matches_filter, matches_search, Listing, DEFAULT_PAGE_SIZE};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_texts))
        .route("/:text_id", get(get_text))
}

/// A text as listed in the catalogue, without its content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSummary {
    pub id: Uuid,
    pub title: String,
    pub level: LanguageLevel,
    pub is_premium: bool,
    pub order_index: i32,
    pub quiz_id: Option<Uuid>,
}

impl From<ReadingText> for ReadingSummary {
    fn from(text: ReadingText) -> Self {
        Self {
            id: text.id,
            title: text.title,
            level: text.level,
            is_premium: text.is_premium,
            order_index: text.order_index,
            quiz_id: text.quiz_id,
        }
    }
}

/// GET /api/v1/reading - the catalogue, filtered and paginated in memory.
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
        listing = listing.sort_by(sort.comparator(|t: &ReadingText| t.created_at, |t| t.title.clone()));
    }

    let page = listing
        .page(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .map(ReadingSummary::from);

    Ok((StatusCode::OK, Json(page)))
}

/// GET /api/v1/reading/:text_id - full text, premium-gated.
#[axum::debug_handler]
async fn get_text(
    State(state): State<AppState>,
    user: UserAuth,
    Path(text_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let text: ReadingText = ReadingTextRepository::new(state.pool.clone())
        .find_by_id(text_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reading text not found".to_string()))?
        .into();

    if text.is_premium {
        let profile = super::load_profile(&state, user.user_id).await?;
        super::ensure_premium(&profile)?;
    }

    Ok((StatusCode::OK, Json(text)))
}
