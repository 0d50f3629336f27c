//! Admin user management route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use domain::models::{AdminUpdateUserRequest, GrantPremiumRequest, Profile, UserListQuery};
use domain::services::SubscriptionStatus;
use persistence::repositories::{ProfileRepository, QuizAttemptRepository};
use serde::Serialize;
use shared::listing::{matches_filter, matches_search, Listing, DEFAULT_PAGE_SIZE};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

/// Create admin user management routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/:user_id", get(get_user_detail))
        .route("/:user_id", put(update_user))
        .route("/:user_id", delete(remove_user))
        .route("/:user_id/premium/grant", post(grant_premium))
        .route("/:user_id/premium/cancel", post(cancel_premium))
}

/// Create the premium subscriptions listing routes.
pub fn subscriptions_router() -> Router<AppState> {
    Router::new().route("/", get(list_subscriptions))
}

/// A user row with its derived subscription status attached. The status is
/// computed per request; it is never stored, so it can never drift.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserView {
    pub user: Profile,
    pub subscription: SubscriptionStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserDetail {
    pub user: Profile,
    pub subscription: SubscriptionStatus,
    pub quiz_attempts_today: u32,
}

fn to_view(profile: Profile, now: chrono::DateTime<Utc>) -> AdminUserView {
    let subscription = profile.premium_state().status(now);
    AdminUserView {
        user: profile,
        subscription,
    }
}

/// GET /api/admin/v1/users
///
/// Loads all profiles and runs the list pipeline in memory: the status
/// filter works on the derived subscription state, which the store cannot
/// be queried for.
#[axum::debug_handler]
async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate()?;

    let now = Utc::now();
    let users: Vec<AdminUserView> = ProfileRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(Profile::from)
        .map(|profile| to_view(profile, now))
        .collect();

    let search = query.search.clone().unwrap_or_default();
    let status = query.status.clone();

    let page = Listing::new(users)
        .filter(|row| {
            matches_search(
                &search,
                &[
                    &row.user.email,
                    row.user.full_name.as_deref().unwrap_or_default(),
                ],
            ) && matches_filter(status.as_deref(), row.subscription.label())
        })
        .page(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

    Ok((StatusCode::OK, Json(page)))
}

/// GET /api/admin/v1/subscriptions
///
/// The premium dashboard: only users with some premium history, with their
/// derived status.
#[axum::debug_handler]
async fn list_subscriptions(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    query.validate()?;

    let now = Utc::now();
    let users: Vec<AdminUserView> = ProfileRepository::new(state.pool.clone())
        .list_all()
        .await?
        .into_iter()
        .map(Profile::from)
        .filter(|p| {
            p.is_premium || p.premium_expires_at.is_some() || p.premium_cancelled_at.is_some()
        })
        .map(|profile| to_view(profile, now))
        .collect();

    let search = query.search.clone().unwrap_or_default();
    let status = query.status.clone();

    let page = Listing::new(users)
        .filter(|row| {
            matches_search(
                &search,
                &[
                    &row.user.email,
                    row.user.full_name.as_deref().unwrap_or_default(),
                ],
            ) && matches_filter(status.as_deref(), row.subscription.label())
        })
        .page(
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

    Ok((StatusCode::OK, Json(page)))
}

/// GET /api/admin/v1/users/:user_id
#[axum::debug_handler]
async fn get_user_detail(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let profile: Profile = ProfileRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    let quiz_attempts_today = QuizAttemptRepository::new(state.pool.clone())
        .count_today(user_id)
        .await? as u32;

    let subscription = profile.premium_state().status(Utc::now());

    Ok((
        StatusCode::OK,
        Json(AdminUserDetail {
            user: profile,
            subscription,
            quiz_attempts_today,
        }),
    ))
}

/// PUT /api/admin/v1/users/:user_id
#[axum::debug_handler]
async fn update_user(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(user_id): Path<Uuid>,
    Json(request): Json<AdminUpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    // Admins cannot strip their own admin flag.
    if user_id == admin.user_id && request.is_admin == Some(false) {
        return Err(ApiError::Conflict(
            "Cannot remove your own admin access".to_string(),
        ));
    }

    let profile: Profile = ProfileRepository::new(state.pool.clone())
        .update_user(user_id, request.full_name.as_deref(), request.is_admin)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    tracing::info!(admin_id = %admin.user_id, user_id = %user_id, "Admin updated user");
    Ok((StatusCode::OK, Json(to_view(profile, Utc::now()))))
}

/// DELETE /api/admin/v1/users/:user_id
#[axum::debug_handler]
async fn remove_user(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    if user_id == admin.user_id {
        return Err(ApiError::Conflict(
            "Cannot delete your own account".to_string(),
        ));
    }

    let removed = ProfileRepository::new(state.pool.clone())
        .delete(user_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    tracing::info!(admin_id = %admin.user_id, user_id = %user_id, "Admin removed user");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/v1/users/:user_id/premium/grant
#[axum::debug_handler]
async fn grant_premium(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(user_id): Path<Uuid>,
    Json(request): Json<GrantPremiumRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    if let Some(expires_at) = request.expires_at {
        if expires_at <= Utc::now() {
            return Err(ApiError::Validation(
                "Expiry must be in the future".to_string(),
            ));
        }
    }

    let profile: Profile = ProfileRepository::new(state.pool.clone())
        .activate_premium(user_id, request.expires_at, None, None)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    tracing::info!(admin_id = %admin.user_id, user_id = %user_id, "Admin granted premium");
    Ok((StatusCode::OK, Json(to_view(profile, Utc::now()))))
}

/// POST /api/admin/v1/users/:user_id/premium/cancel
#[axum::debug_handler]
async fn cancel_premium(
    State(state): State<AppState>,
    admin: UserAuth,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();
    let profile: Profile = ProfileRepository::new(state.pool.clone())
        .cancel_premium(user_id, now)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?
        .into();

    tracing::info!(admin_id = %admin.user_id, user_id = %user_id, "Admin cancelled premium");
    Ok((StatusCode::OK, Json(to_view(profile, now))))
}
