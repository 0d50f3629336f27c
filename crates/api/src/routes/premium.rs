//! Premium checkout route handlers.
//!
//! `create-checkout` starts a hosted checkout session and hands the redirect
//! URL back to the client. `verify` is polled by the client after the
//! redirect (up to 3 times with a 2-second backoff on its side) and flips
//! the profile to premium once the provider reports the session complete.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use domain::services::SubscriptionStatus;
use persistence::repositories::ProfileRepository;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::services::PaymentsError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-checkout", post(create_checkout))
        .route("/verify", get(verify))
}

impl From<PaymentsError> for ApiError {
    fn from(err: PaymentsError) -> Self {
        match err {
            PaymentsError::Disabled => {
                ApiError::ServiceUnavailable("Payments are not enabled".to_string())
            }
            PaymentsError::Provider { status: 404, .. } => {
                ApiError::NotFound("Checkout session not found".to_string())
            }
            PaymentsError::Provider { status, message } => {
                tracing::error!(status = status, message = %message, "Checkout provider error");
                ApiError::ServiceUnavailable("Checkout provider error".to_string())
            }
            PaymentsError::Http(msg) => {
                tracing::error!(error = %msg, "Checkout provider unreachable");
                ApiError::ServiceUnavailable("Checkout provider unreachable".to_string())
            }
            PaymentsError::InvalidResponse(msg) => {
                ApiError::Internal(format!("Unexpected provider response: {}", msg))
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutResponse {
    pub session_id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyQuery {
    pub session_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    /// complete / pending / expired
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionStatus>,
}

/// POST /api/premium/create-checkout
#[axum::debug_handler]
async fn create_checkout(
    State(state): State<AppState>,
    user: UserAuth,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state
        .payments
        .as_ref()
        .ok_or(PaymentsError::Disabled)?
        .clone();

    let profile = super::load_profile(&state, user.user_id).await?;

    let session = payments
        .create_session(profile.id, &profile.email)
        .await?;

    tracing::info!(user_id = %profile.id, session_id = %session.id, "Checkout session created");

    Ok((
        StatusCode::OK,
        Json(CreateCheckoutResponse {
            session_id: session.id,
            url: session.url,
        }),
    ))
}

/// GET /api/premium/verify?sessionId=...
#[axum::debug_handler]
async fn verify(
    State(state): State<AppState>,
    user: UserAuth,
    Query(query): Query<VerifyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state
        .payments
        .as_ref()
        .ok_or(PaymentsError::Disabled)?
        .clone();

    let session = payments.fetch_session(&query.session_id).await?;

    if session.is_complete() {
        let profile = ProfileRepository::new(state.pool.clone())
            .activate_premium(
                user.user_id,
                session.period_end(),
                session.customer.as_deref(),
                session.subscription.as_deref(),
            )
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let profile: domain::models::Profile = profile.into();
        tracing::info!(user_id = %profile.id, "Premium activated via checkout");

        return Ok((
            StatusCode::OK,
            Json(VerifyResponse {
                status: "complete",
                subscription: Some(profile.premium_state().status(Utc::now())),
            }),
        ));
    }

    let status = if session.is_open() { "pending" } else { "expired" };

    Ok((
        StatusCode::OK,
        Json(VerifyResponse {
            status,
            subscription: None,
        }),
    ))
}
