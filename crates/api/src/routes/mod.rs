//! HTTP route handlers.

pub mod admin_grammar;
pub mod admin_listening;
pub mod admin_quizzes;
pub mod admin_reading;
pub mod admin_settings;
pub mod admin_uploads;
pub mod admin_users;
pub mod assets;
pub mod auth;
pub mod grammar;
pub mod health;
pub mod listening;
pub mod premium;
pub mod progress;
pub mod quizzes;
pub mod reading;
pub mod vocabulary;

use chrono::Utc;
use domain::models::Profile;
use persistence::repositories::ProfileRepository;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Loads the authenticated user's profile, rejecting tokens whose account
/// has been removed.
pub(crate) async fn load_profile(state: &AppState, user_id: Uuid) -> Result<Profile, ApiError> {
    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;
    Ok(profile.into())
}

/// The premium paywall: derived subscription status must be active.
pub(crate) fn ensure_premium(profile: &Profile) -> Result<(), ApiError> {
    if profile.premium_state().has_premium_access(Utc::now()) {
        Ok(())
    } else {
        Err(ApiError::PremiumRequired(
            "This feature requires a premium subscription".to_string(),
        ))
    }
}
