//! JWT authentication middleware.
//!
//! `require_auth` validates the Bearer token and stores the authenticated
//! user in request extensions. `require_admin` runs inside it and checks the
//! token's role claim plus the database admin flag, so a stale claim cannot
//! outlive a demotion.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use persistence::repositories::ProfileRepository;
use serde_json::json;
use shared::jwt::{extract_user_id, TokenRole};
use uuid::Uuid;

use crate::app::AppState;

/// Authenticated user information extracted from the JWT.
#[derive(Debug, Clone)]
pub struct UserAuth {
    /// User ID from the JWT subject claim.
    pub user_id: Uuid,
    /// Role the token was issued for.
    pub role: TokenRole,
    /// JWT ID (jti) for log correlation.
    pub jti: String,
}

/// Middleware that requires JWT user authentication.
///
/// Validates the Bearer token in the Authorization header and rejects
/// requests without a valid access token. Authenticated user information is
/// stored in request extensions for downstream handlers and middleware.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let claims = match state.jwt.validate_access_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("JWT validation failed: {}", e);
            return unauthorized_response("Invalid or expired token");
        }
    };

    let user_id = match extract_user_id(&claims) {
        Ok(user_id) => user_id,
        Err(_) => return unauthorized_response("Invalid user ID in token"),
    };

    req.extensions_mut().insert(UserAuth {
        user_id,
        role: claims.role,
        jti: claims.jti,
    });

    next.run(req).await
}

/// Middleware that requires an admin user.
///
/// Must run after `require_auth`. Rejects tokens without the admin role and
/// re-checks the database flag.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let auth = match req.extensions().get::<UserAuth>() {
        Some(auth) => auth.clone(),
        None => return unauthorized_response("Authentication required"),
    };

    if auth.role != TokenRole::Admin {
        return forbidden_response("Admin access required");
    }

    let repo = ProfileRepository::new(state.pool.clone());
    match repo.find_by_id(auth.user_id).await {
        Ok(Some(profile)) if profile.is_admin => next.run(req).await,
        Ok(_) => forbidden_response("Admin access required"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to verify admin flag");
            internal_error_response("Authorization check failed")
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "unauthorized",
            "message": message
        })),
    )
        .into_response()
}

fn forbidden_response(message: &str) -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "forbidden",
            "message": message
        })),
    )
        .into_response()
}

fn internal_error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": message
        })),
    )
        .into_response()
}
