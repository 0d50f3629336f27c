use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin, require_auth,
    trace_id, RateLimiterState,
};
use crate::routes;
use crate::services::{AudioStorage, CheckoutClient, EmailService};
use shared::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub email: EmailService,
    pub payments: Option<Arc<CheckoutClient>>,
    pub storage: AudioStorage,
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    let jwt = Arc::new(
        JwtConfig::with_leeway(
            &config.jwt.private_key,
            &config.jwt.public_key,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
            config.jwt.leeway_secs,
        )
        .map_err(|e| anyhow::anyhow!("Failed to initialize JWT keys: {}", e))?,
    );

    // Rate limiting is enabled when rate_limit_per_minute > 0
    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let email = EmailService::new(config.email.clone());
    let payments = CheckoutClient::from_config(&config.payments).map(Arc::new);
    let storage = AudioStorage::new(
        config.storage.audio_dir.clone(),
        config.limits.max_upload_size_bytes,
    );

    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
        rate_limiter,
        email,
        payments,
        storage,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/health/ready", get(routes::health::ready))
        .route("/api/health/live", get(routes::health::live))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1/auth", routes::auth::public_router());

    // Protected routes (require a valid access token)
    // Middleware order: auth runs first, then rate limiting (keyed by user)
    let protected_routes = Router::new()
        .nest("/api/v1/auth", routes::auth::session_router())
        .nest("/api/v1/grammar", routes::grammar::router())
        .nest("/api/v1/reading", routes::reading::router())
        .nest("/api/v1/listening", routes::listening::router())
        .nest("/api/v1/assets", routes::assets::router())
        .nest("/api/v1/quizzes", routes::quizzes::router())
        .nest("/api/v1/vocabulary", routes::vocabulary::router())
        .nest("/api/v1/progress", routes::progress::router())
        .nest("/api/premium", routes::premium::router())
        // Rate limiting runs after auth (needs the user id from auth)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        // Auth runs first (outermost layer = runs first)
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin routes (require the admin role on top of authentication)
    let admin_routes = Router::new()
        .nest("/api/admin/v1/users", routes::admin_users::router())
        .nest(
            "/api/admin/v1/subscriptions",
            routes::admin_users::subscriptions_router(),
        )
        .nest(
            "/api/admin/v1/grammar/categories",
            routes::admin_grammar::categories_router(),
        )
        .nest(
            "/api/admin/v1/grammar/topics",
            routes::admin_grammar::topics_router(),
        )
        .nest("/api/admin/v1/reading", routes::admin_reading::router())
        .nest("/api/admin/v1/listening", routes::admin_listening::router())
        .nest("/api/admin/v1/quizzes", routes::admin_quizzes::router())
        .nest(
            "/api/admin/v1/uploads",
            routes::admin_uploads::router().layer(DefaultBodyLimit::max(
                config.limits.max_upload_size_bytes + 64 * 1024,
            )),
        )
        .nest("/api/admin/v1/settings", routes::admin_settings::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Merge all routes
    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware)) // Prometheus metrics
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id)) // Request ID and logging
        .layer(cors)
        .with_state(state);

    Ok(app)
}
