use axum::{
    routing::{get, post},
    Router,
};
use crate::{
    handlers::{health, line_auth},
    openapi,
    server::AppState,
};

/// Create health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/version", get(health::version_info))
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/line/callback", post(line_auth::line_callback))
}

/// Create API v1 routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new().nest("/auth", auth_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(openapi::create_docs_routes())
        .nest("/api/v1", api_v1_routes())
        // Path used by existing web clients that invoke the login as a Supabase function
        .route("/functions/v1/line-auth-callback", post(line_auth::line_callback))
}
