//! LINE login exchange server
//!
//! Receives the authorization code produced by LINE Login, exchanges it for a
//! provider access token, reads the LINE profile and signs the user in to the
//! Supabase project, creating the account on first login.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod services;

pub use config::{AppConfig, Args};
pub use error::*;
pub use server::AppState;

use axum::{middleware::from_fn, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = middleware::create_cors_layer(&state.config.cors_allowed_origins);

    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(state)
}
