use crate::server::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,
        crate::handlers::line_auth::line_callback,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,
            crate::handlers::line_auth::LineAuthRequest,
            crate::handlers::line_auth::LineAuthResponse,
            crate::handlers::line_auth::LineProfileView,
            crate::error::ApiErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness and build information"),
        (name = "authentication", description = "LINE Login code exchange"),
    ),
    info(
        title = "LINE Auth API",
        version = "1.0.0",
        description = "Exchanges LINE Login authorization codes for Supabase sessions, creating the account on first login."
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn create_docs_routes() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
